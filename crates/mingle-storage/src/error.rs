//! Storage error types

use thiserror::Error;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed {store} record at line {line}: {reason}")]
    Malformed {
        store: &'static str,
        line: usize,
        reason: String,
    },
}

impl StorageError {
    pub(crate) fn malformed(
        store: &'static str,
        line: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            store,
            line,
            reason: reason.into(),
        }
    }
}
