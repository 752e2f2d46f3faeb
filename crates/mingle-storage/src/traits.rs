//! Storage backend trait definitions

use crate::error::StorageResult;
use mingle_core::Snapshot;

/// Trait for storage backend implementations
///
/// Backends move whole snapshots: the engine is rebuilt from one load at
/// startup and flattened into one save on exit. There is no row-level
/// traffic in between.
pub trait StorageBackend {
    /// Load the persisted snapshot
    ///
    /// A backend with nothing persisted yet returns an empty snapshot
    /// rather than an error.
    fn load(&self) -> StorageResult<Snapshot>;

    /// Save a snapshot, replacing whatever was persisted before
    fn save(&mut self, snapshot: &Snapshot) -> StorageResult<()>;
}
