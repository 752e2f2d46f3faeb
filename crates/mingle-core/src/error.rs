//! Error types for the social graph engine

use crate::limits::ValidationError;
use crate::user::UserId;
use thiserror::Error;

/// Result type alias using the engine's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Engine error types
///
/// Everything here is locally recoverable; callers re-prompt or skip the
/// operation rather than terminating.
#[derive(Error, Debug)]
pub enum Error {
    #[error("User does not exist: {0}")]
    UserNotFound(UserId),

    #[error("One or both users do not exist: {a}, {b}")]
    UnknownEndpoints { a: UserId, b: UserId },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}
