//! User (vertex) types

use serde::Serialize;

/// Unique identifier for a user
///
/// Ids are small integers allocated monotonically starting at 1 and are
/// never reused, including across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user in the social network (a vertex of the friendship graph)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Display and login name (unique across users, case-sensitive)
    pub username: String,

    /// Login password, stored as entered
    ///
    /// Kept out of every serialized view; only the flat users store writes
    /// it, verbatim, as its own record line.
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    /// Create a user record with the given id
    pub fn new(id: UserId, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            password: password.into(),
        }
    }
}
