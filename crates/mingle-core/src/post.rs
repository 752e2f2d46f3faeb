//! Post types and the minute-precision timestamp they carry

use crate::user::UserId;
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// Render/parse format for post timestamps, as written to the posts store
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Local wall-clock time at minute precision
///
/// Seconds are dropped at construction so a value survives a round trip
/// through the `YYYY-MM-DD HH:MM` record format unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Current local time, truncated to the minute
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        let truncated = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);
        Self(truncated)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl std::str::FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map(Self)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A post authored by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Author's user id
    pub author: UserId,

    /// Post body, a single line of 1-5000 characters
    pub content: String,

    /// When the post was created
    pub posted_at: Timestamp,
}

impl Post {
    /// Create a post stamped with the current local time
    pub fn new(author: UserId, content: impl Into<String>) -> Self {
        Self {
            author,
            content: content.into(),
            posted_at: Timestamp::now(),
        }
    }
}
