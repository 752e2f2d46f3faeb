//! Mingle Core - In-memory social graph engine
//!
//! This crate provides the data types and operations for the Mingle
//! social network: users, friendships, posts, and feed composition.

pub mod error;
pub mod feed;
pub mod friendship;
pub mod limits;
pub mod network;
pub mod post;
pub mod store;
pub mod user;

pub use error::{Error, Result};
pub use feed::FeedEntry;
pub use friendship::{Friendship, FriendshipGraph};
pub use limits::ValidationError;
pub use network::{Snapshot, SocialNetwork};
pub use post::{Post, Timestamp, TIMESTAMP_FORMAT};
pub use store::EntityStore;
pub use user::{User, UserId};
