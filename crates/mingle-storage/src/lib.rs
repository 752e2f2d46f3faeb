//! Mingle Storage - Storage backends for the social network
//!
//! This crate provides the persistence gateway between the in-memory
//! engine and durable storage, moving whole snapshots in either direction.

pub mod error;
pub mod flat_file;
pub mod memory;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use flat_file::FlatFileStorage;
pub use memory::MemoryStorage;
pub use traits::StorageBackend;
