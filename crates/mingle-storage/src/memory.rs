//! In-memory storage backend
//!
//! Keeps the snapshot in process memory. Useful for tests and for running
//! a session without a data directory.

use crate::error::StorageResult;
use crate::traits::StorageBackend;
use mingle_core::Snapshot;

/// Storage backend that never touches the filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    snapshot: Snapshot,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> StorageResult<Snapshot> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> StorageResult<()> {
        self.snapshot = snapshot.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mingle_core::SocialNetwork;

    #[test]
    fn test_fresh_storage_loads_empty() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.load().unwrap(), Snapshot::new());
    }

    #[test]
    fn test_network_survives_a_save_and_rebuild() {
        let mut network = SocialNetwork::new();
        let alice = network.create_user("alice", "password1").unwrap().id;
        let bob = network.create_user("bobby", "password2").unwrap().id;
        network.add_friendship(alice, bob).unwrap();
        network.create_post(alice, "hello").unwrap();

        let mut storage = MemoryStorage::new();
        storage.save(&network.snapshot()).unwrap();

        let restored = SocialNetwork::from_snapshot(storage.load().unwrap());
        assert!(restored.are_friends(alice, bob).unwrap());
        assert_eq!(restored.posts_of(alice).len(), 1);
        assert_eq!(restored.snapshot(), network.snapshot());
    }
}
