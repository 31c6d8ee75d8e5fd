use std::collections::HashMap;

use parking_lot::Mutex;

use super::{PersistError, SnapshotStorage};

/// In-process snapshot storage, for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    snapshots: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.snapshots.lock().get(key).cloned()
    }

    /// Number of successful `save` calls so far.
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.snapshot(key))
    }

    fn save(&self, key: &str, snapshot: &str) -> Result<(), PersistError> {
        self.snapshots
            .lock()
            .insert(key.to_string(), snapshot.to_string());
        *self.writes.lock() += 1;
        Ok(())
    }
}
