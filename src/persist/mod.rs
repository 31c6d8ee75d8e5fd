//! Durable per-slice snapshots.
//!
//! Each slice is stored as one opaque JSON document under its key
//! (`auth`, `currencies`, `userTransactions`), restored wholesale at startup
//! and rewritten after every transition that changes the slice.

mod file;
mod memory;

use thiserror::Error;
use tracing::warn;

use crate::mvi::SliceState;

pub use file::FileStorage;
pub use memory::MemoryStorage;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to access snapshot '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode snapshot '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Backing store for slice snapshots.
pub trait SnapshotStorage: Send + Sync {
    /// Raw snapshot for `key`, `None` if nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Replace the snapshot for `key`.
    fn save(&self, key: &str, snapshot: &str) -> Result<(), PersistError>;
}

/// Restore a slice, falling back to its default when the snapshot is
/// missing or unreadable.
pub fn restore_slice<S: SliceState>(storage: &dyn SnapshotStorage) -> S {
    let raw = match storage.load(S::KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return S::default(),
        Err(e) => {
            warn!(key = S::KEY, error = %e, "Snapshot unreadable, starting empty");
            return S::default();
        }
    };

    match serde_json::from_str::<S>(&raw) {
        Ok(state) => state.restored(),
        Err(e) => {
            warn!(key = S::KEY, error = %e, "Snapshot corrupt, starting empty");
            S::default()
        }
    }
}

/// Serialize a slice into the document stored under `S::KEY`.
pub fn encode_slice<S: SliceState>(state: &S) -> Result<String, PersistError> {
    serde_json::to_string(state).map_err(|source| PersistError::Encode {
        key: S::KEY.to_string(),
        source,
    })
}
