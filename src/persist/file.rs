use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use super::{PersistError, SnapshotStorage};

const LOCK_FILE: &str = ".lock";

/// Snapshot storage backed by one JSON file per slice key.
///
/// Writes go to a temporary file that is renamed over the old snapshot, so a
/// crash mid-write leaves the previous snapshot intact. An advisory lock
/// serialises writers across processes sharing the directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a snapshot directory.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn write_locked(&self, key: &str, snapshot: &str) -> io::Result<()> {
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.dir.join(LOCK_FILE))?;
        lock.lock_exclusive()?;

        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        let result = (|| {
            let mut file = File::create(&tmp)?;
            file.write_all(snapshot.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &target)
        })();

        FileExt::unlock(&lock)?;
        result
    }
}

impl SnapshotStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&self, key: &str, snapshot: &str) -> Result<(), PersistError> {
        self.write_locked(key, snapshot)
            .map_err(|source| PersistError::Io {
                key: key.to_string(),
                source,
            })?;
        debug!(key = %key, bytes = snapshot.len(), "Snapshot written");
        Ok(())
    }
}
