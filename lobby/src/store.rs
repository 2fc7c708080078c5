//! Persistence of the player's [`Snapshot`].

use arcade_types::casino::Snapshot;
use bytes::Bytes;
use commonware_codec::{DecodeExt, Encode};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not access snapshot file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot is corrupt")]
    Decode {
        #[source]
        source: commonware_codec::Error,
    },
}

pub trait Store: Send + Sync {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// Snapshot stored in a single file, replaced atomically on save.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Store for FileStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };
        let snapshot =
            Snapshot::decode(Bytes::from(raw)).map_err(|source| StoreError::Decode { source })?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let staging = self.path.with_extension("tmp");
        std::fs::write(&staging, snapshot.encode()).map_err(|err| self.io_error(err))?;
        std::fs::rename(&staging, &self.path).map_err(|err| self.io_error(err))?;
        debug!(path = %self.path.display(), balance = snapshot.balance, "snapshot saved");
        Ok(())
    }
}

/// Keeps the snapshot in memory only.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(snapshot: Snapshot) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot)),
        }
    }

    pub fn current(&self) -> Option<Snapshot> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.current())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(*snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "arcade-{name}-{}-{nanos}.bin",
            std::process::id()
        ))
    }

    #[test]
    fn test_missing_file_loads_nothing() {
        let store = FileStore::new(scratch("missing"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_roundtrip() {
        let path = scratch("roundtrip");
        let store = FileStore::new(&path);
        store.save(&Snapshot::new(420, true)).unwrap();
        assert_eq!(store.load().unwrap(), Some(Snapshot::new(420, true)));

        store.save(&Snapshot::new(7, false)).unwrap();
        assert_eq!(store.load().unwrap(), Some(Snapshot::new(7, false)));
        assert!(!path.with_extension("tmp").exists());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_corrupt_file() {
        let path = scratch("corrupt");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Decode { .. })));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let path = scratch("trailing");
        let mut raw = Snapshot::new(5, false).encode().to_vec();
        raw.push(0);
        std::fs::write(&path, raw).unwrap();
        assert!(FileStore::new(&path).load().is_err());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        store.save(&Snapshot::new(3, false)).unwrap();
        assert_eq!(store.current(), Some(Snapshot::new(3, false)));
        assert_eq!(
            MemoryStore::with(Snapshot::new(9, true)).load().unwrap(),
            Some(Snapshot::new(9, true))
        );
    }
}
