//! Device-local key-value storage
//!
//! The selection store persists into a flat string-to-string map. Two
//! implementations are provided:
//! - `FileKeyValueStore`: JSON map on disk with an in-memory cache
//! - `MemoryKeyValueStore`: process-local map for tests and previews

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported persisted selection version: {0}")]
    UnsupportedVersion(u32),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl From<StorageError> for fitroom_common::Error {
    fn from(err: StorageError) -> Self {
        fitroom_common::Error::Storage(err.to_string())
    }
}

/// Persistent string storage keyed by well-known names
pub trait KeyValueStore: Send + Sync {
    /// Load a value by key, `None` if it was never saved
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Save a value under the given key, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

/// File-backed storage.
///
/// The whole map is cached in memory and rewritten on every change. Writes go
/// to a sibling temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl FileKeyValueStore {
    /// Open the storage file, creating an empty map if it does not exist.
    ///
    /// A file that exists but is not a valid JSON map is treated as empty;
    /// it is overwritten on the next save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let cache = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse storage file, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StorageError::Io(e)),
        };

        tracing::debug!(path = %path.display(), entries = cache.len(), "File storage initialized");

        Ok(Self {
            path,
            cache: Arc::new(RwLock::new(cache)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the cache to disk
    fn persist(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = serde_json::to_string_pretty(map)?;
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, data)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.cache.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard.get(key).cloned())
    }

    /// The cache only changes once the new map is on disk
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.cache.write().map_err(|_| StorageError::LockPoisoned)?;
        let mut next = guard.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }
}

/// In-memory storage; contents vanish with the process
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
