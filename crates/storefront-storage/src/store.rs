//! # Storage Backends
//!
//! The [`Storage`] trait and its two implementations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storage (trait)                                 │
//! │          get(key) / set(key, value) / remove(key)                      │
//! │                 │                              │                        │
//! │                 ▼                              ▼                        │
//! │  ┌───────────────────────────┐   ┌───────────────────────────┐        │
//! │  │       FileStorage         │   │      MemoryStorage        │        │
//! │  │  <dir>/<key>.json         │   │  HashMap behind a Mutex   │        │
//! │  │  write tmp → rename       │   │  tests + ephemeral runs   │        │
//! │  └───────────────────────────┘   └───────────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes are synchronous. Callers treat them as best-effort: a failed write
//! is logged and never rolls back in-memory state.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};

// =============================================================================
// Storage Trait
// =============================================================================

/// A string key-value store that survives restarts.
pub trait Storage: Send + Sync {
    /// Returns the raw value for `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// JSON and best-effort helpers available on every [`Storage`].
pub trait StorageExt: Storage {
    /// Loads and decodes a JSON value.
    ///
    /// Missing keys, read failures and corrupt documents all yield `None`;
    /// the latter two are logged.
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read stored value");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Discarding corrupt stored value");
                None
            }
        }
    }

    /// Encodes `value` as JSON and stores it.
    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }

    /// [`StorageExt::save_json`], logging instead of returning the failure.
    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.save_json(key, value) {
            warn!(key, error = %e, "Failed to persist value");
        }
    }

    /// [`Storage::remove`], logging instead of returning the failure.
    fn forget(&self, key: &str) {
        if let Err(e) = self.remove(key) {
            warn!(key, error = %e, "Failed to remove stored value");
        }
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}

/// Keys become file names, so only `[A-Za-z0-9_-]` is accepted.
fn check_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// File Backend
// =============================================================================

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (creating if needed) a storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(path = %dir.display(), "Opened file storage");
        Ok(FileStorage { dir })
    }

    /// Directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        check_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        // A crash mid-write must leave the previous document intact.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Memory Backend
// =============================================================================

/// Process-local storage. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        check_key(key)?;
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        check_key(key)?;
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        check_key(key)?;
        self.entries.lock().remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
