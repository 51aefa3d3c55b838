//! Durable medium behind the persisted key-value store.
//!
//! The store only needs a synchronous string-keyed read/write/remove
//! surface, so the medium is injected as a trait. [`FileBackend`] persists
//! everything to a single JSON map file in the data directory;
//! [`MemoryBackend`] keeps values for the session only and doubles as the
//! test substitute.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

/// Synchronous string-keyed durable medium.
///
/// A key may be removed externally at any time; the next `read` simply
/// reports it as absent.
pub trait StorageBackend: Send {
    /// Read the raw serialized value for `key`, if present.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the raw serialized value for `key`. Best effort: the store
    /// degrades to in-memory operation when this fails.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the slot for `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// File-backed medium: one JSON object mapping keys to serialized values,
/// rewritten on every mutation.
pub struct FileBackend {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileBackend {
    /// Open the default store file in the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be resolved or the
    /// store file exists but cannot be read.
    pub fn open() -> Result<Self, StorageError> {
        let dir = super::data_dir()?;
        Self::with_path(dir.join("store.json"))
    }

    /// Open a store file at a custom path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn with_path(path: PathBuf) -> Result<Self, StorageError> {
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!(
                    "store file {} is malformed ({e}), starting empty",
                    path.display()
                );
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => return Err(StorageError::OpenFailed { path, source }),
        };
        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn flush(&self, key: &str) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            StorageError::WriteFailed {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;
        std::fs::write(&self.path, content).map_err(|e| StorageError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush(key)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush(key)?;
        }
        Ok(())
    }
}

/// Session-only medium backed by a shared map.
///
/// Clones share the same entries, so tests can keep a handle to inspect or
/// pre-seed raw slots while the store owns another. `set_fail_writes`
/// simulates an unavailable medium.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail, as if the medium were unavailable.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw serialized value under `key`, if any.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Insert a raw serialized value directly, bypassing the store.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: "medium unavailable".to_string(),
            });
        }
        self.lock().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.lock().remove(key);
        Ok(())
    }
}
