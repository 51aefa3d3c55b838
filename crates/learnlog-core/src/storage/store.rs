//! Persisted key-value store.
//!
//! A [`Store`] is a cheap-to-clone handle over one shared map of JSON
//! values synchronized with a [`StorageBackend`]. Every clone and every
//! [`Slot`] sees the same current value for a key, so the store is a single
//! source of truth per key for the lifetime of the session.
//!
//! Persistence is best effort: a value that fails to decode falls back to
//! the caller's default and is re-seeded, and a failed durable write keeps
//! the in-memory value so the session stays consistent. Neither condition
//! is surfaced to the caller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::StorageError;
use super::{FileBackend, StorageBackend};

/// Handle identifying a registered watcher.
pub type WatcherId = u64;

type WatcherFn = Arc<dyn Fn(&Value) + Send + Sync>;

/// Shared persisted key-value store.
pub struct Store {
    inner: Arc<Mutex<StoreInner>>,
}

impl Clone for Store {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct StoreInner {
    backend: Box<dyn StorageBackend>,
    values: HashMap<String, Value>,
    watchers: HashMap<String, Vec<(WatcherId, WatcherFn)>>,
    next_watcher: WatcherId,
}

impl Store {
    /// Create a store over the given durable medium.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                backend: Box::new(backend),
                values: HashMap::new(),
                watchers: HashMap::new(),
                next_watcher: 0,
            })),
        }
    }

    /// Open a store over the default file backend in the data directory.
    ///
    /// # Errors
    /// Returns an error if the store file cannot be opened.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self::new(FileBackend::open()?))
    }

    /// Current value for `key`, seeding the durable medium with `default`
    /// when the slot is absent or does not decode.
    ///
    /// Read-idempotent: repeated calls return the same value and only the
    /// genuine first initialization persists anything.
    pub fn get_or_init<T>(&self, key: &str, default: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let mut inner = self.lock();
        let cached = inner.values.get(key).cloned();
        if let Some(value) = cached {
            match serde_json::from_value(value) {
                Ok(current) => return current,
                Err(e) => {
                    log::debug!("value under '{key}' no longer decodes ({e}), re-seeding")
                }
            }
        } else if let Some(value) = inner.load(key) {
            match serde_json::from_value(value.clone()) {
                Ok(current) => {
                    inner.values.insert(key.to_string(), value);
                    return current;
                }
                Err(e) => {
                    log::debug!("stored value under '{key}' does not decode ({e}), re-seeding")
                }
            }
        }
        inner.seed(key, &default);
        default
    }

    /// Replace the value under `key`, updating memory and the durable
    /// medium synchronously and notifying watchers. Returns the new value.
    pub fn set<T>(&self, key: &str, next: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let notify = {
            let mut inner = self.lock();
            inner.put(key, &next)
        };
        // Watchers run outside the lock so a callback may re-enter the store.
        if let Some((value, watchers)) = notify {
            for watcher in watchers {
                watcher(&value);
            }
        }
        next
    }

    /// Function form of [`set`](Store::set): applies `f` to the current
    /// value (seeded from `default` if absent) and stores the result.
    pub fn update<T>(&self, key: &str, default: T, f: impl FnOnce(T) -> T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let current = self.get_or_init(key, default);
        self.set(key, f(current))
    }

    /// Clear the slot for `key` in memory and durably. The next
    /// `get_or_init` re-seeds from its default.
    pub fn remove(&self, key: &str) {
        let mut inner = self.lock();
        inner.values.remove(key);
        if let Err(e) = inner.backend.remove(key) {
            log::warn!("failed to remove '{key}' from durable storage: {e}");
        }
    }

    /// Register a callback invoked with the new value after every write to
    /// `key`.
    pub fn watch(
        &self,
        key: &str,
        callback: impl Fn(&Value) + Send + Sync + 'static,
    ) -> WatcherId {
        let mut inner = self.lock();
        let id = inner.next_watcher;
        inner.next_watcher += 1;
        inner
            .watchers
            .entry(key.to_string())
            .or_default()
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a previously registered watcher.
    pub fn unwatch(&self, key: &str, id: WatcherId) {
        let mut inner = self.lock();
        if let Some(watchers) = inner.watchers.get_mut(key) {
            watchers.retain(|(watcher_id, _)| *watcher_id != id);
        }
    }

    /// Typed handle bound to one key and its default.
    pub fn slot<T>(&self, key: &str, default: T) -> Slot<T>
    where
        T: Clone + Serialize + DeserializeOwned,
    {
        Slot {
            store: self.clone(),
            key: key.to_string(),
            default,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StoreInner {
    /// Read and parse the raw slot. Absent, unreadable, and malformed
    /// slots all report `None` so the caller falls back to its default.
    fn load(&mut self, key: &str) -> Option<Value> {
        match self.backend.read(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::debug!("slot '{key}' holds malformed data ({e}), treating as absent");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("failed to read '{key}' from durable storage: {e}");
                None
            }
        }
    }

    fn seed<T: Serialize>(&mut self, key: &str, default: &T) {
        let value = match serde_json::to_value(default) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("cannot serialize default for '{key}': {e}");
                return;
            }
        };
        self.persist(key, &value);
        self.values.insert(key.to_string(), value);
    }

    fn persist(&mut self, key: &str, value: &Value) {
        match serde_json::to_string(value) {
            Ok(raw) => {
                if let Err(e) = self.backend.write(key, &raw) {
                    log::warn!("failed to persist '{key}', keeping value in memory only: {e}");
                }
            }
            Err(e) => log::warn!("cannot serialize value for '{key}': {e}"),
        }
    }

    fn put<T: Serialize>(&mut self, key: &str, next: &T) -> Option<(Value, Vec<WatcherFn>)> {
        let value = match serde_json::to_value(next) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("cannot serialize value for '{key}': {e}");
                return None;
            }
        };
        self.persist(key, &value);
        self.values.insert(key.to_string(), value.clone());
        let watchers = self
            .watchers
            .get(key)
            .map(|list| list.iter().map(|(_, f)| Arc::clone(f)).collect())
            .unwrap_or_default();
        Some((value, watchers))
    }
}

/// Typed accessor for one persisted slot.
///
/// Mirrors the per-key accessor pattern of the UI layer: each call site
/// holds a `Slot` for the key it cares about, and all slots for a key stay
/// in sync because they share the underlying [`Store`].
pub struct Slot<T> {
    store: Store,
    key: String,
    default: T,
}

impl<T: Clone> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key.clone(),
            default: self.default.clone(),
        }
    }
}

impl<T> Slot<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Current value, seeding the slot from the default on first access.
    pub fn get(&self) -> T {
        self.store.get_or_init(&self.key, self.default.clone())
    }

    /// Replace the value. Returns the new value.
    pub fn set(&self, value: T) -> T {
        self.store.set(&self.key, value)
    }

    /// Apply `f` to the current value and store the result.
    pub fn update(&self, f: impl FnOnce(T) -> T) -> T {
        self.store.update(&self.key, self.default.clone(), f)
    }

    /// Clear the slot; the next read re-seeds from the default.
    pub fn clear(&self) {
        self.store.remove(&self.key);
    }

    /// Register a watcher for this slot's key.
    pub fn watch(&self, callback: impl Fn(&Value) + Send + Sync + 'static) -> WatcherId {
        self.store.watch(&self.key, callback)
    }

    /// The slot's storage key.
    pub fn key(&self) -> &str {
        &self.key
    }
}
