//! # Learnlog Core Library
//!
//! Core logic for learnlog, a CLI-first learning-progress tracker. The
//! interesting part is a small persistence/derivation layer; everything
//! else is a thin consumer of it.
//!
//! ## Key Components
//!
//! - [`Store`]: persisted key-value store over an injected
//!   [`StorageBackend`], with typed [`Slot`] accessors, safe fallback on
//!   corrupt data, and notify-on-write watchers
//! - [`StreakTracker`]: consecutive-day activity counter derived from a
//!   persisted record via calendar-day comparisons
//! - [`ModuleProgress`] and [`Preferences`]: typed consumers of the store
//!   for task lists, toggles, and the login flag

pub mod error;
pub mod prefs;
pub mod progress;
pub mod storage;
pub mod streak;

pub use error::{CoreError, StorageError};
pub use prefs::{Preferences, PreferencesSnapshot};
pub use progress::{default_coding_tasks, ModuleProgress, Task};
pub use storage::{FileBackend, MemoryBackend, Slot, StorageBackend, Store, WatcherId};
pub use streak::{StreakRecord, StreakTracker};
