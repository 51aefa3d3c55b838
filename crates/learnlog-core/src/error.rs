//! Core error types for learnlog-core.
//!
//! Persistence failures inside the store are recovered locally and logged
//! rather than surfaced; these types cover the operations that can still
//! fail outright, such as opening the durable store or resolving the data
//! directory.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for learnlog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the durable store file
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a slot from the durable medium
    #[error("Failed to read key '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Failed to write a slot to the durable medium
    #[error("Failed to write key '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
