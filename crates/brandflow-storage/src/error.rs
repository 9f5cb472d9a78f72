//! Error types for the storage layer.

use thiserror::Error;

/// Storage error types.
///
/// A missing session and a corrupt on-disk record are distinct, recoverable
/// conditions: callers routinely probe for sessions that may not exist, while
/// a corrupt record means the file is there but unparseable and the store
/// will not attempt repair.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("session not found: {0}")]
    NotFound(String),

    #[error("corrupt session record {id}: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid session update: {0}")]
    InvalidUpdate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
