//! Cache error types.

use thiserror::Error;

/// Errors that can occur when using the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to open the store.
    #[error("Failed to open store at {path}: {reason}")]
    Open { path: String, reason: String },

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem failure while reading or writing the store.
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The on-disk document is not a JSON object.
    #[error("Corrupt store document: {0}")]
    Corrupt(String),

    /// A previous writer panicked while holding the store lock.
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl<T> From<std::sync::PoisonError<T>> for CacheError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        CacheError::LockPoisoned
    }
}
