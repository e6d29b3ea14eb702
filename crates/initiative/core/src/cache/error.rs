//! Error types raised by cache repositories.

use thiserror::Error;

/// Errors surfaced by cache repository implementations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted cache: {0}")]
    Corrupted(String),
}

pub type Result<T> = std::result::Result<T, CacheError>;
