//! Persistence for rolled initiative values.
//!
//! The cache pins ranged rolls across restarts: once an entity's range has
//! been rolled, the value is written here and reused until the cache is
//! cleared. Fixed-value entities are stored too, but the resolver never reads
//! them back.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{CacheError, Result};
pub use file::{DEFAULT_CACHE_FILE, FileCacheRepository};
pub use memory::InMemoryCacheRepository;
pub use traits::CacheRepository;

use indexmap::IndexMap;

/// Snapshot of the last resolution: entity name to resolved value.
pub type RollCache = IndexMap<String, i32>;
