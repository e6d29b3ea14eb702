//! Repository contract for the roll cache.

use super::{Result, RollCache};

/// Store for the previous resolution's values.
///
/// Single-process, single-writer: implementations do not coordinate between
/// processes sharing the same backing store.
pub trait CacheRepository {
    /// Load the cached values.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet and
    /// [`CacheError::Corrupted`](super::CacheError::Corrupted) when the stored
    /// content cannot be read back as a name to integer map.
    fn load(&self) -> Result<Option<RollCache>>;

    /// Replace the stored values with `cache`.
    fn save(&self, cache: &RollCache) -> Result<()>;

    /// Remove the stored values. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;

    /// Check if anything is stored.
    fn exists(&self) -> bool;
}
