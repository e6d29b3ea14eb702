//! In-memory CacheRepository implementation for tests and dry runs.

use std::sync::RwLock;

use super::{CacheError, CacheRepository, Result, RollCache};

/// In-memory implementation of CacheRepository.
#[derive(Default)]
pub struct InMemoryCacheRepository {
    cache: RwLock<Option<RollCache>>,
}

impl InMemoryCacheRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with `cache`.
    pub fn with_cache(cache: RollCache) -> Self {
        Self {
            cache: RwLock::new(Some(cache)),
        }
    }

    /// Current contents, for assertions.
    pub fn snapshot(&self) -> Option<RollCache> {
        self.cache.read().ok().and_then(|cache| cache.clone())
    }
}

impl CacheRepository for InMemoryCacheRepository {
    fn load(&self) -> Result<Option<RollCache>> {
        let cache = self.cache.read().map_err(|_| CacheError::LockPoisoned)?;
        Ok(cache.clone())
    }

    fn save(&self, cache: &RollCache) -> Result<()> {
        let mut stored = self.cache.write().map_err(|_| CacheError::LockPoisoned)?;
        *stored = Some(cache.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut stored = self.cache.write().map_err(|_| CacheError::LockPoisoned)?;
        *stored = None;
        Ok(())
    }

    fn exists(&self) -> bool {
        self.cache
            .read()
            .map(|cache| cache.is_some())
            .unwrap_or(false)
    }
}
