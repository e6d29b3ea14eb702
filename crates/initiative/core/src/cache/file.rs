//! File-based CacheRepository implementation.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::{CacheError, CacheRepository, Result, RollCache};

/// Default cache location, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = ".cache";

/// File-based implementation of CacheRepository.
///
/// # File Format
///
/// A single JSON object mapping entity names to integers, e.g.
/// `{"Alice": 10, "Bob": 17, "Goblin": 10}`. The file is rewritten in full on
/// every save through a temporary sibling and an atomic rename.
pub struct FileCacheRepository {
    path: PathBuf,
}

impl FileCacheRepository {
    /// Create a repository backed by `path`. The file is not touched until
    /// the first load or save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(DEFAULT_CACHE_FILE));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for FileCacheRepository {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_FILE)
    }
}

impl CacheRepository for FileCacheRepository {
    fn load(&self) -> Result<Option<RollCache>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        let cache: RollCache =
            serde_json::from_slice(&bytes).map_err(|e| CacheError::Corrupted(e.to_string()))?;

        tracing::debug!(
            "Loaded {} cached rolls from {}",
            cache.len(),
            self.path.display()
        );

        Ok(Some(cache))
    }

    fn save(&self, cache: &RollCache) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json =
            serde_json::to_string(cache).map_err(|e| CacheError::Serialization(e.to_string()))?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved {} rolls to {}", cache.len(), self.path.display());

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::info!("Deleted cache: {}", self.path.display());
        }

        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}
