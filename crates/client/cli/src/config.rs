//! Process configuration read from the environment.
use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use initiative_core::cache::DEFAULT_CACHE_FILE;

pub const CACHE_FILE_VAR: &str = "INITIATIVE_CACHE_FILE";
pub const LOG_DIR_VAR: &str = "INITIATIVE_LOG_DIR";

const FALLBACK_LOG_DIR: &str = "/tmp/initiative/logs";

/// Paths the binary needs besides the encounter config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    pub cache_file: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            log_dir: default_log_dir(),
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `INITIATIVE_CACHE_FILE` - Roll cache location (default: `.cache`)
    /// - `INITIATIVE_LOG_DIR` - Log directory (default: platform cache dir)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`CliConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = read_path(&lookup, CACHE_FILE_VAR) {
            config.cache_file = path;
        }

        if let Some(path) = read_path(&lookup, LOG_DIR_VAR) {
            config.log_dir = path;
        }

        config
    }
}

fn read_path(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<PathBuf> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Platform cache directory, e.g. `~/.cache/initiative/logs` on Linux.
fn default_log_dir() -> PathBuf {
    ProjectDirs::from("", "", "initiative")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_LOG_DIR))
}
