//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use initiative_core::CachePolicy;

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "initiative.json";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "initiative", about = "TTRPG Initiative Tracker", version)]
pub struct Args {
    /// Path to the encounter config file
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Delete cached rolls and roll every range again
    #[arg(short = 'c', long)]
    pub clear_cache: bool,
}

impl Args {
    pub fn cache_policy(&self) -> CachePolicy {
        if self.clear_cache {
            CachePolicy::Clear
        } else {
            CachePolicy::Reuse
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_initiative_json_and_reuse() {
        let args = Args::try_parse_from(["initiative"]).unwrap();

        assert_eq!(args.config_file, PathBuf::from("initiative.json"));
        assert!(!args.clear_cache);
        assert_eq!(args.cache_policy(), CachePolicy::Reuse);
    }

    #[test]
    fn accepts_path_and_short_clear_flag() {
        let args = Args::try_parse_from(["initiative", "-c", "encounters/crypt.json"]).unwrap();

        assert_eq!(args.config_file, PathBuf::from("encounters/crypt.json"));
        assert_eq!(args.cache_policy(), CachePolicy::Clear);
    }

    #[test]
    fn accepts_long_clear_flag() {
        let args = Args::try_parse_from(["initiative", "--clear-cache"]).unwrap();
        assert!(args.clear_cache);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Args::try_parse_from(["initiative", "--turbo"]).is_err());
    }
}
