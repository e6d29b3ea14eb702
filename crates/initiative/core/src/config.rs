//! Tracker configuration: the encounter roster plus display and color settings.
//!
//! The configuration file is a single JSON object. Only `player_order` and
//! `enemy_order` carry encounter data; every display and color key is
//! optional and falls back to the defaults below.
//!
//! ```json
//! {
//!     "player_order": { "Alice": 10, "Bob": [1, 20], "-Carol": 7 },
//!     "enemy_order": { "Goblin": 10 },
//!     "screen_model": "terminal",
//!     "enemy_background_color": [120, 0, 0]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Prefix marking an entity as inactive (kept in config, skipped everywhere else).
pub const INACTIVE_PREFIX: char = '-';

pub const DEFAULT_SCREEN_PORT: &str = "AUTO";
pub const DEFAULT_BRIGHTNESS_PERCENTAGE: u8 = 100;

pub const CURRENTLY_UP_FOREGROUND_COLOR: Rgb = Rgb(0, 9, 148);
pub const CURRENTLY_UP_BACKGROUND_COLOR: Rgb = Rgb(255, 255, 255);
pub const DEFAULT_FOREGROUND_COLOR: Rgb = Rgb(0, 9, 148);
pub const DEFAULT_BACKGROUND_COLOR: Rgb = Rgb(0, 0, 0);
pub const ON_DECK_FOREGROUND_COLOR: Rgb = Rgb(0, 9, 148);
pub const ON_DECK_BACKGROUND_COLOR: Rgb = Rgb(229, 194, 157);

/// Errors raised while loading or validating a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("entity '{name}' has an empty initiative range [{min}, {max}]")]
    InvalidRange { name: String, min: i32, max: i32 },

    #[error("screen brightness must be between 0 and 100, got {0}")]
    InvalidBrightness(u8),
}

/// Raw initiative as written in the config: a fixed value or an inclusive range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitiativeSpec {
    Fixed(i32),
    Range(i32, i32),
}

/// Which group an entity was declared in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

/// 8-bit RGB triple, written as `[r, g, b]` in the config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Display driver selected by the `screen_model` key.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScreenModel {
    /// True-color rows drawn on the controlling terminal.
    #[default]
    Terminal,
    /// JSON-lines record of every display operation, written to `screen_port`.
    #[serde(alias = "LcdSimulated")]
    Transcript,
}

/// Screen connection settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSettings {
    #[serde(default = "default_screen_port")]
    pub screen_port: String,
    #[serde(default)]
    pub screen_model: ScreenModel,
    #[serde(default = "default_brightness")]
    pub screen_brightness_percentage: u8,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            screen_port: default_screen_port(),
            screen_model: ScreenModel::default(),
            screen_brightness_percentage: DEFAULT_BRIGHTNESS_PERCENTAGE,
        }
    }
}

/// Row colors for each turn standing, plus optional enemy overrides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "currently_up_fg")]
    pub currently_up_foreground_color: Rgb,
    #[serde(default = "currently_up_bg")]
    pub currently_up_background_color: Rgb,
    #[serde(default = "on_deck_fg")]
    pub on_deck_foreground_color: Rgb,
    #[serde(default = "on_deck_bg")]
    pub on_deck_background_color: Rgb,
    #[serde(default = "default_fg")]
    pub default_foreground_color: Rgb,
    #[serde(default = "default_bg")]
    pub default_background_color: Rgb,
    #[serde(default)]
    pub enemy_foreground_color: Option<Rgb>,
    #[serde(default)]
    pub enemy_background_color: Option<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            currently_up_foreground_color: CURRENTLY_UP_FOREGROUND_COLOR,
            currently_up_background_color: CURRENTLY_UP_BACKGROUND_COLOR,
            on_deck_foreground_color: ON_DECK_FOREGROUND_COLOR,
            on_deck_background_color: ON_DECK_BACKGROUND_COLOR,
            default_foreground_color: DEFAULT_FOREGROUND_COLOR,
            default_background_color: DEFAULT_BACKGROUND_COLOR,
            enemy_foreground_color: None,
            enemy_background_color: None,
        }
    }
}

/// An entity that takes part in resolution and rotation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveEntity {
    pub name: String,
    pub spec: InitiativeSpec,
    pub side: Side,
}

/// Complete tracker configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub player_order: IndexMap<String, InitiativeSpec>,
    #[serde(default)]
    pub enemy_order: IndexMap<String, InitiativeSpec>,
    #[serde(flatten)]
    pub screen: ScreenSettings,
    #[serde(flatten)]
    pub palette: Palette,
}

impl TrackerConfig {
    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::info!(
            "Loaded config {}: {} players, {} enemies, screen={}",
            path.display(),
            config.player_order.len(),
            config.enemy_order.len(),
            config.screen.screen_model
        );

        Ok(config)
    }

    /// Parse and validate configuration from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects empty ranges and out-of-bounds brightness.
    ///
    /// Inactive entities are validated too so they can be reactivated as-is.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, spec) in self.player_order.iter().chain(self.enemy_order.iter()) {
            if let InitiativeSpec::Range(min, max) = *spec
                && min > max
            {
                return Err(ConfigError::InvalidRange {
                    name: name.clone(),
                    min,
                    max,
                });
            }
        }

        let brightness = self.screen.screen_brightness_percentage;
        if brightness > 100 {
            return Err(ConfigError::InvalidBrightness(brightness));
        }

        Ok(())
    }

    /// Players merged with enemies, inactive entries removed.
    ///
    /// An enemy sharing a key with a player replaces it in place, keeping the
    /// player's declaration position.
    pub fn active_entities(&self) -> Vec<ActiveEntity> {
        let mut merged: IndexMap<&str, (InitiativeSpec, Side)> = IndexMap::new();

        for (name, spec) in &self.player_order {
            merged.insert(name, (*spec, Side::Player));
        }
        for (name, spec) in &self.enemy_order {
            merged.insert(name, (*spec, Side::Enemy));
        }

        merged
            .into_iter()
            .filter(|(name, _)| !is_inactive(name))
            .map(|(name, (spec, side))| ActiveEntity {
                name: name.to_string(),
                spec,
                side,
            })
            .collect()
    }
}

/// Returns true when `name` is switched off with the `-` prefix.
pub fn is_inactive(name: &str) -> bool {
    name.starts_with(INACTIVE_PREFIX)
}

fn default_screen_port() -> String {
    DEFAULT_SCREEN_PORT.to_string()
}

fn default_brightness() -> u8 {
    DEFAULT_BRIGHTNESS_PERCENTAGE
}

fn currently_up_fg() -> Rgb {
    CURRENTLY_UP_FOREGROUND_COLOR
}

fn currently_up_bg() -> Rgb {
    CURRENTLY_UP_BACKGROUND_COLOR
}

fn on_deck_fg() -> Rgb {
    ON_DECK_FOREGROUND_COLOR
}

fn on_deck_bg() -> Rgb {
    ON_DECK_BACKGROUND_COLOR
}

fn default_fg() -> Rgb {
    DEFAULT_FOREGROUND_COLOR
}

fn default_bg() -> Rgb {
    DEFAULT_BACKGROUND_COLOR
}
