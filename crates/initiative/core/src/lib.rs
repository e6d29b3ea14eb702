//! Initiative resolution and turn rotation for tabletop encounters.
//!
//! `initiative-core` owns everything between the configuration file and the
//! display: it resolves each entity's initiative (fixed, cached or freshly
//! rolled), persists rolls so they survive restarts, and cycles through the
//! resulting order with [`cursor::RotationCursor`]. Nothing here touches the
//! terminal or a screen.
pub mod cache;
pub mod config;
pub mod cursor;
pub mod resolver;
pub mod roll;

pub use cache::{
    CacheError, CacheRepository, FileCacheRepository, InMemoryCacheRepository, RollCache,
};
pub use config::{
    ActiveEntity, ConfigError, InitiativeSpec, Palette, Rgb, ScreenModel, ScreenSettings, Side,
    TrackerConfig, is_inactive,
};
pub use cursor::{CursorError, RotationCursor};
pub use resolver::{
    CachePolicy, InitiativeResolver, ResolveError, ResolvedEntry, ResolvedInitiative,
};
pub use roll::{InitiativeRoller, SecureRoller};
