//! Terminal front end of the initiative tracker.
//!
//! Resolves the encounter once, then rotates a turn board on the configured
//! screen, advancing one group per line of operator input.

pub mod app;
pub mod args;
pub mod board;
pub mod config;
pub mod interrupt;
pub mod logging;

pub use app::{AppError, RunSummary, StopReason, TrackerApp, TurnLoop};
pub use args::Args;
pub use board::{BoardError, BoardRow, MIN_ACTIVE_ENTITIES, Standing, TurnBoard, stage_pass};
pub use config::CliConfig;
