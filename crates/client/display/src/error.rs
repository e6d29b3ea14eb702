//! Error types raised by screen drivers.

use initiative_core::ScreenModel;
use thiserror::Error;

/// Errors surfaced by screen drivers.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The panel could not be found or opened.
    #[error("Unable to find or connect to screen ({model}: {reason}). Please check connection.")]
    Unavailable { model: ScreenModel, reason: String },

    #[error("screen used before initialize()")]
    NotInitialized,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode display record: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DisplayError>;
