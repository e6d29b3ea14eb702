//! Draw commands and panel orientation.

use initiative_core::Rgb;
use serde::{Deserialize, Serialize};

/// One line of text to place on the panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub text: String,
    /// Horizontal position in panel units (pixels, or columns on a terminal).
    pub x: u32,
    /// Vertical position in panel units (pixels, or rows on a terminal).
    pub y: u32,
    pub font: String,
    pub font_size: u32,
    pub foreground: Rgb,
    pub background: Rgb,
}

/// Panel orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
    ReversePortrait,
    ReverseLandscape,
}
