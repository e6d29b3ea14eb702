//! Closed set of screen drivers selected from configuration.

use initiative_core::{ScreenModel, ScreenSettings};

use crate::terminal::TerminalScreen;
use crate::transcript::TranscriptScreen;
use crate::{DisplayProfile, DrawCommand, Orientation, Result, ScreenDriver};

/// Any supported screen, dispatched by configured model.
pub enum Screen {
    Terminal(TerminalScreen),
    Transcript(TranscriptScreen),
}

impl Screen {
    /// Build the driver for the configured model. The connection is opened by
    /// `initialize`.
    pub fn from_settings(settings: &ScreenSettings) -> Self {
        match settings.screen_model {
            ScreenModel::Terminal => Self::Terminal(TerminalScreen::new()),
            ScreenModel::Transcript => {
                Self::Transcript(TranscriptScreen::new(&settings.screen_port))
            }
        }
    }

    pub fn model(&self) -> ScreenModel {
        match self {
            Self::Terminal(_) => ScreenModel::Terminal,
            Self::Transcript(_) => ScreenModel::Transcript,
        }
    }

    pub fn profile(&self) -> DisplayProfile {
        DisplayProfile::for_model(self.model())
    }
}

impl ScreenDriver for Screen {
    fn initialize(&mut self) -> Result<()> {
        match self {
            Self::Terminal(screen) => screen.initialize(),
            Self::Transcript(screen) => screen.initialize(),
        }
    }

    fn set_orientation(&mut self, orientation: Orientation) -> Result<()> {
        match self {
            Self::Terminal(screen) => screen.set_orientation(orientation),
            Self::Transcript(screen) => screen.set_orientation(orientation),
        }
    }

    fn clear(&mut self) -> Result<()> {
        match self {
            Self::Terminal(screen) => screen.clear(),
            Self::Transcript(screen) => screen.clear(),
        }
    }

    fn set_brightness(&mut self, percent: u8) -> Result<()> {
        match self {
            Self::Terminal(screen) => screen.set_brightness(percent),
            Self::Transcript(screen) => screen.set_brightness(percent),
        }
    }

    fn draw_text(&mut self, command: &DrawCommand) -> Result<()> {
        match self {
            Self::Terminal(screen) => screen.draw_text(command),
            Self::Transcript(screen) => screen.draw_text(command),
        }
    }

    fn screen_off(&mut self) -> Result<()> {
        match self {
            Self::Terminal(screen) => screen.screen_off(),
            Self::Transcript(screen) => screen.screen_off(),
        }
    }

    fn close(&mut self) -> Result<()> {
        match self {
            Self::Terminal(screen) => screen.close(),
            Self::Transcript(screen) => screen.close(),
        }
    }
}
