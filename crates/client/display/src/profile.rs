//! Per-model layout parameters.

use initiative_core::ScreenModel;

/// Font used by the simulated panel.
pub const PANEL_FONT: &str = "roboto-mono/RobotoMono-SemiBold.ttf";

/// Layout parameters for one screen model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayProfile {
    /// Rows shown per pass, before clamping to the active entity count.
    pub max_names_show: usize,
    pub left_pad: u32,
    pub font: &'static str,
    pub font_size: u32,
    /// Distance between consecutive rows.
    pub vertical_size: u32,
    /// Row width in characters, including the value column.
    pub max_char_width: usize,
}

impl DisplayProfile {
    /// Layout of the simulated 480x320 panel.
    pub const SIMULATED: Self = Self {
        max_names_show: 5,
        left_pad: 5,
        font: PANEL_FONT,
        font_size: 60,
        vertical_size: 50,
        max_char_width: 12,
    };

    /// Layout in terminal cells.
    pub const TERMINAL: Self = Self {
        max_names_show: 5,
        left_pad: 2,
        font: "terminal",
        font_size: 1,
        vertical_size: 1,
        max_char_width: 14,
    };

    pub const fn for_model(model: ScreenModel) -> Self {
        match model {
            ScreenModel::Terminal => Self::TERMINAL,
            ScreenModel::Transcript => Self::SIMULATED,
        }
    }

    /// Rows to draw for `active` entities.
    pub fn rows_for(&self, active: usize) -> usize {
        self.max_names_show.min(active)
    }
}
