//! Terminal driver: the board drawn as true-color rows on stdout.
use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::{
    cursor::{MoveTo, MoveToNextLine},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use initiative_core::{Rgb, ScreenModel};

use crate::{DisplayError, DrawCommand, Orientation, Result, ScreenDriver};

/// Draws rows at `(x, y)` terminal cells with the command's colors.
///
/// A terminal has no backlight or rotation, so brightness and orientation
/// are only logged.
pub struct TerminalScreen {
    out: Option<Stdout>,
}

impl TerminalScreen {
    pub fn new() -> Self {
        Self { out: None }
    }

    fn out(&mut self) -> Result<&mut Stdout> {
        self.out.as_mut().ok_or(DisplayError::NotInitialized)
    }
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

fn cell(position: u32) -> u16 {
    u16::try_from(position).unwrap_or(u16::MAX)
}

impl ScreenDriver for TerminalScreen {
    fn initialize(&mut self) -> Result<()> {
        let out = io::stdout();
        if !out.is_terminal() {
            return Err(DisplayError::Unavailable {
                model: ScreenModel::Terminal,
                reason: "standard output is not a terminal".to_string(),
            });
        }

        self.out = Some(out);
        tracing::debug!("Terminal screen initialized");
        Ok(())
    }

    fn set_orientation(&mut self, orientation: Orientation) -> Result<()> {
        self.out()?;
        tracing::debug!("Terminal ignores orientation {:?}", orientation);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let out = self.out()?;
        queue!(out, ResetColor, Clear(ClearType::All), MoveTo(0, 0))?;
        out.flush()?;
        Ok(())
    }

    fn set_brightness(&mut self, percent: u8) -> Result<()> {
        self.out()?;
        tracing::debug!("Terminal ignores brightness {}%", percent);
        Ok(())
    }

    fn draw_text(&mut self, command: &DrawCommand) -> Result<()> {
        let out = self.out()?;
        queue!(
            out,
            MoveTo(cell(command.x), cell(command.y)),
            SetForegroundColor(color(command.foreground)),
            SetBackgroundColor(color(command.background)),
            Print(&command.text),
            ResetColor,
            MoveToNextLine(1)
        )?;
        out.flush()?;
        Ok(())
    }

    fn screen_off(&mut self) -> Result<()> {
        self.clear()
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut out) = self.out.take() {
            queue!(out, ResetColor)?;
            out.flush()?;
        }
        Ok(())
    }
}
