//! Capability contract shared by every screen driver.

use crate::{DrawCommand, Orientation, Result};

/// Operations the tracker performs on a panel.
///
/// `initialize` must succeed before any other call. A driver that cannot
/// reach its hardware reports
/// [`DisplayError::Unavailable`](crate::DisplayError::Unavailable) from
/// `initialize` and leaves the exit decision to the caller.
pub trait ScreenDriver {
    fn initialize(&mut self) -> Result<()>;

    fn set_orientation(&mut self, orientation: Orientation) -> Result<()>;

    /// Blank the whole panel.
    fn clear(&mut self) -> Result<()>;

    /// Backlight level, 0 to 100.
    fn set_brightness(&mut self, percent: u8) -> Result<()>;

    fn draw_text(&mut self, command: &DrawCommand) -> Result<()>;

    /// Turn the panel off before releasing it.
    fn screen_off(&mut self) -> Result<()>;

    /// Release the underlying connection.
    fn close(&mut self) -> Result<()>;

    /// Clear the panel, then draw every command in order.
    ///
    /// The board is always redrawn in full; there are no partial updates.
    fn draw_screen(&mut self, commands: &[DrawCommand]) -> Result<()> {
        self.clear()?;
        for command in commands {
            self.draw_text(command)?;
        }
        Ok(())
    }
}
