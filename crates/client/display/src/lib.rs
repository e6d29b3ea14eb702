//! Screen drivers for the initiative board.
//!
//! Every driver implements [`ScreenDriver`], the capability set the tracker
//! needs from a panel: initialize, orient, clear, dim, draw text rows, power
//! off and close. The concrete driver is picked from the configured
//! [`ScreenModel`](initiative_core::ScreenModel) by [`Screen::from_settings`];
//! there is no runtime lookup by name.
//!
//! [`ScreenSession`] owns a driver for the lifetime of the program and powers
//! the panel off on every exit path.

mod command;
mod driver;
mod error;
mod profile;
mod screen;
mod session;
pub mod terminal;
pub mod transcript;

pub use command::{DrawCommand, Orientation};
pub use driver::ScreenDriver;
pub use error::{DisplayError, Result};
pub use profile::DisplayProfile;
pub use screen::Screen;
pub use session::ScreenSession;
