//! Scoped ownership of an initialized screen.

use crate::{DrawCommand, Orientation, Result, ScreenDriver};

/// An initialized screen that is powered off when the session ends.
///
/// Acquired once at startup. Release happens either through
/// [`ScreenSession::shutdown`], which reports failures, or on drop, which
/// logs them. Either way `screen_off` runs before `close`.
pub struct ScreenSession<D: ScreenDriver> {
    driver: D,
    released: bool,
}

impl<D: ScreenDriver> ScreenSession<D> {
    /// Initialize `driver`, switch to landscape, blank it and set brightness.
    pub fn open(driver: D, brightness: u8) -> Result<Self> {
        let mut session = Self {
            driver,
            released: true,
        };

        session.driver.initialize()?;
        // Initialized from here on; any later failure still powers off on drop
        session.released = false;

        session.driver.set_orientation(Orientation::Landscape)?;
        session.driver.clear()?;
        session.driver.set_brightness(brightness)?;

        tracing::info!("Screen session opened (brightness {}%)", brightness);
        Ok(session)
    }

    /// Redraw the whole board.
    pub fn draw(&mut self, commands: &[DrawCommand]) -> Result<()> {
        self.driver.draw_screen(commands)
    }

    /// Power off and close, reporting the first failure.
    pub fn shutdown(mut self) -> Result<()> {
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let off = self.driver.screen_off();
        let closed = self.driver.close();
        tracing::info!("Screen session closed");

        off.and(closed)
    }
}

impl<D: ScreenDriver> Drop for ScreenSession<D> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!("Failed to release screen cleanly: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::DisplayError;
    use initiative_core::Rgb;

    /// Driver that logs every call and can be told to fail.
    #[derive(Default)]
    struct RecordingDriver {
        calls: Rc<RefCell<Vec<String>>>,
        fail_initialize: bool,
        fail_clear: bool,
        fail_screen_off: bool,
    }

    impl RecordingDriver {
        fn log(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }
    }

    impl ScreenDriver for RecordingDriver {
        fn initialize(&mut self) -> Result<()> {
            if self.fail_initialize {
                return Err(DisplayError::Unavailable {
                    model: initiative_core::ScreenModel::Transcript,
                    reason: "no device".to_string(),
                });
            }
            self.log("initialize");
            Ok(())
        }

        fn set_orientation(&mut self, orientation: Orientation) -> Result<()> {
            self.log(format!("orientation {orientation:?}"));
            Ok(())
        }

        fn clear(&mut self) -> Result<()> {
            if self.fail_clear {
                return Err(DisplayError::NotInitialized);
            }
            self.log("clear");
            Ok(())
        }

        fn set_brightness(&mut self, percent: u8) -> Result<()> {
            self.log(format!("brightness {percent}"));
            Ok(())
        }

        fn draw_text(&mut self, command: &DrawCommand) -> Result<()> {
            self.log(format!("draw {}", command.text));
            Ok(())
        }

        fn screen_off(&mut self) -> Result<()> {
            self.log("screen_off");
            if self.fail_screen_off {
                return Err(DisplayError::NotInitialized);
            }
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            self.log("close");
            Ok(())
        }
    }

    fn row(text: &str) -> DrawCommand {
        DrawCommand {
            text: text.to_string(),
            x: 0,
            y: 0,
            font: "mono".to_string(),
            font_size: 1,
            foreground: Rgb(1, 2, 3),
            background: Rgb(4, 5, 6),
        }
    }

    #[test]
    fn open_draw_shutdown_runs_full_lifecycle() {
        let driver = RecordingDriver::default();
        let calls = driver.calls.clone();

        let mut session = ScreenSession::open(driver, 75).unwrap();
        session.draw(&[row("a"), row("b")]).unwrap();
        session.shutdown().unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![
                "initialize",
                "orientation Landscape",
                "clear",
                "brightness 75",
                "clear",
                "draw a",
                "draw b",
                "screen_off",
                "close",
            ]
        );
    }

    #[test]
    fn drop_releases_screen_exactly_once() {
        let driver = RecordingDriver::default();
        let calls = driver.calls.clone();

        {
            let _session = ScreenSession::open(driver, 100).unwrap();
        }

        let calls = calls.borrow();
        assert_eq!(calls.iter().filter(|c| *c == "screen_off").count(), 1);
        assert_eq!(calls.last().map(String::as_str), Some("close"));
    }

    #[test]
    fn failed_initialize_releases_nothing() {
        let driver = RecordingDriver {
            fail_initialize: true,
            ..Default::default()
        };
        let calls = driver.calls.clone();

        let err = ScreenSession::open(driver, 100).err().unwrap();
        assert!(matches!(err, DisplayError::Unavailable { .. }));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn failure_after_initialize_still_powers_off() {
        let driver = RecordingDriver {
            fail_clear: true,
            ..Default::default()
        };
        let calls = driver.calls.clone();

        assert!(ScreenSession::open(driver, 100).is_err());
        let calls = calls.borrow();
        assert!(calls.contains(&"screen_off".to_string()));
        assert_eq!(calls.last().map(String::as_str), Some("close"));
    }

    #[test]
    fn shutdown_closes_even_when_screen_off_fails() {
        let driver = RecordingDriver {
            fail_screen_off: true,
            ..Default::default()
        };
        let calls = driver.calls.clone();

        let session = ScreenSession::open(driver, 100).unwrap();
        assert!(session.shutdown().is_err());
        assert_eq!(calls.borrow().last().map(String::as_str), Some("close"));
    }
}
