//! Operator interrupt (Ctrl-C) handling.
//!
//! The OS handler is installed when [`listen`] is called, not when the
//! returned future is first polled. An interrupt that arrives while the
//! screen is still opening or drawing is therefore queued and observed at
//! the next prompt, instead of killing the process with the panel still on.

use std::io;

/// Install the interrupt handler now and return a future that resolves on
/// the next Ctrl-C.
///
/// Must be called from within a tokio runtime.
#[cfg(unix)]
pub fn listen() -> io::Result<impl Future<Output = io::Result<()>>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupts = signal(SignalKind::interrupt())?;
    tracing::debug!("Interrupt handler installed");

    Ok(async move {
        interrupts.recv().await;
        io::Result::Ok(())
    })
}

/// Install the interrupt handler now and return a future that resolves on
/// the next Ctrl-C.
///
/// Must be called from within a tokio runtime.
#[cfg(windows)]
pub fn listen() -> io::Result<impl Future<Output = io::Result<()>>> {
    let mut interrupts = tokio::signal::windows::ctrl_c()?;
    tracing::debug!("Interrupt handler installed");

    Ok(async move {
        interrupts.recv().await;
        io::Result::Ok(())
    })
}
