//! Transcript driver: a simulated panel that records every operation.
//!
//! Each call appends one JSON object per line to the configured port, e.g.
//!
//! ```text
//! {"op":"initialize"}
//! {"op":"set_orientation","orientation":"landscape"}
//! {"op":"draw_text","text":"Goblin      10","x":5,"y":0,...}
//! ```
//!
//! The port may be a regular file, a FIFO read by a renderer, or a device
//! node; `AUTO` writes `screen.jsonl` in the working directory.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use initiative_core::ScreenModel;
use serde::{Deserialize, Serialize};

use crate::{DisplayError, DrawCommand, Orientation, Result, ScreenDriver};

/// Port value that selects [`DEFAULT_TRANSCRIPT_FILE`].
pub const AUTO_PORT: &str = "AUTO";
pub const DEFAULT_TRANSCRIPT_FILE: &str = "screen.jsonl";

/// One recorded display operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TranscriptRecord {
    Initialize,
    SetOrientation { orientation: Orientation },
    Clear,
    SetBrightness { percent: u8 },
    DrawText(DrawCommand),
    ScreenOff,
    Close,
}

/// Records display operations as JSON lines.
pub struct TranscriptScreen {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl TranscriptScreen {
    /// Create a driver for `port`. Nothing is opened until `initialize`.
    pub fn new(port: &str) -> Self {
        let path = if port.eq_ignore_ascii_case(AUTO_PORT) {
            PathBuf::from(DEFAULT_TRANSCRIPT_FILE)
        } else {
            PathBuf::from(port)
        };

        Self { path, writer: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&mut self, record: &TranscriptRecord) -> Result<()> {
        let writer = self.writer.as_mut().ok_or(DisplayError::NotInitialized)?;
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl ScreenDriver for TranscriptScreen {
    fn initialize(&mut self) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| DisplayError::Unavailable {
                model: ScreenModel::Transcript,
                reason: format!("{}: {}", self.path.display(), e),
            })?;

        self.writer = Some(BufWriter::new(file));
        tracing::debug!("Transcript screen writing to {}", self.path.display());
        self.record(&TranscriptRecord::Initialize)
    }

    fn set_orientation(&mut self, orientation: Orientation) -> Result<()> {
        self.record(&TranscriptRecord::SetOrientation { orientation })
    }

    fn clear(&mut self) -> Result<()> {
        self.record(&TranscriptRecord::Clear)
    }

    fn set_brightness(&mut self, percent: u8) -> Result<()> {
        self.record(&TranscriptRecord::SetBrightness { percent })
    }

    fn draw_text(&mut self, command: &DrawCommand) -> Result<()> {
        self.record(&TranscriptRecord::DrawText(command.clone()))
    }

    fn screen_off(&mut self) -> Result<()> {
        self.record(&TranscriptRecord::ScreenOff)
    }

    fn close(&mut self) -> Result<()> {
        if self.writer.is_some() {
            self.record(&TranscriptRecord::Close)?;
        }
        self.writer = None;
        Ok(())
    }
}

/// Read back a transcript written by [`TranscriptScreen`].
pub fn read_transcript(path: impl AsRef<Path>) -> Result<Vec<TranscriptRecord>> {
    let content = std::fs::read_to_string(path)?;
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(DisplayError::from))
        .collect()
}
