//! Rotation cursor over the resolved turn order.
//!
//! The cursor walks the order back to front, forever. Every name it emits is
//! remembered so that, after [`RotationCursor::burn`] expires the front of
//! that history, the next pass over the display window re-emits what is left
//! before pulling anything new from the cycle.
//!
//! ```text
//!            burn(n)
//!   FORWARD ─────────▶ REPLAY
//!      ▲                 │
//!      └─────────────────┘
//!       history exhausted
//! ```

use std::collections::VecDeque;

/// Errors raised by cursor operations.
///
/// These indicate a caller bug rather than a runtime condition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error("cannot burn {requested} entries, only {available} have been emitted")]
    InvalidBurnCount { requested: usize, available: usize },
}

/// Which source `next()` draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Forward,
    Replay { position: usize },
}

/// Infinite cyclic iterator with a replayable history.
#[derive(Clone, Debug)]
pub struct RotationCursor {
    /// Turn order, reversed.
    cycle: Vec<String>,
    /// Index of the next name to pull from `cycle`.
    head: usize,
    /// Names emitted since the last burn, oldest first.
    history: VecDeque<String>,
    mode: Mode,
}

impl RotationCursor {
    /// Create a cursor over `order` (ascending turn order).
    pub fn new(order: impl IntoIterator<Item = String>) -> Self {
        let mut cycle: Vec<String> = order.into_iter().collect();
        cycle.reverse();

        Self {
            cycle,
            head: 0,
            history: VecDeque::new(),
            mode: Mode::Forward,
        }
    }

    /// Expire the oldest `count` emitted names and replay the rest next.
    ///
    /// Fails without touching any state when `count` exceeds the number of
    /// names currently held in history.
    pub fn burn(&mut self, count: usize) -> Result<(), CursorError> {
        if count > self.history.len() {
            return Err(CursorError::InvalidBurnCount {
                requested: count,
                available: self.history.len(),
            });
        }

        self.history.drain(..count);
        self.mode = Mode::Replay { position: 0 };

        tracing::trace!(
            "Burned {} entries, {} left to replay",
            count,
            self.history.len()
        );

        Ok(())
    }

    /// Number of names held for replay.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_replaying(&self) -> bool {
        matches!(self.mode, Mode::Replay { .. })
    }

    fn pull(&mut self) -> Option<String> {
        let item = self.cycle.get(self.head)?.clone();
        self.head = (self.head + 1) % self.cycle.len();
        self.history.push_back(item.clone());
        Some(item)
    }
}

impl Iterator for RotationCursor {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if let Mode::Replay { position } = self.mode {
            if let Some(item) = self.history.get(position) {
                self.mode = Mode::Replay {
                    position: position + 1,
                };
                return Some(item.clone());
            }
            self.mode = Mode::Forward;
        }

        self.pull()
    }
}
