//! Turn board: one display pass over the rotation.
//!
//! Each pass walks the cursor once per visible row and sorts every row into
//! a standing:
//!
//! - **current**: same value as row 0
//! - **on deck**: same value as the first row that differs from current
//! - **other**: anything else
//!
//! Rows become draw commands colored by standing, with enemy colors layered
//! on top when configured. Once the board is staged the current group is
//! burned from the cursor, so the next pass starts at the on-deck group.

use std::fmt::Write as _;

use initiative_core::{
    CursorError, Palette, ResolvedInitiative, Rgb, RotationCursor, Side,
};
use initiative_display::{DisplayProfile, DrawCommand};

/// Fewest active entities the tracker will run with.
pub const MIN_ACTIVE_ENTITIES: usize = 2;

const ROUND_SEPARATOR: &str = "================================";

/// Errors raised while staging a pass. All of them indicate a bug.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("rotation produced no entities")]
    Exhausted,

    #[error("rotation produced unknown entity '{0}'")]
    UnknownEntity(String),

    #[error(transparent)]
    Burn(#[from] CursorError),
}

/// Where a row sits relative to the acting group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Standing {
    Current,
    OnDeck,
    Other,
}

/// One staged row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardRow {
    pub name: String,
    pub value: i32,
    pub side: Side,
    pub standing: Standing,
    pub command: DrawCommand,
}

/// Rows staged for a single pass, top to bottom.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnBoard {
    rows: Vec<BoardRow>,
}

impl TurnBoard {
    pub fn rows(&self) -> &[BoardRow] {
        &self.rows
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.rows.iter().map(|row| row.command.clone()).collect()
    }

    pub fn currently_up(&self) -> impl Iterator<Item = &BoardRow> {
        self.with_standing(Standing::Current)
    }

    pub fn on_deck(&self) -> impl Iterator<Item = &BoardRow> {
        self.with_standing(Standing::OnDeck)
    }

    /// True when the on-deck group starts a new round, i.e. the rotation
    /// wrapped between the current and on-deck groups.
    pub fn round_boundary(&self) -> bool {
        match (self.currently_up().next(), self.on_deck().next()) {
            (Some(current), Some(next)) => next.value > current.value,
            _ => false,
        }
    }

    /// Operator-facing summary printed alongside the board.
    pub fn feedback(&self) -> String {
        let mut text = String::new();

        text.push_str("Currently Up:\n\t");
        text.push_str(&group_lines(self.currently_up()));
        text.push_str("\n\n");

        if self.round_boundary() {
            let _ = write!(text, "{ROUND_SEPARATOR}\n\n");
        }

        text.push_str("On Deck:\n\t");
        text.push_str(&group_lines(self.on_deck()));
        text.push_str("\n\n");

        text
    }

    fn with_standing(&self, standing: Standing) -> impl Iterator<Item = &BoardRow> {
        self.rows.iter().filter(move |row| row.standing == standing)
    }
}

fn group_lines<'a>(rows: impl Iterator<Item = &'a BoardRow>) -> String {
    rows.map(|row| format!("{}: {}", row.name, row.value))
        .collect::<Vec<_>>()
        .join("\n\t")
}

/// Stage `max_rows` rows from `cursor`, then burn the current group.
pub fn stage_pass(
    cursor: &mut RotationCursor,
    resolved: &ResolvedInitiative,
    palette: &Palette,
    profile: &DisplayProfile,
    max_rows: usize,
) -> Result<TurnBoard, BoardError> {
    let mut rows = Vec::with_capacity(max_rows);
    let mut current_value = None;
    let mut next_value = None;

    for row in 0..max_rows {
        let name = cursor.next().ok_or(BoardError::Exhausted)?;
        let entry = resolved
            .get(&name)
            .ok_or_else(|| BoardError::UnknownEntity(name.clone()))?;

        let current = *current_value.get_or_insert(entry.value);
        let standing = if entry.value == current {
            Standing::Current
        } else if entry.value == *next_value.get_or_insert(entry.value) {
            Standing::OnDeck
        } else {
            Standing::Other
        };

        let (foreground, background) = row_colors(palette, standing, entry.side);
        let command = DrawCommand {
            text: row_text(&entry.name, entry.value, profile.max_char_width),
            x: profile.left_pad,
            y: (row as u32).saturating_mul(profile.vertical_size),
            font: profile.font.to_string(),
            font_size: profile.font_size,
            foreground,
            background,
        };

        rows.push(BoardRow {
            name: entry.name.clone(),
            value: entry.value,
            side: entry.side,
            standing,
            command,
        });
    }

    let board = TurnBoard { rows };
    let acting = board.currently_up().count();
    cursor.burn(acting)?;

    tracing::debug!(
        "Staged {} rows, {} currently up, round boundary: {}",
        board.rows.len(),
        acting,
        board.round_boundary()
    );

    Ok(board)
}

/// Foreground and background for a row.
pub fn row_colors(palette: &Palette, standing: Standing, side: Side) -> (Rgb, Rgb) {
    let (foreground, background) = match standing {
        Standing::Current => (
            palette.currently_up_foreground_color,
            palette.currently_up_background_color,
        ),
        Standing::OnDeck => (
            palette.on_deck_foreground_color,
            palette.on_deck_background_color,
        ),
        Standing::Other => (
            palette.default_foreground_color,
            palette.default_background_color,
        ),
    };

    match side {
        Side::Enemy => (
            palette.enemy_foreground_color.unwrap_or(foreground),
            palette.enemy_background_color.unwrap_or(background),
        ),
        Side::Player => (foreground, background),
    }
}

/// Name cut and padded to `max_char_width - 3` characters, then the value
/// right-aligned in two columns.
pub fn row_text(name: &str, value: i32, max_char_width: usize) -> String {
    let width = max_char_width.saturating_sub(3);
    let name: String = name.chars().take(width).collect();
    format!("{name:<width$} {value:>2}")
}
