//! Cursor state management
//!
//! The cursor tracks position, the style applied to newly written cells,
//! visibility, and the pending-wrap latch. Save/restore (DECSC/DECRC)
//! snapshots live here as well.

use serde::{Deserialize, Serialize};

use super::charset::CharsetState;
use super::style::Style;

/// Cursor shape, selected via `CSI Ps SP q`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorShape {
    #[default]
    Block,
    Underline,
    Bar,
}

/// Cursor state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Column position (0-indexed)
    pub col: usize,
    /// Row position (0-indexed)
    pub row: usize,
    /// Style applied to newly printed cells
    pub style: Style,
    /// Set after printing into the last column; the next printable wraps
    /// first if autowrap is enabled
    pub pending_wrap: bool,
    /// DECOM: addressing relative to the scroll region
    pub origin_mode: bool,
    /// DECTCEM: cursor visible
    pub visible: bool,
    /// Shape requested by the application
    pub shape: CursorShape,
    /// Whether the cursor blinks
    pub blinking: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            col: 0,
            row: 0,
            style: Style::default(),
            pending_wrap: false,
            origin_mode: false,
            visible: true,
            shape: CursorShape::Block,
            blinking: true,
        }
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move left by n, stopping at column 0.
    pub fn move_left(&mut self, n: usize) {
        self.col = self.col.saturating_sub(n);
        self.pending_wrap = false;
    }

    /// Move right by n, stopping at the last column.
    pub fn move_right(&mut self, n: usize, cols: usize) {
        self.col = (self.col + n).min(cols.saturating_sub(1));
        self.pending_wrap = false;
    }

    /// Move up by n, stopping at `top` (the scroll-region top when the
    /// cursor started inside the region, 0 otherwise).
    pub fn move_up(&mut self, n: usize, top: usize) {
        self.row = self.row.saturating_sub(n).max(top);
        self.pending_wrap = false;
    }

    /// Move down by n, stopping at `bottom`.
    pub fn move_down(&mut self, n: usize, bottom: usize) {
        self.row = (self.row + n).min(bottom);
        self.pending_wrap = false;
    }

    pub fn set_col(&mut self, col: usize, cols: usize) {
        self.col = col.min(cols.saturating_sub(1));
        self.pending_wrap = false;
    }

    pub fn carriage_return(&mut self) {
        self.col = 0;
        self.pending_wrap = false;
    }
}

/// Saved cursor state for DECSC/DECRC. Each buffer keeps its own slot so
/// alternate-screen applications cannot perturb the primary cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedCursor {
    pub col: usize,
    pub row: usize,
    pub style: Style,
    pub charsets: CharsetState,
    pub origin_mode: bool,
    pub pending_wrap: bool,
}

impl SavedCursor {
    pub fn capture(cursor: &Cursor, charsets: &CharsetState) -> Self {
        Self {
            col: cursor.col,
            row: cursor.row,
            style: cursor.style,
            charsets: charsets.clone(),
            origin_mode: cursor.origin_mode,
            pending_wrap: cursor.pending_wrap,
        }
    }

    /// Restore into `cursor`, clamping the position to the current grid.
    pub fn restore(&self, cursor: &mut Cursor, charsets: &mut CharsetState, cols: usize, rows: usize) {
        cursor.col = self.col.min(cols.saturating_sub(1));
        cursor.row = self.row.min(rows.saturating_sub(1));
        cursor.style = self.style;
        cursor.origin_mode = self.origin_mode;
        cursor.pending_wrap = self.pending_wrap;
        *charsets = self.charsets.clone();
    }
}
