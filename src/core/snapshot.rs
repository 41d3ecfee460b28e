//! Snapshot view of the screen.
//!
//! A serializable copy of the visible state, taken under the embedder's
//! lock and handed to renderers or golden tests. Snapshots are plain
//! data: cheap to diff, safe to ship across threads.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::cursor::CursorShape;
use super::screen::Screen;
use super::style::Style;

/// A serializable snapshot of the visible terminal state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub cols: usize,
    pub rows: usize,
    pub cursor: CursorSnapshot,
    /// The visible lines of the active buffer
    pub lines: Vec<Vec<Cell>>,
    /// Scroll region, inclusive 0-based rows
    pub scroll_top: usize,
    pub scroll_bottom: usize,
    /// Current style applied to new output
    pub style: Style,
    /// Flags a renderer needs to honor
    pub reverse_video: bool,
    pub alternate_screen: bool,
    pub bracketed_paste: bool,
    pub title: String,
}

/// Cursor state as seen by a renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorSnapshot {
    pub col: usize,
    pub row: usize,
    pub visible: bool,
    pub shape: CursorShape,
    pub pending_wrap: bool,
}

impl Snapshot {
    pub fn from_screen(screen: &Screen) -> Self {
        let grid = screen.grid();
        let cursor = screen.cursor();
        let modes = screen.modes();
        let (scroll_top, scroll_bottom) = screen.scroll_region();

        let lines = (0..screen.rows())
            .map(|row| grid.line(row).map(|l| l.cells().to_vec()).unwrap_or_default())
            .collect();

        Self {
            cols: screen.cols(),
            rows: screen.rows(),
            cursor: CursorSnapshot {
                col: cursor.col,
                row: cursor.row,
                visible: cursor.visible,
                shape: cursor.shape,
                pending_wrap: cursor.pending_wrap,
            },
            lines,
            scroll_top,
            scroll_bottom,
            style: cursor.style,
            reverse_video: modes.reverse_video,
            alternate_screen: modes.alternate_screen,
            bracketed_paste: modes.bracketed_paste,
            title: screen.title().to_string(),
        }
    }

    /// The visible text, one string per row, trailing blanks trimmed.
    pub fn text(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|cells| {
                let mut row: String = cells
                    .iter()
                    .filter(|c| !c.is_wide_continuation())
                    .map(|c| c.ch)
                    .collect();
                row.truncate(row.trim_end().len());
                row
            })
            .collect()
    }
}
