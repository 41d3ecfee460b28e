//! Terminal Core Module
//!
//! Platform-independent terminal emulation state:
//! - Screen model (grid, lines, cells, cursor)
//! - Style engine (SGR decoding and diffing)
//! - Modes, character sets, tab stops, scrollback
//! - Reply sink for DSR/DA/mouse reports

mod cell;
mod charset;
mod cursor;
mod grid;
mod line;
mod modes;
mod response;
mod screen;
mod scrollback;
mod snapshot;
mod style;

pub use cell::Cell;
pub use charset::{Charset, CharsetState};
pub use cursor::{Cursor, CursorShape, SavedCursor};
pub use grid::Grid;
pub use line::Line;
pub use modes::{Modes, MouseEncoding, MouseMode};
pub use response::{NullSink, ResponseSink};
pub use screen::{BufferType, MouseAction, MouseButton, MouseEvent, Screen};
pub use scrollback::{Scrollback, DEFAULT_SCROLLBACK_LINES};
pub use snapshot::{CursorSnapshot, Snapshot};
pub use style::{Attrs, Color, Style};

use serde::{Deserialize, Serialize};

/// Tab stop positions, one flag per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStops {
    stops: Vec<bool>,
}

const TAB_INTERVAL: usize = 8;

impl TabStops {
    /// Default stops at every eighth column.
    pub fn new(cols: usize) -> Self {
        let mut stops = vec![false; cols];
        for i in (0..cols).step_by(TAB_INTERVAL) {
            stops[i] = true;
        }
        Self { stops }
    }

    /// Reset to the default every-8 layout at a new width.
    pub fn reset(&mut self, cols: usize) {
        *self = Self::new(cols);
    }

    /// HTS: set a stop at `col`.
    pub fn set(&mut self, col: usize) {
        if let Some(stop) = self.stops.get_mut(col) {
            *stop = true;
        }
    }

    /// TBC 0: clear the stop at `col`.
    pub fn clear(&mut self, col: usize) {
        if let Some(stop) = self.stops.get_mut(col) {
            *stop = false;
        }
    }

    /// TBC 3: clear every stop.
    pub fn clear_all(&mut self) {
        self.stops.fill(false);
    }

    /// Next stop strictly after `col`, or the last column.
    pub fn next_stop(&self, col: usize) -> usize {
        for i in (col + 1)..self.stops.len() {
            if self.stops[i] {
                return i;
            }
        }
        self.stops.len().saturating_sub(1)
    }

    /// Previous stop strictly before `col`, or column 0.
    pub fn prev_stop(&self, col: usize) -> usize {
        for i in (0..col.min(self.stops.len())).rev() {
            if self.stops[i] {
                return i;
            }
        }
        0
    }
}
