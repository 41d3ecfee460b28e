//! A single cell of the terminal grid.

use serde::{Deserialize, Serialize};

use super::style::Style;

/// One grid cell: a single code point and its style.
///
/// The core does no grapheme clustering; combining marks each land in
/// their own cell. A double-width character occupies two cells, the
/// second of which is a zero-width continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The code point displayed in this cell
    pub ch: char,
    /// Styling applied to the cell
    pub style: Style,
    /// Display width: 1 for normal cells, 2 for the leading half of a
    /// wide character, 0 for its continuation cell
    pub width: u8,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
            width: 1,
        }
    }
}

impl Cell {
    pub fn new(ch: char, style: Style) -> Self {
        use unicode_width::UnicodeWidthChar;
        Self {
            ch,
            style,
            width: ch.width().unwrap_or(1) as u8,
        }
    }

    /// A blank cell carrying only the given fill style.
    pub fn blank(style: Style) -> Self {
        Self {
            ch: ' ',
            style,
            width: 1,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }

    /// The trailing half of a wide character.
    pub fn is_wide_continuation(&self) -> bool {
        self.width == 0
    }

    /// Erase to a space, keeping only the fill style.
    pub fn erase(&mut self, fill: Style) {
        *self = Cell::blank(fill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::Color;

    #[test]
    fn test_cell_default() {
        let cell = Cell::default();
        assert!(cell.is_blank());
        assert_eq!(cell.width, 1);
        assert!(cell.style.is_default());
    }

    #[test]
    fn test_cell_width() {
        assert_eq!(Cell::new('A', Style::default()).width, 1);
        assert_eq!(Cell::new('中', Style::default()).width, 2);
    }

    #[test]
    fn test_cell_erase_keeps_fill() {
        let mut cell = Cell::new('X', Style::new(Color::RED, Color::BLUE));
        cell.erase(Style::new(Color::Default, Color::GREEN));
        assert!(cell.is_blank());
        assert_eq!(cell.style.bg, Color::GREEN);
        assert_eq!(cell.style.fg, Color::Default);
    }
}
