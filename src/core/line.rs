//! Terminal line representation
//!
//! A line is a row of cells with metadata about soft wrapping.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::style::Style;

/// A row of cells in the terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    cells: Vec<Cell>,
    /// True if this line continues the previous one (autowrap overflow)
    wrapped: bool,
}

impl Line {
    pub fn new(cols: usize) -> Self {
        Self {
            cells: vec![Cell::default(); cols],
            wrapped: false,
        }
    }

    /// A line pre-filled with blanks carrying `fill`.
    pub fn filled(cols: usize, fill: Style) -> Self {
        Self {
            cells: vec![Cell::blank(fill); cols],
            wrapped: false,
        }
    }

    pub fn cols(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    pub fn cell_mut(&mut self, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(col)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    pub fn set_wrapped(&mut self, wrapped: bool) {
        self.wrapped = wrapped;
    }

    /// Resize to `cols`, padding with blanks carrying `fill`.
    pub fn resize(&mut self, cols: usize, fill: Style) {
        self.cells.resize(cols, Cell::blank(fill));
    }

    /// Erase every cell with the given fill style.
    pub fn clear(&mut self, fill: Style) {
        for cell in &mut self.cells {
            cell.erase(fill);
        }
        self.wrapped = false;
    }

    /// Erase from `col` (inclusive) to the end of the line.
    pub fn clear_from(&mut self, col: usize, fill: Style) {
        for cell in self.cells.iter_mut().skip(col) {
            cell.erase(fill);
        }
    }

    /// Erase from the start of the line through `col` (inclusive).
    pub fn clear_to(&mut self, col: usize, fill: Style) {
        for cell in self.cells.iter_mut().take(col + 1) {
            cell.erase(fill);
        }
    }

    /// Insert `count` blank cells at `col`, shifting the rest right.
    /// Cells pushed past the end are lost.
    pub fn insert_cells(&mut self, col: usize, count: usize, fill: Style) {
        let len = self.cells.len();
        if col >= len || count == 0 {
            return;
        }
        let count = count.min(len - col);
        self.cells[col..].rotate_right(count);
        for cell in self.cells.iter_mut().skip(col).take(count) {
            cell.erase(fill);
        }
    }

    /// Delete `count` cells at `col`, shifting the rest left and filling
    /// the tail with blanks.
    pub fn delete_cells(&mut self, col: usize, count: usize, fill: Style) {
        let len = self.cells.len();
        if col >= len || count == 0 {
            return;
        }
        let count = count.min(len - col);
        self.cells[col..].rotate_left(count);
        for cell in self.cells.iter_mut().skip(len - count) {
            cell.erase(fill);
        }
    }

    /// Erase `count` cells in place starting at `col`.
    pub fn erase_cells(&mut self, col: usize, count: usize, fill: Style) {
        let end = (col + count).min(self.cells.len());
        for cell in self.cells.iter_mut().take(end).skip(col) {
            cell.erase(fill);
        }
    }

    /// The visible text of this line, trailing blanks trimmed.
    pub fn text(&self) -> String {
        let mut result = String::new();
        for cell in &self.cells {
            if cell.is_wide_continuation() {
                continue;
            }
            result.push(cell.ch);
        }
        result.truncate(result.trim_end().len());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::Color;

    fn abc_line(n: usize) -> Line {
        let mut line = Line::new(n);
        for i in 0..n {
            line.cell_mut(i).unwrap().ch = (b'A' + i as u8) as char;
        }
        line
    }

    #[test]
    fn test_line_new() {
        let line = Line::new(80);
        assert_eq!(line.cols(), 80);
        assert!(!line.is_wrapped());
        assert_eq!(line.text(), "");
    }

    #[test]
    fn test_line_resize() {
        let mut line = abc_line(10);
        line.resize(20, Style::default());
        assert_eq!(line.cols(), 20);
        assert_eq!(line.cell(5).unwrap().ch, 'F');
        assert!(line.cell(15).unwrap().is_blank());

        line.resize(5, Style::default());
        assert_eq!(line.cols(), 5);
        assert_eq!(line.text(), "ABCDE");
    }

    #[test]
    fn test_line_clear_from_to() {
        let mut line = abc_line(10);
        line.clear_from(5, Style::default());
        assert_eq!(line.cell(4).unwrap().ch, 'E');
        assert!(line.cell(5).unwrap().is_blank());

        let mut line = abc_line(10);
        line.clear_to(4, Style::default());
        assert!(line.cell(0).unwrap().is_blank());
        assert!(line.cell(4).unwrap().is_blank());
        assert_eq!(line.cell(5).unwrap().ch, 'F');
    }

    #[test]
    fn test_line_insert_cells() {
        let mut line = abc_line(10);
        line.insert_cells(2, 3, Style::default());
        assert_eq!(line.text(), "AB   CDEFG");
    }

    #[test]
    fn test_line_delete_cells() {
        let mut line = abc_line(10);
        line.delete_cells(2, 3, Style::default());
        assert_eq!(line.text(), "ABFGHIJ");
        assert!(line.cell(7).unwrap().is_blank());
    }

    #[test]
    fn test_line_insert_past_end() {
        let mut line = abc_line(5);
        line.insert_cells(2, 100, Style::default());
        assert_eq!(line.text(), "AB");
        line.insert_cells(50, 1, Style::default());
        assert_eq!(line.cols(), 5);
    }

    #[test]
    fn test_line_erase_cells() {
        let mut line = abc_line(10);
        line.erase_cells(3, 4, Style::new(Color::Default, Color::RED));
        assert_eq!(line.text(), "ABC    HIJ");
        assert_eq!(line.cell(3).unwrap().style.bg, Color::RED);
        // Erase fill never moves cells
        assert_eq!(line.cell(7).unwrap().ch, 'H');
    }

    #[test]
    fn test_line_text_skips_continuations() {
        let mut line = Line::new(4);
        *line.cell_mut(0).unwrap() = Cell::new('中', Style::default());
        line.cell_mut(1).unwrap().width = 0;
        line.cell_mut(2).unwrap().ch = 'x';
        assert_eq!(line.text(), "中x");
    }
}
