//! The cell grid backing one screen buffer.
//!
//! Row and column indices are 0-based. Scroll-region operations take
//! inclusive `[top, bottom]` row ranges and never touch rows outside
//! that range.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::line::Line;
use super::style::Style;

/// A rectangular grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    lines: Vec<Line>,
    cols: usize,
    rows: usize,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        let lines = (0..rows).map(|_| Line::new(cols)).collect();
        Self { lines, cols, rows }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    pub fn line_mut(&mut self, row: usize) -> Option<&mut Line> {
        self.lines.get_mut(row)
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.lines.get(row).and_then(|line| line.cell(col))
    }

    pub fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut Cell> {
        self.lines.get_mut(row).and_then(|line| line.cell_mut(col))
    }

    /// Erase every cell with the given fill style.
    pub fn clear(&mut self, fill: Style) {
        for line in &mut self.lines {
            line.clear(fill);
        }
    }

    /// Erase the rectangle `[x0, x1] x [y0, y1]` (inclusive) with `fill`.
    pub fn clear_region(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, fill: Style) {
        if x0 > x1 || y0 > y1 {
            return;
        }
        let x1 = x1.min(self.cols.saturating_sub(1));
        let y1 = y1.min(self.rows.saturating_sub(1));
        for row in y0..=y1 {
            if let Some(line) = self.lines.get_mut(row) {
                line.erase_cells(x0, x1 - x0 + 1, fill);
            }
        }
    }

    /// Shift rows `[top, bottom]` up by `n`, filling the bottom `n` rows
    /// with blanks carrying `fill`. Returns the scrolled-out lines,
    /// topmost first, so the caller can feed the scrollback ring.
    pub fn scroll_up(&mut self, top: usize, bottom: usize, n: usize, fill: Style) -> Vec<Line> {
        if top > bottom || bottom >= self.rows || n == 0 {
            return Vec::new();
        }
        let height = bottom - top + 1;
        let n = n.min(height);

        let scrolled: Vec<Line> = self.lines[top..top + n].to_vec();
        self.lines[top..=bottom].rotate_left(n);
        for line in self.lines[bottom + 1 - n..=bottom].iter_mut() {
            line.clear(fill);
        }
        scrolled
    }

    /// Shift rows `[top, bottom]` down by `n`, filling the top `n` rows
    /// with blanks carrying `fill`.
    pub fn scroll_down(&mut self, top: usize, bottom: usize, n: usize, fill: Style) {
        if top > bottom || bottom >= self.rows || n == 0 {
            return;
        }
        let height = bottom - top + 1;
        let n = n.min(height);

        self.lines[top..=bottom].rotate_right(n);
        for line in self.lines[top..top + n].iter_mut() {
            line.clear(fill);
        }
    }

    /// Insert `n` blank lines at `row`, pushing rows below it toward
    /// `bottom`; rows pushed past `bottom` are lost.
    pub fn insert_lines(&mut self, row: usize, n: usize, bottom: usize, fill: Style) {
        if row > bottom || bottom >= self.rows {
            return;
        }
        self.scroll_down(row, bottom, n, fill);
    }

    /// Delete `n` lines at `row`, pulling rows up from `bottom` and
    /// filling the gap at `bottom` with blanks.
    pub fn delete_lines(&mut self, row: usize, n: usize, bottom: usize, fill: Style) {
        if row > bottom || bottom >= self.rows {
            return;
        }
        self.scroll_up(row, bottom, n, fill);
    }

    /// Resize to `cols` x `rows`, preserving the top-left overlap and
    /// filling new area with blanks carrying `fill`.
    pub fn resize(&mut self, cols: usize, rows: usize, fill: Style) {
        for line in &mut self.lines {
            line.resize(cols, fill);
        }

        use std::cmp::Ordering;
        match rows.cmp(&self.rows) {
            Ordering::Greater => {
                for _ in self.rows..rows {
                    self.lines.push(Line::filled(cols, fill));
                }
            }
            Ordering::Less => {
                self.lines.truncate(rows);
            }
            Ordering::Equal => {}
        }

        self.cols = cols;
        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::Color;

    fn lettered(cols: usize, rows: usize) -> Grid {
        let mut grid = Grid::new(cols, rows);
        for row in 0..rows {
            for col in 0..cols {
                grid.cell_mut(col, row).unwrap().ch = (b'A' + row as u8) as char;
            }
        }
        grid
    }

    fn row_char(grid: &Grid, row: usize) -> char {
        grid.cell(0, row).unwrap().ch
    }

    #[test]
    fn test_grid_new() {
        let grid = Grid::new(80, 24);
        assert_eq!(grid.cols(), 80);
        assert_eq!(grid.rows(), 24);
        assert!(grid.cell(79, 23).unwrap().is_blank());
        assert!(grid.cell(80, 0).is_none());
    }

    #[test]
    fn test_scroll_up_full() {
        let mut grid = lettered(4, 5);
        let out = grid.scroll_up(0, 4, 2, Style::default());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].cell(0).unwrap().ch, 'A');
        assert_eq!(out[1].cell(0).unwrap().ch, 'B');
        assert_eq!(row_char(&grid, 0), 'C');
        assert_eq!(row_char(&grid, 2), 'E');
        assert!(grid.cell(0, 3).unwrap().is_blank());
        assert!(grid.cell(0, 4).unwrap().is_blank());
    }

    #[test]
    fn test_scroll_up_region_preserves_outside() {
        let mut grid = lettered(4, 5);
        grid.scroll_up(1, 3, 1, Style::default());
        // Rows outside [1,3] untouched
        assert_eq!(row_char(&grid, 0), 'A');
        assert_eq!(row_char(&grid, 4), 'E');
        // Inside shifted
        assert_eq!(row_char(&grid, 1), 'C');
        assert_eq!(row_char(&grid, 2), 'D');
        assert!(grid.cell(0, 3).unwrap().is_blank());
    }

    #[test]
    fn test_scroll_down_region() {
        let mut grid = lettered(4, 5);
        grid.scroll_down(1, 3, 1, Style::default());
        assert_eq!(row_char(&grid, 0), 'A');
        assert!(grid.cell(0, 1).unwrap().is_blank());
        assert_eq!(row_char(&grid, 2), 'B');
        assert_eq!(row_char(&grid, 3), 'C');
        assert_eq!(row_char(&grid, 4), 'E');
    }

    #[test]
    fn test_scroll_excess_clears_region() {
        let mut grid = lettered(4, 5);
        grid.scroll_up(1, 3, 10, Style::default());
        assert_eq!(row_char(&grid, 0), 'A');
        for row in 1..=3 {
            assert!(grid.cell(0, row).unwrap().is_blank());
        }
        assert_eq!(row_char(&grid, 4), 'E');
    }

    #[test]
    fn test_scroll_fill_style() {
        let mut grid = lettered(4, 3);
        let fill = Style::new(Color::Default, Color::RED);
        grid.scroll_up(0, 2, 1, fill);
        assert_eq!(grid.cell(0, 2).unwrap().style.bg, Color::RED);
    }

    #[test]
    fn test_insert_delete_lines() {
        let mut grid = lettered(4, 5);
        grid.insert_lines(1, 1, 3, Style::default());
        assert_eq!(row_char(&grid, 0), 'A');
        assert!(grid.cell(0, 1).unwrap().is_blank());
        assert_eq!(row_char(&grid, 2), 'B');
        // Row D pushed out of the region; E below region untouched
        assert_eq!(row_char(&grid, 3), 'C');
        assert_eq!(row_char(&grid, 4), 'E');

        let mut grid = lettered(4, 5);
        grid.delete_lines(1, 1, 3, Style::default());
        assert_eq!(row_char(&grid, 1), 'C');
        assert_eq!(row_char(&grid, 2), 'D');
        assert!(grid.cell(0, 3).unwrap().is_blank());
        assert_eq!(row_char(&grid, 4), 'E');
    }

    #[test]
    fn test_clear_region() {
        let mut grid = lettered(6, 4);
        grid.clear_region(1, 1, 3, 2, Style::default());
        assert_eq!(grid.cell(0, 1).unwrap().ch, 'B');
        assert!(grid.cell(1, 1).unwrap().is_blank());
        assert!(grid.cell(3, 2).unwrap().is_blank());
        assert_eq!(grid.cell(4, 2).unwrap().ch, 'C');
        assert_eq!(grid.cell(1, 3).unwrap().ch, 'D');
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut grid = lettered(4, 3);
        grid.resize(6, 5, Style::default());
        assert_eq!(grid.cols(), 6);
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cell(0, 0).unwrap().ch, 'A');
        assert_eq!(grid.cell(3, 2).unwrap().ch, 'C');
        assert!(grid.cell(5, 0).unwrap().is_blank());
        assert!(grid.cell(0, 4).unwrap().is_blank());

        grid.resize(2, 2, Style::default());
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cell(1, 1).unwrap().ch, 'B');
        assert!(grid.cell(2, 0).is_none());
    }
}
