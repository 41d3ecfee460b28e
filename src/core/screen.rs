//! Terminal screen implementation
//!
//! The screen is the single point of mutation for all grid state. It
//! receives semantic actions from the parser and enacts them on the
//! active buffer, and it owns the reply channel for DSR/DA reports,
//! mouse events, and paste bracketing.

use super::cell::Cell;
use super::charset::{Charset, CharsetState};
use super::cursor::{Cursor, CursorShape, SavedCursor};
use super::grid::Grid;
use super::modes::{Modes, MouseEncoding, MouseMode};
use super::response::ResponseSink;
use super::scrollback::Scrollback;
use super::style::Style;
use super::TabStops;
use crate::parser::{Action, CsiAction, EscAction, OscAction};

/// Which buffer is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum BufferType {
    #[default]
    Primary,
    Alternate,
}

/// Mouse buttons reported to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
}

/// What happened to the button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Press,
    Release,
    Motion,
}

/// A mouse event as delivered by the embedder, 0-based cell coordinates.
#[derive(Debug, Clone, Copy)]
pub struct MouseEvent {
    pub col: usize,
    pub row: usize,
    pub button: MouseButton,
    pub action: MouseAction,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

/// The terminal screen state
pub struct Screen {
    /// Primary screen buffer
    primary: Grid,
    /// Alternate screen buffer (full-screen applications)
    alternate: Grid,
    active: BufferType,
    /// History of lines scrolled off the primary screen
    scrollback: Scrollback,
    cursor: Cursor,
    saved_primary: Option<SavedCursor>,
    saved_alternate: Option<SavedCursor>,
    modes: Modes,
    charsets: CharsetState,
    tab_stops: TabStops,
    /// Scroll region, inclusive 0-based rows
    scroll_top: usize,
    scroll_bottom: usize,
    cols: usize,
    rows: usize,
    /// Window title (OSC 0/2)
    title: String,
    /// Last printed character, for REP
    last_printed: Option<char>,
    sink: Box<dyn ResponseSink>,
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .field("active", &self.active)
            .field("cursor", &self.cursor)
            .field("scroll_top", &self.scroll_top)
            .field("scroll_bottom", &self.scroll_bottom)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl Screen {
    /// Create a screen with the given dimensions and reply sink.
    /// Dimensions are clamped to at least 1x1.
    pub fn new(cols: usize, rows: usize, sink: Box<dyn ResponseSink>) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            primary: Grid::new(cols, rows),
            alternate: Grid::new(cols, rows),
            active: BufferType::Primary,
            scrollback: Scrollback::default(),
            cursor: Cursor::new(),
            saved_primary: None,
            saved_alternate: None,
            modes: Modes::new(),
            charsets: CharsetState::new(),
            tab_stops: TabStops::new(cols),
            scroll_top: 0,
            scroll_bottom: rows - 1,
            cols,
            rows,
            title: String::new(),
            last_printed: None,
            sink,
        }
    }

    pub fn grid(&self) -> &Grid {
        match self.active {
            BufferType::Primary => &self.primary,
            BufferType::Alternate => &self.alternate,
        }
    }

    fn grid_mut(&mut self) -> &mut Grid {
        match self.active {
            BufferType::Primary => &mut self.primary,
            BufferType::Alternate => &mut self.alternate,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn modes(&self) -> &Modes {
        &self.modes
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn active_buffer(&self) -> BufferType {
        self.active
    }

    /// The scroll region as inclusive 0-based (top, bottom) rows.
    pub fn scroll_region(&self) -> (usize, usize) {
        (self.scroll_top, self.scroll_bottom)
    }

    /// Apply one parsed action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Print(c) => self.print(c),
            Action::Execute(byte) => self.execute(byte),
            Action::Csi(csi) => self.csi_dispatch(&csi),
            Action::Esc(esc) => self.esc_dispatch(esc),
            Action::Osc(osc) => self.osc_dispatch(osc),
            Action::Dcs(data) => {
                tracing::debug!(len = data.len(), "discarding DCS payload");
            }
            Action::StringData(_) => {}
        }
    }

    /// Write a reply through the sink; drop it with a warning if the
    /// sink refuses.
    fn respond(&mut self, bytes: &[u8]) {
        if !self.sink.write(bytes) {
            tracing::warn!(len = bytes.len(), "reply sink full, dropping response");
        }
    }

    // --- printing -------------------------------------------------------

    /// Print a displayable code point at the cursor.
    pub fn print(&mut self, c: char) {
        let c = self.charsets.translate(c);

        if self.cursor.pending_wrap && self.modes.autowrap {
            let row = self.cursor.row;
            if let Some(line) = self.grid_mut().line_mut(row) {
                line.set_wrapped(true);
            }
            self.cursor.col = 0;
            self.cursor.pending_wrap = false;
            self.linefeed();
        }

        use unicode_width::UnicodeWidthChar;
        let width = c.width().filter(|w| *w > 0).unwrap_or(1);

        let col = self.cursor.col;
        let row = self.cursor.row;
        let style = self.cursor.style;
        let cols = self.cols;

        if self.modes.insert {
            let fill = style.bg_only();
            if let Some(line) = self.grid_mut().line_mut(row) {
                line.insert_cells(col, width, fill);
            }
        }

        if let Some(cell) = self.grid_mut().cell_mut(col, row) {
            *cell = Cell {
                ch: c,
                style,
                width: width as u8,
            };
        }

        // Wide characters shadow the next cell with a continuation.
        if width == 2 && col + 1 < cols {
            if let Some(cell) = self.grid_mut().cell_mut(col + 1, row) {
                *cell = Cell {
                    ch: ' ',
                    style,
                    width: 0,
                };
            }
        }

        let next = col + width;
        if next >= cols {
            self.cursor.col = cols - 1;
            self.cursor.pending_wrap = true;
        } else {
            self.cursor.col = next;
            self.cursor.pending_wrap = false;
        }

        self.last_printed = Some(c);
    }

    /// Execute a C0 control character.
    pub fn execute(&mut self, byte: u8) {
        match byte {
            0x07 => {
                tracing::debug!("bell");
            }
            0x08 => self.cursor.move_left(1),
            0x09 => self.tab_forward(1),
            0x0A..=0x0C => {
                self.linefeed();
                if self.modes.linefeed_newline {
                    self.cursor.carriage_return();
                }
            }
            0x0D => self.cursor.carriage_return(),
            0x0E => self.charsets.shift_out(),
            0x0F => self.charsets.shift_in(),
            _ => {}
        }
    }

    // --- vertical motion ------------------------------------------------

    /// LF/IND: down one row, scrolling when on the region's last row.
    pub fn linefeed(&mut self) {
        if self.cursor.row == self.scroll_bottom {
            self.scroll_up_region(1, true);
        } else if self.cursor.row + 1 < self.rows {
            self.cursor.row += 1;
        }
    }

    /// RI: up one row, scrolling down when on the region's top row.
    pub fn reverse_index(&mut self) {
        if self.cursor.row == self.scroll_top {
            self.scroll_down_region(1);
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
        }
    }

    fn scroll_up_region(&mut self, n: usize, capture: bool) {
        let (top, bottom) = (self.scroll_top, self.scroll_bottom);
        let fill = self.cursor.style.bg_only();
        let scrolled = self.grid_mut().scroll_up(top, bottom, n, fill);
        // Only full-screen scrolls on the primary buffer feed history.
        if capture && self.active == BufferType::Primary && top == 0 {
            for line in scrolled {
                self.scrollback.push(line);
            }
        }
    }

    fn scroll_down_region(&mut self, n: usize) {
        let (top, bottom) = (self.scroll_top, self.scroll_bottom);
        let fill = self.cursor.style.bg_only();
        self.grid_mut().scroll_down(top, bottom, n, fill);
    }

    fn tab_forward(&mut self, n: usize) {
        for _ in 0..n {
            self.cursor.col = self.tab_stops.next_stop(self.cursor.col);
        }
    }

    fn tab_backward(&mut self, n: usize) {
        for _ in 0..n {
            self.cursor.col = self.tab_stops.prev_stop(self.cursor.col);
        }
        self.cursor.pending_wrap = false;
    }

    /// Vertical clamp bounds for cursor motion under DECOM.
    fn row_bounds(&self) -> (usize, usize) {
        if self.cursor.origin_mode {
            (self.scroll_top, self.scroll_bottom)
        } else {
            (0, self.rows - 1)
        }
    }

    /// CUP/HVP/VPA addressing: `row` is 1-based from the application,
    /// region-relative under DECOM.
    fn absolute_row(&self, row_param: usize) -> usize {
        let row = row_param.saturating_sub(1);
        if self.cursor.origin_mode {
            (self.scroll_top + row).min(self.scroll_bottom)
        } else {
            row.min(self.rows - 1)
        }
    }

    // --- CSI ------------------------------------------------------------

    fn csi_dispatch(&mut self, csi: &CsiAction) {
        match csi.private {
            Some(b'?') => return self.csi_private(csi),
            Some(b'>') => return self.csi_secondary(csi),
            Some(prefix) => {
                tracing::debug!(prefix = %(prefix as char), "ignoring private-prefixed CSI");
                return;
            }
            None => {}
        }

        if !csi.intermediates.is_empty() {
            return self.csi_intermediate(csi);
        }

        let n = csi.param(0, 1).max(1) as usize;

        match csi.final_byte {
            b'@' => {
                // ICH
                let (col, row) = (self.cursor.col, self.cursor.row);
                let fill = self.cursor.style.bg_only();
                if let Some(line) = self.grid_mut().line_mut(row) {
                    line.insert_cells(col, n, fill);
                }
            }
            b'A' => {
                // CUU
                let (top, _) = self.row_bounds();
                self.cursor.move_up(n, top);
            }
            b'B' => {
                // CUD
                let (_, bottom) = self.row_bounds();
                self.cursor.move_down(n, bottom);
            }
            b'C' => self.cursor.move_right(n, self.cols),
            b'D' => self.cursor.move_left(n),
            b'E' => {
                // CNL
                let (_, bottom) = self.row_bounds();
                self.cursor.move_down(n, bottom);
                self.cursor.carriage_return();
            }
            b'F' => {
                // CPL
                let (top, _) = self.row_bounds();
                self.cursor.move_up(n, top);
                self.cursor.carriage_return();
            }
            b'G' | b'`' => {
                // CHA / HPA
                self.cursor.set_col(csi.param(0, 1).max(1) as usize - 1, self.cols);
            }
            b'H' | b'f' => {
                // CUP / HVP
                let row = self.absolute_row(csi.param(0, 1).max(1) as usize);
                let col = (csi.param(1, 1).max(1) as usize - 1).min(self.cols - 1);
                self.cursor.row = row;
                self.cursor.col = col;
                self.cursor.pending_wrap = false;
            }
            b'I' => {
                // CHT
                self.tab_forward(n);
                self.cursor.pending_wrap = false;
            }
            b'J' => self.erase_in_display(csi.param(0, 0)),
            b'K' => self.erase_in_line(csi.param(0, 0)),
            b'L' => {
                // IL: only inside the scroll region
                let row = self.cursor.row;
                if row >= self.scroll_top && row <= self.scroll_bottom {
                    let bottom = self.scroll_bottom;
                    let fill = self.cursor.style.bg_only();
                    self.grid_mut().insert_lines(row, n, bottom, fill);
                }
            }
            b'M' => {
                // DL
                let row = self.cursor.row;
                if row >= self.scroll_top && row <= self.scroll_bottom {
                    let bottom = self.scroll_bottom;
                    let fill = self.cursor.style.bg_only();
                    self.grid_mut().delete_lines(row, n, bottom, fill);
                }
            }
            b'P' => {
                // DCH
                let (col, row) = (self.cursor.col, self.cursor.row);
                let fill = self.cursor.style.bg_only();
                if let Some(line) = self.grid_mut().line_mut(row) {
                    line.delete_cells(col, n, fill);
                }
            }
            b'S' => self.scroll_up_region(n, false),
            b'T' => self.scroll_down_region(n),
            b'X' => {
                // ECH: erase in place, no motion
                let (col, row) = (self.cursor.col, self.cursor.row);
                let fill = self.cursor.style.bg_only();
                if let Some(line) = self.grid_mut().line_mut(row) {
                    line.erase_cells(col, n, fill);
                }
            }
            b'Z' => self.tab_backward(n),
            b'a' => {
                // HPR
                self.cursor.move_right(n, self.cols);
            }
            b'b' => {
                // REP
                if let Some(c) = self.last_printed {
                    for _ in 0..n {
                        self.print(c);
                    }
                }
            }
            b'c' => {
                // DA1: VT102-compatible identity
                if csi.param(0, 0) == 0 {
                    self.respond(b"\x1b[?6c");
                }
            }
            b'd' => {
                // VPA
                self.cursor.row = self.absolute_row(csi.param(0, 1).max(1) as usize);
                self.cursor.pending_wrap = false;
            }
            b'e' => {
                // VPR
                let (_, bottom) = self.row_bounds();
                self.cursor.move_down(n, bottom);
            }
            b'g' => match csi.param(0, 0) {
                0 => self.tab_stops.clear(self.cursor.col),
                3 => self.tab_stops.clear_all(),
                _ => {}
            },
            b'h' => {
                for group in &csi.params {
                    if let Some(&mode) = group.first() {
                        self.modes.set_ansi_mode(mode, true);
                    }
                }
            }
            b'l' => {
                for group in &csi.params {
                    if let Some(&mode) = group.first() {
                        self.modes.set_ansi_mode(mode, false);
                    }
                }
            }
            b'm' => {
                self.cursor.style = self.cursor.style.apply_sgr(&csi.params);
            }
            b'n' => match csi.param(0, 0) {
                5 => self.respond(b"\x1b[0n"),
                6 => {
                    let (row, col) = self.cursor_report_position();
                    let reply = format!("\x1b[{};{}R", row, col);
                    self.respond(reply.as_bytes());
                }
                other => {
                    tracing::debug!(mode = other, "unknown DSR request");
                }
            },
            b'r' => self.set_scroll_region(csi.param(0, 1) as usize, csi.param(1, self.rows as u16) as usize),
            b's' => self.save_cursor(),
            b't' => {
                // Window ops: only the text-area size report is answered
                if csi.param(0, 0) == 18 {
                    let reply = format!("\x1b[8;{};{}t", self.rows, self.cols);
                    self.respond(reply.as_bytes());
                }
            }
            b'u' => self.restore_cursor(),
            _ => {
                tracing::debug!(
                    final_byte = %(csi.final_byte as char),
                    params = ?csi.params,
                    "unhandled CSI"
                );
            }
        }
    }

    fn csi_intermediate(&mut self, csi: &CsiAction) {
        match (csi.intermediates.as_slice(), csi.final_byte) {
            ([b' '], b'q') => {
                // DECSCUSR
                match csi.param(0, 1) {
                    0 | 1 => {
                        self.cursor.shape = CursorShape::Block;
                        self.cursor.blinking = true;
                    }
                    2 => {
                        self.cursor.shape = CursorShape::Block;
                        self.cursor.blinking = false;
                    }
                    3 => {
                        self.cursor.shape = CursorShape::Underline;
                        self.cursor.blinking = true;
                    }
                    4 => {
                        self.cursor.shape = CursorShape::Underline;
                        self.cursor.blinking = false;
                    }
                    5 => {
                        self.cursor.shape = CursorShape::Bar;
                        self.cursor.blinking = true;
                    }
                    6 => {
                        self.cursor.shape = CursorShape::Bar;
                        self.cursor.blinking = false;
                    }
                    _ => {}
                }
            }
            ([b'$'], b'p') => {
                // DECRQM, ANSI variant
                let mode = csi.param(0, 0);
                let status = self.modes.report_ansi_mode(mode);
                let reply = format!("\x1b[{};{}$y", mode, status);
                self.respond(reply.as_bytes());
            }
            _ => {
                tracing::debug!(
                    intermediates = ?csi.intermediates,
                    final_byte = %(csi.final_byte as char),
                    "unhandled CSI with intermediates"
                );
            }
        }
    }

    fn csi_private(&mut self, csi: &CsiAction) {
        match csi.final_byte {
            b'h' => {
                for group in &csi.params {
                    if let Some(&mode) = group.first() {
                        self.set_dec_mode(mode, true);
                    }
                }
            }
            b'l' => {
                for group in &csi.params {
                    if let Some(&mode) = group.first() {
                        self.set_dec_mode(mode, false);
                    }
                }
            }
            b'n' => {
                if csi.param(0, 0) == 6 {
                    let (row, col) = self.cursor_report_position();
                    let reply = format!("\x1b[?{};{}R", row, col);
                    self.respond(reply.as_bytes());
                }
            }
            b'p' if csi.intermediates.as_slice() == [b'$'] => {
                // DECRQM
                let mode = csi.param(0, 0);
                let status = self.modes.report_dec_mode(mode);
                let reply = format!("\x1b[?{};{}$y", mode, status);
                self.respond(reply.as_bytes());
            }
            _ => {
                tracing::debug!(
                    final_byte = %(csi.final_byte as char),
                    params = ?csi.params,
                    "unhandled private CSI"
                );
            }
        }
    }

    fn csi_secondary(&mut self, csi: &CsiAction) {
        if csi.final_byte == b'c' {
            // DA2: VT220-class, firmware 1.0
            self.respond(b"\x1b[>1;10;0c");
        } else {
            tracing::debug!(final_byte = %(csi.final_byte as char), "unhandled CSI >");
        }
    }

    /// 1-based cursor position for DSR 6, region-relative under DECOM.
    fn cursor_report_position(&self) -> (usize, usize) {
        let row = if self.cursor.origin_mode {
            self.cursor.row.saturating_sub(self.scroll_top) + 1
        } else {
            self.cursor.row + 1
        };
        (row, self.cursor.col + 1)
    }

    // --- modes ----------------------------------------------------------

    /// Enact a DEC private mode change. Structural modes are handled
    /// here; plain flags land in [`Modes`]. Unrecognised numbers are
    /// stored without effect.
    pub fn set_dec_mode(&mut self, mode: u16, value: bool) {
        match mode {
            3 => {
                // DECCOLM: resize, clear, home, reset margins. xterm does
                // all of this even when the width does not change.
                self.modes.column_132 = value;
                let cols = if value { 132 } else { 80 };
                self.resize(cols, self.rows);
                let fill = self.cursor.style.bg_only();
                self.grid_mut().clear(fill);
                self.scroll_top = 0;
                self.scroll_bottom = self.rows - 1;
                self.move_to_origin();
            }
            6 => {
                self.modes.origin = value;
                self.cursor.origin_mode = value;
                self.move_to_origin();
            }
            25 => {
                self.modes.cursor_visible = value;
                self.cursor.visible = value;
            }
            47 | 1047 => {
                if value {
                    self.enter_alternate(false, false);
                } else {
                    self.leave_alternate(false);
                }
            }
            1048 => {
                if value {
                    self.save_cursor();
                } else {
                    self.restore_cursor();
                }
            }
            1049 => {
                if value {
                    self.enter_alternate(true, true);
                } else {
                    self.leave_alternate(true);
                }
            }
            _ => {
                self.modes.set_dec_mode(mode, value);
            }
        }
    }

    fn move_to_origin(&mut self) {
        self.cursor.col = 0;
        self.cursor.row = if self.cursor.origin_mode {
            self.scroll_top
        } else {
            0
        };
        self.cursor.pending_wrap = false;
    }

    fn enter_alternate(&mut self, save: bool, clear: bool) {
        if self.active == BufferType::Alternate {
            return;
        }
        if save {
            self.save_cursor();
        }
        self.active = BufferType::Alternate;
        self.modes.alternate_screen = true;
        if clear {
            let fill = self.cursor.style.bg_only();
            self.alternate.clear(fill);
        }
    }

    fn leave_alternate(&mut self, restore: bool) {
        if self.active == BufferType::Primary {
            return;
        }
        self.active = BufferType::Primary;
        self.modes.alternate_screen = false;
        if restore {
            self.restore_cursor();
        }
    }

    // --- save/restore ---------------------------------------------------

    /// DECSC: snapshot the cursor into the active buffer's slot.
    pub fn save_cursor(&mut self) {
        let saved = SavedCursor::capture(&self.cursor, &self.charsets);
        match self.active {
            BufferType::Primary => self.saved_primary = Some(saved),
            BufferType::Alternate => self.saved_alternate = Some(saved),
        }
    }

    /// DECRC: restore the active buffer's saved cursor; without a saved
    /// state this resets the cursor to home with default attributes.
    pub fn restore_cursor(&mut self) {
        let saved = match self.active {
            BufferType::Primary => self.saved_primary.clone(),
            BufferType::Alternate => self.saved_alternate.clone(),
        };
        let saved = saved.unwrap_or_default();
        saved.restore(&mut self.cursor, &mut self.charsets, self.cols, self.rows);
        self.modes.origin = self.cursor.origin_mode;
    }

    // --- erasing --------------------------------------------------------

    fn erase_in_display(&mut self, mode: u16) {
        let (col, row) = (self.cursor.col, self.cursor.row);
        let fill = self.cursor.style.bg_only();
        let rows = self.rows;

        match mode {
            0 => {
                if let Some(line) = self.grid_mut().line_mut(row) {
                    line.clear_from(col, fill);
                }
                for r in (row + 1)..rows {
                    if let Some(line) = self.grid_mut().line_mut(r) {
                        line.clear(fill);
                    }
                }
            }
            1 => {
                for r in 0..row {
                    if let Some(line) = self.grid_mut().line_mut(r) {
                        line.clear(fill);
                    }
                }
                if let Some(line) = self.grid_mut().line_mut(row) {
                    line.clear_to(col, fill);
                }
            }
            2 => self.grid_mut().clear(fill),
            3 => {
                self.grid_mut().clear(fill);
                self.scrollback.clear();
            }
            _ => {}
        }
    }

    fn erase_in_line(&mut self, mode: u16) {
        let (col, row) = (self.cursor.col, self.cursor.row);
        let fill = self.cursor.style.bg_only();
        if let Some(line) = self.grid_mut().line_mut(row) {
            match mode {
                0 => line.clear_from(col, fill),
                1 => line.clear_to(col, fill),
                2 => line.clear(fill),
                _ => {}
            }
        }
    }

    // --- margins --------------------------------------------------------

    /// DECSTBM with 1-based parameters. Invalid regions reset to the
    /// full screen; the cursor always moves to the origin.
    pub fn set_scroll_region(&mut self, top: usize, bottom: usize) {
        let top = top.saturating_sub(1);
        let bottom = bottom.saturating_sub(1);
        if top < bottom && bottom < self.rows {
            self.scroll_top = top;
            self.scroll_bottom = bottom;
        } else {
            self.scroll_top = 0;
            self.scroll_bottom = self.rows - 1;
        }
        self.move_to_origin();
    }

    // --- ESC ------------------------------------------------------------

    fn esc_dispatch(&mut self, esc: EscAction) {
        match esc {
            EscAction::SaveCursor => self.save_cursor(),
            EscAction::RestoreCursor => self.restore_cursor(),
            EscAction::Index => self.linefeed(),
            EscAction::ReverseIndex => self.reverse_index(),
            EscAction::NextLine => {
                self.cursor.carriage_return();
                self.linefeed();
            }
            EscAction::TabSet => self.tab_stops.set(self.cursor.col),
            EscAction::FullReset => self.reset(),
            EscAction::ApplicationKeypad => self.modes.application_keypad = true,
            EscAction::NumericKeypad => self.modes.application_keypad = false,
            EscAction::SingleShift2 => self.charsets.single_shift_2(),
            EscAction::SingleShift3 => self.charsets.single_shift_3(),
            EscAction::Designate(slot, byte) => {
                self.charsets.designate(slot, Charset::from_designator(byte));
            }
            EscAction::AlignmentTest => {
                // DECALN: E pattern, home, full margins
                let cell = Cell::new('E', Style::default());
                for row in 0..self.rows {
                    for col in 0..self.cols {
                        if let Some(c) = self.grid_mut().cell_mut(col, row) {
                            *c = cell;
                        }
                    }
                }
                self.scroll_top = 0;
                self.scroll_bottom = self.rows - 1;
                self.cursor.col = 0;
                self.cursor.row = 0;
                self.cursor.pending_wrap = false;
            }
            EscAction::Unknown(bytes) => {
                tracing::debug!(?bytes, "unhandled ESC sequence");
            }
        }
    }

    // --- OSC ------------------------------------------------------------

    fn osc_dispatch(&mut self, osc: OscAction) {
        match osc {
            OscAction::SetTitle(title) => {
                self.title = title.chars().take(256).collect();
            }
            OscAction::Clipboard { .. } => {
                // Accepted and dropped: clipboard writes are an embedder
                // policy decision.
                tracing::debug!("ignoring OSC 52 clipboard request");
            }
            OscAction::Unknown { command, .. } => {
                tracing::debug!(command, "ignoring unknown OSC");
            }
        }
    }

    // --- embedder API ---------------------------------------------------

    /// Resize both buffers in place. Zero dimensions are rejected. Tab
    /// stops reset to defaults; the scroll region is clamped and
    /// collapses to full screen if it inverts.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        if cols == 0 || rows == 0 {
            tracing::warn!(cols, rows, "rejecting resize to zero dimension");
            return;
        }
        if cols == self.cols && rows == self.rows {
            return;
        }

        self.primary.resize(cols, rows, Style::default());
        self.alternate.resize(cols, rows, Style::default());
        self.tab_stops.reset(cols);

        self.scroll_bottom = self.scroll_bottom.min(rows - 1);
        if self.scroll_top >= self.scroll_bottom {
            self.scroll_top = 0;
            self.scroll_bottom = rows - 1;
        }

        self.cursor.col = self.cursor.col.min(cols - 1);
        self.cursor.row = self.cursor.row.min(rows - 1);
        self.cursor.pending_wrap = false;

        self.cols = cols;
        self.rows = rows;
    }

    /// RIS: reset to the power-on state.
    pub fn reset(&mut self) {
        self.primary = Grid::new(self.cols, self.rows);
        self.alternate = Grid::new(self.cols, self.rows);
        self.active = BufferType::Primary;
        self.scrollback.clear();
        self.cursor = Cursor::new();
        self.saved_primary = None;
        self.saved_alternate = None;
        self.modes.reset();
        self.charsets.reset();
        self.tab_stops.reset(self.cols);
        self.scroll_top = 0;
        self.scroll_bottom = self.rows - 1;
        self.title.clear();
        self.last_printed = None;
    }

    /// Encode and emit a mouse report if tracking is active. Coordinates
    /// are 0-based cells.
    pub fn report_mouse(&mut self, event: MouseEvent) {
        let mode = self.modes.mouse_mode;
        if mode == MouseMode::None {
            return;
        }
        // Motion events are gated by the tracking mode.
        if event.action == MouseAction::Motion && mode == MouseMode::Normal {
            return;
        }

        let mut code: u16 = match event.button {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            MouseButton::WheelUp => 64,
            MouseButton::WheelDown => 65,
        };
        if event.shift {
            code += 4;
        }
        if event.alt {
            code += 8;
        }
        if event.ctrl {
            code += 16;
        }
        if event.action == MouseAction::Motion {
            code += 32;
        }

        match self.modes.mouse_encoding {
            MouseEncoding::Sgr => {
                let terminator = if event.action == MouseAction::Release {
                    'm'
                } else {
                    'M'
                };
                let reply = format!(
                    "\x1b[<{};{};{}{}",
                    code,
                    event.col + 1,
                    event.row + 1,
                    terminator
                );
                self.respond(reply.as_bytes());
            }
            MouseEncoding::X10 => {
                // Release collapses to button 3; coordinates saturate at 223.
                let code = if event.action == MouseAction::Release {
                    (code & !0b11) | 3
                } else {
                    code
                };
                let cx = (event.col + 1).min(223) as u8;
                let cy = (event.row + 1).min(223) as u8;
                let reply = [b'\x1b', b'[', b'M', 32 + code as u8, 32 + cx, 32 + cy];
                self.respond(&reply);
            }
            MouseEncoding::Utf8 => {
                let code = if event.action == MouseAction::Release {
                    (code & !0b11) | 3
                } else {
                    code
                };
                let mut reply = vec![b'\x1b', b'[', b'M'];
                push_utf8_coord(&mut reply, 32 + code as u32);
                push_utf8_coord(&mut reply, 32 + (event.col as u32 + 1).min(2047));
                push_utf8_coord(&mut reply, 32 + (event.row as u32 + 1).min(2047));
                self.respond(&reply);
            }
        }
    }

    /// Emit a focus report under mode 1004.
    pub fn report_focus(&mut self, focused: bool) {
        if self.modes.focus_reporting {
            let reply: &[u8] = if focused { b"\x1b[I" } else { b"\x1b[O" };
            self.respond(reply);
        }
    }

    /// Send pasted text to the application, bracketed under mode 2004.
    pub fn paste(&mut self, text: &str) {
        if self.modes.bracketed_paste {
            self.respond(b"\x1b[200~");
            self.respond(text.as_bytes());
            self.respond(b"\x1b[201~");
        } else {
            self.respond(text.as_bytes());
        }
    }
}

/// Append one mouse coordinate as a UTF-8 code point.
fn push_utf8_coord(out: &mut Vec<u8>, value: u32) {
    let mut buf = [0u8; 4];
    let c = char::from_u32(value).unwrap_or(' ');
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}
