//! Terminal executor
//!
//! Couples the parser and the screen model: bytes from the child process
//! go in, screen mutations and reply bytes come out. This is the type an
//! embedder holds behind its lock.

use crate::core::{MouseEvent, ResponseSink, Screen, Snapshot};
use crate::parser::Parser;

/// A complete terminal: parser plus screen.
pub struct Terminal {
    screen: Screen,
    parser: Parser,
}

impl Terminal {
    /// Create a terminal with the given dimensions. Replies (DSR, DA,
    /// mouse reports, paste brackets) go to `sink`.
    pub fn new(cols: usize, rows: usize, sink: Box<dyn ResponseSink>) -> Self {
        Self {
            screen: Screen::new(cols, rows, sink),
            parser: Parser::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Feed bytes from the child process. Synchronous; tolerates any
    /// chunk boundary, including mid-sequence splits.
    pub fn feed(&mut self, data: &[u8]) {
        for action in self.parser.feed(data) {
            self.screen.apply(action);
        }
    }

    /// Resize both buffers. Zero dimensions are rejected.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.screen.resize(cols, rows);
    }

    /// A serializable copy of the visible state for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_screen(&self.screen)
    }

    /// Forward a mouse event; encoded and reported only when the
    /// application enabled tracking.
    pub fn report_mouse(&mut self, event: MouseEvent) {
        self.screen.report_mouse(event);
    }

    /// Forward a focus change under mode 1004.
    pub fn report_focus(&mut self, focused: bool) {
        self.screen.report_focus(focused);
    }

    /// Send pasted text, bracketed under mode 2004.
    pub fn paste(&mut self, text: &str) {
        self.screen.paste(text);
    }
}
