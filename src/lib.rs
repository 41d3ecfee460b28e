//! vtcore — VT/xterm terminal emulation core
//!
//! The protocol engine of a terminal emulator: a byte stream from a child
//! process goes in, a two-dimensional cell grid comes out. Three
//! subsystems do the work:
//!
//! - `parser`: a DEC-compatible state machine decoding ANSI/ECMA-48
//!   escape sequences and C0/C1 controls
//! - `core`: the screen model — primary and alternate grids, cursor,
//!   scroll region, tab stops, modes, character sets, styles
//! - [`Terminal`]: the executor tying the two together
//!
//! PTY plumbing, rendering, and keyboard translation are embedder
//! concerns; the core talks to them only through byte slices in and a
//! [`core::ResponseSink`] out.
//!
//! # Example
//!
//! ```
//! use vtcore::core::NullSink;
//! use vtcore::Terminal;
//!
//! let mut term = Terminal::new(80, 24, Box::new(NullSink));
//! term.feed(b"Hello, \x1b[31mWorld\x1b[0m!");
//!
//! let snapshot = term.snapshot();
//! assert_eq!(snapshot.text()[0], "Hello, World!");
//! ```
//!
//! # Threading
//!
//! The core is single-threaded and synchronous. [`Terminal::feed`] never
//! suspends and never blocks on replies. A renderer on another thread
//! snapshots the screen under an embedder-provided lock; do not call
//! `feed` while a snapshot you still rely on is outstanding.

pub mod core;
pub mod parser;
mod terminal;

pub use crate::core::{Cell, Color, Screen, Snapshot, Style};
pub use crate::parser::{Action, Parser};
pub use crate::terminal::Terminal;
