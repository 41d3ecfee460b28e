//! Terminal escape-sequence parser
//!
//! A stateful parser that converts a byte stream into semantic terminal
//! actions. Incremental by design: chunk boundaries may fall anywhere,
//! including in the middle of an escape sequence or a multi-byte UTF-8
//! character.
//!
//! # References
//!
//! - ECMA-48 (ISO 6429): Control Functions for Coded Character Sets
//! - Xterm Control Sequences:
//!   <https://invisible-island.net/xterm/ctlseqs/ctlseqs.html>
//! - "A parser for DEC's ANSI-compatible video terminals",
//!   <https://vt100.net/emu/dec_ansi_parser>

mod actions;
mod state;

pub use actions::{Action, CsiAction, EscAction, OscAction};
pub use state::Parser;
