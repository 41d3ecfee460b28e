//! Semantic actions produced by the parser.
//!
//! The parser never touches the screen; it emits these values and the
//! screen enacts them.

use serde::{Deserialize, Serialize};

/// One decoded action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Print a character at the cursor
    Print(char),
    /// Execute a C0 control character
    Execute(u8),
    /// Dispatch a complete CSI sequence
    Csi(CsiAction),
    /// Dispatch a non-CSI escape sequence
    Esc(EscAction),
    /// Dispatch a complete OSC string
    Osc(OscAction),
    /// A complete DCS payload (consumed downstream without effect)
    Dcs(Vec<u8>),
    /// SOS/PM/APC payload (consumed without effect)
    StringData(Vec<u8>),
}

/// A complete CSI sequence: `CSI [private] params [intermediates] final`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsiAction {
    /// Parameter groups. Each group is one semicolon-separated parameter
    /// with its colon-separated sub-parameters, so `38:2:255:0:0` is one
    /// group of five values. Empty parameters appear as `[0]`.
    pub params: Vec<Vec<u16>>,
    /// Intermediate bytes (0x20-0x2F), at most two
    pub intermediates: Vec<u8>,
    /// Private prefix byte (`?`, `>`, `<`, `=`), if any
    pub private: Option<u8>,
    /// Final byte (0x40-0x7E) selecting the command
    pub final_byte: u8,
}

impl CsiAction {
    pub fn new(
        params: Vec<Vec<u16>>,
        intermediates: Vec<u8>,
        private: Option<u8>,
        final_byte: u8,
    ) -> Self {
        Self {
            params,
            intermediates,
            private,
            final_byte,
        }
    }

    /// The primary value of parameter `index`, or `default` when the
    /// parameter is absent or zero.
    pub fn param(&self, index: usize, default: u16) -> u16 {
        match self.params.get(index).and_then(|group| group.first()) {
            Some(0) | None => default,
            Some(&value) => value,
        }
    }
}

/// Non-CSI escape sequences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscAction {
    /// DECSC (ESC 7)
    SaveCursor,
    /// DECRC (ESC 8)
    RestoreCursor,
    /// IND (ESC D)
    Index,
    /// RI (ESC M)
    ReverseIndex,
    /// NEL (ESC E)
    NextLine,
    /// HTS (ESC H)
    TabSet,
    /// RIS (ESC c)
    FullReset,
    /// DECKPAM (ESC =)
    ApplicationKeypad,
    /// DECKPNM (ESC >)
    NumericKeypad,
    /// SS2 (ESC N)
    SingleShift2,
    /// SS3 (ESC O)
    SingleShift3,
    /// Designate a character set into G0..G3 (ESC ( ) * + final)
    Designate(usize, u8),
    /// DECALN (ESC # 8)
    AlignmentTest,
    /// Anything else: intermediates plus final byte
    Unknown(Vec<u8>),
}

/// OSC commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OscAction {
    /// OSC 0 / OSC 2: set the window title
    SetTitle(String),
    /// OSC 52: clipboard operation
    Clipboard { selection: String, data: String },
    /// Any other OSC command with its raw payload
    Unknown { command: u32, data: Vec<u8> },
}
