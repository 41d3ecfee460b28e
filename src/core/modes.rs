//! Terminal mode flags
//!
//! Flag state for ANSI (SM/RM) and DEC private (DECSET/DECRST) modes.
//! Modes with structural side effects (alternate buffer, DECCOLM,
//! 1048/1049 cursor save) are enacted by the screen; this module only
//! stores the flags. Unrecognised mode numbers are remembered in a sparse
//! map so later queries see them, but they change no behavior.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Mouse reporting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseMode {
    /// No mouse reporting
    #[default]
    None,
    /// Normal tracking (1000): press and release
    Normal,
    /// Button-event tracking (1002): press, release, drag motion
    ButtonMotion,
    /// Any-event tracking (1003): all motion
    AnyMotion,
}

/// Mouse coordinate encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseEncoding {
    /// Single-byte offsets (+32), limited to coordinate 223
    #[default]
    X10,
    /// UTF-8 coordinates (1005), up to 2047
    Utf8,
    /// SGR encoding (1006): `CSI < b;x;y M/m`
    Sgr,
}

/// Terminal mode flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modes {
    /// DECCKM (?1): cursor keys send application sequences
    pub application_cursor_keys: bool,
    /// DECCOLM (?3): 132-column mode
    pub column_132: bool,
    /// DECSCNM (?5): reverse video (renderer observable)
    pub reverse_video: bool,
    /// DECOM (?6): origin mode
    pub origin: bool,
    /// DECAWM (?7): autowrap
    pub autowrap: bool,
    /// DECTCEM (?25): cursor visible (mirrored onto the cursor)
    pub cursor_visible: bool,
    /// Alternate screen active (?47 / ?1047 / ?1049)
    pub alternate_screen: bool,
    /// Focus in/out reporting (?1004)
    pub focus_reporting: bool,
    /// Bracketed paste (?2004)
    pub bracketed_paste: bool,
    /// Keypad application mode (ESC = / ESC >)
    pub application_keypad: bool,
    /// IRM (4): insert instead of overwrite
    pub insert: bool,
    /// LNM (20): LF implies CR
    pub linefeed_newline: bool,
    /// Mouse tracking mode (?1000/?1002/?1003)
    pub mouse_mode: MouseMode,
    /// Mouse coordinate encoding (?1005/?1006)
    pub mouse_encoding: MouseEncoding,
    /// Unrecognised DEC private modes, stored without effect
    pub other_dec: HashMap<u16, bool>,
    /// Unrecognised ANSI modes, stored without effect
    pub other_ansi: HashMap<u16, bool>,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            application_cursor_keys: false,
            column_132: false,
            reverse_video: false,
            origin: false,
            autowrap: true,
            cursor_visible: true,
            alternate_screen: false,
            focus_reporting: false,
            bracketed_paste: false,
            application_keypad: false,
            insert: false,
            linefeed_newline: false,
            mouse_mode: MouseMode::None,
            mouse_encoding: MouseEncoding::X10,
            other_dec: HashMap::new(),
            other_ansi: HashMap::new(),
        }
    }
}

impl Modes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Set or reset a DEC private mode flag. Returns true if the number
    /// is one this module stores directly; the screen intercepts the
    /// structural modes (3, 47, 1047, 1048, 1049) before calling this.
    pub fn set_dec_mode(&mut self, mode: u16, value: bool) -> bool {
        match mode {
            1 => self.application_cursor_keys = value,
            5 => self.reverse_video = value,
            6 => self.origin = value,
            7 => self.autowrap = value,
            25 => self.cursor_visible = value,
            1000 => {
                self.mouse_mode = if value { MouseMode::Normal } else { MouseMode::None };
            }
            1002 => {
                self.mouse_mode = if value {
                    MouseMode::ButtonMotion
                } else {
                    MouseMode::None
                };
            }
            1003 => {
                self.mouse_mode = if value {
                    MouseMode::AnyMotion
                } else {
                    MouseMode::None
                };
            }
            1004 => self.focus_reporting = value,
            1005 => {
                if value {
                    self.mouse_encoding = MouseEncoding::Utf8;
                } else if self.mouse_encoding == MouseEncoding::Utf8 {
                    self.mouse_encoding = MouseEncoding::X10;
                }
            }
            1006 => {
                if value {
                    self.mouse_encoding = MouseEncoding::Sgr;
                } else if self.mouse_encoding == MouseEncoding::Sgr {
                    self.mouse_encoding = MouseEncoding::X10;
                }
            }
            2004 => self.bracketed_paste = value,
            _ => {
                self.other_dec.insert(mode, value);
                return false;
            }
        }
        true
    }

    /// Set or reset an ANSI mode flag.
    pub fn set_ansi_mode(&mut self, mode: u16, value: bool) -> bool {
        match mode {
            4 => self.insert = value,
            20 => self.linefeed_newline = value,
            _ => {
                self.other_ansi.insert(mode, value);
                return false;
            }
        }
        true
    }

    /// DECRQM status for a DEC private mode: 1 = set, 2 = reset,
    /// 0 = not recognised.
    pub fn report_dec_mode(&self, mode: u16) -> u16 {
        let as_status = |b: bool| if b { 1 } else { 2 };
        match mode {
            1 => as_status(self.application_cursor_keys),
            3 => as_status(self.column_132),
            5 => as_status(self.reverse_video),
            6 => as_status(self.origin),
            7 => as_status(self.autowrap),
            25 => as_status(self.cursor_visible),
            47 | 1047 | 1049 => as_status(self.alternate_screen),
            1000 => as_status(self.mouse_mode == MouseMode::Normal),
            1002 => as_status(self.mouse_mode == MouseMode::ButtonMotion),
            1003 => as_status(self.mouse_mode == MouseMode::AnyMotion),
            1004 => as_status(self.focus_reporting),
            1005 => as_status(self.mouse_encoding == MouseEncoding::Utf8),
            1006 => as_status(self.mouse_encoding == MouseEncoding::Sgr),
            2004 => as_status(self.bracketed_paste),
            _ => 0,
        }
    }

    /// DECRQM status for an ANSI mode.
    pub fn report_ansi_mode(&self, mode: u16) -> u16 {
        match mode {
            4 => {
                if self.insert {
                    1
                } else {
                    2
                }
            }
            20 => {
                if self.linefeed_newline {
                    1
                } else {
                    2
                }
            }
            _ => 0,
        }
    }

    /// Whether any mouse tracking is active.
    pub fn mouse_tracking(&self) -> bool {
        self.mouse_mode != MouseMode::None
    }
}
