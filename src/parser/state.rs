//! Parser state machine
//!
//! A VT500-series compatible parser following the state machine model in
//! "A parser for DEC's ANSI-compatible video terminals" (Paul Williams,
//! vt100.net). Bytes stream in through [`Parser::feed`] with arbitrary
//! chunk boundaries; complete sequences come out as [`Action`] values.
//!
//! A small incremental UTF-8 decoder sits in front of the state machine:
//! invalid input produces U+FFFD without disturbing sequence recognition,
//! and an unexpected byte in the middle of a multi-byte character is
//! reprocessed so nothing is lost.

use super::actions::{Action, CsiAction, EscAction, OscAction};

/// Hard limits on collected state, per the DEC parser model. Input past
/// these limits is discarded, never buffered.
const MAX_PARAMS: usize = 16;
const MAX_SUBPARAMS: usize = 16;
const MAX_PARAM_VALUE: u32 = 65535;
const MAX_INTERMEDIATES: usize = 2;
const MAX_STRING_LEN: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    EscapeIntermediate,
    CsiEntry,
    CsiParam,
    CsiIntermediate,
    CsiIgnore,
    OscString,
    DcsEntry,
    DcsParam,
    DcsIntermediate,
    DcsPassthrough,
    DcsIgnore,
    SosPmApcString,
}

/// The terminal parser
#[derive(Debug)]
pub struct Parser {
    state: State,
    /// Collected intermediate bytes (0x20-0x2F)
    intermediates: Vec<u8>,
    /// Completed parameter groups
    params: Vec<Vec<u16>>,
    /// Sub-parameters of the group being built
    current_group: Vec<u16>,
    /// Value of the sub-parameter being built
    current_value: u32,
    /// Whether the current sub-parameter has seen a digit
    has_digit: bool,
    /// Private prefix byte (`?`, `>`, `<`, `=`)
    private: Option<u8>,
    /// OSC command number
    osc_command: u32,
    /// OSC payload (after the first `;`)
    osc_payload: Vec<u8>,
    /// Whether the OSC command number has been terminated by `;`
    osc_in_payload: bool,
    /// OSC payload overflowed; discard through the terminator
    osc_overflow: bool,
    /// DCS / SOS / PM / APC payload
    string_payload: Vec<u8>,
    /// UTF-8 accumulation
    utf8_buffer: Vec<u8>,
    utf8_remaining: u8,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a parser in the ground state.
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            intermediates: Vec::with_capacity(MAX_INTERMEDIATES),
            params: Vec::with_capacity(MAX_PARAMS),
            current_group: Vec::new(),
            current_value: 0,
            has_digit: false,
            private: None,
            osc_command: 0,
            osc_payload: Vec::with_capacity(256),
            osc_in_payload: false,
            osc_overflow: false,
            string_payload: Vec::with_capacity(256),
            utf8_buffer: Vec::with_capacity(4),
            utf8_remaining: 0,
        }
    }

    /// Reset to the ground state, dropping any partial sequence.
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.clear_sequence();
        self.osc_payload.clear();
        self.string_payload.clear();
        self.utf8_buffer.clear();
        self.utf8_remaining = 0;
    }

    fn clear_sequence(&mut self) {
        self.intermediates.clear();
        self.params.clear();
        self.current_group.clear();
        self.current_value = 0;
        self.has_digit = false;
        self.private = None;
    }

    /// Process a chunk of bytes, returning the decoded actions. Chunk
    /// boundaries may fall anywhere, including mid-sequence.
    pub fn feed(&mut self, data: &[u8]) -> Vec<Action> {
        let mut actions = Vec::new();
        for &byte in data {
            self.process_byte(byte, &mut actions);
        }
        actions
    }

    fn process_byte(&mut self, byte: u8, out: &mut Vec<Action>) {
        // A UTF-8 sequence in progress consumes continuation bytes before
        // anything else.
        if self.utf8_remaining > 0 {
            self.utf8_continuation(byte, out);
            return;
        }

        if byte < 0x20 {
            self.process_c0(byte, out);
            return;
        }
        if byte == 0x7F {
            // DEL is ignored everywhere
            return;
        }
        if (0x80..=0x9F).contains(&byte) {
            self.process_c1(byte, out);
            return;
        }

        match self.state {
            State::Ground => self.ground(byte, out),
            State::Escape => self.escape(byte, out),
            State::EscapeIntermediate => self.escape_intermediate(byte, out),
            State::CsiEntry => self.csi_entry(byte, out),
            State::CsiParam => self.csi_param(byte, out),
            State::CsiIntermediate => self.csi_intermediate(byte, out),
            State::CsiIgnore => self.csi_ignore(byte),
            State::OscString => self.osc_put(byte),
            State::DcsEntry => self.dcs_entry(byte),
            State::DcsParam => self.dcs_param(byte),
            State::DcsIntermediate => self.dcs_intermediate(byte),
            State::DcsPassthrough => self.dcs_put(byte),
            State::DcsIgnore => {}
            State::SosPmApcString => self.sos_pm_apc_put(byte),
        }
    }

    // --- control bytes --------------------------------------------------

    fn process_c0(&mut self, byte: u8, out: &mut Vec<Action>) {
        match byte {
            0x18 => {
                // CAN aborts silently
                self.abort_string();
                self.state = State::Ground;
            }
            0x1A => {
                // SUB aborts and shows a substitute character
                self.abort_string();
                self.state = State::Ground;
                out.push(Action::Print('\u{FFFD}'));
            }
            0x1B => {
                // ESC terminates a string in progress, then restarts
                // sequence recognition.
                self.terminate_string(out);
                self.state = State::Escape;
                self.clear_sequence();
            }
            0x07 if self.state == State::OscString => {
                // BEL terminates OSC (xterm extension)
                self.dispatch_osc(out);
                self.state = State::Ground;
            }
            _ => match self.state {
                State::OscString | State::DcsPassthrough | State::DcsIgnore
                | State::SosPmApcString => {
                    // Other C0 bytes are swallowed inside strings
                }
                _ => out.push(Action::Execute(byte)),
            },
        }
    }

    fn process_c1(&mut self, byte: u8, out: &mut Vec<Action>) {
        // 8-bit C1 controls dispatch exactly like ESC plus (byte - 0x40).
        // They are recognised from any state, aborting whatever was in
        // progress, which matches the DEC parser's "anywhere" transitions.
        match byte {
            0x84 => {
                self.state = State::Ground;
                out.push(Action::Esc(EscAction::Index));
            }
            0x85 => {
                self.state = State::Ground;
                out.push(Action::Esc(EscAction::NextLine));
            }
            0x88 => {
                self.state = State::Ground;
                out.push(Action::Esc(EscAction::TabSet));
            }
            0x8D => {
                self.state = State::Ground;
                out.push(Action::Esc(EscAction::ReverseIndex));
            }
            0x8E => {
                self.state = State::Ground;
                out.push(Action::Esc(EscAction::SingleShift2));
            }
            0x8F => {
                self.state = State::Ground;
                out.push(Action::Esc(EscAction::SingleShift3));
            }
            0x90 => self.enter_dcs(),
            0x98 | 0x9E | 0x9F => self.enter_sos_pm_apc(),
            0x9B => self.enter_csi(),
            0x9C => {
                // ST
                self.terminate_string(out);
                self.state = State::Ground;
            }
            0x9D => self.enter_osc(),
            _ => {}
        }
    }

    // --- state entry helpers --------------------------------------------

    fn enter_csi(&mut self) {
        self.state = State::CsiEntry;
        self.clear_sequence();
    }

    fn enter_osc(&mut self) {
        self.state = State::OscString;
        self.osc_command = 0;
        self.osc_payload.clear();
        self.osc_in_payload = false;
        self.osc_overflow = false;
    }

    fn enter_dcs(&mut self) {
        self.state = State::DcsEntry;
        self.clear_sequence();
        self.string_payload.clear();
    }

    fn enter_sos_pm_apc(&mut self) {
        self.state = State::SosPmApcString;
        self.string_payload.clear();
    }

    /// Dispatch a string sequence cut short by ESC or ST.
    fn terminate_string(&mut self, out: &mut Vec<Action>) {
        match self.state {
            State::OscString => self.dispatch_osc(out),
            State::DcsPassthrough => {
                out.push(Action::Dcs(std::mem::take(&mut self.string_payload)));
            }
            State::SosPmApcString => {
                out.push(Action::StringData(std::mem::take(&mut self.string_payload)));
            }
            _ => {}
        }
    }

    /// Drop a string sequence without dispatching.
    fn abort_string(&mut self) {
        self.osc_payload.clear();
        self.string_payload.clear();
    }

    // --- ground ---------------------------------------------------------

    fn ground(&mut self, byte: u8, out: &mut Vec<Action>) {
        if byte < 0x80 {
            out.push(Action::Print(byte as char));
            return;
        }
        self.utf8_start(byte, out);
    }

    // --- UTF-8 ----------------------------------------------------------

    fn utf8_start(&mut self, byte: u8, out: &mut Vec<Action>) {
        let remaining = match byte {
            0xC2..=0xDF => 1,
            0xE0..=0xEF => 2,
            0xF0..=0xF4 => 3,
            _ => {
                // 0xA0..=0xC1 and 0xF5..=0xFF cannot begin a character
                out.push(Action::Print('\u{FFFD}'));
                return;
            }
        };
        self.utf8_buffer.clear();
        self.utf8_buffer.push(byte);
        self.utf8_remaining = remaining;
    }

    fn utf8_continuation(&mut self, byte: u8, out: &mut Vec<Action>) {
        if (0x80..=0xBF).contains(&byte) {
            self.utf8_buffer.push(byte);
            self.utf8_remaining -= 1;
            if self.utf8_remaining == 0 {
                // from_utf8 rejects overlong and surrogate encodings
                let c = std::str::from_utf8(&self.utf8_buffer)
                    .ok()
                    .and_then(|s| s.chars().next())
                    .unwrap_or('\u{FFFD}');
                self.utf8_buffer.clear();
                out.push(Action::Print(c));
            }
        } else {
            // Broken sequence: emit a replacement and reprocess this byte
            // as the start of something new.
            self.utf8_buffer.clear();
            self.utf8_remaining = 0;
            out.push(Action::Print('\u{FFFD}'));
            self.process_byte(byte, out);
        }
    }

    // --- escape ---------------------------------------------------------

    fn escape(&mut self, byte: u8, out: &mut Vec<Action>) {
        match byte {
            0x20..=0x2F => {
                self.collect_intermediate(byte);
                self.state = State::EscapeIntermediate;
            }
            b'[' => self.enter_csi(),
            b']' => self.enter_osc(),
            b'P' => self.enter_dcs(),
            b'X' | b'^' | b'_' => self.enter_sos_pm_apc(),
            0x30..=0x7E => {
                self.state = State::Ground;
                self.dispatch_esc(byte, out);
            }
            _ => {
                self.state = State::Ground;
            }
        }
    }

    fn escape_intermediate(&mut self, byte: u8, out: &mut Vec<Action>) {
        match byte {
            0x20..=0x2F => self.collect_intermediate(byte),
            0x30..=0x7E => {
                self.state = State::Ground;
                self.dispatch_esc(byte, out);
            }
            _ => {
                self.state = State::Ground;
            }
        }
    }

    fn dispatch_esc(&mut self, final_byte: u8, out: &mut Vec<Action>) {
        let action = match (self.intermediates.as_slice(), final_byte) {
            ([], b'7') => EscAction::SaveCursor,
            ([], b'8') => EscAction::RestoreCursor,
            ([], b'D') => EscAction::Index,
            ([], b'E') => EscAction::NextLine,
            ([], b'H') => EscAction::TabSet,
            ([], b'M') => EscAction::ReverseIndex,
            ([], b'N') => EscAction::SingleShift2,
            ([], b'O') => EscAction::SingleShift3,
            ([], b'c') => EscAction::FullReset,
            ([], b'=') => EscAction::ApplicationKeypad,
            ([], b'>') => EscAction::NumericKeypad,
            ([], b'\\') => return, // ST with nothing to terminate
            ([b'('], c) => EscAction::Designate(0, c),
            ([b')'], c) => EscAction::Designate(1, c),
            ([b'*'], c) => EscAction::Designate(2, c),
            ([b'+'], c) => EscAction::Designate(3, c),
            ([b'#'], b'8') => EscAction::AlignmentTest,
            (intermediates, c) => {
                let mut seq = intermediates.to_vec();
                seq.push(c);
                EscAction::Unknown(seq)
            }
        };
        out.push(Action::Esc(action));
    }

    // --- CSI ------------------------------------------------------------

    fn csi_entry(&mut self, byte: u8, out: &mut Vec<Action>) {
        match byte {
            0x30..=0x39 => {
                self.param_digit(byte);
                self.state = State::CsiParam;
            }
            b';' => {
                self.finish_param();
                self.state = State::CsiParam;
            }
            b'?' | b'>' | b'<' | b'=' => {
                self.private = Some(byte);
                self.state = State::CsiParam;
            }
            0x20..=0x2F => {
                self.collect_intermediate(byte);
                self.state = State::CsiIntermediate;
            }
            0x40..=0x7E => {
                self.state = State::Ground;
                self.dispatch_csi(byte, out);
            }
            _ => {
                self.state = State::CsiIgnore;
            }
        }
    }

    fn csi_param(&mut self, byte: u8, out: &mut Vec<Action>) {
        match byte {
            0x30..=0x39 => self.param_digit(byte),
            b';' => self.finish_param(),
            b':' => self.finish_subparam(),
            0x20..=0x2F => {
                if self.has_digit || !self.current_group.is_empty() {
                    self.finish_param();
                }
                self.collect_intermediate(byte);
                self.state = State::CsiIntermediate;
            }
            0x40..=0x7E => {
                self.state = State::Ground;
                if self.has_digit || !self.current_group.is_empty() || !self.params.is_empty() {
                    self.finish_param();
                }
                self.dispatch_csi(byte, out);
            }
            _ => {
                // Private markers past the front are malformed
                self.state = State::CsiIgnore;
            }
        }
    }

    fn csi_intermediate(&mut self, byte: u8, out: &mut Vec<Action>) {
        match byte {
            0x20..=0x2F => self.collect_intermediate(byte),
            0x40..=0x7E => {
                self.state = State::Ground;
                self.dispatch_csi(byte, out);
            }
            _ => {
                self.state = State::CsiIgnore;
            }
        }
    }

    fn csi_ignore(&mut self, byte: u8) {
        if (0x40..=0x7E).contains(&byte) {
            self.state = State::Ground;
        }
    }

    fn param_digit(&mut self, byte: u8) {
        self.current_value = self
            .current_value
            .saturating_mul(10)
            .saturating_add((byte - b'0') as u32)
            .min(MAX_PARAM_VALUE);
        self.has_digit = true;
    }

    /// End the current sub-parameter within its group.
    fn finish_subparam(&mut self) {
        if self.current_group.len() < MAX_SUBPARAMS {
            self.current_group.push(self.current_value as u16);
        }
        self.current_value = 0;
        self.has_digit = false;
    }

    /// End the current parameter group.
    fn finish_param(&mut self) {
        self.finish_subparam();
        if self.params.len() < MAX_PARAMS {
            self.params.push(std::mem::take(&mut self.current_group));
        } else {
            self.current_group.clear();
        }
    }

    fn collect_intermediate(&mut self, byte: u8) {
        if self.intermediates.len() < MAX_INTERMEDIATES {
            self.intermediates.push(byte);
        }
    }

    fn dispatch_csi(&mut self, final_byte: u8, out: &mut Vec<Action>) {
        let action = CsiAction::new(
            std::mem::take(&mut self.params),
            std::mem::take(&mut self.intermediates),
            self.private,
            final_byte,
        );
        out.push(Action::Csi(action));
    }

    // --- OSC ------------------------------------------------------------

    fn osc_put(&mut self, byte: u8) {
        if !self.osc_in_payload {
            if byte.is_ascii_digit() {
                self.osc_command = self
                    .osc_command
                    .saturating_mul(10)
                    .saturating_add((byte - b'0') as u32);
                return;
            }
            if byte == b';' {
                self.osc_in_payload = true;
                return;
            }
            // A command that is not numeric: keep the bytes as payload so
            // unknown commands still round through the dispatch path.
            self.osc_in_payload = true;
        }
        if self.osc_payload.len() >= MAX_STRING_LEN {
            self.osc_overflow = true;
            return;
        }
        self.osc_payload.push(byte);
    }

    fn dispatch_osc(&mut self, out: &mut Vec<Action>) {
        let payload = std::mem::take(&mut self.osc_payload);
        if self.osc_overflow {
            tracing::debug!(command = self.osc_command, "discarding oversized OSC");
            self.osc_overflow = false;
            return;
        }

        let action = match self.osc_command {
            0 | 2 => OscAction::SetTitle(String::from_utf8_lossy(&payload).into_owned()),
            52 => {
                let text = String::from_utf8_lossy(&payload);
                let (selection, data) = match text.split_once(';') {
                    Some((sel, data)) => (sel.to_string(), data.to_string()),
                    None => (String::new(), text.into_owned()),
                };
                OscAction::Clipboard { selection, data }
            }
            command => OscAction::Unknown {
                command,
                data: payload,
            },
        };
        out.push(Action::Osc(action));
    }

    // --- DCS / SOS / PM / APC -------------------------------------------

    fn dcs_entry(&mut self, byte: u8) {
        match byte {
            0x30..=0x39 => {
                self.param_digit(byte);
                self.state = State::DcsParam;
            }
            b';' => {
                self.finish_param();
                self.state = State::DcsParam;
            }
            b'?' | b'>' | b'<' | b'=' => {
                self.private = Some(byte);
                self.state = State::DcsParam;
            }
            0x20..=0x2F => {
                self.collect_intermediate(byte);
                self.state = State::DcsIntermediate;
            }
            0x40..=0x7E => self.state = State::DcsPassthrough,
            _ => self.state = State::DcsIgnore,
        }
    }

    fn dcs_param(&mut self, byte: u8) {
        match byte {
            0x30..=0x39 => self.param_digit(byte),
            b';' => self.finish_param(),
            b':' => self.finish_subparam(),
            0x20..=0x2F => {
                self.collect_intermediate(byte);
                self.state = State::DcsIntermediate;
            }
            0x40..=0x7E => self.state = State::DcsPassthrough,
            _ => self.state = State::DcsIgnore,
        }
    }

    fn dcs_intermediate(&mut self, byte: u8) {
        match byte {
            0x20..=0x2F => self.collect_intermediate(byte),
            0x40..=0x7E => self.state = State::DcsPassthrough,
            _ => self.state = State::DcsIgnore,
        }
    }

    fn dcs_put(&mut self, byte: u8) {
        if self.string_payload.len() >= MAX_STRING_LEN {
            tracing::debug!("discarding oversized DCS");
            self.string_payload.clear();
            self.state = State::DcsIgnore;
            return;
        }
        self.string_payload.push(byte);
    }

    fn sos_pm_apc_put(&mut self, byte: u8) {
        if self.string_payload.len() >= MAX_STRING_LEN {
            self.string_payload.clear();
            self.state = State::DcsIgnore;
            return;
        }
        self.string_payload.push(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csi(actions: &[Action]) -> &CsiAction {
        match &actions[0] {
            Action::Csi(csi) => csi,
            other => panic!("expected CSI, got {:?}", other),
        }
    }

    #[test]
    fn test_print_ascii() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"Hello");
        assert_eq!(actions.len(), 5);
        assert_eq!(actions[0], Action::Print('H'));
        assert_eq!(actions[4], Action::Print('o'));
    }

    #[test]
    fn test_c0_controls() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"A\r\nB");
        assert_eq!(
            actions,
            vec![
                Action::Print('A'),
                Action::Execute(b'\r'),
                Action::Execute(b'\n'),
                Action::Print('B'),
            ]
        );
    }

    #[test]
    fn test_csi_simple() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[5A");
        let csi = csi(&actions);
        assert_eq!(csi.params, vec![vec![5]]);
        assert_eq!(csi.final_byte, b'A');
        assert_eq!(csi.private, None);
    }

    #[test]
    fn test_csi_multiple_params() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[10;20H");
        let csi = csi(&actions);
        assert_eq!(csi.params, vec![vec![10], vec![20]]);
        assert_eq!(csi.final_byte, b'H');
    }

    #[test]
    fn test_csi_empty_params() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[H");
        assert!(csi(&actions).params.is_empty());

        let actions = parser.feed(b"\x1b[;5H");
        assert_eq!(csi(&actions).params, vec![vec![0], vec![5]]);

        let actions = parser.feed(b"\x1b[5;H");
        assert_eq!(csi(&actions).params, vec![vec![5], vec![0]]);
    }

    #[test]
    fn test_csi_private_marker() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[?25h");
        let csi_action = csi(&actions);
        assert_eq!(csi_action.private, Some(b'?'));
        assert_eq!(csi_action.params, vec![vec![25]]);
        assert_eq!(csi_action.final_byte, b'h');

        let actions = parser.feed(b"\x1b[>c");
        let csi_action = csi(&actions);
        assert_eq!(csi_action.private, Some(b'>'));
        assert_eq!(csi_action.final_byte, b'c');
    }

    #[test]
    fn test_csi_colon_subparams() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[38:2:255:128:0m");
        assert_eq!(csi(&actions).params, vec![vec![38, 2, 255, 128, 0]]);

        let actions = parser.feed(b"\x1b[4:3m");
        assert_eq!(csi(&actions).params, vec![vec![4, 3]]);
    }

    #[test]
    fn test_csi_mixed_semicolon_colon() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[1;38:5:196;4m");
        assert_eq!(
            csi(&actions).params,
            vec![vec![1], vec![38, 5, 196], vec![4]]
        );
    }

    #[test]
    fn test_csi_param_overflow_clamps() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[99999999999A");
        assert_eq!(csi(&actions).params, vec![vec![65535]]);
    }

    #[test]
    fn test_csi_too_many_params() {
        let mut parser = Parser::new();
        let input = format!(
            "\x1b[{}H",
            (1..=20).map(|i| i.to_string()).collect::<Vec<_>>().join(";")
        );
        let actions = parser.feed(input.as_bytes());
        let csi = csi(&actions);
        assert_eq!(csi.params.len(), 16);
        assert_eq!(csi.params[0], vec![1]);
        assert_eq!(csi.params[15], vec![16]);
    }

    #[test]
    fn test_csi_intermediates() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[2 q");
        let csi = csi(&actions);
        assert_eq!(csi.intermediates, vec![b' ']);
        assert_eq!(csi.params, vec![vec![2]]);
        assert_eq!(csi.final_byte, b'q');
    }

    #[test]
    fn test_esc_dispatch() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b7\x1b8\x1bD\x1bM");
        assert_eq!(
            actions,
            vec![
                Action::Esc(EscAction::SaveCursor),
                Action::Esc(EscAction::RestoreCursor),
                Action::Esc(EscAction::Index),
                Action::Esc(EscAction::ReverseIndex),
            ]
        );
    }

    #[test]
    fn test_esc_charset_designation() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b(B\x1b)0\x1b*A\x1b+0");
        assert_eq!(
            actions,
            vec![
                Action::Esc(EscAction::Designate(0, b'B')),
                Action::Esc(EscAction::Designate(1, b'0')),
                Action::Esc(EscAction::Designate(2, b'A')),
                Action::Esc(EscAction::Designate(3, b'0')),
            ]
        );
    }

    #[test]
    fn test_esc_alignment_test() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b#8");
        assert_eq!(actions, vec![Action::Esc(EscAction::AlignmentTest)]);
    }

    #[test]
    fn test_osc_title_bel() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b]0;My Title\x07");
        assert_eq!(
            actions,
            vec![Action::Osc(OscAction::SetTitle("My Title".into()))]
        );
    }

    #[test]
    fn test_osc_title_st() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b]2;Other Title\x1b\\");
        assert_eq!(
            actions,
            vec![Action::Osc(OscAction::SetTitle("Other Title".into()))]
        );
    }

    #[test]
    fn test_osc_clipboard() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b]52;c;aGVsbG8=\x07");
        assert_eq!(
            actions,
            vec![Action::Osc(OscAction::Clipboard {
                selection: "c".into(),
                data: "aGVsbG8=".into(),
            })]
        );
    }

    #[test]
    fn test_osc_unknown_command() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b]777;whatever\x07");
        assert_eq!(
            actions,
            vec![Action::Osc(OscAction::Unknown {
                command: 777,
                data: b"whatever".to_vec(),
            })]
        );
    }

    #[test]
    fn test_osc_oversized_payload_discarded() {
        let mut parser = Parser::new();
        let mut input = b"\x1b]0;".to_vec();
        input.extend(std::iter::repeat(b'x').take(5000));
        input.push(0x07);
        let actions = parser.feed(&input);
        assert!(actions.is_empty());
        // Parser is back in ground and healthy
        assert_eq!(parser.feed(b"A"), vec![Action::Print('A')]);
    }

    #[test]
    fn test_dcs_accepted_and_delivered() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1bPq#0;2;0;0;0\x1b\\");
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], Action::Dcs(_)));
    }

    #[test]
    fn test_sos_pm_apc_swallowed() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b_private stuff\x1b\\A");
        assert_eq!(actions.len(), 2);
        assert!(matches!(actions[0], Action::StringData(_)));
        assert_eq!(actions[1], Action::Print('A'));
    }

    #[test]
    fn test_chunk_boundaries() {
        let mut parser = Parser::new();
        assert!(parser.feed(b"\x1b").is_empty());
        assert!(parser.feed(b"[").is_empty());
        assert!(parser.feed(b"3").is_empty());
        assert!(parser.feed(b"8;5;1").is_empty());
        let actions = parser.feed(b"2m");
        assert_eq!(csi(&actions).params, vec![vec![38], vec![5], vec![12]]);
    }

    #[test]
    fn test_utf8_basic() {
        let mut parser = Parser::new();
        let actions = parser.feed("héllo 世界 🎉".as_bytes());
        let printed: String = actions
            .iter()
            .map(|a| match a {
                Action::Print(c) => *c,
                _ => panic!("unexpected action"),
            })
            .collect();
        assert_eq!(printed, "héllo 世界 🎉");
    }

    #[test]
    fn test_utf8_chunk_boundary() {
        let mut parser = Parser::new();
        // '世' is E4 B8 96
        assert!(parser.feed(&[0xE4]).is_empty());
        assert!(parser.feed(&[0xB8]).is_empty());
        assert_eq!(parser.feed(&[0x96]), vec![Action::Print('世')]);
    }

    #[test]
    fn test_utf8_invalid_lead() {
        let mut parser = Parser::new();
        let actions = parser.feed(&[0xFF, b'A']);
        assert_eq!(
            actions,
            vec![Action::Print('\u{FFFD}'), Action::Print('A')]
        );
    }

    #[test]
    fn test_utf8_truncated_sequence_reprocesses_byte() {
        let mut parser = Parser::new();
        // Lead byte expects continuations but 'A' arrives: replacement,
        // then the 'A' must not be lost.
        let actions = parser.feed(&[0xE4, b'A']);
        assert_eq!(
            actions,
            vec![Action::Print('\u{FFFD}'), Action::Print('A')]
        );
    }

    #[test]
    fn test_utf8_interrupted_by_escape() {
        let mut parser = Parser::new();
        let actions = parser.feed(&[0xE4, 0x1B, b'[', b'm']);
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], Action::Print('\u{FFFD}'));
        assert!(matches!(actions[1], Action::Csi(_)));
    }

    #[test]
    fn test_overlong_encoding_rejected() {
        let mut parser = Parser::new();
        // 0xC0 0x80 is an overlong NUL
        let actions = parser.feed(&[0xC0, 0x80]);
        assert_eq!(actions[0], Action::Print('\u{FFFD}'));
    }

    #[test]
    fn test_cancel_aborts_sequence() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[5\x18A");
        assert_eq!(actions, vec![Action::Print('A')]);
    }

    #[test]
    fn test_sub_aborts_with_replacement() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[5\x1aA");
        assert_eq!(
            actions,
            vec![Action::Print('\u{FFFD}'), Action::Print('A')]
        );
    }

    #[test]
    fn test_esc_restarts_sequence() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[5\x1b[6m");
        assert_eq!(actions.len(), 1);
        assert_eq!(csi(&actions).params, vec![vec![6]]);
    }

    #[test]
    fn test_c0_executes_inside_csi() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[5\n;3H");
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], Action::Execute(b'\n'));
        assert_eq!(csi(&actions[1..]).params, vec![vec![5], vec![3]]);
    }

    #[test]
    fn test_c1_controls_eight_bit() {
        let mut parser = Parser::new();
        // 0x9B is CSI, 0x8D is RI
        let actions = parser.feed(&[0x9B, b'5', b'A', 0x8D]);
        assert_eq!(actions.len(), 2);
        assert_eq!(csi(&actions).params, vec![vec![5]]);
        assert_eq!(actions[1], Action::Esc(EscAction::ReverseIndex));
    }

    #[test]
    fn test_c1_matches_escape_form() {
        let mut parser1 = Parser::new();
        let mut parser2 = Parser::new();
        let eight_bit = parser1.feed(&[0x85]);
        let seven_bit = parser2.feed(b"\x1bE");
        assert_eq!(eight_bit, seven_bit);
    }

    #[test]
    fn test_malformed_csi_goes_to_ignore() {
        let mut parser = Parser::new();
        // A private marker after digits is malformed; everything through
        // the final byte is swallowed.
        let actions = parser.feed(b"\x1b[12?5hX");
        assert_eq!(actions, vec![Action::Print('X')]);
    }

    #[test]
    fn test_colon_at_entry_ignored() {
        let mut parser = Parser::new();
        let actions = parser.feed(b"\x1b[:5mX");
        assert_eq!(actions, vec![Action::Print('X')]);
    }

    #[test]
    fn test_reset_mid_sequence() {
        let mut parser = Parser::new();
        parser.feed(b"\x1b[12;3");
        parser.reset();
        assert_eq!(parser.feed(b"A"), vec![Action::Print('A')]);
    }
}
