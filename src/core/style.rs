//! Text styling: colors, attributes, and SGR parameter handling.
//!
//! A `Style` is a small value: two colors and a set of attribute flags.
//! Styles are applied to cells by value; there is no interning. The SGR
//! decoder accepts both the semicolon form (`38;2;R;G;B`) and the colon
//! sub-parameter form (`38:2:R:G:B`).

use serde::{Deserialize, Serialize};

/// Color representation supporting indexed and RGB colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    /// Default terminal color (foreground or background)
    #[default]
    Default,
    /// Palette color (0-255; 0-15 are the ANSI colors)
    Indexed(u8),
    /// 24-bit RGB color
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Color = Color::Indexed(0);
    pub const RED: Color = Color::Indexed(1);
    pub const GREEN: Color = Color::Indexed(2);
    pub const YELLOW: Color = Color::Indexed(3);
    pub const BLUE: Color = Color::Indexed(4);
    pub const MAGENTA: Color = Color::Indexed(5);
    pub const CYAN: Color = Color::Indexed(6);
    pub const WHITE: Color = Color::Indexed(7);

    /// Convert a 256-color index to RGB using the xterm palette
    pub fn indexed_to_rgb(index: u8) -> (u8, u8, u8) {
        match index {
            0 => (0, 0, 0),
            1 => (205, 0, 0),
            2 => (0, 205, 0),
            3 => (205, 205, 0),
            4 => (0, 0, 238),
            5 => (205, 0, 205),
            6 => (0, 205, 205),
            7 => (229, 229, 229),
            8 => (127, 127, 127),
            9 => (255, 0, 0),
            10 => (0, 255, 0),
            11 => (255, 255, 0),
            12 => (92, 92, 255),
            13 => (255, 0, 255),
            14 => (0, 255, 255),
            15 => (255, 255, 255),
            // 6x6x6 color cube
            16..=231 => {
                let n = index - 16;
                let r = n / 36;
                let g = (n % 36) / 6;
                let b = n % 6;
                let to_rgb = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
                (to_rgb(r), to_rgb(g), to_rgb(b))
            }
            // Grayscale ramp
            232..=255 => {
                let gray = 8 + (index - 232) * 10;
                (gray, gray, gray)
            }
        }
    }
}

/// Text attribute flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attrs {
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub double_underline: bool,
    pub blink: bool,
    pub reverse: bool,
    pub conceal: bool,
    pub strike: bool,
    pub overline: bool,
}

impl Attrs {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A complete text style: foreground, background, and attributes.
///
/// Compared by value. `Style::default()` is the terminal's reset state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attrs,
}

impl Style {
    pub fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            attrs: Attrs::default(),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// The fill style for erase operations: background only, everything
    /// else reset.
    pub fn bg_only(&self) -> Style {
        Style {
            fg: Color::Default,
            bg: self.bg,
            attrs: Attrs::default(),
        }
    }

    /// Apply one SGR command's parameter groups to this style, returning
    /// the updated style.
    ///
    /// Each group is one semicolon-separated parameter together with its
    /// colon sub-parameters, so `38;2;255;128;0` arrives as five groups
    /// while `38:2:255:128:0` arrives as one. An empty parameter list
    /// means reset, matching `CSI m`.
    ///
    /// Unknown codes are skipped; truncated extended-color introducers
    /// (`38;5` with nothing after) leave the style unchanged and stop the
    /// scan, since the remaining parameters cannot be framed reliably.
    pub fn apply_sgr(mut self, params: &[Vec<u16>]) -> Style {
        if params.is_empty() {
            return Style::default();
        }

        let mut i = 0;
        while i < params.len() {
            let group = &params[i];
            let code = group.first().copied().unwrap_or(0);
            match code {
                0 => self = Style::default(),
                1 => self.attrs.bold = true,
                2 => self.attrs.dim = true,
                3 => self.attrs.italic = true,
                4 => self.attrs.underline = true,
                5 | 6 => self.attrs.blink = true,
                7 => self.attrs.reverse = true,
                8 => self.attrs.conceal = true,
                9 => self.attrs.strike = true,
                21 => self.attrs.double_underline = true,
                22 => {
                    self.attrs.bold = false;
                    self.attrs.dim = false;
                }
                23 => self.attrs.italic = false,
                24 => {
                    self.attrs.underline = false;
                    self.attrs.double_underline = false;
                }
                25 => self.attrs.blink = false,
                27 => self.attrs.reverse = false,
                28 => self.attrs.conceal = false,
                29 => self.attrs.strike = false,
                30..=37 => self.fg = Color::Indexed((code - 30) as u8),
                38 => match extended_color(params, &mut i) {
                    Some(color) => self.fg = color,
                    // Colon groups are self-framing, so a bad one can be
                    // skipped; a truncated semicolon form cannot.
                    None if group.len() > 1 => {}
                    None => return self,
                },
                39 => self.fg = Color::Default,
                40..=47 => self.bg = Color::Indexed((code - 40) as u8),
                48 => match extended_color(params, &mut i) {
                    Some(color) => self.bg = color,
                    None if group.len() > 1 => {}
                    None => return self,
                },
                49 => self.bg = Color::Default,
                53 => self.attrs.overline = true,
                55 => self.attrs.overline = false,
                90..=97 => self.fg = Color::Indexed((code - 90 + 8) as u8),
                100..=107 => self.bg = Color::Indexed((code - 100 + 8) as u8),
                _ => {
                    tracing::debug!(code, "ignoring unknown SGR parameter");
                }
            }
            i += 1;
        }

        self
    }

    /// Compute the SGR parameter groups that transform `self` into
    /// `target` when applied with [`Style::apply_sgr`].
    ///
    /// Renderers use this to emit minimal attribute changes between
    /// adjacent cells. A transition to the default style collapses to a
    /// single reset.
    pub fn diff(&self, target: &Style) -> Vec<Vec<u16>> {
        if self == target {
            return Vec::new();
        }
        if target.is_default() {
            return vec![vec![0]];
        }

        let mut out: Vec<Vec<u16>> = Vec::new();
        let a = &self.attrs;
        let b = &target.attrs;

        // Bold and dim share the same reset code, so handle them together.
        if (a.bold && !b.bold) || (a.dim && !b.dim) {
            out.push(vec![22]);
            if b.bold {
                out.push(vec![1]);
            }
            if b.dim {
                out.push(vec![2]);
            }
        } else {
            if b.bold && !a.bold {
                out.push(vec![1]);
            }
            if b.dim && !a.dim {
                out.push(vec![2]);
            }
        }

        // Underline and double underline share reset code 24.
        if (a.underline && !b.underline) || (a.double_underline && !b.double_underline) {
            out.push(vec![24]);
            if b.underline {
                out.push(vec![4]);
            }
            if b.double_underline {
                out.push(vec![21]);
            }
        } else {
            if b.underline && !a.underline {
                out.push(vec![4]);
            }
            if b.double_underline && !a.double_underline {
                out.push(vec![21]);
            }
        }

        let flags = [
            (a.italic, b.italic, 3u16, 23u16),
            (a.blink, b.blink, 5, 25),
            (a.reverse, b.reverse, 7, 27),
            (a.conceal, b.conceal, 8, 28),
            (a.strike, b.strike, 9, 29),
            (a.overline, b.overline, 53, 55),
        ];
        for (from, to, set, clear) in flags {
            if to && !from {
                out.push(vec![set]);
            } else if from && !to {
                out.push(vec![clear]);
            }
        }

        if self.fg != target.fg {
            out.push(color_params(target.fg, true));
        }
        if self.bg != target.bg {
            out.push(color_params(target.bg, false));
        }

        out
    }
}

/// Decode a 38/48 extended-color subcommand starting at group `i`.
///
/// Advances `i` past every parameter the subcommand consumed. Returns
/// `None` when the introducer is truncated.
fn extended_color(params: &[Vec<u16>], i: &mut usize) -> Option<Color> {
    let group = &params[*i];
    if group.len() > 1 {
        // Colon form: the whole subcommand is in one group.
        return match group[1] {
            5 => group.get(2).map(|&n| Color::Indexed(n as u8)),
            2 => {
                // Both 38:2:R:G:B and the ISO form 38:2:CS:R:G:B appear in
                // the wild; a 6-token group carries a color-space id.
                let (r, g, b) = if group.len() >= 6 {
                    (group.get(3), group.get(4), group.get(5))
                } else {
                    (group.get(2), group.get(3), group.get(4))
                };
                Some(Color::Rgb(*r? as u8, *g? as u8, *b? as u8))
            }
            _ => None,
        };
    }

    // Semicolon form: the mode and payload are in the following groups.
    let mode = params.get(*i + 1)?.first().copied()?;
    match mode {
        5 => {
            let n = params.get(*i + 2)?.first().copied()?;
            *i += 2;
            Some(Color::Indexed(n as u8))
        }
        2 => {
            let r = params.get(*i + 2)?.first().copied()?;
            let g = params.get(*i + 3)?.first().copied()?;
            let b = params.get(*i + 4)?.first().copied()?;
            *i += 4;
            Some(Color::Rgb(r as u8, g as u8, b as u8))
        }
        _ => {
            *i += 1;
            None
        }
    }
}

/// Emit the SGR parameter group that selects `color`.
fn color_params(color: Color, foreground: bool) -> Vec<u16> {
    let (default_code, base, bright_base, extended) = if foreground {
        (39u16, 30u16, 90u16, 38u16)
    } else {
        (49, 40, 100, 48)
    };
    match color {
        Color::Default => vec![default_code],
        Color::Indexed(n) if n < 8 => vec![base + n as u16],
        Color::Indexed(n) if n < 16 => vec![bright_base + (n - 8) as u16],
        Color::Indexed(n) => vec![extended, 5, n as u16],
        Color::Rgb(r, g, b) => vec![extended, 2, r as u16, g as u16, b as u16],
    }
}
