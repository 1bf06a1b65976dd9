//! Escape sequence tracking inside string and character literals.
//!
//! An escape starts at the backslash. The byte after it (the introducer)
//! decides how many further bytes belong to the escape: numeric introducers
//! expect a run of hex digits, anything else is a single character.

use crate::chars::is_hex_digit;

/// Per-language table of numeric escape introducers.
///
/// Counts include the introducer itself: `\uXXXX` expects 5.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EscapeSyntax {
    /// `\uXXXX`.
    pub unicode: Option<u8>,
    /// `\UXXXXXXXX`.
    pub long_unicode: Option<u8>,
    /// `\xXX`.
    pub hex_byte: Option<u8>,
    /// `\u{...}`, up to six digits between braces.
    pub braced_unicode: bool,
}

impl EscapeSyntax {
    /// `\uXXXX` only.
    pub const UNICODE: Self = Self {
        unicode: Some(5),
        long_unicode: None,
        hex_byte: None,
        braced_unicode: false,
    };

    /// `\xXX`, `\uXXXX` and `\u{X...}`.
    pub const HEX_AND_BRACED_UNICODE: Self = Self {
        unicode: Some(5),
        long_unicode: None,
        hex_byte: Some(3),
        braced_unicode: true,
    };

    /// `\xXX`, `\uXXXX` and `\UXXXXXXXX`.
    pub const HEX_AND_LONG_UNICODE: Self = Self {
        unicode: Some(5),
        long_unicode: Some(9),
        hex_byte: Some(3),
        braced_unicode: false,
    };

    fn digits_for(&self, introducer: u8) -> u32 {
        let count = match introducer {
            b'u' => self.unicode,
            b'U' => self.long_unicode,
            b'x' => self.hex_byte,
            _ => None,
        };
        count.map_or(1, u32::from)
    }
}

/// Digits left for braced unicode: the opening brace, up to six hex digits.
const BRACED_DIGITS: u32 = 7;

/// The escape currently being scanned and the state to resume afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EscapeSequence<S> {
    outer: S,
    digits_left: u32,
    brace: bool,
}

impl<S: Copy> EscapeSequence<S> {
    pub fn new(outer: S) -> Self {
        Self {
            outer,
            digits_left: 0,
            brace: false,
        }
    }

    /// Reset for an escape whose introducer is `introducer`.
    pub fn start(&mut self, outer: S, introducer: u8, syntax: &EscapeSyntax) {
        self.outer = outer;
        self.digits_left = syntax.digits_for(introducer);
        self.brace = false;
    }

    /// Reset for a one-character escape (`$$`, `{{`).
    pub fn start_single(&mut self, outer: S) {
        self.outer = outer;
        self.digits_left = 1;
        self.brace = false;
    }

    /// Switch the current escape to braced unicode form.
    pub fn open_brace(&mut self) {
        self.brace = true;
        self.digits_left = BRACED_DIGITS;
    }

    /// Consume `ch` and report whether the escape ended before it.
    ///
    /// Ends once the expected count is exhausted or as soon as a non-hex
    /// byte shows up.
    pub fn at_end(&mut self, ch: u8) -> bool {
        self.digits_left = self.digits_left.saturating_sub(1);
        self.digits_left == 0 || !is_hex_digit(ch)
    }

    pub fn outer(&self) -> S {
        self.outer
    }

    pub fn is_braced(&self) -> bool {
        self.brace
    }
}

#[cfg(test)]
mod tests;
