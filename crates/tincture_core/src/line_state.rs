//! Per-line state persisted between scans.
//!
//! Each completed line is summarized in one `u32`:
//!
//! | bits  | field                |
//! |-------|----------------------|
//! | 0-7   | [`LineFlags`]        |
//! | 8-15  | comment nesting depth, or outline level on `HEADING` lines |
//! | 16-31 | leading indent width |
//!
//! The next scan reads the previous line's value to pick up comment depth, and
//! [`resync`](crate::resync) reads the `NESTED` flag to decide how far back a
//! restart must go. Fold analysis reads the rest.

use bitflags::bitflags;

bitflags! {
    /// Continuation flags for one line.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct LineFlags: u8 {
        /// No visible characters and nothing carried over.
        const BLANK = 1 << 0;
        /// Line comment, or a line inside a block comment.
        const COMMENT = 1 << 1;
        /// Part of a multi-line string literal.
        const MULTILINE_STRING = 1 << 2;
        /// Ends inside an unresolved nested region; the next line cannot be
        /// resumed on its own.
        const NESTED = 1 << 3;
        /// First visible character closes a block.
        const CLOSE_BRACE = 1 << 4;
        /// Section heading; the depth byte holds its outline level.
        const HEADING = 1 << 5;
    }
}

/// Decoded per-line state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u32", into = "u32")
)]
pub struct LineState {
    pub flags: LineFlags,
    pub comment_depth: u8,
    pub indent: u16,
}

impl LineState {
    /// Deepest comment nesting that survives encoding.
    pub const MAX_COMMENT_DEPTH: u32 = u8::MAX as u32;
    /// Widest indent that survives encoding.
    pub const MAX_INDENT: u32 = u16::MAX as u32;

    /// Build a state, clamping depth and indent into their encoded ranges.
    pub fn new(flags: LineFlags, comment_depth: u32, indent: usize) -> Self {
        Self {
            flags,
            comment_depth: u8::try_from(comment_depth).unwrap_or(u8::MAX),
            indent: u16::try_from(indent).unwrap_or(u16::MAX),
        }
    }

    #[allow(clippy::cast_lossless, reason = "From is not usable in const fn")]
    pub const fn encode(self) -> u32 {
        self.flags.bits() as u32 | (self.comment_depth as u32) << 8 | (self.indent as u32) << 16
    }

    /// Total: unknown flag bits are dropped.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "each field is masked to its width before the cast"
    )]
    pub const fn decode(value: u32) -> Self {
        Self {
            flags: LineFlags::from_bits_truncate((value & 0xFF) as u8),
            comment_depth: ((value >> 8) & 0xFF) as u8,
            indent: (value >> 16) as u16,
        }
    }

    #[inline]
    pub fn is_blank(self) -> bool {
        self.flags.contains(LineFlags::BLANK)
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        self.flags.contains(LineFlags::COMMENT)
    }

    #[inline]
    pub fn is_multiline_string(self) -> bool {
        self.flags.contains(LineFlags::MULTILINE_STRING)
    }

    #[inline]
    pub fn is_nested(self) -> bool {
        self.flags.contains(LineFlags::NESTED)
    }

    #[inline]
    pub fn starts_with_closer(self) -> bool {
        self.flags.contains(LineFlags::CLOSE_BRACE)
    }

    /// Outline level of a heading line.
    #[inline]
    pub fn heading_level(self) -> Option<u8> {
        self.flags
            .contains(LineFlags::HEADING)
            .then_some(self.comment_depth)
    }
}

impl From<u32> for LineState {
    fn from(value: u32) -> Self {
        Self::decode(value)
    }
}

impl From<LineState> for u32 {
    fn from(state: LineState) -> Self {
        state.encode()
    }
}

#[cfg(test)]
mod tests;
