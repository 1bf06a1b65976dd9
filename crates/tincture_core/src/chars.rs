//! Byte classification for lexer dispatch.
//!
//! Every predicate is a single table lookup or a short `matches!`. Bytes at or
//! above `0x80` are treated as identifier bytes so multi-byte UTF-8 names are
//! never split into operator runs.

/// Coarse class of a byte, used to key grammar entry tables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Space, tab, vertical tab, form feed.
    Space,
    /// `\r` or `\n`.
    LineEnd,
    /// `0-9`.
    Digit,
    /// ASCII letter, `_`, or any non-ASCII byte.
    IdentStart,
    /// Printable ASCII punctuation.
    Punct,
    /// Everything else (NUL, other control bytes, DEL).
    Control,
}

impl CharClass {
    #[inline]
    pub fn of(b: u8) -> Self {
        CHAR_CLASS_TABLE[b as usize]
    }
}

static CHAR_CLASS_TABLE: [CharClass; 256] = {
    let mut table = [CharClass::Control; 256];
    let mut i = 0u16;
    while i < 256 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "i is always < 256, fits in u8"
        )]
        let b = i as u8;
        table[i as usize] = match b {
            b' ' | b'\t' | 0x0B | 0x0C => CharClass::Space,
            b'\r' | b'\n' => CharClass::LineEnd,
            b'0'..=b'9' => CharClass::Digit,
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | 0x80..=0xFF => CharClass::IdentStart,
            _ if is_graphic(b) => CharClass::Punct,
            _ => CharClass::Control,
        };
        i += 1;
    }
    table
};

static IS_IDENT_CHAR_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "i is always < 256, fits in u8"
        )]
        let b = i as u8;
        table[i as usize] = matches!(
            b,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | 0x80..=0xFF
        );
        i += 1;
    }
    table
};

#[inline]
pub fn is_ident_start(b: u8) -> bool {
    matches!(CharClass::of(b), CharClass::IdentStart)
}

/// Returns `true` if `b` can continue an identifier.
#[inline]
pub fn is_ident_char(b: u8) -> bool {
    IS_IDENT_CHAR_TABLE[b as usize]
}

#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

#[inline]
pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// Whitespace including line terminators.
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(CharClass::of(b), CharClass::Space | CharClass::LineEnd)
}

#[inline]
pub fn is_space_or_tab(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

#[inline]
pub fn is_eol(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

/// Printable, non-space ASCII. Grammars test identifiers and numbers first,
/// so in practice this selects operator characters.
#[inline]
pub const fn is_graphic(b: u8) -> bool {
    b > b' ' && b < 0x7F
}

/// A digit, or `.` directly followed by a digit.
#[inline]
pub fn is_number_start(ch: u8, next: u8) -> bool {
    is_digit(ch) || (ch == b'.' && is_digit(next))
}

/// Returns `true` while `ch` continues a numeric literal.
///
/// Covers radix prefixes and suffixes (any identifier byte), a fraction dot
/// followed by a digit, and the sign of a decimal (`e`/`E`) or binary (`p`/`P`)
/// exponent.
#[inline]
pub fn is_decimal_number(prev: u8, ch: u8, next: u8) -> bool {
    is_ident_char(ch)
        || (ch == b'.' && is_digit(next))
        || ((ch == b'+' || ch == b'-') && matches!(prev, b'e' | b'E' | b'p' | b'P'))
}

/// Characters that may precede a documentation tag such as `@param`.
#[inline]
pub fn is_comment_tag_prev(b: u8) -> bool {
    b <= b' ' || matches!(b, b'*' | b'/' | b'!')
}

#[cfg(test)]
mod tests;
