//! Brace-delimited format placeholders inside string literals.
//!
//! ```text
//! {[argument][specifier][:[[fill]align][width][.precision]]}
//! ```
//!
//! - argument: digits, or `[name]`
//! - specifier: one of `b c d e f g o s u x X ? ! * a`, or `any`, followed
//!   directly by `:` or `}`
//! - align: `<`, `^` or `>`; fill is any one character before it other than
//!   a brace, multi-byte UTF-8 included
//!
//! The parser only looks at the bytes it is given and never past a line
//! terminator or the string's closing quote, so a half-typed placeholder at
//! the end of a chunk simply fails to parse.

use std::ops::Range;

use tincture_core::chars::{is_digit, is_ident_char, is_ident_start};

const SPECIFIERS: &[u8] = b"bcdefgosuxX?!*a";

/// A recognized placeholder, offsets relative to its opening brace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    /// Total length, both braces included.
    pub len: usize,
    /// Specifier bytes; empty when there is none.
    pub specifier: Range<usize>,
}

/// Parse the placeholder at the start of `bytes`, which must begin with `{`.
///
/// `closer` is the byte that ends the enclosing literal, if any. `None` on
/// any deviation from the grammar.
pub fn parse(bytes: &[u8], closer: Option<u8>) -> Option<Placeholder> {
    if bytes.first() != Some(&b'{') {
        return None;
    }
    let mut p = Parser {
        bytes,
        pos: 1,
        closer,
    };

    // argument
    if is_digit(p.peek(0)) {
        p.digits();
    } else if p.peek(0) == b'[' {
        p.pos += 1;
        if !is_ident_start(p.peek(0)) {
            return None;
        }
        while is_ident_char(p.peek(0)) {
            p.pos += 1;
        }
        if p.peek(0) != b']' {
            return None;
        }
        p.pos += 1;
    }

    // specifier
    let spec_start = p.pos;
    if p.peek(0) == b'a' && p.peek(1) == b'n' && p.peek(2) == b'y' {
        p.pos += 3;
    } else if SPECIFIERS.contains(&p.peek(0)) {
        p.pos += 1;
    }
    if p.pos > spec_start && !matches!(p.peek(0), b':' | b'}') {
        return None;
    }
    let specifier = spec_start..p.pos;

    // options
    if p.peek(0) == b':' {
        p.pos += 1;
        let fill = p.fill_len();
        if fill > 0 && is_align(p.peek(fill)) {
            p.pos += fill + 1;
        } else if is_align(p.peek(0)) {
            p.pos += 1;
        }
        p.digits();
        if p.peek(0) == b'.' {
            p.pos += 1;
            p.digits();
        }
    }

    if p.peek(0) != b'}' {
        return None;
    }
    Some(Placeholder {
        len: p.pos + 1,
        specifier,
    })
}

fn is_align(b: u8) -> bool {
    matches!(b, b'<' | b'^' | b'>')
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    closer: Option<u8>,
}

impl Parser<'_> {
    /// Byte `n` ahead, or `0` at the end, a line terminator or the closer.
    fn peek(&self, n: usize) -> u8 {
        match self.bytes.get(self.pos + n) {
            Some(&b) if b != b'\n' && b != b'\r' && Some(b) != self.closer => b,
            _ => 0,
        }
    }

    /// Byte length of a fill character at the cursor, `0` where none may
    /// stand. A malformed UTF-8 sequence counts as its lead byte alone.
    fn fill_len(&self) -> usize {
        let lead = self.peek(0);
        if matches!(lead, 0 | b'{' | b'}') {
            return 0;
        }
        let len = match lead {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        if (1..len).all(|n| matches!(self.peek(n), 0x80..=0xBF)) {
            len
        } else {
            1
        }
    }

    fn digits(&mut self) {
        while is_digit(self.peek(0)) {
            self.pos += 1;
        }
    }
}
