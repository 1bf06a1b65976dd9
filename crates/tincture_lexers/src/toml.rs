//! TOML grammar.
//!
//! Every top-level line is a table header, a `key = value` pair or a
//! comment; anything else is flagged as an error up to the next `#`. Inside
//! brackets the same words may be keys of an inline table, which is decided
//! by what follows them on the line.
//!
//! Table headers carry their dotted depth in the line state, so the document
//! folds as an outline of tables rather than by brackets.

use tincture_core::chars::{is_decimal_number, is_digit, is_eol, is_ident_char, is_space};
use tincture_core::{
    Cursor, EscapeSequence, EscapeSyntax, Flow, FoldMode, Grammar, KeywordSets, LineFlags,
    LineState, Style,
};

/// TOML display categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TomlStyle {
    Default,
    Comment,
    Operator,
    Number,
    DateTime,
    Identifier,
    Keyword,
    /// `[table]` and `[[array.of.tables]]` headers.
    Table,
    Key,
    /// `'...'`
    LiteralString,
    /// `"..."`
    String,
    /// `'''...'''`
    TripleLiteralString,
    /// `"""..."""`
    TripleString,
    EscapeChar,
    /// A top-level line that is not a header, key or comment.
    Error,
}

impl TomlStyle {
    fn is_triple(self) -> bool {
        matches!(self, TomlStyle::TripleLiteralString | TomlStyle::TripleString)
    }

    /// Basic strings take escapes; literal strings do not.
    fn is_basic(self) -> bool {
        matches!(self, TomlStyle::String | TomlStyle::TripleString)
    }

    fn quote(self) -> u8 {
        if self.is_basic() {
            b'"'
        } else {
            b'\''
        }
    }
}

impl Style for TomlStyle {
    const DEFAULT: Self = TomlStyle::Default;

    fn is_space_equivalent(self) -> bool {
        matches!(self, TomlStyle::Default | TomlStyle::Comment)
    }

    fn is_fold_operator(self) -> bool {
        false
    }
}

/// Matched case-insensitively.
pub const KEYWORDS: &str = "true false inf nan";

pub fn default_keywords() -> KeywordSets {
    KeywordSets::default().with_keywords(KEYWORDS)
}

const ESCAPES: EscapeSyntax = EscapeSyntax::HEX_AND_LONG_UNICODE;

/// Quoting inside a key or table name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyQuote {
    Unquoted,
    Literal,
    Quoted,
    /// Past the name; the rest of the line is not a key.
    End,
}

fn is_unquoted_key(ch: u8) -> bool {
    is_ident_char(ch) || ch == b'-'
}

fn is_operator(ch: u8) -> bool {
    matches!(ch, b'[' | b']' | b'{' | b'}' | b',' | b'=' | b'.' | b'+' | b'-')
}

/// Date, time and offset separators, each followed by a digit.
fn is_date_time(ch: u8, next: u8) -> bool {
    matches!(ch, b'-' | b':' | b'.' | b'+') && is_digit(next)
}

pub struct TomlLexer<'k> {
    keywords: &'k KeywordSets,
}

/// Scan-local data for one TOML scan.
pub struct TomlScan {
    key: KeyQuote,
    /// Dots in the table header on this line.
    table_level: u32,
    /// Open `[` and `{` in values.
    brace_depth: u32,
    escape: EscapeSequence<TomlStyle>,
    flags: LineFlags,
}

impl<'k> TomlLexer<'k> {
    pub fn new(keywords: &'k KeywordSets) -> Self {
        Self { keywords }
    }

    fn is_keyword(&self, word: &[u8]) -> bool {
        self.keywords.keywords.contains(&word.to_ascii_lowercase())
    }

    /// End a value run. Inside brackets, a run followed by `=`, `.` or `-`
    /// was the key of an inline table.
    fn end_value(&self, cx: &mut Cursor<'_, TomlStyle>, scan: &mut TomlScan) -> Flow {
        if scan.brace_depth > 0 && matches!(cx.line_next_char(), b'=' | b'.' | b'-') {
            cx.change_state(TomlStyle::Key);
            scan.key = KeyQuote::Unquoted;
            return Flow::Rescan;
        }
        if cx.state() == TomlStyle::Identifier && self.is_keyword(cx.current_text()) {
            cx.change_state(TomlStyle::Keyword);
        }
        cx.set_state(TomlStyle::Default);
        Flow::Rescan
    }

    fn exit_key(cx: &mut Cursor<'_, TomlStyle>, scan: &mut TomlScan) -> Flow {
        if cx.at_line_start() {
            cx.set_state(TomlStyle::Default);
            return Flow::Next;
        }
        match scan.key {
            KeyQuote::Literal if cx.ch() == b'\'' => {
                scan.key = KeyQuote::Unquoted;
                cx.forward();
            }
            KeyQuote::Quoted if cx.ch() == b'\\' => cx.forward(),
            KeyQuote::Quoted if cx.ch() == b'"' => {
                scan.key = KeyQuote::Unquoted;
                cx.forward();
            }
            _ => {}
        }
        if scan.key != KeyQuote::Unquoted {
            return Flow::Next;
        }

        let table = cx.state() == TomlStyle::Table;
        match cx.ch() {
            b'\'' => scan.key = KeyQuote::Literal,
            b'"' => scan.key = KeyQuote::Quoted,
            b'.' if table => scan.table_level += 1,
            b'.' => {
                // Dotted key: the dot is an operator between two keys.
                cx.set_state(TomlStyle::Operator);
                cx.forward_set_state(TomlStyle::Key);
                return Flow::Rescan;
            }
            b']' if table => {
                scan.key = KeyQuote::End;
                cx.forward();
                if cx.ch() == b']' {
                    cx.forward();
                }
                if cx.line_next_char() == b'#' {
                    cx.set_state(TomlStyle::Default);
                }
            }
            ch if !table && !is_unquoted_key(ch) => {
                let next = cx.line_next_char();
                if next == b'=' {
                    scan.key = KeyQuote::End;
                    cx.set_state(TomlStyle::Default);
                } else if next != b'.' && cx.lookbehind().ch_prev_non_white != b'.' {
                    cx.change_state(TomlStyle::Error);
                    return Flow::Rescan;
                }
            }
            _ => {}
        }
        Flow::Next
    }

    fn exit_string(&self, cx: &mut Cursor<'_, TomlStyle>, scan: &mut TomlScan) -> Flow {
        let state = cx.state();
        let ch = cx.ch();
        if cx.at_line_start() && !state.is_triple() {
            cx.set_state(TomlStyle::Default);
            return Flow::Next;
        }
        if ch == b'\\' && state.is_basic() {
            let next = cx.ch_next();
            if !is_eol(next) && next != 0 {
                scan.escape.start(state, next, &ESCAPES);
                cx.set_state(TomlStyle::EscapeChar);
                cx.forward();
            }
        } else if ch == state.quote() && (!state.is_triple() || cx.match_next(ch, ch)) {
            if state.is_triple() {
                // Quotes before the closing three belong to the content.
                while cx.ch_next() == ch {
                    cx.forward();
                }
                cx.forward_set_state(TomlStyle::Default);
                return Flow::Rescan;
            }
            cx.forward();
            return self.end_value(cx, scan);
        }
        Flow::Next
    }

    /// Start of a top-level line: a table header, a key, or an error.
    fn enter_line(cx: &mut Cursor<'_, TomlStyle>, scan: &mut TomlScan) {
        let ch = cx.ch();
        match ch {
            b'[' => {
                scan.table_level = 0;
                scan.key = KeyQuote::Unquoted;
                scan.flags.insert(LineFlags::HEADING);
                cx.set_state(TomlStyle::Table);
                if cx.ch_next() == b'[' {
                    cx.forward();
                }
            }
            b'\'' => {
                scan.key = KeyQuote::Literal;
                cx.set_state(TomlStyle::Key);
            }
            b'"' => {
                scan.key = KeyQuote::Quoted;
                cx.set_state(TomlStyle::Key);
            }
            _ if is_unquoted_key(ch) => {
                scan.key = KeyQuote::Unquoted;
                cx.set_state(TomlStyle::Key);
            }
            _ if !is_space(ch) => cx.set_state(TomlStyle::Error),
            _ => {}
        }
    }

    fn enter_value(cx: &mut Cursor<'_, TomlStyle>, scan: &mut TomlScan) {
        let ch = cx.ch();
        match ch {
            b'\'' | b'"' => {
                let basic = ch == b'"';
                if cx.match_next(ch, ch) {
                    cx.set_state(if basic {
                        TomlStyle::TripleString
                    } else {
                        TomlStyle::TripleLiteralString
                    });
                    cx.forward_n(2);
                } else {
                    cx.set_state(if basic {
                        TomlStyle::String
                    } else {
                        TomlStyle::LiteralString
                    });
                }
            }
            _ if is_digit(ch) => cx.set_state(TomlStyle::Number),
            b'a'..=b'z' => cx.set_state(TomlStyle::Identifier),
            _ if is_operator(ch) => {
                cx.set_state(TomlStyle::Operator);
                match ch {
                    b'[' | b'{' => scan.brace_depth += 1,
                    b']' | b'}' => scan.brace_depth = scan.brace_depth.saturating_sub(1),
                    _ => {}
                }
            }
            // Key of an inline table.
            _ if scan.brace_depth > 0 && is_unquoted_key(ch) => {
                scan.key = KeyQuote::Unquoted;
                cx.set_state(TomlStyle::Key);
            }
            _ => {}
        }
    }
}

impl Grammar for TomlLexer<'_> {
    type Style = TomlStyle;
    type Scan = TomlScan;

    /// Lines that end inside brackets are flagged nested, so a scan never
    /// starts with brackets open.
    fn begin(&self, cx: &mut Cursor<'_, TomlStyle>, _previous: LineState) -> TomlScan {
        let mut flags = LineFlags::empty();
        if cx.state().is_triple() {
            flags.insert(LineFlags::MULTILINE_STRING);
        }
        TomlScan {
            key: KeyQuote::Unquoted,
            table_level: 0,
            brace_depth: 0,
            escape: EscapeSequence::new(TomlStyle::Default),
            flags,
        }
    }

    fn exit(&self, cx: &mut Cursor<'_, TomlStyle>, scan: &mut TomlScan) -> Flow {
        match cx.state() {
            TomlStyle::Operator => cx.set_state(TomlStyle::Default),
            TomlStyle::Number => {
                if !is_decimal_number(cx.ch_prev(), cx.ch(), cx.ch_next()) {
                    if matches!(cx.ch(), b'-' | b':') && is_digit(cx.ch_next()) {
                        cx.change_state(TomlStyle::DateTime);
                    } else {
                        return self.end_value(cx, scan);
                    }
                }
            }
            TomlStyle::DateTime => {
                let ch = cx.ch();
                let next = cx.ch_next();
                // `1979-05-27 07:32:00`: a space may separate date and time.
                let separator = is_date_time(ch, next) || (ch == b' ' && is_digit(next));
                if !(is_ident_char(ch) || separator) {
                    return self.end_value(cx, scan);
                }
            }
            TomlStyle::Identifier => {
                if !is_ident_char(cx.ch()) {
                    return self.end_value(cx, scan);
                }
            }
            TomlStyle::Table | TomlStyle::Key => return Self::exit_key(cx, scan),
            TomlStyle::LiteralString
            | TomlStyle::String
            | TomlStyle::TripleLiteralString
            | TomlStyle::TripleString => return self.exit_string(cx, scan),
            TomlStyle::EscapeChar => {
                if scan.escape.at_end(cx.ch()) {
                    cx.set_state(scan.escape.outer());
                    return Flow::Rescan;
                }
            }
            TomlStyle::Error => {
                if cx.at_line_start() {
                    cx.set_state(TomlStyle::Default);
                } else if cx.ch() == b'#' {
                    cx.set_state(TomlStyle::Comment);
                }
            }
            TomlStyle::Comment => {
                if cx.at_line_start() {
                    cx.set_state(TomlStyle::Default);
                }
            }
            TomlStyle::Default | TomlStyle::Keyword => {}
        }
        Flow::Next
    }

    fn enter(&self, cx: &mut Cursor<'_, TomlStyle>, scan: &mut TomlScan) -> Flow {
        if cx.ch() == b'#' {
            if cx.visible_chars() == 0 {
                scan.flags.insert(LineFlags::COMMENT);
            }
            cx.set_state(TomlStyle::Comment);
        } else if cx.visible_chars() == 0 && scan.brace_depth == 0 {
            Self::enter_line(cx, scan);
        } else {
            Self::enter_value(cx, scan);
        }
        Flow::Next
    }

    fn end_line(&self, cx: &Cursor<'_, TomlStyle>, scan: &mut TomlScan) -> LineState {
        let mut flags = scan.flags;
        let depth = if flags.contains(LineFlags::HEADING) {
            scan.table_level
        } else {
            0
        };
        if scan.brace_depth > 0 {
            flags.insert(LineFlags::NESTED);
        }
        if cx.state().is_triple() {
            flags.insert(LineFlags::MULTILINE_STRING);
        }
        if flags.is_empty() && cx.visible_chars() == 0 {
            flags = LineFlags::BLANK;
        }

        scan.flags = LineFlags::empty();
        if cx.state().is_triple() {
            scan.flags.insert(LineFlags::MULTILINE_STRING);
        }
        scan.table_level = 0;
        scan.key = KeyQuote::Unquoted;
        LineState::new(flags, depth, cx.lookbehind().indent)
    }

    fn fold_mode(&self) -> FoldMode {
        FoldMode::Outline
    }
}
