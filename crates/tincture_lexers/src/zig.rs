//! Zig grammar.
//!
//! Plain, multi-line (`\\`) and character literals, `@builtin` calls, the
//! three flavours of `//` comment, and `std.fmt` placeholders such as
//! `{d:0>8.3}` inside string literals.

use tincture_core::chars::{
    is_decimal_number, is_eol, is_ident_char, is_ident_start, is_number_start, CharClass,
};
use tincture_core::{
    Cursor, EscapeSequence, EscapeSyntax, Flow, Grammar, IdentifierRun, KeywordClassifier,
    KeywordSets, LineFlags, LineState, Pending, Style, WordClass,
};

use crate::placeholder;

/// Zig display categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZigStyle {
    Default,
    CommentLine,
    /// `///`
    CommentLineDoc,
    /// `//!`
    CommentLineTop,
    Operator,
    Number,
    Identifier,
    Keyword,
    Type,
    /// `@name`
    BuiltinFunction,
    FunctionDefinition,
    Function,
    Character,
    String,
    /// `\\` up to the end of the line.
    MultilineString,
    EscapeChar,
    /// Braces and options of a format placeholder.
    Placeholder,
    FormatSpecifier,
}

impl Style for ZigStyle {
    const DEFAULT: Self = ZigStyle::Default;

    fn is_space_equivalent(self) -> bool {
        matches!(
            self,
            ZigStyle::Default
                | ZigStyle::CommentLine
                | ZigStyle::CommentLineDoc
                | ZigStyle::CommentLineTop
        )
    }

    fn is_fold_operator(self) -> bool {
        self == ZigStyle::Operator
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZigConfig {
    /// Parse `{...}` in string literals as format placeholders.
    pub format_placeholders: bool,
}

impl Default for ZigConfig {
    fn default() -> Self {
        Self {
            format_placeholders: true,
        }
    }
}

impl ZigConfig {
    #[must_use]
    pub fn with_format_placeholders(mut self, enabled: bool) -> Self {
        self.format_placeholders = enabled;
        self
    }
}

pub const KEYWORDS: &str = "addrspace align allowzero and anyframe anytype asm async await break \
    callconv catch comptime const continue defer else enum errdefer error export extern false fn \
    for if inline linksection noalias noinline nosuspend null opaque or orelse packed pub resume \
    return struct suspend switch test threadlocal true try undefined union unreachable usingnamespace \
    var volatile while";

pub const TYPES: &str = "anyerror anyopaque bool c_char c_int c_long c_longdouble c_longlong \
    c_short c_uint c_ulong c_ulonglong c_ushort comptime_float comptime_int f16 f32 f64 f80 f128 \
    i8 i16 i32 i64 i128 isize noreturn type u1 u8 u16 u32 u64 u128 usize void";

pub fn default_keywords() -> KeywordSets {
    KeywordSets::default()
        .with_keywords(KEYWORDS)
        .with_types(TYPES)
}

/// `fn` announces a definition; control-flow words announce a value.
pub fn introducer(word: &[u8]) -> Pending {
    match word {
        b"fn" => Pending::Function,
        b"return" | b"try" | b"catch" | b"orelse" | b"and" | b"or" | b"await" | b"resume"
        | b"defer" | b"errdefer" | b"comptime" | b"break" | b"continue" | b"else" => {
            Pending::Return
        }
        _ => Pending::None,
    }
}

const ESCAPES: EscapeSyntax = EscapeSyntax::HEX_AND_BRACED_UNICODE;

pub struct ZigLexer<'k> {
    classifier: KeywordClassifier<'k>,
    config: ZigConfig,
}

/// Scan-local data for one Zig scan.
pub struct ZigScan {
    pending: Pending,
    escape: EscapeSequence<ZigStyle>,
    ch_before: u8,
    flags: LineFlags,
}

impl<'k> ZigLexer<'k> {
    pub fn new(keywords: &'k KeywordSets) -> Self {
        Self {
            classifier: KeywordClassifier::new(keywords, introducer),
            config: ZigConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ZigConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ZigConfig {
        &self.config
    }

    fn classify_identifier(&self, cx: &mut Cursor<'_, ZigStyle>, scan: &mut ZigScan) {
        let run = IdentifierRun {
            text: cx.current_text(),
            next: cx.ch(),
            line_next: cx.line_next_char(),
            before: scan.ch_before,
        };
        let style = match self.classifier.classify(&run, &mut scan.pending) {
            WordClass::Keyword => ZigStyle::Keyword,
            WordClass::Class | WordClass::Trait | WordClass::Enum | WordClass::Type => {
                ZigStyle::Type
            }
            WordClass::FunctionDefinition => ZigStyle::FunctionDefinition,
            WordClass::Function => ZigStyle::Function,
            WordClass::Identifier => ZigStyle::Identifier,
        };
        cx.change_state(style);
        cx.lookbehind_mut().style_prev_non_white = style;
    }

    fn exit_string(&self, cx: &mut Cursor<'_, ZigStyle>, scan: &mut ZigScan) -> Flow {
        let state = cx.state();
        let ch = cx.ch();
        let next = cx.ch_next();

        if cx.at_line_start() {
            cx.set_state(ZigStyle::Default);
            return Flow::Next;
        }
        match ch {
            b'\\' if state != ZigStyle::MultilineString => {
                if !is_eol(next) && next != 0 {
                    scan.escape.start(state, next, &ESCAPES);
                    cx.set_state(ZigStyle::EscapeChar);
                    cx.forward();
                    if cx.matches(b'u', b'{') {
                        scan.escape.open_brace();
                        cx.forward();
                    }
                }
            }
            b'\'' if state == ZigStyle::Character => {
                cx.forward_set_state(ZigStyle::Default);
                return Flow::Rescan;
            }
            b'"' if state == ZigStyle::String => {
                cx.forward_set_state(ZigStyle::Default);
                return Flow::Rescan;
            }
            b'{' | b'}' if state != ZigStyle::Character && self.config.format_placeholders => {
                if next == ch {
                    scan.escape.start_single(state);
                    cx.set_state(ZigStyle::EscapeChar);
                    cx.forward();
                } else if ch == b'{' {
                    return Self::placeholder(cx, state);
                }
            }
            _ => {}
        }
        Flow::Next
    }

    /// Style a placeholder at `{` in full, or leave the brace as content.
    fn placeholder(cx: &mut Cursor<'_, ZigStyle>, outer: ZigStyle) -> Flow {
        let closer = (outer == ZigStyle::String).then_some(b'"');
        let Some(found) = placeholder::parse(cx.rest(), closer) else {
            tracing::trace!(pos = cx.pos(), "brace is not a placeholder");
            return Flow::Next;
        };
        cx.set_state(ZigStyle::Placeholder);
        cx.forward_n(found.specifier.start);
        if !found.specifier.is_empty() {
            cx.set_state(ZigStyle::FormatSpecifier);
            cx.forward_n(found.specifier.len());
            cx.set_state(ZigStyle::Placeholder);
        }
        cx.forward_n(found.len - found.specifier.end);
        cx.set_state(outer);
        Flow::Rescan
    }

    fn enter_punct(cx: &mut Cursor<'_, ZigStyle>, scan: &mut ZigScan) {
        let next = cx.ch_next();
        match cx.ch() {
            b'/' if next == b'/' => {
                if cx.visible_chars() == 0 {
                    scan.flags.insert(LineFlags::COMMENT);
                }
                cx.set_state(ZigStyle::CommentLine);
                cx.forward_n(2);
                if cx.ch() == b'!' {
                    cx.change_state(ZigStyle::CommentLineTop);
                } else if cx.ch() == b'/' && cx.ch_next() != b'/' {
                    cx.change_state(ZigStyle::CommentLineDoc);
                }
            }
            b'\\' if next == b'\\' => {
                scan.flags.insert(LineFlags::MULTILINE_STRING);
                cx.set_state(ZigStyle::MultilineString);
            }
            b'"' => cx.set_state(ZigStyle::String),
            b'\'' => cx.set_state(ZigStyle::Character),
            _ if is_number_start(cx.ch(), next) => cx.set_state(ZigStyle::Number),
            b'@' if is_ident_start(next) => cx.set_state(ZigStyle::BuiltinFunction),
            _ => cx.set_state(ZigStyle::Operator),
        }
    }
}

impl Grammar for ZigLexer<'_> {
    type Style = ZigStyle;
    type Scan = ZigScan;

    fn begin(&self, _cx: &mut Cursor<'_, ZigStyle>, _previous: LineState) -> ZigScan {
        ZigScan {
            pending: Pending::None,
            escape: EscapeSequence::new(ZigStyle::Default),
            ch_before: 0,
            flags: LineFlags::empty(),
        }
    }

    fn exit(&self, cx: &mut Cursor<'_, ZigStyle>, scan: &mut ZigScan) -> Flow {
        match cx.state() {
            ZigStyle::Operator => cx.set_state(ZigStyle::Default),
            ZigStyle::Number => {
                if !is_decimal_number(cx.ch_prev(), cx.ch(), cx.ch_next()) {
                    cx.set_state(ZigStyle::Default);
                }
            }
            ZigStyle::Identifier | ZigStyle::BuiltinFunction => {
                if !is_ident_char(cx.ch()) {
                    if cx.state() == ZigStyle::Identifier {
                        self.classify_identifier(cx, scan);
                    }
                    cx.set_state(ZigStyle::Default);
                }
            }
            ZigStyle::CommentLine | ZigStyle::CommentLineDoc | ZigStyle::CommentLineTop => {
                if cx.at_line_start() {
                    cx.set_state(ZigStyle::Default);
                }
            }
            ZigStyle::Character | ZigStyle::String | ZigStyle::MultilineString => {
                return self.exit_string(cx, scan);
            }
            ZigStyle::EscapeChar => {
                if scan.escape.at_end(cx.ch()) {
                    if scan.escape.is_braced() && cx.ch() == b'}' {
                        cx.forward();
                    }
                    cx.set_state(scan.escape.outer());
                    return Flow::Rescan;
                }
            }
            ZigStyle::Default
            | ZigStyle::Keyword
            | ZigStyle::Type
            | ZigStyle::FunctionDefinition
            | ZigStyle::Function
            | ZigStyle::Placeholder
            | ZigStyle::FormatSpecifier => {}
        }
        Flow::Next
    }

    fn enter(&self, cx: &mut Cursor<'_, ZigStyle>, scan: &mut ZigScan) -> Flow {
        match CharClass::of(cx.ch()) {
            CharClass::Digit => cx.set_state(ZigStyle::Number),
            CharClass::IdentStart => {
                scan.ch_before = cx.lookbehind().ch_prev_non_white;
                cx.set_state(ZigStyle::Identifier);
            }
            CharClass::Punct => Self::enter_punct(cx, scan),
            CharClass::Space | CharClass::LineEnd | CharClass::Control => {}
        }
        Flow::Next
    }

    fn end_line(&self, cx: &Cursor<'_, ZigStyle>, scan: &mut ZigScan) -> LineState {
        let mut flags = scan.flags;
        if flags.is_empty() && cx.visible_chars() == 0 {
            flags = LineFlags::BLANK;
        }
        scan.flags = LineFlags::empty();
        scan.pending = Pending::None;
        LineState::new(flags, 0, cx.lookbehind().indent)
    }
}
