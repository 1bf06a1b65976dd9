//! Scala grammar.
//!
//! Covers the lexically interesting parts of Scala 2 and 3:
//!
//! - interpolated strings (`s"..."`, `f"""..."""`) with `$name`, `${expr}`
//!   and `$$`, where `${` can nest arbitrarily deep;
//! - XML literals with attributes and `{expr}` holes;
//! - nested block comments and `/** */` doc comments with `@tags`;
//! - symbols (`'name`), backtick identifiers and annotations.

mod markup;

use tincture_core::chars::{
    is_alpha, is_comment_tag_prev, is_decimal_number, is_eol, is_ident_char, is_ident_start,
    is_number_start, CharClass,
};
use tincture_core::{
    ContextDepth, ContextStack, Cursor, EscapeSequence, EscapeSyntax, Flow, FoldMode, Grammar,
    IdentifierRun, KeywordClassifier, KeywordSets, LineFlags, LineState, Pending, Style,
    WordClass, DEFAULT_MAX_DEPTH,
};

/// Scala display categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalaStyle {
    Default,
    CommentLine,
    CommentBlock,
    CommentBlockDoc,
    CommentTag,
    Operator,
    /// Punctuation of interpolations and XML (`${`, `}`, `=`, `:`).
    Operator2,
    /// `++` and `--`.
    OperatorPostfix,
    Number,
    Identifier,
    Keyword,
    Annotation,
    Class,
    Trait,
    Enum,
    FunctionDefinition,
    Function,
    Symbol,
    Backticks,
    Character,
    String,
    InterpolatedString,
    TripleString,
    TripleInterpolatedString,
    EscapeChar,
    XmlTag,
    XmlAttribute,
    XmlText,
    XmlOther,
    XmlStringSq,
    XmlStringDq,
}

impl Style for ScalaStyle {
    const DEFAULT: Self = ScalaStyle::Default;

    fn is_space_equivalent(self) -> bool {
        matches!(
            self,
            ScalaStyle::Default
                | ScalaStyle::CommentLine
                | ScalaStyle::CommentBlock
                | ScalaStyle::CommentBlockDoc
                | ScalaStyle::CommentTag
        )
    }

    fn is_fold_operator(self) -> bool {
        self == ScalaStyle::Operator
    }
}

impl ScalaStyle {
    /// Quoted forms that end at the line end.
    fn is_single_line_string(self) -> bool {
        matches!(
            self,
            ScalaStyle::Backticks
                | ScalaStyle::Character
                | ScalaStyle::String
                | ScalaStyle::InterpolatedString
                | ScalaStyle::XmlStringSq
                | ScalaStyle::XmlStringDq
        )
    }

    fn is_triple(self) -> bool {
        matches!(
            self,
            ScalaStyle::TripleString | ScalaStyle::TripleInterpolatedString
        )
    }

    fn is_string(self) -> bool {
        self.is_single_line_string() || self.is_triple()
    }

    fn is_interpolated(self) -> bool {
        matches!(
            self,
            ScalaStyle::InterpolatedString | ScalaStyle::TripleInterpolatedString
        )
    }

    fn quote(self) -> u8 {
        match self {
            ScalaStyle::Backticks => b'`',
            ScalaStyle::Character | ScalaStyle::XmlStringSq => b'\'',
            _ => b'"',
        }
    }
}

// ─── Configuration ───

/// When a `"` opens an interpolated string.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Directly after an identifier (`s"`, `raw"`, `json"`).
    #[default]
    Prefixed,
    /// Every string.
    Always,
    /// No string.
    Never,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalaConfig {
    pub interpolation: Interpolation,
    /// Recognize `<tag>` literals.
    pub xml_literals: bool,
    /// Cap on stored nested regions; see [`ContextStack`].
    pub max_context_depth: usize,
}

impl Default for ScalaConfig {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::Prefixed,
            xml_literals: true,
            max_context_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ScalaConfig {
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[must_use]
    pub fn with_xml_literals(mut self, enabled: bool) -> Self {
        self.xml_literals = enabled;
        self
    }

    #[must_use]
    pub fn with_max_context_depth(mut self, depth: usize) -> Self {
        self.max_context_depth = depth;
        self
    }
}

// ─── Word lists ───

pub const KEYWORDS: &str = "abstract case catch class def derives do else end enum export extends \
    extension false final finally for forSome given if implicit import infix inline lazy match new \
    null object opaque open override package private protected return sealed super then this throw \
    throws trait transparent true try type using val var while with yield";

pub const CLASSES: &str = "Any AnyRef AnyVal Array BigDecimal BigInt Boolean Byte Char Double Either \
    Float Future Int Left List Long Map Nil None Nothing Null Option Right Seq Set Short Some String \
    Success Failure Try Unit Vector";

pub const TRAITS: &str = "App Comparable Equals Function0 Function1 Function2 Iterable Iterator \
    Ordered Ordering PartialFunction Product Runnable Serializable";

/// The built-in word lists.
pub fn default_keywords() -> KeywordSets {
    KeywordSets::default()
        .with_keywords(KEYWORDS)
        .with_classes(CLASSES)
        .with_traits(TRAITS)
}

/// Category announced by a Scala keyword.
pub fn introducer(word: &[u8]) -> Pending {
    match word {
        b"class" | b"new" | b"extends" | b"throws" | b"object" => Pending::Class,
        b"trait" | b"with" => Pending::Trait,
        b"def" => Pending::Function,
        b"enum" => Pending::Enum,
        b"return" | b"yield" => Pending::Return,
        _ => Pending::None,
    }
}

// ─── Lexer ───

const ESCAPES: EscapeSyntax = EscapeSyntax::UNICODE;

#[inline]
fn is_scala_ident_start(b: u8) -> bool {
    is_ident_start(b) || b == b'$'
}

#[inline]
fn is_scala_ident_char(b: u8) -> bool {
    is_ident_char(b) || b == b'$'
}

pub struct ScalaLexer<'k> {
    classifier: KeywordClassifier<'k>,
    config: ScalaConfig,
}

/// Scan-local data for one Scala scan.
pub struct ScalaScan {
    pending: Pending,
    comment_depth: u32,
    nested: ContextStack<ScalaStyle>,
    escape: EscapeSequence<ScalaStyle>,
    /// String state to return to after a `$name` reference.
    ident_return: Option<ScalaStyle>,
    xml_depth: u32,
    /// Visible byte before the identifier being scanned.
    ch_before: u8,
    flags: LineFlags,
    /// The current line started inside a triple-quoted string.
    string_carry: bool,
}

impl<'k> ScalaLexer<'k> {
    pub fn new(keywords: &'k KeywordSets) -> Self {
        Self {
            classifier: KeywordClassifier::new(keywords, introducer),
            config: ScalaConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ScalaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ScalaConfig {
        &self.config
    }

    fn start_identifier(cx: &mut Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) {
        scan.ident_return = None;
        scan.ch_before = cx.lookbehind().ch_prev_non_white;
        cx.set_state(ScalaStyle::Identifier);
    }

    /// Identifier-like runs: identifiers, annotations, symbols, XML names.
    fn exit_word(&self, cx: &mut Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) -> Flow {
        let state = cx.state();
        let markup = matches!(state, ScalaStyle::XmlTag | ScalaStyle::XmlAttribute);
        let separator = (cx.ch() == b'.'
            && !matches!(state, ScalaStyle::Identifier | ScalaStyle::Symbol))
            || (cx.ch() == b':' && markup);
        if separator {
            cx.set_state(ScalaStyle::Operator2);
            cx.forward_set_state(state);
        }

        let ch = cx.ch();
        if is_scala_ident_char(ch) || (ch == b'-' && markup) {
            return Flow::Next;
        }
        if state == ScalaStyle::Identifier {
            if let Some(outer) = scan.ident_return.take() {
                cx.set_state(outer);
                return Flow::Rescan;
            }
            self.classify_identifier(cx, scan);
        }
        cx.set_state(if markup {
            ScalaStyle::XmlOther
        } else {
            ScalaStyle::Default
        });
        Flow::Rescan
    }

    fn classify_identifier(&self, cx: &mut Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) {
        let text = cx.current_text();
        let run = IdentifierRun {
            text,
            next: cx.ch(),
            line_next: cx.line_next_char(),
            before: scan.ch_before,
        };
        let class = self.classifier.classify(&run, &mut scan.pending);
        if class == WordClass::Keyword && text == b"end" && cx.visible_chars() == 3 {
            scan.flags.insert(LineFlags::CLOSE_BRACE);
        }
        let style = match class {
            WordClass::Keyword => ScalaStyle::Keyword,
            WordClass::Class | WordClass::Type => ScalaStyle::Class,
            WordClass::Trait => ScalaStyle::Trait,
            WordClass::Enum => ScalaStyle::Enum,
            WordClass::FunctionDefinition => ScalaStyle::FunctionDefinition,
            WordClass::Function => ScalaStyle::Function,
            WordClass::Identifier => ScalaStyle::Identifier,
        };
        cx.change_state(style);
        cx.lookbehind_mut().style_prev_non_white = style;
    }

    fn exit_block_comment(cx: &mut Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) -> Flow {
        if cx.at_line_start() {
            scan.flags = LineFlags::COMMENT;
        }
        if cx.matches(b'*', b'/') {
            cx.forward();
            scan.comment_depth = scan.comment_depth.saturating_sub(1);
            if scan.comment_depth == 0 {
                cx.forward_set_state(ScalaStyle::Default);
                if scan.flags == LineFlags::COMMENT && cx.line_next_char() != 0 {
                    scan.flags = LineFlags::empty();
                }
            }
        } else if cx.matches(b'/', b'*') {
            cx.forward();
            scan.comment_depth += 1;
        } else if cx.state() == ScalaStyle::CommentBlockDoc
            && cx.ch() == b'@'
            && is_alpha(cx.ch_next())
            && is_comment_tag_prev(cx.ch_prev())
        {
            cx.set_state(ScalaStyle::CommentTag);
        }
        Flow::Next
    }

    fn exit_string(cx: &mut Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) -> Flow {
        let state = cx.state();
        let ch = cx.ch();
        let next = cx.ch_next();

        if cx.at_line_start() && state.is_single_line_string() {
            cx.set_state(ScalaStyle::Default);
            return Flow::Next;
        }
        if ch == b'\\' {
            if !is_eol(next) && next != 0 {
                scan.escape.start(state, next, &ESCAPES);
                cx.set_state(ScalaStyle::EscapeChar);
                cx.forward();
            }
            return Flow::Next;
        }
        if ch == b'$' && state.is_interpolated() {
            if next == b'$' {
                scan.escape.start_single(state);
                cx.set_state(ScalaStyle::EscapeChar);
                cx.forward();
            } else if next == b'{' {
                scan.nested.push(state);
                cx.set_state(ScalaStyle::Operator2);
                cx.forward();
            } else if is_scala_ident_start(next) {
                scan.ident_return = Some(state);
                cx.set_state(ScalaStyle::Identifier);
            }
            return Flow::Next;
        }
        if ch == state.quote() && (state.is_single_line_string() || cx.match_next(b'"', b'"')) {
            if state.is_triple() {
                // Extra quotes before the final three are content.
                while cx.ch_next() == b'"' {
                    cx.forward();
                }
            }
            let after = match state {
                ScalaStyle::XmlStringSq | ScalaStyle::XmlStringDq => ScalaStyle::XmlOther,
                _ => ScalaStyle::Default,
            };
            cx.forward_set_state(after);
            return Flow::Rescan;
        }
        Flow::Next
    }

    fn open_block_comment(cx: &mut Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) -> Flow {
        scan.comment_depth = 1;
        if cx.visible_chars() == 0 {
            scan.flags.insert(LineFlags::COMMENT);
        }
        cx.set_state(ScalaStyle::CommentBlock);
        cx.forward_n(2);
        if cx.ch() == b'*' && cx.ch_next() != b'*' {
            cx.change_state(ScalaStyle::CommentBlockDoc);
        }
        Flow::Rescan
    }

    fn open_string(&self, cx: &mut Cursor<'_, ScalaStyle>) {
        let interpolated = match self.config.interpolation {
            Interpolation::Prefixed => {
                cx.lookbehind().style_prev_non_white != ScalaStyle::Number
                    && is_scala_ident_char(cx.ch_prev())
            }
            Interpolation::Always => true,
            Interpolation::Never => false,
        };
        let triple = cx.match_next(b'"', b'"');
        let state = match (interpolated, triple) {
            (false, false) => ScalaStyle::String,
            (true, false) => ScalaStyle::InterpolatedString,
            (false, true) => ScalaStyle::TripleString,
            (true, true) => ScalaStyle::TripleInterpolatedString,
        };
        cx.set_state(state);
        if triple {
            cx.forward_n(2);
        }
    }

    fn open_quote(cx: &mut Cursor<'_, ScalaStyle>) {
        let next = cx.ch_next();
        let state = if (next == b'{' || is_scala_ident_start(next)) && cx.relative(2) != b'\'' {
            if next == b'{' {
                ScalaStyle::Operator
            } else {
                ScalaStyle::Symbol
            }
        } else {
            ScalaStyle::Character
        };
        cx.set_state(state);
    }

    fn enter_operator(cx: &mut Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) -> Flow {
        let ch = cx.ch();
        cx.set_state(ScalaStyle::Operator);
        if (ch == b'+' || ch == b'-') && cx.ch_next() == ch {
            cx.change_state(ScalaStyle::OperatorPostfix);
            cx.forward();
        } else if !scan.nested.is_empty() {
            cx.change_state(ScalaStyle::Operator2);
            if ch == b'{' {
                scan.nested.push(ScalaStyle::Default);
            } else if ch == b'}' {
                if let Some(outer) = scan.nested.pop() {
                    cx.forward_set_state(outer);
                    return Flow::Rescan;
                }
            }
        } else if cx.visible_chars() == 0 && matches!(ch, b'}' | b']' | b')') {
            scan.flags.insert(LineFlags::CLOSE_BRACE);
        }
        Flow::Next
    }

    fn enter_punct(&self, cx: &mut Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) -> Flow {
        let ch = cx.ch();
        let next = cx.ch_next();
        match ch {
            b'/' if next == b'/' => {
                if cx.visible_chars() == 0 {
                    scan.flags.insert(LineFlags::COMMENT);
                }
                cx.set_state(ScalaStyle::CommentLine);
            }
            b'/' if next == b'*' => return Self::open_block_comment(cx, scan),
            b'"' => self.open_string(cx),
            b'\'' => Self::open_quote(cx),
            b'<' if self.config.xml_literals && (next == b'/' || markup::is_tag_start(cx)) => {
                markup::open_tag(cx, scan);
            }
            // Comparison, even inside an interpolation.
            b'<' => cx.set_state(ScalaStyle::Operator),
            b'`' => cx.set_state(ScalaStyle::Backticks),
            _ if is_number_start(ch, next) => cx.set_state(ScalaStyle::Number),
            b'$' => Self::start_identifier(cx, scan),
            b'@' if is_scala_ident_start(next) => cx.set_state(ScalaStyle::Annotation),
            _ => return Self::enter_operator(cx, scan),
        }
        Flow::Next
    }
}

impl Grammar for ScalaLexer<'_> {
    type Style = ScalaStyle;
    type Scan = ScalaScan;

    fn begin(&self, cx: &mut Cursor<'_, ScalaStyle>, previous: LineState) -> ScalaScan {
        let scan = ScalaScan {
            pending: Pending::None,
            comment_depth: u32::from(previous.comment_depth),
            nested: ContextStack::with_max_depth(self.config.max_context_depth),
            escape: EscapeSequence::new(ScalaStyle::Default),
            ident_return: None,
            xml_depth: 0,
            ch_before: 0,
            flags: LineFlags::empty(),
            string_carry: cx.state().is_triple(),
        };
        if cx.pos() == 0 && cx.matches(b'#', b'!') {
            cx.set_state(ScalaStyle::CommentLine);
            cx.forward();
        }
        scan
    }

    fn exit(&self, cx: &mut Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) -> Flow {
        match cx.state() {
            ScalaStyle::Operator | ScalaStyle::Operator2 | ScalaStyle::OperatorPostfix => {
                cx.set_state(ScalaStyle::Default);
                Flow::Next
            }
            ScalaStyle::Number => {
                if !is_decimal_number(cx.ch_prev(), cx.ch(), cx.ch_next()) {
                    cx.set_state(ScalaStyle::Default);
                }
                Flow::Next
            }
            ScalaStyle::Identifier
            | ScalaStyle::Annotation
            | ScalaStyle::Symbol
            | ScalaStyle::XmlTag
            | ScalaStyle::XmlAttribute => self.exit_word(cx, scan),
            ScalaStyle::CommentLine => {
                if cx.at_line_start() {
                    cx.set_state(ScalaStyle::Default);
                }
                Flow::Next
            }
            ScalaStyle::CommentBlock | ScalaStyle::CommentBlockDoc => {
                Self::exit_block_comment(cx, scan)
            }
            ScalaStyle::CommentTag => {
                if is_alpha(cx.ch()) {
                    return Flow::Next;
                }
                cx.set_state(ScalaStyle::CommentBlockDoc);
                Flow::Rescan
            }
            ScalaStyle::EscapeChar => {
                if !scan.escape.at_end(cx.ch()) {
                    return Flow::Next;
                }
                cx.set_state(scan.escape.outer());
                Flow::Rescan
            }
            ScalaStyle::XmlText | ScalaStyle::XmlOther => markup::exit(cx, scan),
            state if state.is_string() => Self::exit_string(cx, scan),
            _ => Flow::Next,
        }
    }

    fn enter(&self, cx: &mut Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) -> Flow {
        match CharClass::of(cx.ch()) {
            CharClass::Digit => cx.set_state(ScalaStyle::Number),
            CharClass::IdentStart => Self::start_identifier(cx, scan),
            CharClass::Punct => return self.enter_punct(cx, scan),
            CharClass::Space | CharClass::LineEnd | CharClass::Control => {}
        }
        Flow::Next
    }

    fn end_line(&self, cx: &Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) -> LineState {
        let mut flags = scan.flags;
        if !scan.nested.is_empty() || scan.xml_depth != 0 {
            flags = LineFlags::NESTED | LineFlags::MULTILINE_STRING;
        } else if cx.state().is_triple() || scan.string_carry {
            flags.insert(LineFlags::MULTILINE_STRING);
        } else if flags.is_empty() && cx.visible_chars() == 0 {
            flags = LineFlags::BLANK;
        }
        let state = LineState::new(flags, scan.comment_depth, cx.lookbehind().indent);

        scan.flags = LineFlags::empty();
        scan.pending = Pending::None;
        scan.string_carry = cx.state().is_triple();
        state
    }

    fn context_depth(&self, scan: &ScalaScan) -> ContextDepth {
        ContextDepth {
            current: scan.nested.depth(),
            max: scan.nested.max_depth_reached(),
        }
    }

    fn fold_mode(&self) -> FoldMode {
        FoldMode::Indentation
    }
}
