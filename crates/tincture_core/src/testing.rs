//! A tiny grammar for exercising the engine without a real language.
//!
//! Words, `#` line comments, multi-line `"` strings, and parentheses that
//! open nested regions (lines inside them are flagged `NESTED`).

use crate::chars::{is_graphic, is_ident_char, is_ident_start};
use crate::context_stack::ContextStack;
use crate::cursor::Cursor;
use crate::grammar::{ContextDepth, Flow, Grammar};
use crate::line_state::{LineFlags, LineState};
use crate::style::Style;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Toy {
    Default,
    Word,
    Comment,
    Op,
    Str,
}

impl Style for Toy {
    const DEFAULT: Self = Toy::Default;

    fn is_space_equivalent(self) -> bool {
        matches!(self, Toy::Default | Toy::Comment)
    }

    fn is_fold_operator(self) -> bool {
        self == Toy::Op
    }
}

pub(crate) struct ToyGrammar;

pub(crate) struct ToyScan {
    parens: ContextStack<Toy>,
    flags: LineFlags,
    carried_string: bool,
}

impl Grammar for ToyGrammar {
    type Style = Toy;
    type Scan = ToyScan;

    fn begin(&self, cx: &mut Cursor<'_, Toy>, _previous: LineState) -> ToyScan {
        ToyScan {
            parens: ContextStack::new(),
            flags: LineFlags::empty(),
            carried_string: cx.state() == Toy::Str,
        }
    }

    fn exit(&self, cx: &mut Cursor<'_, Toy>, _scan: &mut ToyScan) -> Flow {
        match cx.state() {
            Toy::Word if !is_ident_char(cx.ch()) => cx.set_state(Toy::Default),
            Toy::Comment if cx.at_line_start() => cx.set_state(Toy::Default),
            Toy::Op => cx.set_state(Toy::Default),
            Toy::Str if cx.ch() == b'"' => {
                cx.forward_set_state(Toy::Default);
                return Flow::Rescan;
            }
            _ => {}
        }
        Flow::Next
    }

    fn enter(&self, cx: &mut Cursor<'_, Toy>, scan: &mut ToyScan) -> Flow {
        let ch = cx.ch();
        if is_ident_start(ch) {
            cx.set_state(Toy::Word);
        } else if ch == b'#' {
            if cx.visible_chars() == 0 {
                scan.flags |= LineFlags::COMMENT;
            }
            cx.set_state(Toy::Comment);
        } else if ch == b'"' {
            cx.set_state(Toy::Str);
        } else if is_graphic(ch) {
            match ch {
                b'(' => scan.parens.push(Toy::Default),
                b')' => {
                    scan.parens.pop();
                }
                _ => {}
            }
            cx.set_state(Toy::Op);
        }
        Flow::Next
    }

    fn end_line(&self, cx: &Cursor<'_, Toy>, scan: &mut ToyScan) -> LineState {
        let mut flags = scan.flags;
        if !scan.parens.is_empty() {
            flags |= LineFlags::NESTED;
        }
        if cx.state() == Toy::Str || scan.carried_string {
            flags |= LineFlags::MULTILINE_STRING;
        }
        if flags.is_empty() && cx.visible_chars() == 0 {
            flags = LineFlags::BLANK;
        }
        scan.flags = LineFlags::empty();
        scan.carried_string = cx.state() == Toy::Str;
        LineState::new(flags, 0, cx.lookbehind().indent)
    }

    fn context_depth(&self, scan: &ToyScan) -> ContextDepth {
        ContextDepth {
            current: scan.parens.depth(),
            max: scan.parens.max_depth_reached(),
        }
    }
}

/// Always asks for another dispatch on the same character.
pub(crate) struct StuckGrammar;

impl Grammar for StuckGrammar {
    type Style = Toy;
    type Scan = ();

    fn begin(&self, _cx: &mut Cursor<'_, Toy>, _previous: LineState) {}

    fn exit(&self, _cx: &mut Cursor<'_, Toy>, _scan: &mut ()) -> Flow {
        Flow::Rescan
    }

    fn enter(&self, _cx: &mut Cursor<'_, Toy>, _scan: &mut ()) -> Flow {
        Flow::Rescan
    }

    fn end_line(&self, _cx: &Cursor<'_, Toy>, _scan: &mut ()) -> LineState {
        LineState::default()
    }
}
