//! XML literals embedded in Scala expressions.
//!
//! Tags nest by counting: `<name` opens a level, `</name` and `/>` close
//! one. While the level is positive the scan alternates between tag
//! internals (`XmlOther`, `XmlAttribute`) and element text (`XmlText`). A `{`
//! in either saves the markup state on the context stack; the matching `}`
//! comes back to it.

use tincture_core::{Cursor, Flow};

use super::{is_scala_ident_char, is_scala_ident_start, ScalaScan, ScalaStyle};

/// The previous token produced a value, so a `<` here compares.
fn follows_expression(ch: u8, style: ScalaStyle) -> bool {
    ch == b')'
        || ch == b']'
        || matches!(
            style,
            ScalaStyle::OperatorPostfix | ScalaStyle::Number | ScalaStyle::Identifier
        )
        || is_scala_ident_char(ch)
}

/// A `<` in the default state opens a tag rather than comparing.
pub(super) fn is_tag_start(cx: &Cursor<'_, ScalaStyle>) -> bool {
    let next = cx.ch_next();
    if !(is_scala_ident_char(next) || next == b'!' || next == b'?') {
        return false;
    }
    let prev = cx.ch_prev();
    if prev == b'(' || prev == b'{' {
        return true;
    }
    let look = cx.lookbehind();
    prev <= b' '
        && (matches!(
            look.style_prev_non_white,
            ScalaStyle::XmlTag | ScalaStyle::Keyword
        ) || !follows_expression(look.ch_prev_non_white, look.style_prev_non_white))
}

/// `<` or `</` in the default state, already known to be markup.
pub(super) fn open_tag(cx: &mut Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) {
    cx.set_state(ScalaStyle::XmlTag);
    if cx.ch_next() == b'/' {
        scan.xml_depth = scan.xml_depth.saturating_sub(1);
        cx.forward();
    } else {
        scan.xml_depth += 1;
    }
}

pub(super) fn exit(cx: &mut Cursor<'_, ScalaStyle>, scan: &mut ScalaScan) -> Flow {
    let state = cx.state();
    let ch = cx.ch();
    let inside_tag = state == ScalaStyle::XmlOther;

    if ch == b'>' || cx.matches(b'/', b'>') {
        cx.set_state(ScalaStyle::XmlTag);
        if ch == b'/' {
            scan.xml_depth = scan.xml_depth.saturating_sub(1);
            cx.forward();
        }
        let after = if scan.xml_depth == 0 {
            ScalaStyle::Default
        } else {
            ScalaStyle::XmlText
        };
        cx.forward_set_state(after);
        return Flow::Rescan;
    }
    match ch {
        b'=' if inside_tag => {
            cx.set_state(ScalaStyle::Operator2);
            cx.forward_set_state(ScalaStyle::XmlOther);
            return Flow::Rescan;
        }
        b'\'' if inside_tag => cx.set_state(ScalaStyle::XmlStringSq),
        b'"' if inside_tag => cx.set_state(ScalaStyle::XmlStringDq),
        _ if inside_tag && is_scala_ident_start(ch) => cx.set_state(ScalaStyle::XmlAttribute),
        b'{' => {
            scan.nested.push(state);
            cx.set_state(ScalaStyle::Operator2);
        }
        b'<' if cx.ch_next() == b'/' => {
            scan.xml_depth = scan.xml_depth.saturating_sub(1);
            cx.set_state(ScalaStyle::XmlTag);
            cx.forward();
        }
        b'<' => {
            scan.xml_depth += 1;
            cx.set_state(ScalaStyle::XmlTag);
        }
        _ => {}
    }
    Flow::Next
}
