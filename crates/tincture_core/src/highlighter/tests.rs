#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use pretty_assertions::assert_eq;

use super::*;
use crate::testing::{Toy, ToyGrammar};

const DOC: &str = "a(\n\"s\nt\" b\n)\n# c\nd";

fn full(text: &str) -> Highlighter<ToyGrammar> {
    let mut h = Highlighter::new(ToyGrammar);
    h.highlight(text.as_bytes()).unwrap();
    h
}

#[test]
fn highlight_styles_every_byte() {
    let h = full(DOC);
    assert_eq!(h.styles().len(), DOC.len());
    assert_eq!(h.styles()[0], Toy::Word);
    assert_eq!(h.styles()[1], Toy::Op);
    assert_eq!(h.line_states().len(), 6);
    assert!(h.line_state(0).is_nested());
    assert!(h.line_state(4).is_comment());
}

#[test]
fn split_scan_matches_single_pass() {
    let reference = full(DOC);
    for split_line in 1..6 {
        let lines = LineIndex::new(DOC.as_bytes());
        let split = lines.line_start(split_line).unwrap();

        let mut h = Highlighter::new(ToyGrammar);
        h.scan_range(DOC.as_bytes(), 0, split).unwrap();
        h.restyle(DOC.as_bytes(), split_line).unwrap();

        assert_eq!(h.styles(), reference.styles(), "split at line {split_line}");
        assert_eq!(h.line_states(), reference.line_states(), "split at line {split_line}");
    }
}

#[test]
fn restyle_backs_up_over_nested_lines() {
    let mut h = full(DOC);
    let outcome = h.restyle(DOC.as_bytes(), 2).unwrap();
    assert_eq!(outcome.lines.start, 0);
}

#[test]
fn restyle_after_edit() {
    let mut h = full("x\ny");
    let edited = "x\n\"y";
    h.restyle(edited.as_bytes(), 1).unwrap();
    assert_eq!(h.styles(), full(edited).styles());
}

#[test]
fn restyle_after_shrink_truncates_line_states() {
    let mut h = full("a\nb\nc");
    h.restyle(b"a\nb", 1).unwrap();
    assert_eq!(h.line_states().len(), 2);
    assert_eq!(h.styles().len(), 3);
}

#[test]
fn fold_levels_use_session_state() {
    let h = full("f(\n  x\n)");
    let headers: Vec<bool> = h
        .fold_levels(b"f(\n  x\n)")
        .iter()
        .map(|f| f.header)
        .collect();
    assert_eq!(headers, vec![true, false, false]);
}
