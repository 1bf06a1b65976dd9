#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]

use pretty_assertions::assert_eq;

use super::*;
use crate::line_state::LineFlags;
use crate::testing::Toy;

fn states(flags: &[LineFlags]) -> Vec<u32> {
    flags
        .iter()
        .map(|&f| LineState::new(f, 0, 0).encode())
        .collect()
}

#[test]
fn plain_line_resumes_in_place() {
    let text = b"a\nb\nc";
    let lines = LineIndex::new(text);
    let store = states(&[LineFlags::empty(), LineFlags::empty(), LineFlags::empty()]);
    let history = vec![Toy::Word, Toy::Default, Toy::Word, Toy::Default, Toy::Word];
    let point = resync(&lines, &store, &history, 2);
    assert_eq!(
        point,
        ResumePoint {
            line: 2,
            offset: 4,
            state: Toy::Default
        }
    );
}

#[test]
fn walks_back_over_nested_lines() {
    let text = b"f(\na\nb)\nc";
    let lines = LineIndex::new(text);
    let store = states(&[
        LineFlags::NESTED,
        LineFlags::NESTED,
        LineFlags::empty(),
        LineFlags::empty(),
    ]);
    let history: Vec<Toy> = vec![Toy::Default; text.len()];
    assert_eq!(resync(&lines, &store, &history, 2).line, 0);
    assert_eq!(resync(&lines, &store, &history, 1).line, 0);
    assert_eq!(resync(&lines, &store, &history, 3).line, 3);
}

#[test]
fn state_comes_from_last_byte_of_previous_line() {
    let text = b"\"s\nt\"";
    let lines = LineIndex::new(text);
    let store = states(&[LineFlags::MULTILINE_STRING, LineFlags::MULTILINE_STRING]);
    let history = vec![Toy::Str; text.len()];
    let point = resync(&lines, &store, &history, 1);
    assert_eq!(point.offset, 3);
    assert_eq!(point.state, Toy::Str);
}

#[test]
fn restart_past_end_clamps_to_last_line() {
    let text = b"a\nb";
    let lines = LineIndex::new(text);
    let store: Vec<u32> = Vec::new();
    let history: Vec<Toy> = Vec::new();
    let point = resync(&lines, &store, &history, 9);
    assert_eq!(point.line, 1);
    assert_eq!(point.offset, 2);
    assert_eq!(point.state, Toy::Default, "missing history reads as default");
}

#[test]
fn document_start_is_default() {
    let lines = LineIndex::new(b"x");
    let store: Vec<u32> = Vec::new();
    let point: ResumePoint<Toy> = resync(&lines, &store, &Vec::<Toy>::new(), 0);
    assert_eq!(point.offset, 0);
    assert_eq!(point.state, Toy::Default);
}
