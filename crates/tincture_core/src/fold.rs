//! Fold levels from line states and bracket operators.
//!
//! A separate pass over what the tokenizer persisted. Each grammar picks a
//! [`FoldMode`]:
//!
//! - **Brackets.** Brackets styled as fold operators raise and lower the
//!   level. Runs of comment lines and multi-line string lines fold as one
//!   unit, by the change of their flag between the previous and next line. A
//!   lone `{` opening the next line is credited to the line before it, so
//!   Allman-style blocks fold under their header.
//! - **Indentation.** A line opens a block when the next non-blank line is
//!   indented deeper. Lines flagged `CLOSE_BRACE` (`}`, `end`) stay inside the
//!   block they close, and lines carried by an open string or nested region
//!   fold under the line that opened it.
//! - **Outline.** `HEADING` lines open sections nested by their outline level;
//!   runs of comment lines fold as one unit.

use std::ops::Range;

use smallvec::SmallVec;

use crate::chars::{is_space, is_space_or_tab};
use crate::line_state::LineState;
use crate::store::{LineIndex, LineStateStore};
use crate::style::{Style, StyleHistory};

/// How a grammar's lines fold.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FoldMode {
    #[default]
    Brackets,
    Indentation,
    Outline,
}

/// Fold information for one line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FoldLevel {
    /// Level at the start of the line.
    pub start: u32,
    /// Level the next line starts at.
    pub end: u32,
    /// Opens a foldable region.
    pub header: bool,
    pub blank: bool,
}

/// Fold levels for every line of `text`.
pub fn fold_document<S, H, L>(text: &[u8], styles: &H, store: &L, mode: FoldMode) -> Vec<FoldLevel>
where
    S: Style,
    H: StyleHistory<S> + ?Sized,
    L: LineStateStore + ?Sized,
{
    let lines = LineIndex::new(text);
    let count = lines.line_count();
    match mode {
        FoldMode::Brackets => fold_lines(text, &lines, styles, store, 0..count, 0),
        FoldMode::Indentation => fold_indentation(store, count),
        FoldMode::Outline => fold_outline(store, count),
    }
}

/// Bracket fold levels for `range`, starting at `initial_level`.
#[tracing::instrument(level = "debug", skip_all, fields(lines = ?range))]
pub fn fold_lines<S, H, L>(
    text: &[u8],
    lines: &LineIndex,
    styles: &H,
    store: &L,
    range: Range<usize>,
    initial_level: u32,
) -> Vec<FoldLevel>
where
    S: Style,
    H: StyleHistory<S> + ?Sized,
    L: LineStateStore + ?Sized,
{
    let range = range.start..range.end.min(lines.line_count());
    let mut out = Vec::with_capacity(range.len());
    let mut level = i64::from(initial_level);
    let mut prev = previous_state(store, range.start);
    let mut skip_brace = range
        .start
        .checked_sub(1)
        .and_then(|line| {
            let state = LineState::decode(store.get(line));
            if state.is_comment() || state.is_multiline_string() {
                return None;
            }
            allman_brace(text, lines, styles, line)
        });

    for line in range {
        let current = LineState::decode(store.get(line));
        let next = LineState::decode(store.get(line + 1));
        let (start, end) = line_bounds(lines, line);

        let mut next_level = level;
        let mut visible = false;
        for offset in start..end {
            let ch = text[offset];
            let style = styles.style_at(offset).unwrap_or(S::DEFAULT);
            if !visible && !is_space(ch) && !style.is_space_equivalent() {
                visible = true;
            }
            if skip_brace == Some(offset) || !style.is_fold_operator() {
                continue;
            }
            match ch {
                b'{' | b'[' | b'(' => next_level += 1,
                b'}' | b']' | b')' => next_level -= 1,
                _ => {}
            }
        }
        skip_brace = None;
        next_level = next_level.max(0);

        if current.is_comment() {
            next_level += i64::from(next.is_comment()) - i64::from(prev.is_comment());
        } else if current.is_multiline_string() {
            next_level +=
                i64::from(next.is_multiline_string()) - i64::from(prev.is_multiline_string());
        } else if visible {
            if let Some(brace) = allman_brace(text, lines, styles, line) {
                next_level += 1;
                skip_brace = Some(brace);
            }
        }
        let next_level = next_level.max(0);

        let start_level = clamp_level(level);
        let end_level = clamp_level(next_level);
        out.push(FoldLevel {
            start: start_level,
            end: end_level,
            header: end_level > start_level,
            blank: current.is_blank(),
        });
        level = next_level;
        prev = current;
    }

    tracing::debug!(
        folded = out.len(),
        headers = out.iter().filter(|f| f.header).count(),
        "fold levels"
    );
    out
}

/// Indentation fold levels for the first `line_count` lines.
#[tracing::instrument(level = "debug", skip_all, fields(lines = line_count))]
pub fn fold_indentation<L>(store: &L, line_count: usize) -> Vec<FoldLevel>
where
    L: LineStateStore + ?Sized,
{
    let states = decode_lines(store, line_count);
    let indents = effective_indents(&states);

    // Indents of the headers of the blocks still open.
    let mut open: SmallVec<[u32; 8]> = SmallVec::new();
    let mut starts: Vec<Option<usize>> = vec![None; line_count];
    for (line, state) in states.iter().enumerate() {
        let Some(indent) = indents[line] else {
            continue;
        };
        let closer = state.starts_with_closer();
        while open
            .last()
            .is_some_and(|&top| top > indent || (top == indent && !closer))
        {
            open.pop();
        }
        let closes_block = closer && open.last() == Some(&indent);
        let opens_block = indents[line + 1..]
            .iter()
            .flatten()
            .next()
            .is_some_and(|&next| next > indent);

        if closes_block && !opens_block {
            starts[line] = Some(open.len());
            open.pop();
        } else {
            if closes_block {
                open.pop();
            }
            starts[line] = Some(open.len());
            if opens_block {
                open.push(indent);
            }
        }
    }

    // Blank lines take the level of the next line that has one.
    let mut levels = vec![0usize; line_count];
    let mut following = open.len();
    for (level, start) in levels.iter_mut().zip(&starts).rev() {
        if let Some(start) = *start {
            following = start;
        }
        *level = following;
    }

    let out = levels_from_starts(&states, &levels, open.len());
    tracing::debug!(
        headers = out.iter().filter(|f| f.header).count(),
        "indentation fold levels"
    );
    out
}

/// Indent that decides nesting for each line; `None` for blank lines.
///
/// A line that starts inside a string or nested region opened earlier is
/// placed one step inside the line that opened it.
fn effective_indents(states: &[LineState]) -> Vec<Option<u32>> {
    let mut out = Vec::with_capacity(states.len());
    let mut prev = LineState::default();
    let mut opener = 0u32;
    for &state in states {
        let carried =
            prev.is_nested() || (prev.is_multiline_string() && state.is_multiline_string());
        if carried {
            out.push(Some(opener + 1));
        } else if state.is_blank() {
            out.push(None);
        } else {
            opener = u32::from(state.indent);
            out.push(Some(opener));
        }
        prev = state;
    }
    out
}

/// Outline fold levels for the first `line_count` lines.
///
/// A `HEADING` line at outline level `n` sits at level `n` and everything
/// under it at `n + 1`. Comment lines directly above a heading belong to it
/// rather than to the section before.
#[tracing::instrument(level = "debug", skip_all, fields(lines = line_count))]
pub fn fold_outline<L>(store: &L, line_count: usize) -> Vec<FoldLevel>
where
    L: LineStateStore + ?Sized,
{
    let states = decode_lines(store, line_count);
    let mut starts = vec![0usize; line_count];

    let mut body = 0usize;
    let mut line = 0;
    while line < line_count {
        let state = states[line];
        if let Some(level) = state.heading_level() {
            starts[line] = usize::from(level);
            body = usize::from(level) + 1;
            line += 1;
            continue;
        }
        if !state.is_comment() {
            starts[line] = body;
            line += 1;
            continue;
        }

        let run_end = (line..line_count)
            .find(|&l| !states[l].is_comment() || states[l].heading_level().is_some())
            .unwrap_or(line_count);
        let level = match states.get(run_end).and_then(|s| s.heading_level()) {
            Some(heading) => usize::from(heading),
            None => body,
        };
        starts[line] = level;
        for inner in &mut starts[line + 1..run_end] {
            *inner = level + 1;
        }
        line = run_end;
    }

    let trailing = starts.last().copied().unwrap_or(0);
    let out = levels_from_starts(&states, &starts, trailing);
    tracing::debug!(
        headers = out.iter().filter(|f| f.header).count(),
        "outline fold levels"
    );
    out
}

fn decode_lines<L: LineStateStore + ?Sized>(store: &L, line_count: usize) -> Vec<LineState> {
    (0..line_count)
        .map(|line| LineState::decode(store.get(line)))
        .collect()
}

/// Pair each line's start level with the next line's; `last_end` closes the
/// final line.
fn levels_from_starts(states: &[LineState], starts: &[usize], last_end: usize) -> Vec<FoldLevel> {
    starts
        .iter()
        .enumerate()
        .map(|(line, &start)| {
            let end = starts.get(line + 1).copied().unwrap_or(last_end);
            let start = clamp_depth(start);
            let end = clamp_depth(end);
            FoldLevel {
                start,
                end,
                header: end > start,
                blank: states[line].is_blank(),
            }
        })
        .collect()
}

fn clamp_depth(depth: usize) -> u32 {
    u32::try_from(depth).unwrap_or(u32::MAX)
}

fn previous_state<L: LineStateStore + ?Sized>(store: &L, line: usize) -> LineState {
    match line.checked_sub(1) {
        Some(prev) => LineState::decode(store.get(prev)),
        None => LineState::default(),
    }
}

fn clamp_level(level: i64) -> u32 {
    u32::try_from(level.max(0)).unwrap_or(u32::MAX)
}

/// Byte range of `line`, terminator included.
fn line_bounds(lines: &LineIndex, line: usize) -> (usize, usize) {
    let start = lines.line_start(line).unwrap_or(0);
    let end = lines.line_end(line).unwrap_or(start);
    (start, end)
}

/// Offset of a `{` that opens the line after `line`, if `line` is a header
/// whose brace was put on the next line.
fn allman_brace<S, H>(text: &[u8], lines: &LineIndex, styles: &H, line: usize) -> Option<usize>
where
    S: Style,
    H: StyleHistory<S> + ?Sized,
{
    if line + 1 >= lines.line_count() {
        return None;
    }
    let (next_start, next_end) = line_bounds(lines, line + 1);
    let brace = (next_start..next_end).find(|&offset| !is_space_or_tab(text[offset]))?;
    if text[brace] != b'{' || !styles.style_at(brace).is_some_and(Style::is_fold_operator) {
        return None;
    }

    // The header itself must not already end a statement or open a block.
    let (start, end) = line_bounds(lines, line);
    let last = (start..end).rev().find(|&offset| {
        let style = styles.style_at(offset).unwrap_or(S::DEFAULT);
        !is_space(text[offset]) && !style.is_space_equivalent()
    })?;
    if matches!(text[last], b'{' | b'}' | b';' | b',') {
        return None;
    }
    Some(brace)
}
