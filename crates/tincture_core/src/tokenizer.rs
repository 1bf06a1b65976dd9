//! The scan loop.
//!
//! One pass over `text[start..start + len]`, one character at a time:
//!
//! 1. the grammar's exit rule for the current state,
//! 2. in the default state, its entry rule,
//! 3. at a `\n`, commit the line's [`LineState`],
//! 4. advance.
//!
//! A last line without a terminator is committed once the cursor has passed
//! its final byte.
//!
//! A [`Flow::Rescan`] from either rule restarts the step on the same
//! character.

use std::ops::Range;

use crate::chars::is_space;
use crate::cursor::{Cursor, Lookbehind};
use crate::grammar::{Flow, Grammar};
use crate::line_state::LineState;
use crate::store::LineStateStore;
use crate::style::{Style, StyleHistory, StyleRun};

/// Re-dispatches allowed on one character before the loop forces progress.
const MAX_RESCANS: u32 = 16;

/// Invalid scan request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    #[error("scan range {start}+{len} exceeds buffer length {buffer_len}")]
    OutOfBounds {
        start: usize,
        len: usize,
        buffer_len: usize,
    },
    #[error("scan start {offset} is not at the beginning of a line")]
    NotLineStart { offset: usize },
}

/// Everything one scan produced besides its line-state writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOutcome<S> {
    pub runs: Vec<StyleRun<S>>,
    /// State at the end of the range; seeds a sequential continuation.
    pub end_state: S,
    /// Lines whose state was committed.
    pub lines: Range<usize>,
    pub context_depth: usize,
    pub max_context_depth: usize,
}

/// Scan `len` bytes of `text` from `start` in `initial` state.
///
/// `start` must be a line start. `initial` must be the state certified by
/// [`resync`](crate::resync::resync) for that line, or the default state at
/// offset 0. `history` supplies categories for bytes before `start`; they
/// seed the lookbehind context.
#[tracing::instrument(level = "debug", skip_all, fields(start = start, len = len))]
pub fn tokenize<G, H, L>(
    grammar: &G,
    text: &[u8],
    start: usize,
    len: usize,
    initial: G::Style,
    store: &mut L,
    history: &H,
) -> Result<ScanOutcome<G::Style>, TokenizeError>
where
    G: Grammar,
    H: StyleHistory<G::Style> + ?Sized,
    L: LineStateStore + ?Sized,
{
    let end = start
        .checked_add(len)
        .filter(|&end| end <= text.len())
        .ok_or(TokenizeError::OutOfBounds {
            start,
            len,
            buffer_len: text.len(),
        })?;
    if start > 0 && text[start - 1] != b'\n' {
        return Err(TokenizeError::NotLineStart { offset: start });
    }

    let first_line = memchr::memchr_iter(b'\n', &text[..start]).count();
    let previous = match first_line.checked_sub(1) {
        Some(prev) => LineState::decode(store.get(prev)),
        None => LineState::default(),
    };

    let mut cx = Cursor::new(text, start..end, first_line, initial)
        .with_lookbehind(lookback(text, start, history));
    let mut scan = grammar.begin(&mut cx, previous);
    let mut committed: Option<usize> = None;
    let mut rescans = 0u32;
    let mut rescan_pos = usize::MAX;

    while cx.more() {
        let mut flow = grammar.exit(&mut cx, &mut scan);
        if flow == Flow::Next && cx.state() == G::Style::DEFAULT {
            flow = grammar.enter(&mut cx, &mut scan);
        }
        if flow == Flow::Rescan {
            if cx.pos() == rescan_pos {
                rescans += 1;
            } else {
                rescan_pos = cx.pos();
                rescans = 1;
            }
            if rescans <= MAX_RESCANS {
                continue;
            }
            tracing::warn!(
                pos = cx.pos(),
                state = ?cx.state(),
                "grammar keeps re-dispatching one character, forcing progress"
            );
        }

        if cx.at_line_end() {
            commit(grammar, &mut cx, &mut scan, store);
            committed = Some(cx.line());
        }
        cx.forward();
    }

    // A final line without a terminator ends with the buffer. Its last run
    // sees the `0` sentinel so pending words still get classified.
    if end == text.len() && end > start && text[end - 1] != b'\n' {
        finish_buffer(grammar, &mut cx, &mut scan);
        commit(grammar, &mut cx, &mut scan, store);
        committed = Some(cx.line());
    }

    let depth = grammar.context_depth(&scan);
    let lines = match committed {
        Some(last) => first_line..last + 1,
        None => first_line..first_line,
    };
    let end_state = cx.state();
    let runs = cx.finish();

    tracing::debug!(
        lines = lines.len(),
        runs = runs.len(),
        max_context_depth = depth.max,
        "scan complete"
    );

    Ok(ScanOutcome {
        runs,
        end_state,
        lines,
        context_depth: depth.current,
        max_context_depth: depth.max,
    })
}

/// Dispatch exit rules at the end of the buffer until they settle.
fn finish_buffer<G: Grammar>(grammar: &G, cx: &mut Cursor<'_, G::Style>, scan: &mut G::Scan) {
    for _ in 0..MAX_RESCANS {
        if grammar.exit(cx, scan) == Flow::Next {
            return;
        }
    }
    tracing::warn!(
        pos = cx.pos(),
        state = ?cx.state(),
        "grammar keeps re-dispatching at the end of the buffer"
    );
}

fn commit<G, L>(
    grammar: &G,
    cx: &mut Cursor<'_, G::Style>,
    scan: &mut G::Scan,
    store: &mut L,
) where
    G: Grammar,
    L: LineStateStore + ?Sized,
{
    let state = grammar.end_line(cx, scan);
    tracing::trace!(line = cx.line(), state = state.encode(), "line committed");
    store.set(cx.line(), state.encode());
    cx.start_line();
}

/// Rebuild the lookbehind context for a scan starting at `start`: the last
/// byte before it that is neither whitespace nor in a whitespace-equivalent
/// category.
pub(crate) fn lookback<S, H>(text: &[u8], start: usize, history: &H) -> Lookbehind<S>
where
    S: Style,
    H: StyleHistory<S> + ?Sized,
{
    let mut look = Lookbehind::default();
    for offset in (0..start.min(text.len())).rev() {
        let ch = text[offset];
        if is_space(ch) {
            continue;
        }
        let style = history.style_at(offset).unwrap_or(S::DEFAULT);
        if !style.is_space_equivalent() {
            look.ch_prev_non_white = ch;
            look.style_prev_non_white = style;
            break;
        }
    }
    look
}
