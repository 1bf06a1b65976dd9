//! Choosing a safe place to restart a scan.
//!
//! A line can be resumed on its own unless the line before it ended inside a
//! nested region (an open interpolation, markup literal or bracketed value): the context stack
//! for that region is not persisted, so the scan has to start early enough
//! to rebuild it.

use crate::line_state::LineState;
use crate::store::{LineIndex, LineStateStore};
use crate::style::{Style, StyleHistory};

/// Where and how to restart scanning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResumePoint<S> {
    pub line: usize,
    pub offset: usize,
    pub state: S,
}

/// Walk back from `restart_line` to the nearest line that can be resumed.
///
/// The state is the category of the byte just before the returned offset,
/// which is the state the previous pass was in when it crossed that line
/// boundary. Scanning forward from the result rewrites every line between it
/// and `restart_line` with the same values a single pass would produce.
#[tracing::instrument(level = "debug", skip_all, fields(restart_line = restart_line))]
pub fn resync<S, H, L>(
    lines: &LineIndex,
    store: &L,
    history: &H,
    restart_line: usize,
) -> ResumePoint<S>
where
    S: Style,
    H: StyleHistory<S> + ?Sized,
    L: LineStateStore + ?Sized,
{
    let mut line = restart_line.min(lines.line_count() - 1);
    while line > 0 && LineState::decode(store.get(line - 1)).is_nested() {
        line -= 1;
    }

    let offset = lines.line_start(line).unwrap_or(0);
    let state = match offset.checked_sub(1) {
        Some(prev) => history.style_at(prev).unwrap_or(S::DEFAULT),
        None => S::DEFAULT,
    };

    tracing::debug!(
        line,
        stepped_back = restart_line.saturating_sub(line),
        "resume point"
    );
    ResumePoint {
        line,
        offset,
        state,
    }
}

#[cfg(test)]
mod tests;
