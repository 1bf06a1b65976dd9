//! The contract between the scan loop and a language.
//!
//! A grammar is two dispatch tables plus line bookkeeping:
//!
//! - [`Grammar::exit`] is keyed by the current state and decides whether the
//!   current character ends it.
//! - [`Grammar::enter`] runs only in the default state and picks a new state
//!   from the character class.
//!
//! Both see the same [`Cursor`] and the grammar's own scan-local data, and
//! both can be driven directly in tests.

use crate::cursor::Cursor;
use crate::fold::FoldMode;
use crate::line_state::LineState;
use crate::style::Style;

/// What the loop does after a dispatch step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Fall through: entry rules (in the default state), line-end
    /// bookkeeping, then advance.
    Next,
    /// Dispatch the current character again under the new state.
    Rescan,
}

/// Current and deepest nesting seen by a scan.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextDepth {
    pub current: usize,
    pub max: usize,
}

pub trait Grammar {
    type Style: Style;

    /// Scan-local data, created fresh for each scan.
    type Scan;

    /// Set up a scan. `previous` is the state persisted for the line before
    /// the cursor (default at document start).
    fn begin(&self, cx: &mut Cursor<'_, Self::Style>, previous: LineState) -> Self::Scan;

    fn exit(&self, cx: &mut Cursor<'_, Self::Style>, scan: &mut Self::Scan) -> Flow;

    fn enter(&self, cx: &mut Cursor<'_, Self::Style>, scan: &mut Self::Scan) -> Flow;

    /// Summarize the line the cursor is ending and reset per-line data.
    fn end_line(&self, cx: &Cursor<'_, Self::Style>, scan: &mut Self::Scan) -> LineState;

    fn context_depth(&self, _scan: &Self::Scan) -> ContextDepth {
        ContextDepth::default()
    }

    /// How the persisted lines fold.
    fn fold_mode(&self) -> FoldMode {
        FoldMode::Brackets
    }
}
