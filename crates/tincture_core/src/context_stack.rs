//! Saved return states for nested lexical regions.
//!
//! Interpolation expressions (`${ ... }`), inline expressions inside markup
//! and plain braces nested within them each push the state to return to. The
//! matching close pops it. An unmatched close finds the stack empty and the
//! grammar treats it as an ordinary operator.

use smallvec::SmallVec;

/// Default cap on stored entries.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Stack of automaton states with a soft depth cap.
///
/// Past `max_depth`, pushes are only counted. Pops consume that count first
/// and hand back the innermost stored state, so pathological nesting degrades
/// to "return to the deepest state we remember" instead of growing without
/// bound.
#[derive(Clone, Debug)]
pub struct ContextStack<S> {
    entries: SmallVec<[S; 8]>,
    overflow: usize,
    max_depth: usize,
    high_water: usize,
}

impl<S: Copy> ContextStack<S> {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// A cap of zero is raised to one.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            entries: SmallVec::new(),
            overflow: 0,
            max_depth: max_depth.max(1),
            high_water: 0,
        }
    }

    pub fn push(&mut self, state: S) {
        if self.entries.len() < self.max_depth {
            self.entries.push(state);
        } else {
            self.overflow += 1;
            tracing::trace!(
                depth = self.depth(),
                "context stack full, flattening nested region"
            );
        }
        self.high_water = self.high_water.max(self.depth());
    }

    /// Pop the innermost return state. `None` when nothing is open.
    pub fn pop(&mut self) -> Option<S> {
        if self.overflow > 0 {
            self.overflow -= 1;
            return self.entries.last().copied();
        }
        self.entries.pop()
    }

    /// Logical depth, including flattened entries.
    pub fn depth(&self) -> usize {
        self.entries.len() + self.overflow
    }

    pub fn is_empty(&self) -> bool {
        self.depth() == 0
    }

    /// Deepest logical depth reached since construction.
    pub fn max_depth_reached(&self) -> usize {
        self.high_water
    }
}

impl<S: Copy> Default for ContextStack<S> {
    fn default() -> Self {
        Self::new()
    }
}
