//! Display categories and the run-length stream a scan produces.

use std::fmt;

/// A language's category enumeration.
///
/// The same enum doubles as the automaton state: the category being
/// accumulated is the state the scanner is in.
pub trait Style: Copy + Eq + fmt::Debug {
    /// Initial state, and the state in which entry rules apply.
    const DEFAULT: Self;

    /// Categories that behave like whitespace for lookbehind purposes
    /// (the default state and comments).
    fn is_space_equivalent(self) -> bool;

    /// Category carrying the brackets that drive folding.
    fn is_fold_operator(self) -> bool;
}

/// One emitted run: `len` bytes starting at `start`, all of `style`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleRun<S> {
    pub start: usize,
    pub len: usize,
    pub style: S,
}

impl<S> StyleRun<S> {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Read access to categories assigned by earlier scans.
pub trait StyleHistory<S> {
    /// Category at `offset`, or `None` if nothing has been assigned there.
    fn style_at(&self, offset: usize) -> Option<S>;
}

impl<S: Copy> StyleHistory<S> for [S] {
    fn style_at(&self, offset: usize) -> Option<S> {
        self.get(offset).copied()
    }
}

impl<S: Copy> StyleHistory<S> for Vec<S> {
    fn style_at(&self, offset: usize) -> Option<S> {
        self.get(offset).copied()
    }
}

/// Per-byte category storage, the editor-side view of a styled document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleBuffer<S> {
    styles: Vec<S>,
}

impl<S: Style> StyleBuffer<S> {
    pub fn new() -> Self {
        Self { styles: Vec::new() }
    }

    /// Grow or shrink to `len` bytes; new bytes get the default category.
    pub fn resize(&mut self, len: usize) {
        self.styles.resize(len, S::DEFAULT);
    }

    /// Paint `runs` over the buffer. Runs past the end are truncated.
    pub fn apply(&mut self, runs: &[StyleRun<S>]) {
        for run in runs {
            let end = run.end().min(self.styles.len());
            if let Some(slots) = self.styles.get_mut(run.start..end) {
                slots.fill(run.style);
            }
        }
    }

    pub fn as_slice(&self) -> &[S] {
        &self.styles
    }

}

impl<S: Style> StyleHistory<S> for StyleBuffer<S> {
    fn style_at(&self, offset: usize) -> Option<S> {
        self.styles.get(offset).copied()
    }
}
