//! Editor-style session: owns the line states and the per-byte categories
//! for one document and keeps them current across partial rescans.

use crate::fold::{fold_document, FoldLevel};
use crate::grammar::Grammar;
use crate::line_state::LineState;
use crate::resync::resync;
use crate::store::{LineIndex, LineStateStore};
use crate::style::{Style, StyleBuffer};
use crate::tokenizer::{tokenize, ScanOutcome, TokenizeError};

pub struct Highlighter<G: Grammar> {
    grammar: G,
    line_states: Vec<u32>,
    styles: StyleBuffer<G::Style>,
}

impl<G: Grammar> Highlighter<G> {
    pub fn new(grammar: G) -> Self {
        Self {
            grammar,
            line_states: Vec::new(),
            styles: StyleBuffer::new(),
        }
    }

    /// Style the whole of `text` from scratch.
    pub fn highlight(&mut self, text: &[u8]) -> Result<ScanOutcome<G::Style>, TokenizeError> {
        self.line_states.clear();
        self.scan_range(text, 0, text.len())
    }

    /// Scan `len` bytes from the line start `start`, seeding the state from
    /// the stored categories.
    pub fn scan_range(
        &mut self,
        text: &[u8],
        start: usize,
        len: usize,
    ) -> Result<ScanOutcome<G::Style>, TokenizeError> {
        self.styles.resize(text.len());
        let initial = start
            .checked_sub(1)
            .and_then(|prev| self.styles.as_slice().get(prev).copied())
            .unwrap_or(<G::Style as Style>::DEFAULT);
        let outcome = tokenize(
            &self.grammar,
            text,
            start,
            len,
            initial,
            &mut self.line_states,
            &self.styles,
        )?;
        self.styles.apply(&outcome.runs);
        Ok(outcome)
    }

    /// Restyle from `from_line` to the end after an edit on that line.
    ///
    /// Backs up over lines that end inside a nested region first.
    pub fn restyle(
        &mut self,
        text: &[u8],
        from_line: usize,
    ) -> Result<ScanOutcome<G::Style>, TokenizeError> {
        self.styles.resize(text.len());
        let lines = LineIndex::new(text);
        let point = resync(&lines, &self.line_states, &self.styles, from_line);
        let outcome = tokenize(
            &self.grammar,
            text,
            point.offset,
            text.len() - point.offset,
            point.state,
            &mut self.line_states,
            &self.styles,
        )?;
        self.styles.apply(&outcome.runs);
        self.line_states.truncate(lines.line_count());
        Ok(outcome)
    }

    pub fn styles(&self) -> &[G::Style] {
        self.styles.as_slice()
    }

    pub fn line_state(&self, line: usize) -> LineState {
        LineState::decode(LineStateStore::get(&self.line_states, line))
    }

    /// Raw persisted values, one per committed line.
    pub fn line_states(&self) -> &[u32] {
        &self.line_states
    }

    pub fn fold_levels(&self, text: &[u8]) -> Vec<FoldLevel> {
        fold_document(
            text,
            &self.styles,
            &self.line_states,
            self.grammar.fold_mode(),
        )
    }
}

#[cfg(test)]
mod tests;
