//! Resumable tokenizer engine for syntax highlighting.
//!
//! A [`Grammar`] describes one language as a state-exit table and a
//! character-class entry table over a category enum. [`tokenize`] drives it
//! over a line-aligned range, emitting run-length [`StyleRun`]s and one
//! packed [`LineState`] per finished line. Those line states are all a later
//! scan needs to pick up mid-document ([`resync`]) and all the
//! [`fold`] pass needs to compute fold levels.
//!
//! This crate has no knowledge of any particular language; see
//! `tincture_lexers` for grammars.

pub mod chars;
mod context_stack;
mod cursor;
mod escape;
pub mod fold;
mod grammar;
mod highlighter;
mod keywords;
mod line_state;
pub mod resync;
mod store;
mod style;
pub mod tokenizer;

#[cfg(test)]
mod testing;

pub use context_stack::{ContextStack, DEFAULT_MAX_DEPTH};
pub use cursor::{Cursor, Lookbehind};
pub use escape::{EscapeSequence, EscapeSyntax};
pub use fold::{fold_document, fold_indentation, fold_lines, fold_outline, FoldLevel, FoldMode};
pub use grammar::{ContextDepth, Flow, Grammar};
pub use highlighter::Highlighter;
pub use keywords::{
    IdentifierRun, Introducer, KeywordClassifier, KeywordSets, Pending, WordClass, WordList,
};
pub use line_state::{LineFlags, LineState};
pub use resync::{resync, ResumePoint};
pub use store::{LineIndex, LineStateStore};
pub use style::{Style, StyleBuffer, StyleHistory, StyleRun};
pub use tokenizer::{tokenize, ScanOutcome, TokenizeError};
