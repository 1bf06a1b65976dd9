//! Scan cursor: position, current state, lookaround and run emission.
//!
//! Reads are bounded by the chunk end. Past it every peek returns the `0`
//! sentinel, so a grammar never sees bytes the current pass has not been
//! asked to style. Lookbehind may read anything before the cursor.
//!
//! Every advance also maintains the [`Lookbehind`] context (previous visible
//! character and its category, visible count and indent of the current line).
//! A resumed scan rebuilds the same context from the style history, which is
//! what keeps split scans identical to a single pass.

use std::ops::Range;

use crate::chars::{is_space, is_space_or_tab};
use crate::style::{Style, StyleRun};

/// Scan-local context carried across characters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Lookbehind<S> {
    /// Last byte that was neither whitespace nor in a whitespace-equivalent
    /// category. `0` when there is none.
    pub ch_prev_non_white: u8,
    pub style_prev_non_white: S,
    /// Non-whitespace bytes seen on the current line.
    pub visible_chars: usize,
    /// Leading spaces and tabs on the current line.
    pub indent: usize,
}

impl<S: Style> Default for Lookbehind<S> {
    fn default() -> Self {
        Self {
            ch_prev_non_white: 0,
            style_prev_non_white: S::DEFAULT,
            visible_chars: 0,
            indent: 0,
        }
    }
}

pub struct Cursor<'a, S> {
    text: &'a [u8],
    pos: usize,
    end: usize,
    line: usize,
    state: S,
    run_start: usize,
    runs: Vec<StyleRun<S>>,
    look: Lookbehind<S>,
}

impl<'a, S: Style> Cursor<'a, S> {
    /// Cursor over `text[range]`, starting on `line` in `state`.
    ///
    /// `range` is clamped to the buffer.
    pub fn new(text: &'a [u8], range: Range<usize>, line: usize, state: S) -> Self {
        let end = range.end.min(text.len());
        let pos = range.start.min(end);
        Self {
            text,
            pos,
            end,
            line,
            state,
            run_start: pos,
            runs: Vec::new(),
            look: Lookbehind::default(),
        }
    }

    #[must_use]
    pub fn with_lookbehind(mut self, look: Lookbehind<S>) -> Self {
        self.look = look;
        self
    }

    // ─── Position ───

    #[inline]
    pub fn more(&self) -> bool {
        self.pos < self.end
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub fn state(&self) -> S {
        self.state
    }

    pub fn lookbehind(&self) -> &Lookbehind<S> {
        &self.look
    }

    pub fn lookbehind_mut(&mut self) -> &mut Lookbehind<S> {
        &mut self.look
    }

    /// Visible characters so far on this line.
    #[inline]
    pub fn visible_chars(&self) -> usize {
        self.look.visible_chars
    }

    // ─── Peeking ───

    #[inline]
    fn byte(&self, index: usize) -> u8 {
        if index < self.end {
            self.text[index]
        } else {
            0
        }
    }

    #[inline]
    pub fn ch(&self) -> u8 {
        self.byte(self.pos)
    }

    #[inline]
    pub fn ch_next(&self) -> u8 {
        self.byte(self.pos + 1)
    }

    /// Byte `n` ahead of the cursor.
    #[inline]
    pub fn relative(&self, n: usize) -> u8 {
        self.byte(self.pos + n)
    }

    /// Byte before the cursor; may lie before the chunk.
    #[inline]
    pub fn ch_prev(&self) -> u8 {
        match self.pos.checked_sub(1) {
            Some(prev) => self.text.get(prev).copied().unwrap_or(0),
            None => 0,
        }
    }

    #[inline]
    pub fn matches(&self, ch: u8, next: u8) -> bool {
        self.ch() == ch && self.ch_next() == next
    }

    /// The two bytes after the cursor are `a` then `b`.
    #[inline]
    pub fn match_next(&self, a: u8, b: u8) -> bool {
        self.ch_next() == a && self.relative(2) == b
    }

    /// First byte at or after the cursor that is not a space or tab, without
    /// leaving the line. `0` at a line terminator or the chunk end.
    pub fn line_next_char(&self) -> u8 {
        let mut index = self.pos;
        while index < self.end {
            match self.text[index] {
                b' ' | b'\t' => index += 1,
                b'\r' | b'\n' => return 0,
                b => return b,
            }
        }
        0
    }

    /// Unscanned bytes up to the chunk end.
    pub fn rest(&self) -> &'a [u8] {
        &self.text[self.pos..self.end]
    }

    /// Bytes accumulated in the current state so far.
    pub fn current_text(&self) -> &'a [u8] {
        &self.text[self.run_start..self.pos]
    }

    #[inline]
    pub fn at_line_start(&self) -> bool {
        self.pos == 0 || self.text.get(self.pos - 1) == Some(&b'\n')
    }

    /// On a `\n`. In `\r\n` the `\n` ends the line.
    #[inline]
    pub fn at_line_end(&self) -> bool {
        self.more() && self.text[self.pos] == b'\n'
    }

    // ─── State changes ───

    /// Close the current run and start a new one in `state`.
    pub fn set_state(&mut self, state: S) {
        self.flush();
        self.state = state;
    }

    /// Recolor the current run without closing it.
    pub fn change_state(&mut self, state: S) {
        self.state = state;
    }

    // ─── Advancing ───

    /// Step over the current byte. A no-op at the chunk end.
    pub fn forward(&mut self) {
        if !self.more() {
            return;
        }
        let ch = self.text[self.pos];
        if is_space(ch) {
            if self.look.visible_chars == 0 && is_space_or_tab(ch) {
                self.look.indent += 1;
            }
        } else {
            self.look.visible_chars += 1;
            if !self.state.is_space_equivalent() {
                self.look.ch_prev_non_white = ch;
                self.look.style_prev_non_white = self.state;
            }
        }
        if ch == b'\n' {
            self.line += 1;
        }
        self.pos += 1;
    }

    pub fn forward_n(&mut self, n: usize) {
        for _ in 0..n {
            self.forward();
        }
    }

    pub fn forward_set_state(&mut self, state: S) {
        self.forward();
        self.set_state(state);
    }

    /// Reset per-line counters after a line has been committed.
    pub(crate) fn start_line(&mut self) {
        self.look.visible_chars = 0;
        self.look.indent = 0;
    }

    // ─── Output ───

    fn flush(&mut self) {
        if self.pos <= self.run_start {
            return;
        }
        let len = self.pos - self.run_start;
        match self.runs.last_mut() {
            Some(last) if last.style == self.state && last.end() == self.run_start => {
                last.len += len;
            }
            _ => self.runs.push(StyleRun {
                start: self.run_start,
                len,
                style: self.state,
            }),
        }
        self.run_start = self.pos;
    }

    /// Close the last run and hand back everything emitted.
    pub fn finish(mut self) -> Vec<StyleRun<S>> {
        self.flush();
        self.runs
    }
}
