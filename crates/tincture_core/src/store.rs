//! Line-state persistence and line bookkeeping.

use memchr::memchr_iter;

/// Persisted per-line integers, one per line.
///
/// Implementations must keep the previous line's value readable until the
/// scan that rewrites it has finished that line.
pub trait LineStateStore {
    /// Value for `line`; lines never written read as 0.
    fn get(&self, line: usize) -> u32;

    fn set(&mut self, line: usize, value: u32);
}

impl LineStateStore for Vec<u32> {
    fn get(&self, line: usize) -> u32 {
        self.as_slice().get(line).copied().unwrap_or(0)
    }

    fn set(&mut self, line: usize, value: u32) {
        if line >= self.len() {
            self.resize(line + 1, 0);
        }
        self[line] = value;
    }
}

/// Start offsets of every line in a buffer.
///
/// A buffer always has at least one line. A trailing `\n` opens a final,
/// empty line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &[u8]) -> Self {
        let mut starts = Vec::with_capacity(text.len() / 32 + 1);
        starts.push(0);
        starts.extend(memchr_iter(b'\n', text).map(|pos| pos + 1));
        Self {
            starts,
            len: text.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.starts.get(line).copied()
    }

    /// End of `line`, including its terminator.
    pub fn line_end(&self, line: usize) -> Option<usize> {
        if line >= self.starts.len() {
            return None;
        }
        Some(self.starts.get(line + 1).copied().unwrap_or(self.len))
    }
}
