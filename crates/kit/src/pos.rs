use core::fmt;

use crate::input::NL;

/// A line and column combination.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    line: usize,
    column: usize,
}

impl LineCol {
    pub(crate) const EMPTY: Self = Self::new(0, 0);

    pub(crate) const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// One-based line number.
    pub fn line(&self) -> usize {
        self.line + 1
    }

    /// One-based column, counted in bytes.
    pub fn column(&self) -> usize {
        self.column + 1
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line(), self.column())
    }
}

/// Get the position of the byte at `at` in `data`.
///
/// An offset past the end of data is clamped to the end.
pub fn pos_from(data: &[u8], at: usize) -> LineCol {
    let d = data.get(..at).unwrap_or(data);

    if d.is_empty() {
        return LineCol::EMPTY;
    }

    let line = memchr::memchr_iter(NL, d).count();
    let start = memchr::memrchr(NL, d).map_or(0, |n| n + 1);
    LineCol::new(line, d.len() - start)
}
