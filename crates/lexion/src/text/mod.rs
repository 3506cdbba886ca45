//! Text position utilities
//!
//! This module provides the position types carried by tokens and errors:
//! byte offsets, line/column positions, and spans. It also provides a
//! binary-search line index for converting arbitrary byte offsets into
//! line/column positions after the fact.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text size in bytes (UTF-8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TextSize(u32);

impl TextSize {
    #[must_use]
    pub const fn from(offset: u32) -> Self {
        Self(offset)
    }

    #[must_use]
    pub const fn into(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }
}

impl std::ops::Add<Self> for TextSize {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign<Self> for TextSize {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl From<TextSize> for u32 {
    fn from(size: TextSize) -> Self {
        size.0
    }
}

impl fmt::Display for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position in source text: byte offset plus one-based line and column.
///
/// Lines are separated by `\n`; the column counts characters, not bytes.
/// The position before any input is line 1, column 1, offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SourcePos {
    /// Absolute byte offset from the start of the input
    pub offset: TextSize,
    /// One-based line number
    pub line: u32,
    /// One-based column number (in characters)
    pub column: u32,
}

impl SourcePos {
    /// Create a new source position
    #[must_use]
    pub const fn new(offset: TextSize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The position at the start of any input
    #[must_use]
    pub const fn start() -> Self {
        Self::new(TextSize::zero(), 1, 1)
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A contiguous span of source text between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SourceSpan {
    start: SourcePos,
    end: SourcePos,
}

impl SourceSpan {
    #[must_use]
    pub const fn new(start: SourcePos, end: SourcePos) -> Self {
        Self { start, end }
    }

    /// A zero-length span at the given position
    #[must_use]
    pub const fn empty(pos: SourcePos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[must_use]
    pub const fn start(&self) -> SourcePos {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> SourcePos {
        self.end
    }

    /// Length of the span in bytes
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.offset.into() - self.start.offset.into()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Line index for converting byte offsets to source positions
///
/// Caches line start offsets for O(log n) binary search lookups. Useful when
/// positions are needed for offsets that were not produced by a scanner,
/// e.g. when rendering diagnostics over the original input.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offsets of line starts (the first line starts at 0)
    line_starts: Vec<TextSize>,
    text_len: TextSize,
}

impl LineIndex {
    /// Build a line index by scanning the text once.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lexion::text::{LineIndex, TextSize};
    ///
    /// let text = "line 1\nline 2\nline 3";
    /// let index = LineIndex::new(text);
    /// let pos = index.pos(TextSize::from(10));
    /// assert_eq!(pos.line, 2);
    /// ```
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::zero()];

        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    let offset = u32::try_from(i).unwrap_or(u32::MAX).saturating_add(1);
                    line_starts.push(TextSize::from(offset));
                    i += 1;
                }
                b'\r' if i + 1 < bytes.len() && bytes[i + 1] == b'\n' => {
                    let offset = u32::try_from(i).unwrap_or(u32::MAX).saturating_add(2);
                    line_starts.push(TextSize::from(offset));
                    i += 2;
                }
                _ => {
                    i += 1;
                }
            }
        }

        Self {
            line_starts,
            text_len: TextSize::from(u32::try_from(text.len()).unwrap_or(u32::MAX)),
        }
    }

    /// Convert a byte offset to a source position.
    ///
    /// The column is reported in bytes from the line start here, which
    /// coincides with the character column for ASCII input.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is greater than the text length.
    #[must_use]
    pub fn pos(&self, offset: TextSize) -> SourcePos {
        assert!(
            offset <= self.text_len,
            "offset {offset} exceeds text length {}",
            self.text_len
        );

        let line = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        let column = offset.into().saturating_sub(line_start.into());

        SourcePos::new(
            offset,
            u32::try_from(line).unwrap_or(u32::MAX).saturating_add(1),
            column.saturating_add(1),
        )
    }

    /// Total number of lines in the indexed text
    #[must_use]
    pub fn line_count(&self) -> u32 {
        u32::try_from(self.line_starts.len()).unwrap_or(u32::MAX)
    }

    /// Byte offset of the start of a line (one-based), or `None` if out of
    /// bounds
    #[must_use]
    pub fn line_start(&self, line: u32) -> Option<TextSize> {
        self.line_starts
            .get(line.checked_sub(1)? as usize)
            .copied()
    }
}
