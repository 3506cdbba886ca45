use crate::text::SourceSpan;
use compact_str::CompactString;
use std::fmt;
use std::hash::Hash;

/// The caller's token enumeration.
///
/// Any copyable, hashable, comparable type qualifies; a fieldless `enum`
/// deriving `Debug, Clone, Copy, PartialEq, Eq, Hash` is the common case.
pub trait TokenKind: Copy + Eq + Hash + fmt::Debug {}

impl<K: Copy + Eq + Hash + fmt::Debug> TokenKind for K {}

/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<K: TokenKind> {
    pub kind: K,
    /// The matched text. Empty only for end-of-input tokens.
    pub text: CompactString,
    pub span: SourceSpan,
}

impl<K: TokenKind> Token<K> {
    #[must_use]
    pub fn new(kind: K, text: impl Into<CompactString>, span: SourceSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Length of the matched text in characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
