//! Lexer description builder
//!
//! Token rules are collected in declaration order; the index of a rule is
//! its priority, and earlier rules win every tie. The end-of-input and
//! error sentinels must each be declared exactly once before `build`.

use crate::error::CompileError;
use crate::lexer::compile::{self, CompiledLexer};
use crate::lexer::token::TokenKind;
use compact_str::CompactString;
use hashbrown::HashSet;
use smallvec::SmallVec;

/// One token rule: a kind paired with its pattern source
#[derive(Debug, Clone)]
pub struct LexRule<K: TokenKind> {
    pub kind: K,
    pub(crate) source: RuleSource,
    /// Matches are consumed but never emitted
    pub ignore: bool,
}

#[derive(Debug, Clone)]
pub(crate) enum RuleSource {
    /// A pattern in the surface syntax
    Regex(CompactString),
    /// A plain string matched verbatim
    Literal(CompactString),
}

/// Builder for a [`CompiledLexer`]
///
/// # Example
///
/// ```rust
/// use lexion::LexerBuilder;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Kind {
///     Ident,
///     Number,
///     Ws,
///     End,
///     Error,
/// }
///
/// let lexer = LexerBuilder::new()
///     .token(Kind::Ident, "[A-Za-z][A-Za-z0-9]*")
///     .token(Kind::Number, "[0-9]+")
///     .token(Kind::Ws, "[ \\t\\r\\n]+")
///     .trivia(Kind::Ws)
///     .end(Kind::End)
///     .error(Kind::Error)
///     .build()?;
///
/// let tokens = lexer.tokenize("abc 42");
/// assert_eq!(tokens.len(), 3); // Ident, Number, End
/// # Ok::<(), lexion::CompileError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LexerBuilder<K: TokenKind> {
    rules: SmallVec<[LexRule<K>; 16]>,
    shortcuts: Vec<(CompactString, CompactString)>,
    trivia_kinds: HashSet<K, ahash::RandomState>,
    end_kind: Option<K>,
    error_kind: Option<K>,
    duplicate_end: bool,
    duplicate_error: bool,
}

impl<K: TokenKind> Default for LexerBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TokenKind> LexerBuilder<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: SmallVec::new(),
            shortcuts: Vec::new(),
            trivia_kinds: HashSet::with_hasher(ahash::RandomState::new()),
            end_kind: None,
            error_kind: None,
            duplicate_end: false,
            duplicate_error: false,
        }
    }

    /// Declare a token matched by a pattern
    #[must_use]
    pub fn token(mut self, kind: K, pattern: &str) -> Self {
        self.rules.push(LexRule {
            kind,
            source: RuleSource::Regex(CompactString::new(pattern)),
            ignore: false,
        });
        self
    }

    /// Declare a token matched verbatim. Metacharacters in `text` carry no
    /// special meaning.
    #[must_use]
    pub fn literal(mut self, kind: K, text: &str) -> Self {
        self.rules.push(LexRule {
            kind,
            source: RuleSource::Literal(CompactString::new(text)),
            ignore: false,
        });
        self
    }

    /// Mark a kind as trivia: its matches are consumed without being
    /// emitted. Applies to every rule of that kind, declared before or
    /// after this call.
    #[must_use]
    pub fn trivia(mut self, kind: K) -> Self {
        self.trivia_kinds.insert(kind);
        self
    }

    /// Define a named sub-pattern usable as `{name}` in later rules and
    /// shortcut definitions
    #[must_use]
    pub fn shortcut(mut self, name: &str, pattern: &str) -> Self {
        self.shortcuts
            .push((CompactString::new(name), CompactString::new(pattern)));
        self
    }

    /// Declare the kind emitted once at end of input
    #[must_use]
    pub fn end(mut self, kind: K) -> Self {
        if self.end_kind.is_some() {
            self.duplicate_end = true;
        }
        self.end_kind = Some(kind);
        self
    }

    /// Declare the kind emitted for input no rule matches
    #[must_use]
    pub fn error(mut self, kind: K) -> Self {
        if self.error_kind.is_some() {
            self.duplicate_error = true;
        }
        self.error_kind = Some(kind);
        self
    }

    /// Compile the declared rules into an immutable lexer.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] when a pattern does not parse or the
    /// sentinel kinds are missing or declared twice.
    pub fn build(self) -> Result<CompiledLexer<K>, CompileError> {
        if self.duplicate_end {
            return Err(CompileError::DuplicateEndKind);
        }
        if self.duplicate_error {
            return Err(CompileError::DuplicateErrorKind);
        }
        let end_kind = self.end_kind.ok_or(CompileError::MissingEndKind)?;
        let error_kind = self.error_kind.ok_or(CompileError::MissingErrorKind)?;

        let mut rules = self.rules;
        for rule in &mut rules {
            rule.ignore = self.trivia_kinds.contains(&rule.kind);
        }

        compile::compile(&rules, &self.shortcuts, end_kind, error_kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestKind {
        Ident,
        Ws,
        End,
        Error,
    }

    #[test]
    fn test_builder_missing_end() {
        let result = LexerBuilder::new()
            .token(TestKind::Ident, "[a-z]+")
            .error(TestKind::Error)
            .build();
        assert!(matches!(result, Err(CompileError::MissingEndKind)));
    }

    #[test]
    fn test_builder_missing_error() {
        let result = LexerBuilder::new()
            .token(TestKind::Ident, "[a-z]+")
            .end(TestKind::End)
            .build();
        assert!(matches!(result, Err(CompileError::MissingErrorKind)));
    }

    #[test]
    fn test_builder_duplicate_end() {
        let result = LexerBuilder::new()
            .token(TestKind::Ident, "[a-z]+")
            .end(TestKind::End)
            .end(TestKind::End)
            .error(TestKind::Error)
            .build();
        assert!(matches!(result, Err(CompileError::DuplicateEndKind)));
    }

    #[test]
    fn test_builder_duplicate_error() {
        let result = LexerBuilder::new()
            .token(TestKind::Ident, "[a-z]+")
            .end(TestKind::End)
            .error(TestKind::Error)
            .error(TestKind::Error)
            .build();
        assert!(matches!(result, Err(CompileError::DuplicateErrorKind)));
    }

    #[test]
    fn test_trivia_applies_regardless_of_declaration_order() {
        let lexer = LexerBuilder::new()
            .trivia(TestKind::Ws)
            .token(TestKind::Ident, "[a-z]+")
            .token(TestKind::Ws, " +")
            .end(TestKind::End)
            .error(TestKind::Error)
            .build()
            .unwrap();

        let kinds: Vec<_> = lexer.tokenize("a b").iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TestKind::Ident, TestKind::Ident, TestKind::End]);
    }

    #[test]
    fn test_bad_pattern_reports_rule_index() {
        let result = LexerBuilder::new()
            .token(TestKind::Ident, "[a-z]+")
            .token(TestKind::Ws, "[z-a]")
            .end(TestKind::End)
            .error(TestKind::Error)
            .build();
        assert!(matches!(result, Err(CompileError::Pattern { index: 1, .. })));
    }
}
