//! Lexer compilation pipeline
//!
//! Pattern sources are parsed, desugared, compiled into one NFA, then
//! determinized and minimized. The accept action of every DFA state is
//! resolved here once; the scanner only reads tables.

use crate::automata::{Dfa, Nfa, minimize};
use crate::error::{CompileError, CompileWarning};
use crate::lexer::description::{LexRule, RuleSource};
use crate::lexer::scanner::Scanner;
use crate::lexer::stream::{CharStream, StrCharStream};
use crate::lexer::token::{Token, TokenKind};
use crate::regex::{self, CoreExpr, ShortcutTable};
use compact_str::CompactString;

/// What the scanner does when a state accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept<K: TokenKind> {
    /// Emit a token of this kind
    Emit(K),
    /// Consume the match without emitting anything
    Skip,
}

/// An immutable, shareable compiled lexer.
///
/// Construction happens once through [`LexerBuilder`]; afterwards the
/// tables never change, so one `CompiledLexer` may back any number of
/// scanners, on any number of threads.
///
/// [`LexerBuilder`]: crate::lexer::LexerBuilder
#[derive(Debug, Clone)]
pub struct CompiledLexer<K: TokenKind> {
    pub(crate) dfa: Dfa,
    /// Accept action per DFA state, indexed by state id
    pub(crate) accepts: Vec<Option<Accept<K>>>,
    pub(crate) end_kind: K,
    pub(crate) error_kind: K,
    warnings: Vec<CompileWarning>,
}

impl<K: TokenKind> CompiledLexer<K> {
    /// Non-fatal findings from construction
    #[must_use]
    pub fn warnings(&self) -> &[CompileWarning] {
        &self.warnings
    }

    /// The minimized automaton driving this lexer
    #[must_use]
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    #[must_use]
    pub const fn end_kind(&self) -> K {
        self.end_kind
    }

    #[must_use]
    pub const fn error_kind(&self) -> K {
        self.error_kind
    }

    /// A scanner over an arbitrary character stream
    #[must_use]
    pub fn scanner<S: CharStream>(&self, stream: S) -> Scanner<'_, K, S> {
        Scanner::new(self, stream)
    }

    /// A scanner over an in-memory string
    #[must_use]
    pub fn scan_str(&self, input: &str) -> Scanner<'_, K, StrCharStream> {
        self.scanner(StrCharStream::new(input))
    }

    /// Tokenize a string eagerly. The result always ends with exactly one
    /// end-of-input token.
    #[must_use]
    pub fn tokenize(&self, input: &str) -> Vec<Token<K>> {
        self.scan_str(input).tokens().collect()
    }
}

/// Run the full pipeline for a rule set. Called by
/// [`LexerBuilder::build`](crate::lexer::LexerBuilder::build) after the
/// sentinel checks.
pub(crate) fn compile<K: TokenKind>(
    rules: &[LexRule<K>],
    shortcuts: &[(CompactString, CompactString)],
    end_kind: K,
    error_kind: K,
) -> Result<CompiledLexer<K>, CompileError> {
    compile_with(rules, shortcuts, end_kind, error_kind, true)
}

fn compile_with<K: TokenKind>(
    rules: &[LexRule<K>],
    shortcuts: &[(CompactString, CompactString)],
    end_kind: K,
    error_kind: K,
    run_minimize: bool,
) -> Result<CompiledLexer<K>, CompileError> {
    let mut table = ShortcutTable::new();
    for (name, pattern) in shortcuts {
        table
            .define(name, pattern)
            .map_err(|source| CompileError::Shortcut {
                name: name.to_string(),
                source,
            })?;
    }

    let mut cores: Vec<CoreExpr> = Vec::with_capacity(rules.len());
    for (index, rule) in rules.iter().enumerate() {
        let ast = match &rule.source {
            RuleSource::Regex(pattern) => regex::parse_with(pattern, &table),
            RuleSource::Literal(text) => regex::parse(&regex::escape_literal(text)),
        }
        .map_err(|source| CompileError::Pattern { index, source })?;
        cores.push(regex::desugar(&ast));
    }

    let nfa = Nfa::compile(&cores);
    let warnings = empty_match_warnings(&nfa);

    let dfa = Dfa::determinize(&nfa);
    let dfa = if run_minimize { minimize(&dfa) } else { dfa };

    let accepts = dfa
        .states
        .iter()
        .map(|state| {
            state.accept.map(|token| {
                if rules[token].ignore {
                    Accept::Skip
                } else {
                    Accept::Emit(rules[token].kind)
                }
            })
        })
        .collect();

    Ok(CompiledLexer {
        dfa,
        accepts,
        end_kind,
        error_kind,
        warnings,
    })
}

/// Rules whose accepting state sits in the epsilon closure of the initial
/// state match the empty string. Such matches are never recorded at scan
/// time, so the rule is reported rather than silently half-working.
fn empty_match_warnings(nfa: &Nfa) -> Vec<CompileWarning> {
    let mut indices: Vec<usize> = nfa
        .epsilon_closure(&[nfa.initial])
        .iter()
        .filter_map(|state| nfa.states[state.index()].accept)
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
        .into_iter()
        .map(|index| CompileWarning::EmptyMatch { index })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::LexerBuilder;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestKind {
        KwIf,
        Ident,
        Number,
        Plus,
        Ws,
        End,
        Error,
    }

    fn test_rules() -> Vec<LexRule<TestKind>> {
        vec![
            LexRule {
                kind: TestKind::KwIf,
                source: RuleSource::Literal("if".into()),
                ignore: false,
            },
            LexRule {
                kind: TestKind::Ident,
                source: RuleSource::Regex("[A-Za-z][A-Za-z0-9]*".into()),
                ignore: false,
            },
            LexRule {
                kind: TestKind::Number,
                source: RuleSource::Regex("[0-9]+".into()),
                ignore: false,
            },
            LexRule {
                kind: TestKind::Plus,
                source: RuleSource::Literal("+".into()),
                ignore: false,
            },
            LexRule {
                kind: TestKind::Ws,
                source: RuleSource::Regex("[ \\t\\r\\n]+".into()),
                ignore: true,
            },
        ]
    }

    #[test]
    fn test_minimization_preserves_token_stream() {
        let rules = test_rules();
        let minimized =
            compile_with(&rules, &[], TestKind::End, TestKind::Error, true).unwrap();
        let raw = compile_with(&rules, &[], TestKind::End, TestKind::Error, false).unwrap();

        assert!(minimized.dfa.state_count() <= raw.dfa.state_count());

        for input in [
            "a + b",
            "if x",
            "ifif",
            "@!",
            "",
            "x1 + 22 + iffy",
            "if+if",
            "9lives",
        ] {
            let a = minimized.tokenize(input);
            let b = raw.tokenize(input);
            assert_eq!(a, b, "streams diverge on {input:?}");
        }
    }

    #[test]
    fn test_empty_match_warning() {
        let lexer = LexerBuilder::new()
            .token(TestKind::Ident, "[a-z]*")
            .end(TestKind::End)
            .error(TestKind::Error)
            .build()
            .unwrap();
        assert_eq!(
            lexer.warnings(),
            &[CompileWarning::EmptyMatch { index: 0 }]
        );
    }

    #[test]
    fn test_no_warning_for_nonempty_patterns() {
        let lexer = LexerBuilder::new()
            .token(TestKind::Ident, "[a-z]+")
            .end(TestKind::End)
            .error(TestKind::Error)
            .build()
            .unwrap();
        assert!(lexer.warnings().is_empty());
    }

    #[test]
    fn test_accept_actions_resolved_once() {
        let rules = test_rules();
        let lexer = compile(&rules, &[], TestKind::End, TestKind::Error).unwrap();

        let mut emitted = 0;
        let mut skipped = 0;
        for action in lexer.accepts.iter().flatten() {
            match action {
                Accept::Emit(_) => emitted += 1,
                Accept::Skip => skipped += 1,
            }
        }
        assert!(emitted > 0);
        assert!(skipped > 0, "the trivia rule must resolve to Skip");
    }

    #[test]
    fn test_disjoint_outgoing_intervals() {
        let rules = test_rules();
        let lexer = compile(&rules, &[], TestKind::End, TestKind::Error).unwrap();
        for (index, state) in lexer.dfa().states.iter().enumerate() {
            for (i, (a, _)) in state.transitions.iter().enumerate() {
                for (b, _) in &state.transitions[i + 1..] {
                    assert_eq!(a.intersection(b), None, "state {index}: {a} and {b}");
                }
            }
        }
    }

    #[test]
    fn test_shortcuts_compile() {
        let lexer = LexerBuilder::new()
            .shortcut("alpha", "[A-Za-z]")
            .shortcut("alnum", "{alpha}|[0-9]")
            .token(TestKind::Ident, "{alpha}{alnum}*")
            .end(TestKind::End)
            .error(TestKind::Error)
            .build()
            .unwrap();

        let kinds: Vec<_> = lexer.tokenize("a9z").iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TestKind::Ident, TestKind::End]);
    }

    #[test]
    fn test_bad_shortcut_pattern() {
        let result = LexerBuilder::<TestKind>::new()
            .shortcut("broken", "[z-a]")
            .token(TestKind::Ident, "{broken}")
            .end(TestKind::End)
            .error(TestKind::Error)
            .build();
        assert!(matches!(
            result,
            Err(CompileError::Shortcut { ref name, .. }) if name == "broken"
        ));
    }
}
