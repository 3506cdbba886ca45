//! # Lexion
//!
//! Table-driven lexer construction: token rules described as values,
//! compiled through the classic automata pipeline, scanned with maximal
//! munch.
//!
//! ## Overview
//!
//! - **Patterns**: a compact regular-expression surface syntax with
//!   character classes, bounded repetition, code-point escapes, and named
//!   shortcuts, plus verbatim string rules.
//! - **Compilation**: patterns are desugared to a five-operator core,
//!   compiled into one nondeterministic automaton (Thompson construction),
//!   determinized over an interval alphabet, and minimized while keeping
//!   each rule's identity intact.
//! - **Scanning**: the resulting tables drive a total scanner with
//!   maximal-munch and declaration-order semantics, trivia suppression,
//!   single-character error recovery, and precise source positions.
//!
//! Construction is pure and single-threaded; the compiled tables are
//! immutable and freely shareable across threads. Each scanner owns only
//! its stream cursor.
//!
//! ## Quick Start
//!
//! ```rust
//! use lexion::LexerBuilder;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     Ident,
//!     Number,
//!     Ws,
//!     End,
//!     Error,
//! }
//!
//! let lexer = LexerBuilder::new()
//!     .shortcut("digit", "[0-9]")
//!     .token(Kind::Ident, "[A-Za-z_][A-Za-z_0-9]*")
//!     .token(Kind::Number, "{digit}+")
//!     .token(Kind::Ws, "[ \\t\\r\\n]+")
//!     .trivia(Kind::Ws)
//!     .end(Kind::End)
//!     .error(Kind::Error)
//!     .build()?;
//!
//! for token in lexer.tokenize("x1 42") {
//!     println!("{:?} {:?} at {}", token.kind, token.text, token.span);
//! }
//! # Ok::<(), lexion::CompileError>(())
//! ```
//!
//! ## Modules
//!
//! - [`interval`] - character interval algebra
//! - [`regex`] - pattern syntax, parsing, and the operator core
//! - [`automata`] - NFA, determinization, minimization
//! - [`lexer`] - builder, compiled tables, scanner runtime
//! - [`text`] - positions, spans, line indexing
//! - [`error`] - construction errors and warnings

pub mod automata;
pub mod error;
pub mod interval;
pub mod lexer;
pub mod regex;
pub mod text;

// Re-export commonly used types
pub use error::{CompileError, CompileWarning, RegexError, RegexErrorKind};
pub use lexer::{
    Accept, CharStream, CompiledLexer, LexerBuilder, Scanner, StrCharStream, Token, TokenKind,
};
pub use text::{SourcePos, SourceSpan, TextSize};
