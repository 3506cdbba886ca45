//! # Lexer Construction and Scanning
//!
//! Token rules in, tokens out.
//!
//! ## Overview
//!
//! A lexer is described as a value: an ordered list of token rules, each a
//! kind paired with a pattern or a verbatim string, plus two sentinel kinds
//! for end-of-input and unrecognized input. [`LexerBuilder::build`]
//! compiles the description into an immutable [`CompiledLexer`], and
//! [`Scanner`] applies it to a character stream:
//!
//! - **Maximal munch**: the longest matching prefix wins.
//! - **Declaration order**: among equal-length matches, the earliest
//!   declared rule wins.
//! - **Trivia**: rules marked with [`LexerBuilder::trivia`] are consumed
//!   without being emitted.
//! - **Totality**: unrecognized input becomes error-kind tokens one
//!   character at a time; scanning never fails and the stream always ends
//!   with exactly one end-kind token.
//!
//! ## Usage
//!
//! ```rust
//! use lexion::LexerBuilder;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     KwIf,
//!     Ident,
//!     Plus,
//!     Ws,
//!     End,
//!     Error,
//! }
//!
//! let lexer = LexerBuilder::new()
//!     .literal(Kind::KwIf, "if")
//!     .token(Kind::Ident, "[A-Za-z][A-Za-z0-9]*")
//!     .literal(Kind::Plus, "+")
//!     .token(Kind::Ws, "[ \\t\\r\\n]+")
//!     .trivia(Kind::Ws)
//!     .end(Kind::End)
//!     .error(Kind::Error)
//!     .build()?;
//!
//! let kinds: Vec<Kind> = lexer.tokenize("if x + y")
//!     .iter()
//!     .map(|t| t.kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     vec![Kind::KwIf, Kind::Ident, Kind::Plus, Kind::Ident, Kind::End]
//! );
//! # Ok::<(), lexion::CompileError>(())
//! ```

pub mod compile;
pub mod description;
pub mod scanner;
pub mod stream;
pub mod token;

pub use compile::{Accept, CompiledLexer};
pub use description::{LexRule, LexerBuilder};
pub use scanner::{Scanner, Tokens};
pub use stream::{CharStream, StrCharStream};
pub use token::{Token, TokenKind};
