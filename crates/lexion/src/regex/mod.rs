//! # Pattern Surface Syntax
//!
//! Textual regular expressions parsed into a surface tree, then lowered to
//! the five-operator core consumed by the automaton builders.
//!
//! ## Syntax
//!
//! | Syntax | Meaning |
//! |---|---|
//! | `abc` | literal concatenation |
//! | `a\|b` | alternation |
//! | `a*`, `a+`, `a?` | repetition |
//! | `a{n}`, `a{n,}`, `a{n,m}` | bounded repetition |
//! | `.` | any character except newline |
//! | `[abc]`, `[a-z]`, `[^...]` | character class / negation |
//! | `\n \r \t \0 \\ \' \"` | escapes |
//! | `\xHH`, `\uHHHH` | code point escapes |
//! | `(...)` | grouping |
//! | `{name}` | shortcut reference |

pub mod ast;
pub mod core;
pub mod parser;

pub use ast::Ast;
pub use core::{CoreExpr, desugar};
pub use parser::{ShortcutTable, escape_literal, parse, parse_with};
