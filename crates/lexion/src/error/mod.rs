//! # Error Types
//!
//! Errors and warnings surfaced while building a lexer.
//!
//! ## Overview
//!
//! - [`RegexError`]: a syntax error in a pattern, with the byte offset at
//!   which parsing stopped.
//! - [`CompileError`]: a construction-time failure, either a bad pattern
//!   (wrapping the [`RegexError`] with the rule it belongs to) or a
//!   misconfigured builder.
//! - [`CompileWarning`]: non-fatal findings reported alongside a
//!   successfully built lexer.
//!
//! Construction is the only fallible stage. Scanning never fails: malformed
//! input comes back as error-kind tokens, not as `Err` values.
//!
//! ## Diagnostics Support
//!
//! When the `diagnostics` feature is enabled, errors integrate with
//! [`miette`] for rich error reporting.

use thiserror::Error;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Pattern syntax error with the byte offset where it was detected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
#[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::regex_syntax)))]
#[error("{kind} at offset {position}")]
pub struct RegexError {
    /// Byte offset into the pattern string
    pub position: usize,
    #[source]
    pub kind: RegexErrorKind,
}

impl RegexError {
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub const fn kind(&self) -> &RegexErrorKind {
        &self.kind
    }
}

/// Kinds of pattern syntax errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum RegexErrorKind {
    #[error("unexpected end of pattern")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::regex::unexpected_end)))]
    UnexpectedEnd,

    #[error("unexpected character '{char}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::regex::unexpected_char)))]
    UnexpectedChar { char: char },

    #[error("invalid escape sequence '{escape}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::regex::invalid_escape)))]
    InvalidEscape { escape: String },

    #[error("'{value:#x}' is not a valid code point")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::regex::invalid_code_point)))]
    InvalidCodePoint { value: u32 },

    #[error("class range '{start}-{end}' is out of order")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::regex::invalid_class_range)))]
    InvalidClassRange { start: char, end: char },

    #[error("invalid repetition bounds: {reason}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::regex::invalid_repeat)))]
    InvalidRepeat { reason: String },

    #[error("unknown shortcut '{{{name}}}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::regex::unknown_shortcut)))]
    UnknownShortcut { name: String },
}

/// Lexer construction failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum CompileError {
    #[error("invalid pattern for rule {index}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::compile::pattern)))]
    Pattern {
        /// Declaration index of the offending rule
        index: usize,
        #[source]
        source: RegexError,
    },

    #[error("invalid pattern for shortcut '{name}'")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::compile::shortcut)))]
    Shortcut {
        name: String,
        #[source]
        source: RegexError,
    },

    #[error("no end-of-input token kind was declared")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::compile::missing_end)))]
    MissingEndKind,

    #[error("no error token kind was declared")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::compile::missing_error)))]
    MissingErrorKind,

    #[error("the end-of-input token kind was declared more than once")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::compile::duplicate_end)))]
    DuplicateEndKind,

    #[error("the error token kind was declared more than once")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(lexion::compile::duplicate_error)))]
    DuplicateErrorKind,
}

/// Non-fatal findings reported by a successful build
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileWarning {
    /// The rule's pattern matches the empty string. Empty matches never
    /// produce a token and never consume input, so the rule only fires on
    /// matches of length one or more.
    #[error("pattern for rule {index} matches the empty string")]
    EmptyMatch { index: usize },
}
