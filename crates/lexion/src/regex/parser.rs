//! Pattern parser
//!
//! Recursive descent over the surface syntax, one precedence level per
//! function: alternation, then concatenation, then postfix repetition, then
//! atoms. Errors carry the byte offset at which parsing stopped.

use crate::error::{RegexError, RegexErrorKind};
use crate::interval::Interval;
use crate::regex::ast::Ast;
use compact_str::CompactString;
use hashbrown::HashMap;
use smallvec::SmallVec;

/// Characters that carry meaning in the pattern syntax and therefore need
/// escaping to be matched literally
const METACHARS: &[char] = &[
    '|', '*', '+', '?', '(', ')', '[', ']', '{', '}', '.', '\\',
];

/// Named sub-patterns resolvable with `{name}` syntax.
///
/// Definitions are parsed eagerly, so a shortcut may refer to shortcuts
/// defined before it.
#[derive(Debug, Clone, Default)]
pub struct ShortcutTable {
    entries: HashMap<CompactString, Ast, ahash::RandomState>,
}

impl ShortcutTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::with_hasher(ahash::RandomState::new()),
        }
    }

    /// Define a shortcut from pattern source.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern does not parse.
    pub fn define(&mut self, name: &str, pattern: &str) -> Result<(), RegexError> {
        let ast = parse_with(pattern, self)?;
        self.entries.insert(CompactString::new(name), ast);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Ast> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a pattern with no shortcuts in scope.
///
/// # Errors
///
/// Returns a [`RegexError`] describing the first syntax error.
pub fn parse(pattern: &str) -> Result<Ast, RegexError> {
    parse_with(pattern, &ShortcutTable::default())
}

/// Parse a pattern, resolving `{name}` references against `shortcuts`.
///
/// # Errors
///
/// Returns a [`RegexError`] describing the first syntax error.
pub fn parse_with(pattern: &str, shortcuts: &ShortcutTable) -> Result<Ast, RegexError> {
    let mut parser = PatternParser::new(pattern, shortcuts);
    let ast = parser.parse_alt()?;
    match parser.peek() {
        // A stray ')' is the only way a well-formed subexpression stops early
        Some(c) => Err(parser.error(RegexErrorKind::UnexpectedChar { char: c })),
        None => Ok(ast),
    }
}

/// Escape every metacharacter in `text` so the result parses as the literal
/// character sequence. This is how plain-string token declarations are
/// routed through the pattern parser.
#[must_use]
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if METACHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

struct PatternParser<'a> {
    /// `(byte offset, char)` pairs of the pattern
    chars: Vec<(usize, char)>,
    pos: usize,
    len_bytes: usize,
    shortcuts: &'a ShortcutTable,
}

impl<'a> PatternParser<'a> {
    fn new(pattern: &str, shortcuts: &'a ShortcutTable) -> Self {
        Self {
            chars: pattern.char_indices().collect(),
            pos: 0,
            len_bytes: pattern.len(),
            shortcuts,
        }
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).map(|(_, c)| *c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn byte_pos(&self) -> usize {
        self.chars
            .get(self.pos)
            .map_or(self.len_bytes, |(offset, _)| *offset)
    }

    fn error(&self, kind: RegexErrorKind) -> RegexError {
        RegexError {
            position: self.byte_pos(),
            kind,
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), RegexError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(RegexErrorKind::UnexpectedChar { char: c })),
            None => Err(self.error(RegexErrorKind::UnexpectedEnd)),
        }
    }

    fn parse_alt(&mut self) -> Result<Ast, RegexError> {
        let mut node = self.parse_concat()?;
        while self.peek() == Some('|') {
            self.bump();
            let rhs = self.parse_concat()?;
            node = Ast::Alt(node.boxed(), rhs.boxed());
        }
        Ok(node)
    }

    fn parse_concat(&mut self) -> Result<Ast, RegexError> {
        let mut node = self.parse_rep()?;
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            let rhs = self.parse_rep()?;
            node = Ast::Concat(node.boxed(), rhs.boxed());
        }
        Ok(node)
    }

    fn parse_rep(&mut self) -> Result<Ast, RegexError> {
        let mut node = self.parse_atom()?;
        loop {
            match self.peek() {
                Some('*') => {
                    self.bump();
                    node = Ast::Star(node.boxed());
                }
                Some('+') => {
                    self.bump();
                    node = Ast::Plus(node.boxed());
                }
                Some('?') => {
                    self.bump();
                    node = Ast::Opt(node.boxed());
                }
                // `{` opens bounded repetition only when a digit follows;
                // otherwise it is a shortcut reference handled by parse_atom
                Some('{') if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => {
                    self.bump();
                    let (min, max) = self.parse_repeat_bounds()?;
                    node = Ast::Repeat {
                        node: node.boxed(),
                        min,
                        max,
                    };
                }
                _ => break,
            }
        }
        Ok(node)
    }

    fn parse_atom(&mut self) -> Result<Ast, RegexError> {
        match self.peek() {
            None => Err(self.error(RegexErrorKind::UnexpectedEnd)),
            Some('(') => {
                self.bump();
                let inner = self.parse_alt()?;
                self.expect(')')?;
                Ok(Ast::Group(inner.boxed()))
            }
            Some('.') => {
                self.bump();
                Ok(Ast::AnyChar)
            }
            Some('[') => self.parse_class(),
            Some('{') => self.parse_shortcut(),
            Some('\\') => {
                self.bump();
                let c = self.parse_escape()?;
                Ok(Ast::Literal(c))
            }
            Some(c @ ('|' | ')' | '*' | '+' | '?' | ']' | '}')) => {
                Err(self.error(RegexErrorKind::UnexpectedChar { char: c }))
            }
            Some(c) => {
                self.bump();
                Ok(Ast::Literal(c))
            }
        }
    }

    /// Called with the leading `{` already consumed and `min` digits pending
    fn parse_repeat_bounds(&mut self) -> Result<(u32, Option<u32>), RegexError> {
        let min = self.parse_number()?;
        match self.peek() {
            Some('}') => {
                self.bump();
                Ok((min, Some(min)))
            }
            Some(',') => {
                self.bump();
                match self.peek() {
                    Some('}') => {
                        self.bump();
                        Ok((min, None))
                    }
                    Some(c) if c.is_ascii_digit() => {
                        let max = self.parse_number()?;
                        self.expect('}')?;
                        if max < min {
                            return Err(self.error(RegexErrorKind::InvalidRepeat {
                                reason: format!("minimum {min} exceeds maximum {max}"),
                            }));
                        }
                        Ok((min, Some(max)))
                    }
                    Some(c) => Err(self.error(RegexErrorKind::UnexpectedChar { char: c })),
                    None => Err(self.error(RegexErrorKind::UnexpectedEnd)),
                }
            }
            Some(c) => Err(self.error(RegexErrorKind::UnexpectedChar { char: c })),
            None => Err(self.error(RegexErrorKind::UnexpectedEnd)),
        }
    }

    fn parse_number(&mut self) -> Result<u32, RegexError> {
        let mut value: u32 = 0;
        let mut any = false;
        while let Some(c) = self.peek() {
            let Some(digit) = c.to_digit(10) else { break };
            self.bump();
            any = true;
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| {
                    self.error(RegexErrorKind::InvalidRepeat {
                        reason: "bound does not fit in 32 bits".to_string(),
                    })
                })?;
        }
        if any {
            Ok(value)
        } else {
            Err(self.error(RegexErrorKind::UnexpectedEnd))
        }
    }

    /// Called with the leading `{` pending and a non-digit following it
    fn parse_shortcut(&mut self) -> Result<Ast, RegexError> {
        self.expect('{')?;
        match self.peek() {
            Some(c) if c.is_alphabetic() || c == '_' => {}
            Some(c) => return Err(self.error(RegexErrorKind::UnexpectedChar { char: c })),
            None => return Err(self.error(RegexErrorKind::UnexpectedEnd)),
        }
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.bump();
                name.push(c);
            } else {
                break;
            }
        }
        self.expect('}')?;
        match self.shortcuts.get(&name) {
            Some(ast) => Ok(Ast::Group(ast.clone().boxed())),
            None => Err(self.error(RegexErrorKind::UnknownShortcut { name })),
        }
    }

    fn parse_class(&mut self) -> Result<Ast, RegexError> {
        self.expect('[')?;
        let negated = self.peek() == Some('^');
        if negated {
            self.bump();
        }

        let mut atoms: SmallVec<[Interval; 4]> = SmallVec::new();
        loop {
            match self.peek() {
                None => return Err(self.error(RegexErrorKind::UnexpectedEnd)),
                Some(']') => break,
                Some(_) => {
                    let start = self.parse_class_char()?;
                    // `-` is a range operator unless it sits last in the class
                    if self.peek() == Some('-') && !matches!(self.peek_at(1), Some(']') | None) {
                        self.bump();
                        let end = self.parse_class_char()?;
                        if end < start {
                            return Err(
                                self.error(RegexErrorKind::InvalidClassRange { start, end })
                            );
                        }
                        atoms.push(Interval::closed(start, end));
                    } else {
                        atoms.push(Interval::single(start));
                    }
                }
            }
        }
        self.expect(']')?;
        Ok(Ast::Class { atoms, negated })
    }

    fn parse_class_char(&mut self) -> Result<char, RegexError> {
        match self.bump() {
            None => Err(self.error(RegexErrorKind::UnexpectedEnd)),
            Some('\\') => self.parse_escape(),
            Some(c) => Ok(c),
        }
    }

    /// Called with the leading backslash already consumed
    fn parse_escape(&mut self) -> Result<char, RegexError> {
        match self.bump() {
            None => Err(self.error(RegexErrorKind::UnexpectedEnd)),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('0') => Ok('\0'),
            Some('x') => self.parse_code_point(2),
            Some('u') => self.parse_code_point(4),
            Some(c) if METACHARS.contains(&c) || matches!(c, '\'' | '"' | '-' | '^') => Ok(c),
            Some(c) => Err(self.error(RegexErrorKind::InvalidEscape {
                escape: format!("\\{c}"),
            })),
        }
    }

    fn parse_code_point(&mut self, digits: u32) -> Result<char, RegexError> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            let c = self
                .peek()
                .ok_or_else(|| self.error(RegexErrorKind::UnexpectedEnd))?;
            let digit = c.to_digit(16).ok_or_else(|| {
                self.error(RegexErrorKind::InvalidEscape {
                    escape: format!("\\{c}"),
                })
            })?;
            self.bump();
            value = value * 16 + digit;
        }
        char::from_u32(value).ok_or_else(|| self.error(RegexErrorKind::InvalidCodePoint { value }))
    }
}
