//! # Scanner Runtime
//!
//! Maximal-munch scanning over a compiled automaton.
//!
//! ## Overview
//!
//! Each [`Scanner::next_token`] call walks the automaton as far as the
//! input allows, remembering the most recent accepting state it passed
//! through, then emits for that longest accept:
//!
//! - an accepted emit rule produces a token carrying the matched text and
//!   its source span;
//! - an accepted skip (trivia) rule consumes the match and the walk
//!   restarts, so trivia never surfaces;
//! - no accept at all consumes a single character and produces an
//!   error-kind token, so the scanner always makes progress.
//!
//! At end of input a zero-length end-kind token is emitted. Scanning never
//! fails and never loses input: the concatenation of every emitted token's
//! text, error tokens included, together with the consumed trivia is the
//! input itself.
//!
//! A scanner owns its stream cursor and is not meant to be shared; the
//! compiled tables it borrows are immutable and freely shareable.

use crate::lexer::compile::{Accept, CompiledLexer};
use crate::lexer::stream::CharStream;
use crate::lexer::token::{Token, TokenKind};
use crate::text::SourceSpan;
use compact_str::CompactString;

/// A token stream over a character stream
#[derive(Debug)]
pub struct Scanner<'lex, K: TokenKind, S: CharStream> {
    lexer: &'lex CompiledLexer<K>,
    stream: S,
    end_reached: bool,
}

impl<'lex, K: TokenKind, S: CharStream> Scanner<'lex, K, S> {
    #[must_use]
    pub fn new(lexer: &'lex CompiledLexer<K>, stream: S) -> Self {
        Self {
            lexer,
            stream,
            end_reached: false,
        }
    }

    /// Whether the end-of-input token has been emitted
    #[must_use]
    pub const fn end_reached(&self) -> bool {
        self.end_reached
    }

    /// Produce the next token.
    ///
    /// Total: always returns a token. After the end of input has been
    /// reached, every further call returns another zero-length end token.
    pub fn next_token(&mut self) -> Token<K> {
        loop {
            if self.stream.is_end() {
                self.end_reached = true;
                let pos = self.stream.position();
                return Token::new(self.lexer.end_kind, "", SourceSpan::empty(pos));
            }

            let mut state = self.lexer.dfa.initial;
            let mut offset = 0;
            let mut last_accept: Option<(usize, Accept<K>)> = None;

            while let Some(c) = self.stream.peek(offset) {
                let Some(next) = self.lexer.dfa.target(state, c) else {
                    break;
                };
                state = next;
                offset += 1;
                if let Some(action) = self.lexer.accepts[next.index()] {
                    last_accept = Some((offset, action));
                }
            }

            match last_accept {
                Some((length, Accept::Emit(kind))) => return self.emit(kind, length),
                Some((length, Accept::Skip)) => {
                    self.stream.consume(length);
                    // Restart after trivia without emitting
                }
                // No rule matched any prefix: recover by consuming one
                // character as an error token
                None => return self.emit(self.lexer.error_kind, 1),
            }
        }
    }

    /// An iterator over the remaining tokens, ending after the end-of-input
    /// token has been yielded
    pub fn tokens(&mut self) -> Tokens<'_, 'lex, K, S> {
        Tokens {
            scanner: self,
            done: false,
        }
    }

    fn emit(&mut self, kind: K, length: usize) -> Token<K> {
        let start = self.stream.position();
        let mut text = CompactString::default();
        for i in 0..length {
            if let Some(c) = self.stream.peek(i) {
                text.push(c);
            }
        }
        self.stream.consume(length);
        let end = self.stream.position();
        Token::new(kind, text, SourceSpan::new(start, end))
    }
}

/// Iterator adapter returned by [`Scanner::tokens`]
#[derive(Debug)]
pub struct Tokens<'scan, 'lex, K: TokenKind, S: CharStream> {
    scanner: &'scan mut Scanner<'lex, K, S>,
    done: bool,
}

impl<K: TokenKind, S: CharStream> Iterator for Tokens<'_, '_, K, S> {
    type Item = Token<K>;

    fn next(&mut self) -> Option<Token<K>> {
        if self.done {
            return None;
        }
        let token = self.scanner.next_token();
        if self.scanner.end_reached() {
            self.done = true;
        }
        Some(token)
    }
}
