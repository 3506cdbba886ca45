//! End-to-end scanning tests

use lexion::{CompiledLexer, LexerBuilder, SourcePos, TextSize, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    KwIf,
    Ident,
    Plus,
    Lparen,
    Rparen,
    Comma,
    Ws,
    End,
    Error,
}

fn lexer() -> CompiledLexer<Kind> {
    LexerBuilder::new()
        .literal(Kind::KwIf, "if")
        .token(Kind::Ident, "[A-Za-z][A-Za-z0-9]*")
        .literal(Kind::Plus, "+")
        .literal(Kind::Lparen, "(")
        .literal(Kind::Rparen, ")")
        .literal(Kind::Comma, ",")
        .token(Kind::Ws, "[ \\t\\r\\n]+")
        .trivia(Kind::Ws)
        .end(Kind::End)
        .error(Kind::Error)
        .build()
        .expect("lexer must build")
}

fn kinds_and_texts(tokens: &[Token<Kind>]) -> Vec<(Kind, &str)> {
    tokens.iter().map(|t| (t.kind, t.text.as_str())).collect()
}

#[test]
fn test_identifiers_and_operator() {
    let tokens = lexer().tokenize("a + b");
    assert_eq!(
        kinds_and_texts(&tokens),
        vec![
            (Kind::Ident, "a"),
            (Kind::Plus, "+"),
            (Kind::Ident, "b"),
            (Kind::End, ""),
        ]
    );
}

#[test]
fn test_keyword_wins_over_identifier_at_equal_length() {
    let tokens = lexer().tokenize("if x");
    assert_eq!(
        kinds_and_texts(&tokens),
        vec![(Kind::KwIf, "if"), (Kind::Ident, "x"), (Kind::End, "")]
    );
}

#[test]
fn test_punctuation_with_suppressed_whitespace() {
    let tokens = lexer().tokenize("(a, b, c)");
    assert_eq!(
        kinds_and_texts(&tokens),
        vec![
            (Kind::Lparen, "("),
            (Kind::Ident, "a"),
            (Kind::Comma, ","),
            (Kind::Ident, "b"),
            (Kind::Comma, ","),
            (Kind::Ident, "c"),
            (Kind::Rparen, ")"),
            (Kind::End, ""),
        ]
    );
}

#[test]
fn test_unmatched_input_becomes_error_tokens() {
    let tokens = lexer().tokenize("@!");
    assert_eq!(
        kinds_and_texts(&tokens),
        vec![(Kind::Error, "@"), (Kind::Error, "!"), (Kind::End, "")]
    );
}

#[test]
fn test_empty_input_yields_end_at_origin() {
    let tokens = lexer().tokenize("");
    assert_eq!(tokens.len(), 1);
    let end = &tokens[0];
    assert_eq!(end.kind, Kind::End);
    assert!(end.is_empty());
    assert_eq!(end.span.start(), SourcePos::new(TextSize::zero(), 1, 1));
    assert_eq!(end.span.end(), end.span.start());
}

#[test]
fn test_longer_identifier_beats_repeated_keyword() {
    // "ifif" is a longer identifier match than two keywords
    let tokens = lexer().tokenize("ifif");
    assert_eq!(
        kinds_and_texts(&tokens),
        vec![(Kind::Ident, "ifif"), (Kind::End, "")]
    );
}

#[test]
fn test_repeated_keyword_without_identifier_rule() {
    let lexer = LexerBuilder::new()
        .literal(Kind::KwIf, "if")
        .end(Kind::End)
        .error(Kind::Error)
        .build()
        .unwrap();
    let tokens = lexer.tokenize("ifif");
    assert_eq!(
        kinds_and_texts(&tokens),
        vec![(Kind::KwIf, "if"), (Kind::KwIf, "if"), (Kind::End, "")]
    );
}

#[test]
fn test_token_positions() {
    let tokens = lexer().tokenize("a +\nbc");

    let a = &tokens[0];
    assert_eq!(a.span.start(), SourcePos::new(TextSize::from(0), 1, 1));
    assert_eq!(a.span.end(), SourcePos::new(TextSize::from(1), 1, 2));

    let plus = &tokens[1];
    assert_eq!(plus.span.start(), SourcePos::new(TextSize::from(2), 1, 3));

    let bc = &tokens[2];
    assert_eq!(bc.span.start(), SourcePos::new(TextSize::from(4), 2, 1));
    assert_eq!(bc.span.end(), SourcePos::new(TextSize::from(6), 2, 3));

    let end = &tokens[3];
    assert_eq!(end.span.start(), SourcePos::new(TextSize::from(6), 2, 3));
}

#[test]
fn test_error_tokens_cover_multibyte_characters() {
    let tokens = lexer().tokenize("é");
    assert_eq!(
        kinds_and_texts(&tokens),
        vec![(Kind::Error, "é"), (Kind::End, "")]
    );
    // one character, two bytes
    assert_eq!(tokens[0].span.end().offset, TextSize::from(2));
    assert_eq!(tokens[0].span.end().column, 2);
}

#[test]
fn test_scanner_iterator_matches_tokenize() {
    let lexer = lexer();
    let eager = lexer.tokenize("if (a, b)");
    let mut scanner = lexer.scan_str("if (a, b)");
    let lazy: Vec<_> = scanner.tokens().collect();
    assert_eq!(eager, lazy);
}

#[test]
fn test_two_scans_are_identical() {
    let lexer = lexer();
    let first = lexer.tokenize("if x + yz @ (1)");
    let second = lexer.tokenize("if x + yz @ (1)");
    assert_eq!(first, second);
}

#[test]
fn test_shared_lexer_across_threads() {
    let lexer = lexer();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| lexer.tokenize("if a + b")))
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for window in results.windows(2) {
            assert_eq!(window[0], window[1]);
        }
    });
}

#[test]
fn test_leading_and_trailing_trivia() {
    let tokens = lexer().tokenize("  a  ");
    assert_eq!(
        kinds_and_texts(&tokens),
        vec![(Kind::Ident, "a"), (Kind::End, "")]
    );
    assert_eq!(tokens[0].span.start().column, 3);
    assert_eq!(tokens[1].span.start().column, 6);
}

#[test]
fn test_trivia_only_input() {
    let tokens = lexer().tokenize(" \t\n ");
    assert_eq!(kinds_and_texts(&tokens), vec![(Kind::End, "")]);
    assert_eq!(tokens[0].span.start().line, 2);
}
