#![allow(dead_code)]

use basic_lexer::{LexError, Lexer, Token, TokenKind};

pub const SOURCE: &str = "unitTest";

/// Pull tokens until `EndOfInput`, failing the test on any error.
pub fn lex(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::with_source(SOURCE, input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer
            .next_token()
            .unwrap_or_else(|e| panic!("unexpected lex error: {e}\n--- input ---\n{input}"));
        let done = token.kind == TokenKind::EndOfInput;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

pub fn kinds(input: &str) -> Vec<TokenKind> {
    lex(input).iter().map(|t| t.kind).collect()
}

/// Drive a lexer to the end, keeping tokens and errors apart.
pub fn lex_collecting(input: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for result in Lexer::with_source(SOURCE, input) {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => errors.push(err),
        }
    }
    (tokens, errors)
}

/// Assert kind, text and position of a token in one go.
pub fn assert_token(token: &Token, kind: TokenKind, text: &str, line: usize, column: usize) {
    assert_eq!(token.kind, kind, "kind of {token:?}");
    assert_eq!(token.text, text, "text of {token:?}");
    assert_eq!(token.source_name(), SOURCE);
    assert_eq!(
        (token.line(), token.column()),
        (line, column),
        "position of {token:?}"
    );
}
