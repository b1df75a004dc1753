use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace};
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::token::{Span, Token, TokenKind};

const COMMENT_MARKER: char = '\'';

/// Decimal digit in any script (general category `Nd`).
fn is_digit(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber
}

/// Separator characters and the ASCII control whitespace. No-break spaces
/// are not whitespace.
fn is_blank(c: char) -> bool {
    match c {
        '\t' | '\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{001C}'..='\u{001F}' => true,
        '\u{00A0}' | '\u{2007}' | '\u{202F}' => false,
        _ => matches!(
            get_general_category(c),
            GeneralCategory::SpaceSeparator
                | GeneralCategory::LineSeparator
                | GeneralCategory::ParagraphSeparator
        ),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || is_digit(c) || c == '_'
}

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// String literal not closed before end of input or a raw newline.
    UnterminatedString,
    /// Backslash inside a string followed by an unsupported character.
    IllegalEscapeSequence(char),
    /// Character that cannot start any token.
    UnrecognizedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => {
                write!(f, "unterminated string literal, expected '\"'")
            }
            Self::IllegalEscapeSequence(ch) => {
                write!(f, "unexpected escape character '{}'", ch.escape_default())
            }
            Self::UnrecognizedCharacter(ch) => {
                write!(f, "unexpected character '{}'", ch.escape_default())
            }
        }
    }
}

/// Error produced during lexing.
///
/// The span is the position at which the problem was detected, which is
/// always after the offending character has been consumed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{span}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    /// Human-readable message without the location prefix.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Lifecycle of a [`Lexer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerState {
    /// More tokens can be requested.
    Active,
    /// End of input was returned, or no source was ever loaded.
    Exhausted,
}

/// Tokenize a whole source unit, collecting every diagnostic.
///
/// Scanning continues past malformed input, so the error list holds
/// every problem in the unit in source order.
///
/// # Errors
///
/// Returns all `LexError`s if any part of the input failed to lex.
pub fn tokenize(source_name: &str, input: &str) -> Result<Vec<Token>, Vec<LexError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for result in Lexer::with_source(source_name, input) {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => errors.push(err),
        }
    }

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

/// Pull-based scanner over one source unit at a time.
///
/// A lexer is reusable: [`Lexer::initialize`] discards whatever scan was
/// in progress and starts over on new text.
#[derive(Debug, Clone)]
pub struct Lexer {
    source_name: String,
    input: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    state: LexerState,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    /// Create a lexer with no source code. It must be initialized before
    /// tokens can be requested.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source_name: String::new(),
            input: Vec::new(),
            pos: 0,
            line: 1,
            col: 1,
            state: LexerState::Exhausted,
        }
    }

    #[must_use]
    pub fn with_source(source_name: &str, input: &str) -> Self {
        let mut lexer = Self::new();
        lexer.initialize(source_name, input);
        lexer
    }

    /// Start scanning `input`, labelling every token and error with
    /// `source_name`.
    pub fn initialize(&mut self, source_name: &str, input: &str) {
        source_name.clone_into(&mut self.source_name);
        self.input = input.chars().collect();
        self.pos = 0;
        self.line = 1;
        self.col = 1;
        self.state = LexerState::Active;

        debug!(
            source = %self.source_name,
            chars = self.input.len(),
            "lexer initialized"
        );
    }

    #[must_use]
    pub const fn state(&self) -> LexerState {
        self.state
    }

    /// Whether there is still unscanned input, i.e. whether
    /// [`Lexer::next_token`] may be called.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == LexerState::Active
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Scan the next token.
    ///
    /// On error the offending input has already been consumed, so calling
    /// again resumes right after it. The call that returns
    /// [`TokenKind::EndOfInput`] exhausts the lexer.
    ///
    /// # Errors
    ///
    /// Returns `LexError` on unterminated strings, illegal escape
    /// sequences and unrecognized characters.
    ///
    /// # Panics
    ///
    /// Panics if the lexer is exhausted or was never initialized. Use the
    /// `Iterator` implementation for a non-panicking loop.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        assert!(self.is_active(), "lexer has no source code to tokenize");

        let result = self.scan();
        match &result {
            Ok(token) => trace!(
                kind = ?token.kind,
                line = token.span.line,
                column = token.span.column,
                "token"
            ),
            Err(err) => debug!(
                source = %err.span.source_name,
                line = err.span.line,
                column = err.span.column,
                "{}",
                err.kind
            ),
        }
        result
    }

    fn scan(&mut self) -> Result<Token, LexError> {
        let ch = loop {
            if let Some(newline) = self.skip_whitespace() {
                return Ok(newline);
            }

            match self.peek() {
                None => {
                    self.state = LexerState::Exhausted;
                    return Ok(self.make_token(TokenKind::EndOfInput, String::new()));
                }
                Some(COMMENT_MARKER) => self.skip_comment(),
                Some(ch) => break ch,
            }
        };

        match ch {
            '"' => self.read_string(),
            c if is_digit(c) => Ok(self.read_number()),
            c if c.is_alphabetic() => Ok(self.read_word()),
            other => self.read_punctuation(other),
        }
    }

    fn span(&self) -> Span {
        self.span_at(self.line, self.col)
    }

    fn span_at(&self, line: usize, column: usize) -> Span {
        Span {
            source_name: self.source_name.clone(),
            line,
            column,
        }
    }

    fn make_token(&self, kind: TokenKind, text: String) -> Token {
        Token {
            kind,
            text,
            span: self.span(),
        }
    }

    fn make_token_at(&self, kind: TokenKind, text: String, line: usize, col: usize) -> Token {
        Token {
            kind,
            text,
            span: self.span_at(line, col),
        }
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError {
            kind,
            span: self.span(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn text_from(&self, start: usize) -> String {
        self.input[start..self.pos].iter().collect()
    }

    /// Consume whitespace up to and including the first newline.
    ///
    /// The newline token reports the line it terminates, with the column
    /// reset to the start of the following line.
    fn skip_whitespace(&mut self) -> Option<Token> {
        while let Some(ch) = self.peek().filter(|&c| is_blank(c)) {
            self.advance();
            if ch == '\n' {
                return Some(self.make_token_at(
                    TokenKind::NewLine,
                    "\n".to_string(),
                    self.line - 1,
                    self.col,
                ));
            }
        }
        None
    }

    fn skip_comment(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    fn read_number(&mut self) -> Token {
        let start_col = self.col;
        let start = self.pos;
        let mut kind = TokenKind::IntegerLiteral;

        while let Some(ch) = self.peek() {
            if ch == '.' && kind == TokenKind::IntegerLiteral {
                kind = TokenKind::RealLiteral;
            } else if !is_digit(ch) {
                break;
            }
            self.advance();
        }

        self.make_token_at(kind, self.text_from(start), self.line, start_col)
    }

    fn read_string(&mut self) -> Result<Token, LexError> {
        let start_col = self.col;
        self.advance(); // skip opening quote

        let mut value = String::new();
        loop {
            match self.advance() {
                None | Some('\n') => {
                    return Err(self.error(LexErrorKind::UnterminatedString));
                }
                Some('"') => break,
                Some('\\') => {
                    let decoded = match self.advance() {
                        None => return Err(self.error(LexErrorKind::UnterminatedString)),
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('\\') => '\\',
                        Some('"') => '"',
                        Some(other) => {
                            return Err(self.error(LexErrorKind::IllegalEscapeSequence(other)));
                        }
                    };
                    value.push(decoded);
                }
                Some(c) => value.push(c),
            }
        }

        Ok(self.make_token_at(TokenKind::StringLiteral, value, self.line, start_col))
    }

    /// Identifier, keyword, or one of the constants `TRUE`, `FALSE`, `NULL`.
    fn read_word(&mut self) -> Token {
        let start_col = self.col;
        let start = self.pos;

        while self.peek().is_some_and(is_word_char) {
            self.advance();
        }

        let word = self.text_from(start);
        match TokenKind::keyword(&word) {
            Some(kind) => {
                let text = kind.fixed_text().unwrap_or_default().to_string();
                self.make_token_at(kind, text, self.line, start_col)
            }
            None => self.make_token_at(TokenKind::Identifier, word, self.line, start_col),
        }
    }

    /// Consume exactly one character, even when it is not recognized, so
    /// the next call always makes progress.
    fn read_punctuation(&mut self, ch: char) -> Result<Token, LexError> {
        let start_col = self.col;
        self.advance();

        match TokenKind::punctuation(ch) {
            Some(kind) => Ok(self.make_token_at(kind, ch.to_string(), self.line, start_col)),
            None => Err(self.error(LexErrorKind::UnrecognizedCharacter(ch))),
        }
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    /// Yields every token up to and including `EndOfInput`, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_active() {
            Some(self.next_token())
        } else {
            None
        }
    }
}

impl FusedIterator for Lexer {}
