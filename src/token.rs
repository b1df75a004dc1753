use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

lazy_static! {
    /// Keywords and constants, keyed by their canonical uppercase spelling.
    static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("TRUE", TokenKind::TrueLiteral);
        map.insert("FALSE", TokenKind::FalseLiteral);
        map.insert("NULL", TokenKind::NullLiteral);
        map.insert("IF", TokenKind::If);
        map.insert("THEN", TokenKind::Then);
        map.insert("ELSE", TokenKind::Else);
        map.insert("ELSEIF", TokenKind::ElseIf);
        map.insert("END", TokenKind::End);
        map.insert("WHILE", TokenKind::While);
        map.insert("DO", TokenKind::Do);
        map.insert("FOR", TokenKind::For);
        map.insert("IN", TokenKind::In);
        map.insert("CONTINUE", TokenKind::Continue);
        map.insert("BREAK", TokenKind::Break);
        map.insert("RETURN", TokenKind::Return);
        map.insert("FUNCTION", TokenKind::Function);
        map.insert("IMPORT", TokenKind::Import);
        map.insert("LET", TokenKind::Let);
        map.insert("CALL", TokenKind::Call);
        map.insert("NEW", TokenKind::New);
        map.insert("CLASS", TokenKind::Class);
        map.insert("PRIVATE", TokenKind::Private);
        map.insert("PROTECTED", TokenKind::Protected);
        map.insert("PUBLIC", TokenKind::Public);
        map.insert("EXTENDS", TokenKind::Extends);
        map.insert("SUPER", TokenKind::Super);
        map.insert("SELF", TokenKind::Self_);
        map.insert("AND", TokenKind::And);
        map.insert("OR", TokenKind::Or);
        map.insert("NOT", TokenKind::Not);
        map
    };
}

/// Source location for diagnostics.
///
/// Lines and columns count from one. Columns count characters,
/// not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub source_name: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source_name, self.line, self.column)
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of the source unit. Always the last token of a scan.
    EndOfInput,
    /// A single `\n`.
    NewLine,

    /// Digit run without a decimal point.
    IntegerLiteral,
    /// Digit run containing one decimal point.
    RealLiteral,
    /// Double-quoted string; the token text holds the decoded content.
    StringLiteral,
    TrueLiteral,
    FalseLiteral,
    NullLiteral,
    Identifier,

    If,
    Then,
    Else,
    ElseIf,
    End,
    While,
    Do,
    For,
    In,
    Continue,
    Break,
    Return,
    Function,
    Import,
    Let,
    Call,
    New,
    Class,
    Private,
    Protected,
    Public,
    Extends,
    Super,
    /// The `SELF` keyword.
    Self_,
    And,
    Or,
    Not,

    Dot,
    Plus,
    Minus,
    Star,
    Slash,
    Equals,
    LessThan,
    GreaterThan,
    Comma,
    LeftParen,
    RightParen,
}

impl TokenKind {
    /// Look up a word in the keyword and constant table, ignoring case.
    ///
    /// Returns `None` for anything that should lex as an identifier.
    #[must_use]
    pub fn keyword(word: &str) -> Option<Self> {
        RESERVED_LOOKUP.get(word.to_uppercase().as_str()).copied()
    }

    /// Map a single character to its punctuation or operator kind.
    #[must_use]
    pub const fn punctuation(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Dot),
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Star),
            '/' => Some(Self::Slash),
            '=' => Some(Self::Equals),
            '<' => Some(Self::LessThan),
            '>' => Some(Self::GreaterThan),
            ',' => Some(Self::Comma),
            '(' => Some(Self::LeftParen),
            ')' => Some(Self::RightParen),
            _ => None,
        }
    }

    /// Canonical text for kinds whose spelling is fixed.
    #[must_use]
    pub const fn fixed_text(self) -> Option<&'static str> {
        let text = match self {
            Self::EndOfInput
            | Self::IntegerLiteral
            | Self::RealLiteral
            | Self::StringLiteral
            | Self::Identifier => return None,
            Self::NewLine => "\n",
            Self::TrueLiteral => "TRUE",
            Self::FalseLiteral => "FALSE",
            Self::NullLiteral => "NULL",
            Self::If => "IF",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::ElseIf => "ELSEIF",
            Self::End => "END",
            Self::While => "WHILE",
            Self::Do => "DO",
            Self::For => "FOR",
            Self::In => "IN",
            Self::Continue => "CONTINUE",
            Self::Break => "BREAK",
            Self::Return => "RETURN",
            Self::Function => "FUNCTION",
            Self::Import => "IMPORT",
            Self::Let => "LET",
            Self::Call => "CALL",
            Self::New => "NEW",
            Self::Class => "CLASS",
            Self::Private => "PRIVATE",
            Self::Protected => "PROTECTED",
            Self::Public => "PUBLIC",
            Self::Extends => "EXTENDS",
            Self::Super => "SUPER",
            Self::Self_ => "SELF",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Dot => ".",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Equals => "=",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::Comma => ",",
            Self::LeftParen => "(",
            Self::RightParen => ")",
        };
        Some(text)
    }

    /// True for the reserved words, excluding the constants
    /// `TRUE`, `FALSE` and `NULL`.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::If
                | Self::Then
                | Self::Else
                | Self::ElseIf
                | Self::End
                | Self::While
                | Self::Do
                | Self::For
                | Self::In
                | Self::Continue
                | Self::Break
                | Self::Return
                | Self::Function
                | Self::Import
                | Self::Let
                | Self::Call
                | Self::New
                | Self::Class
                | Self::Private
                | Self::Protected
                | Self::Public
                | Self::Extends
                | Self::Super
                | Self::Self_
                | Self::And
                | Self::Or
                | Self::Not
        )
    }

    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntegerLiteral
                | Self::RealLiteral
                | Self::StringLiteral
                | Self::TrueLiteral
                | Self::FalseLiteral
                | Self::NullLiteral
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfInput => write!(f, "end of input"),
            Self::NewLine => write!(f, "newline"),
            Self::IntegerLiteral => write!(f, "integer literal"),
            Self::RealLiteral => write!(f, "real literal"),
            Self::StringLiteral => write!(f, "string literal"),
            Self::Identifier => write!(f, "identifier"),
            other => match other.fixed_text() {
                Some(text) => write!(f, "'{text}'"),
                None => write!(f, "{other:?}"),
            },
        }
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.span.source_name
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.span.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.span.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_ignores_case() {
        assert_eq!(TokenKind::keyword("elseif"), Some(TokenKind::ElseIf));
        assert_eq!(TokenKind::keyword("ElseIf"), Some(TokenKind::ElseIf));
        assert_eq!(TokenKind::keyword("self"), Some(TokenKind::Self_));
        assert_eq!(TokenKind::keyword("Null"), Some(TokenKind::NullLiteral));
        assert_eq!(TokenKind::keyword("elsif"), None);
    }

    #[test]
    fn every_reserved_word_spells_its_canonical_text() {
        for (word, kind) in RESERVED_LOOKUP.iter() {
            assert_eq!(kind.fixed_text(), Some(*word));
        }
    }

    #[test]
    fn punctuation_table() {
        for ch in ".+-*/=<>,()".chars() {
            let kind = TokenKind::punctuation(ch).expect("punctuation");
            assert_eq!(kind.fixed_text(), Some(ch.to_string().as_str()));
        }
        assert_eq!(TokenKind::punctuation('{'), None);
        assert_eq!(TokenKind::punctuation('\''), None);
    }

    #[test]
    fn constants_are_literals_not_keywords() {
        assert!(TokenKind::TrueLiteral.is_literal());
        assert!(!TokenKind::TrueLiteral.is_keyword());
        assert!(TokenKind::Function.is_keyword());
        assert!(!TokenKind::Identifier.is_literal());
    }

    #[test]
    fn display() {
        assert_eq!(TokenKind::EndOfInput.to_string(), "end of input");
        assert_eq!(TokenKind::While.to_string(), "'WHILE'");
        assert_eq!(TokenKind::LeftParen.to_string(), "'('");
    }

    #[test]
    fn span_display() {
        let span = Span {
            source_name: "main.bas".to_string(),
            line: 3,
            column: 7,
        };
        assert_eq!(span.to_string(), "main.bas:3:7");
    }
}
