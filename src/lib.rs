//! Lexer for a small BASIC-like scripting language.
//!
//! Turns source text into typed tokens annotated with the source name,
//! line, and column they came from. Scanning recovers from malformed
//! input: a failed call consumes the offending text, so the caller can
//! keep pulling tokens and report every error in one pass.
//!
//! # Quick start
//!
//! ## Pull tokens one at a time
//!
//! ```
//! use basic_lexer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::with_source("main.bas", "LET x = 5\n");
//! let token = lexer.next_token().unwrap();
//! assert_eq!(token.kind, TokenKind::Let);
//! assert_eq!((token.line(), token.column()), (1, 1));
//! ```
//!
//! ## Collect every error in a source unit
//!
//! ```
//! use basic_lexer::{LexErrorKind, tokenize};
//!
//! let errors = tokenize("main.bas", "x = {1}").unwrap_err();
//! assert_eq!(errors.len(), 2);
//! assert_eq!(errors[0].kind, LexErrorKind::UnrecognizedCharacter('{'));
//! assert_eq!(errors[0].to_string(), "main.bas:1:6: unexpected character '{'");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod lexer;
pub mod token;

pub use lexer::{LexError, LexErrorKind, Lexer, LexerState, tokenize};
pub use token::{Span, Token, TokenKind};
