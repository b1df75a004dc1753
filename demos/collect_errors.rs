//! Scan a source unit with mistakes in it and report every error.

use basic_lexer::{Lexer, TokenKind};

fn main() {
    let source = "\
' greet the user
LET name = \"world\"
CALL print(\"hello, \\q\" + name)
IF count > 3 { THEN
";

    let mut errors = Vec::new();

    for result in Lexer::with_source("greet.bas", source) {
        match result {
            Ok(token) if token.kind == TokenKind::NewLine => {}
            Ok(token) => {
                println!(
                    "{:>3}:{:<3} {:<16} {:?}",
                    token.line(),
                    token.column(),
                    token.kind.to_string(),
                    token.text
                );
            }
            Err(e) => errors.push(e),
        }
    }

    println!();
    for e in &errors {
        println!("error: {e}");
        println!("  Kind: {:?}", e.kind);
    }
}
