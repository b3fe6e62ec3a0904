//! Lexer module
//!
//! Turns source text into a lazy stream of [`Token`]s that borrow from it.
//! The only state beyond the cursor is the string interpolation depth,
//! which decides whether a `}` resumes a string or is an error.

pub mod state;
pub mod tokens;
mod tokenizer;

pub use state::LexerState;
pub use tokenizer::Lexer;
pub use tokens::{LexErrorKind, Token, TokenKind};

/// Tokenize a whole source string, Eof included
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let tokens: Vec<Token<'_>> = Lexer::new(source).collect();

    let errors = tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::Error(_)))
        .count();
    tracing::debug!(
        "Lexed {} tokens ({} errors) from {} bytes",
        tokens.len(),
        errors,
        source.len()
    );

    tokens
}

#[cfg(test)]
mod tests;
