//! Parser module
//!
//! Recursive descent over the precedence levels of the expression
//! language. The tree is typed while it is built, and errors are reported
//! through a [`Reporter`] without stopping the parse: the parser always
//! runs to the end of input so one pass finds every independent error.

pub mod ast;
mod expr;
pub mod pretty;
mod state;

pub use expr::{binary_result, unary_result};
pub use state::{ParserState, Recovery, MAX_NESTING};

use crate::frontend::lexer::TokenKind;
use crate::util::diagnostic::{ErrorCodeDefinition, Reporter};
use ast::Node;

/// Parsed tree plus the number of errors found on the way
#[derive(Debug)]
pub struct ParseOutput<'src> {
    pub root: Node<'src>,
    pub error_count: usize,
}

impl ParseOutput<'_> {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// Parse one expression spanning the whole source
///
/// # Arguments
/// * `source` - Program text
/// * `reporter` - Receives every diagnostic
///
/// # Returns
/// The best-effort tree, which must not be compiled if `error_count > 0`
pub fn parse<'src>(
    source: &'src str,
    reporter: &mut dyn Reporter,
) -> ParseOutput<'src> {
    let mut state = ParserState::new(source, reporter);
    let root = state.expression();

    if !state.at(TokenKind::Eof) {
        let found = state.current().describe();
        state.error_at_current(ErrorCodeDefinition::unexpected_token("end of input", &found));
        // Drain the rest so lexical errors further on are still reported
        while !state.at_end() {
            state.advance();
        }
    }

    tracing::debug!("Parsed expression of type {} ({} errors)", root.ty, state.error_count());
    ParseOutput {
        root,
        error_count: state.error_count(),
    }
}

#[cfg(test)]
mod tests;
