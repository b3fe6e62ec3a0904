//! Parser state and token stream management

use crate::frontend::lexer::{LexErrorKind, Lexer, Token, TokenKind};
use crate::util::diagnostic::{Diagnostic, DiagnosticBuilder, ErrorCodeDefinition, Reporter};
use crate::util::span::Location;

/// Deepest nesting of parentheses, prefix operators and operator chains
pub const MAX_NESTING: usize = 128;

/// Error recovery mode
///
/// While panicking, new diagnostics are dropped: they are almost always
/// echoes of the one that started the panic. The parser returns to
/// `Normal` as soon as it moves past the offending token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    Normal,
    Panicking,
    /// Panicking over a skipped lexical error token
    ///
    /// Only diagnostics starting at or after the bad token are dropped.
    /// Constructs that ended before it still report their own errors.
    Lexical(Location),
}

/// Parser state for tracking position and errors
pub struct ParserState<'src, 'r> {
    /// Token source
    lexer: Lexer<'src>,
    /// Last consumed token
    previous: Token<'src>,
    /// Token under the cursor
    current: Token<'src>,
    recovery: Recovery,
    reporter: &'r mut dyn Reporter,
    /// Diagnostics actually delivered to the reporter
    error_count: usize,
    /// Current grammar recursion depth
    nesting: usize,
    nesting_reported: bool,
}

impl<'src, 'r> ParserState<'src, 'r> {
    /// Create a parser state and read the first token
    pub fn new(
        source: &'src str,
        reporter: &'r mut dyn Reporter,
    ) -> Self {
        let mut state = Self {
            lexer: Lexer::new(source),
            previous: Token::empty(),
            current: Token::empty(),
            recovery: Recovery::Normal,
            reporter,
            error_count: 0,
            nesting: 0,
            nesting_reported: false,
        };
        state.advance();
        state
    }

    #[inline]
    pub fn current(&self) -> Token<'src> {
        self.current
    }

    #[inline]
    pub fn previous(&self) -> Token<'src> {
        self.previous
    }

    #[inline]
    pub fn recovery(&self) -> Recovery {
        self.recovery
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    #[inline]
    pub fn at(
        &self,
        kind: TokenKind,
    ) -> bool {
        self.current.kind == kind
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.at(TokenKind::Eof)
    }

    /// Move to the next non-error token
    ///
    /// Moving on ends any panic. Error tokens from the lexer are reported
    /// here and skipped, so the grammar never sees them; reporting one
    /// starts a lexical panic that lasts until the following advance.
    pub fn advance(&mut self) {
        self.previous = self.current;
        self.recovery = Recovery::Normal;
        let mut skipped = None;
        loop {
            self.current = self.lexer.next_token();
            let TokenKind::Error(kind) = self.current.kind else {
                break;
            };
            let token = self.current;
            let diagnostic = match kind {
                LexErrorKind::InvalidCharacter => ErrorCodeDefinition::invalid_character(token.lexeme),
                LexErrorKind::UnterminatedString => ErrorCodeDefinition::unterminated_string(),
                LexErrorKind::UnmatchedBrace => ErrorCodeDefinition::unmatched_brace(),
            };
            self.report(diagnostic.at(token.loc).build());
            skipped.get_or_insert(token.loc);
        }
        if let Some(loc) = skipped {
            self.recovery = Recovery::Lexical(loc);
        }
    }

    /// Consume the current token if it has the given kind
    pub fn eat(
        &mut self,
        kind: TokenKind,
    ) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Report a diagnostic and enter panic mode
    ///
    /// Dropped when already panicking.
    pub fn error(
        &mut self,
        builder: DiagnosticBuilder,
        loc: Location,
    ) {
        self.report(builder.at(loc).build());
    }

    /// Report at the current token
    pub fn error_at_current(
        &mut self,
        builder: DiagnosticBuilder,
    ) {
        let loc = self.current.loc;
        self.error(builder, loc);
    }

    /// Enter one grammar level, or report the nesting limit
    ///
    /// Returns false when the limit is reached; the caller must not
    /// descend and should stand in a poisoned node.
    pub fn enter_nesting(&mut self) -> bool {
        if self.nesting >= MAX_NESTING {
            self.nesting_too_deep(self.current.loc);
            return false;
        }
        self.nesting += 1;
        true
    }

    pub fn leave_nesting(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Report the nesting limit, once per parse
    pub fn nesting_too_deep(
        &mut self,
        loc: Location,
    ) {
        if !self.nesting_reported {
            self.nesting_reported = true;
            self.error(ErrorCodeDefinition::nesting_too_deep(MAX_NESTING), loc);
        }
    }

    fn report(
        &mut self,
        diagnostic: Diagnostic,
    ) {
        match self.recovery {
            Recovery::Normal => self.recovery = Recovery::Panicking,
            Recovery::Lexical(bad) if starts_before(diagnostic.location, bad) => {}
            Recovery::Panicking | Recovery::Lexical(_) => {
                tracing::trace!("suppressed while panicking: {}", diagnostic);
                return;
            }
        }
        self.error_count += 1;
        self.reporter.report(diagnostic);
    }
}

fn starts_before(
    loc: Location,
    other: Location,
) -> bool {
    (loc.line, loc.col) < (other.line, other.col)
}
