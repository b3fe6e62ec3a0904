//! Byte-oriented scanner

use super::state::{keyword_kind, LexerState};
use super::tokens::{LexErrorKind, Token, TokenKind};
use crate::util::span::Location;

/// Lexer over a borrowed source string
///
/// Produces tokens on demand. Whitespace and `#` comments are skipped
/// before each token; errors come back as `TokenKind::Error` tokens.
pub struct Lexer<'src> {
    source: &'src str,
    /// Byte offset where the current token starts
    start: usize,
    /// Byte offset of the next unread byte
    current: usize,
    line: usize,
    col: usize,
    start_line: usize,
    start_col: usize,
    state: LexerState,
    /// Set once the iterator has yielded Eof
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Create a lexer at the start of `source`
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            col: 1,
            start_line: 1,
            start_col: 1,
            state: LexerState::new(),
            finished: false,
        }
    }

    /// Create a lexer that resumes at a byte offset
    ///
    /// The offset is clamped to the source and moved back to a char
    /// boundary. Line and column are recomputed from the text before it;
    /// the interpolation depth starts at zero.
    pub fn from_offset(
        source: &'src str,
        offset: usize,
    ) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }

        let before = &source.as_bytes()[..offset];
        let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
        let col = match before.iter().rposition(|&b| b == b'\n') {
            Some(newline) => offset - newline,
            None => offset + 1,
        };

        Self {
            current: offset,
            start: offset,
            line,
            col,
            start_line: line,
            start_col: col,
            ..Self::new(source)
        }
    }

    /// Current interpolation nesting
    pub fn state(&self) -> LexerState {
        self.state
    }

    /// Scan the next token
    ///
    /// Returns Eof forever once the input is exhausted.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_whitespace();
        self.mark_start();

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            b'(' => self.make_token(TokenKind::LParen),
            b')' => self.make_token(TokenKind::RParen),
            b'[' => self.make_token(TokenKind::LBracket),
            b']' => self.make_token(TokenKind::RBracket),
            b',' => self.make_token(TokenKind::Comma),
            b'?' => self.make_token(TokenKind::Question),
            b'+' => self.make_token(TokenKind::Plus),
            b'-' => self.make_token(TokenKind::Minus),
            b'*' => self.make_token(TokenKind::Star),
            b'/' => self.make_token(TokenKind::Slash),
            b'|' => self.make_token(TokenKind::Pipe),
            b'&' => self.make_token(TokenKind::Amp),
            b'^' => self.make_token(TokenKind::Caret),
            b'.' => self.either(b'.', TokenKind::DotDot, TokenKind::Dot),
            b'=' => self.either(b'=', TokenKind::EqEq, TokenKind::Eq),
            b'!' => self.either(b'=', TokenKind::Neq, TokenKind::Exclam),
            b'<' => match self.peek() {
                Some(b'<') => self.consume_and_make(TokenKind::Shl),
                Some(b'=') => self.consume_and_make(TokenKind::Le),
                _ => self.make_token(TokenKind::Lt),
            },
            b'>' => match self.peek() {
                Some(b'>') => self.consume_and_make(TokenKind::Shr),
                Some(b'=') => self.consume_and_make(TokenKind::Ge),
                _ => self.make_token(TokenKind::Gt),
            },
            b'"' => self.string_segment(),
            b'}' => {
                if self.state.close_interpolation() {
                    self.string_segment()
                } else {
                    self.make_token(TokenKind::Error(LexErrorKind::UnmatchedBrace))
                }
            }
            b'0'..=b'9' => self.number(),
            c if is_ident_start(c) => self.identifier(),
            _ => {
                // Swallow the rest of a multi-byte character
                while !self.source.is_char_boundary(self.current) {
                    self.advance();
                }
                self.make_token(TokenKind::Error(LexErrorKind::InvalidCharacter))
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.advance();
                }
                b'#' => {
                    while !matches!(self.peek(), Some(b'\n') | None) {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Scan string text up to a closing quote or an interpolation opener
    ///
    /// Entered just after `"` or after the `}` that closes an
    /// interpolated expression.
    fn string_segment(&mut self) -> Token<'src> {
        loop {
            match self.peek() {
                None => {
                    return self.make_token(TokenKind::Error(LexErrorKind::UnterminatedString));
                }
                Some(b'"') => {
                    self.advance();
                    return self.make_token(TokenKind::StringLiteral);
                }
                Some(b'\\') => {
                    self.advance();
                    if self.peek().is_some() {
                        self.advance();
                    }
                }
                Some(b'#') if self.peek_next() == Some(b'{') => {
                    let token = self.make_token(TokenKind::Interpolation);
                    self.advance();
                    self.advance();
                    self.state.open_interpolation();
                    return token;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn number(&mut self) -> Token<'src> {
        self.digits();

        let is_float = self.peek() == Some(b'.')
            && self.peek_next().is_some_and(|c| c.is_ascii_digit());
        if is_float {
            self.advance();
            self.digits();
            self.make_token(TokenKind::FloatLiteral)
        } else {
            self.make_token(TokenKind::IntLiteral)
        }
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn identifier(&mut self) -> Token<'src> {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }

        let text = &self.source[self.start..self.current];
        let kind = keyword_kind(text).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.current).copied()
    }

    #[inline]
    fn peek_next(&self) -> Option<u8> {
        self.source.as_bytes().get(self.current + 1).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.current += 1;
        if c == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn mark_start(&mut self) {
        self.start = self.current;
        self.start_line = self.line;
        self.start_col = self.col;
    }

    fn either(
        &mut self,
        next: u8,
        matched: TokenKind,
        otherwise: TokenKind,
    ) -> Token<'src> {
        if self.peek() == Some(next) {
            self.consume_and_make(matched)
        } else {
            self.make_token(otherwise)
        }
    }

    fn consume_and_make(
        &mut self,
        kind: TokenKind,
    ) -> Token<'src> {
        self.advance();
        self.make_token(kind)
    }

    fn make_token(
        &self,
        kind: TokenKind,
    ) -> Token<'src> {
        Token::new(
            kind,
            &self.source[self.start..self.current],
            Location::new(self.start_line, self.start_col, self.current - self.start),
        )
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    /// Yields every token up to and including Eof, then stops
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

#[inline]
fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

#[inline]
fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}
