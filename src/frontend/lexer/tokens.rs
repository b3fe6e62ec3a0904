//! Token types

use crate::util::span::Location;
use std::fmt;

/// Why the lexer produced an error token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    #[error("invalid character")]
    InvalidCharacter,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unmatched '}}'")]
    UnmatchedBrace,
}

/// Token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    DotDot,
    Question,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Pipe,
    Amp,
    Caret,
    Shl,
    Shr,
    Eq,
    EqEq,
    Neq,
    Exclam,
    Lt,
    Le,
    Gt,
    Ge,

    // Keywords (22 total)
    KwAnd,
    KwClass,
    KwDo,
    KwElse,
    KwEnd,
    KwEnum,
    KwFalse,
    KwFor,
    KwFun,
    KwIf,
    KwLet,
    KwLog,
    KwMatch,
    KwNil,
    KwNot,
    KwOr,
    KwReturn,
    KwSelf,
    KwTrue,
    KwVar,
    KwWhile,
    KwWith,

    // Literals
    Identifier,
    IntLiteral,
    FloatLiteral,
    /// A whole string, or the last segment of an interpolated one
    StringLiteral,
    /// A string segment ending right before `#{`
    Interpolation,

    // Special
    Eof,
    Error(LexErrorKind),
}

impl TokenKind {
    /// Check if this kind is a reserved word
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::KwAnd
                | TokenKind::KwClass
                | TokenKind::KwDo
                | TokenKind::KwElse
                | TokenKind::KwEnd
                | TokenKind::KwEnum
                | TokenKind::KwFalse
                | TokenKind::KwFor
                | TokenKind::KwFun
                | TokenKind::KwIf
                | TokenKind::KwLet
                | TokenKind::KwLog
                | TokenKind::KwMatch
                | TokenKind::KwNil
                | TokenKind::KwNot
                | TokenKind::KwOr
                | TokenKind::KwReturn
                | TokenKind::KwSelf
                | TokenKind::KwTrue
                | TokenKind::KwVar
                | TokenKind::KwWhile
                | TokenKind::KwWith
        )
    }
}

/// Token
///
/// A value type: the lexeme borrows the source text and is never copied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub loc: Location,
}

impl<'src> Token<'src> {
    /// Create a new token
    #[inline]
    pub fn new(
        kind: TokenKind,
        lexeme: &'src str,
        loc: Location,
    ) -> Self {
        Self { kind, lexeme, loc }
    }

    /// Placeholder used before the parser reads its first token
    #[inline]
    pub fn empty() -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: "",
            loc: Location::new(0, 0, 0),
        }
    }

    /// Check if this is the empty sentinel
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.loc.line == 0
    }

    /// Human readable description for diagnostics
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.lexeme),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:?} '{}' at {}", self.kind, self.lexeme, self.loc)
    }
}
