//! Lexer state management
//! Handles interpolation nesting and keyword recognition

use super::tokens::TokenKind;

/// State the lexer carries beyond its cursor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerState {
    /// Number of `#{` not yet closed by a `}`
    pub interpolation_depth: usize,
}

impl LexerState {
    /// Create new lexer state
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter an interpolated expression
    #[inline]
    pub fn open_interpolation(&mut self) {
        self.interpolation_depth += 1;
    }

    /// Leave an interpolated expression, returns false at depth zero
    #[inline]
    pub fn close_interpolation(&mut self) -> bool {
        match self.interpolation_depth.checked_sub(1) {
            Some(depth) => {
                self.interpolation_depth = depth;
                true
            }
            None => false,
        }
    }
}

/// Convert an identifier to a keyword token
///
/// Dispatches directly on the first one to three bytes, then compares
/// the remaining tail. Single-byte identifiers are never keywords.
pub fn keyword_kind(ident: &str) -> Option<TokenKind> {
    let bytes = ident.as_bytes();
    if bytes.len() < 2 {
        return None;
    }

    match bytes[0] {
        b'a' => check_rest(ident, 1, "nd", TokenKind::KwAnd),
        b'c' => check_rest(ident, 1, "lass", TokenKind::KwClass),
        b'd' => check_rest(ident, 1, "o", TokenKind::KwDo),
        b'e' => match bytes[1] {
            b'l' => check_rest(ident, 2, "se", TokenKind::KwElse),
            b'n' => match bytes.get(2) {
                Some(b'd') => check_rest(ident, 3, "", TokenKind::KwEnd),
                Some(b'u') => check_rest(ident, 3, "m", TokenKind::KwEnum),
                _ => None,
            },
            _ => None,
        },
        b'f' => match bytes[1] {
            b'a' => check_rest(ident, 2, "lse", TokenKind::KwFalse),
            b'o' => check_rest(ident, 2, "r", TokenKind::KwFor),
            b'u' => check_rest(ident, 2, "n", TokenKind::KwFun),
            _ => None,
        },
        b'i' => check_rest(ident, 1, "f", TokenKind::KwIf),
        b'l' => match bytes[1] {
            b'e' => check_rest(ident, 2, "t", TokenKind::KwLet),
            b'o' => check_rest(ident, 2, "g", TokenKind::KwLog),
            _ => None,
        },
        b'm' => check_rest(ident, 1, "atch", TokenKind::KwMatch),
        b'n' => match bytes[1] {
            b'i' => check_rest(ident, 2, "l", TokenKind::KwNil),
            b'o' => check_rest(ident, 2, "t", TokenKind::KwNot),
            _ => None,
        },
        b'o' => check_rest(ident, 1, "r", TokenKind::KwOr),
        b'r' => check_rest(ident, 1, "eturn", TokenKind::KwReturn),
        b's' => check_rest(ident, 1, "elf", TokenKind::KwSelf),
        b't' => check_rest(ident, 1, "rue", TokenKind::KwTrue),
        b'v' => check_rest(ident, 1, "ar", TokenKind::KwVar),
        b'w' => match bytes[1] {
            b'h' => check_rest(ident, 2, "ile", TokenKind::KwWhile),
            b'i' => check_rest(ident, 2, "th", TokenKind::KwWith),
            _ => None,
        },
        _ => None,
    }
}

#[inline]
fn check_rest(
    ident: &str,
    start: usize,
    rest: &str,
    kind: TokenKind,
) -> Option<TokenKind> {
    (ident.get(start..) == Some(rest)).then_some(kind)
}
