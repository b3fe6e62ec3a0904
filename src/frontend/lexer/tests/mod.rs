//! Lexer 单元测试
//!
//! 测试词法分析器的分词功能

use crate::frontend::lexer::{tokenize, LexErrorKind, Lexer, TokenKind};
use crate::util::span::Location;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

mod lexer_basic_tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].loc, Location::new(1, 1, 0));
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(kinds("   \t\n\r   "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        assert_eq!(
            kinds("1 # the rest is ignored + 2\n+ 3"),
            vec![
                TokenKind::IntLiteral,
                TokenKind::Plus,
                TokenKind::IntLiteral,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_single_char_identifier() {
        let tokens = tokenize("a");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "a");
    }

    #[test]
    fn test_identifier_with_underscore() {
        let tokens = tokenize("my_variable test123");
        assert_eq!(tokens[0].lexeme, "my_variable");
        assert_eq!(tokens[1].lexeme, "test123");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("true false nil not and or"),
            vec![
                TokenKind::KwTrue,
                TokenKind::KwFalse,
                TokenKind::KwNil,
                TokenKind::KwNot,
                TokenKind::KwAnd,
                TokenKind::KwOr,
                TokenKind::Eof
            ]
        );
        assert_eq!(kinds("trueish")[0], TokenKind::Identifier);
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let mut lexer = Lexer::new("1");
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::IntLiteral));
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_next_token_repeats_eof() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}

mod lexer_operator_tests {
    use super::*;

    #[test]
    fn test_single_char_operators() {
        assert_eq!(
            kinds("( ) [ ] , ? + - * / | & ^"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Comma,
                TokenKind::Question,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Pipe,
                TokenKind::Amp,
                TokenKind::Caret,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("<< >> == != <= >= .."),
            vec![
                TokenKind::Shl,
                TokenKind::Shr,
                TokenKind::EqEq,
                TokenKind::Neq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::DotDot,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_operator_prefixes() {
        assert_eq!(
            kinds("< > = ! ."),
            vec![
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eq,
                TokenKind::Exclam,
                TokenKind::Dot,
                TokenKind::Eof
            ]
        );
    }
}

mod lexer_number_tests {
    use super::*;

    #[test]
    fn test_integer() {
        let tokens = tokenize("12345");
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[0].lexeme, "12345");
        assert_eq!(tokens[0].loc, Location::new(1, 1, 5));
    }

    #[test]
    fn test_float() {
        let tokens = tokenize("3.25");
        assert_eq!(tokens[0].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[0].lexeme, "3.25");
    }

    #[test]
    fn test_trailing_dot_stays_integer() {
        let tokens = tokenize("1.");
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[0].lexeme, "1");
        assert_eq!(tokens[1].kind, TokenKind::Dot);
    }

    #[test]
    fn test_range_is_not_a_float() {
        assert_eq!(
            kinds("1..2"),
            vec![
                TokenKind::IntLiteral,
                TokenKind::DotDot,
                TokenKind::IntLiteral,
                TokenKind::Eof
            ]
        );
    }
}

mod lexer_string_tests {
    use super::*;

    #[test]
    fn test_simple_string() {
        let tokens = tokenize("\"hello\"");
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].lexeme, "\"hello\"");
        assert_eq!(tokens[0].loc.length, 7);
    }

    #[test]
    fn test_escaped_quote_does_not_terminate() {
        let tokens = tokenize(r#""a\"b""#);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].lexeme, r#""a\"b""#);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = tokenize("\"abc");
        assert_eq!(
            tokens[0].kind,
            TokenKind::Error(LexErrorKind::UnterminatedString)
        );
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_hash_inside_string_is_not_a_comment() {
        let tokens = tokenize("\"a # b\"");
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].lexeme, "\"a # b\"");
    }

    #[test]
    fn test_interpolation() {
        let tokens = tokenize("\"a #{1 + 2} b\"");
        let summary: Vec<_> = tokens.iter().map(|t| (t.kind, t.lexeme)).collect();
        assert_eq!(
            summary,
            vec![
                (TokenKind::Interpolation, "\"a "),
                (TokenKind::IntLiteral, "1"),
                (TokenKind::Plus, "+"),
                (TokenKind::IntLiteral, "2"),
                (TokenKind::StringLiteral, "} b\""),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_consecutive_interpolations() {
        assert_eq!(
            kinds("\"#{1}#{2}\""),
            vec![
                TokenKind::Interpolation,
                TokenKind::IntLiteral,
                TokenKind::Interpolation,
                TokenKind::IntLiteral,
                TokenKind::StringLiteral,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_nested_interpolation_depth() {
        let mut lexer = Lexer::new("\"x #{\"y #{1}\"}\"");
        assert_eq!(lexer.next_token().kind, TokenKind::Interpolation);
        assert_eq!(lexer.state().interpolation_depth, 1);
        assert_eq!(lexer.next_token().kind, TokenKind::Interpolation);
        assert_eq!(lexer.state().interpolation_depth, 2);
        assert_eq!(lexer.next_token().kind, TokenKind::IntLiteral);
        assert_eq!(lexer.next_token().kind, TokenKind::StringLiteral);
        assert_eq!(lexer.state().interpolation_depth, 1);
        assert_eq!(lexer.next_token().kind, TokenKind::StringLiteral);
        assert_eq!(lexer.state().interpolation_depth, 0);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_unmatched_brace() {
        let tokens = tokenize("1 }");
        assert_eq!(tokens[1].kind, TokenKind::Error(LexErrorKind::UnmatchedBrace));
        assert_eq!(tokens[1].lexeme, "}");
    }
}

mod lexer_error_tests {
    use super::*;

    #[test]
    fn test_invalid_character() {
        let tokens = tokenize("1 $ 2");
        assert_eq!(
            tokens[1].kind,
            TokenKind::Error(LexErrorKind::InvalidCharacter)
        );
        assert_eq!(tokens[1].lexeme, "$");
        assert_eq!(tokens[2].kind, TokenKind::IntLiteral);
    }

    #[test]
    fn test_error_kinds_are_distinct_keys() {
        use std::collections::HashSet;

        let found: HashSet<TokenKind> = kinds("$ } \"abc").into_iter().collect();
        assert!(found.contains(&TokenKind::Error(LexErrorKind::InvalidCharacter)));
        assert!(found.contains(&TokenKind::Error(LexErrorKind::UnmatchedBrace)));
        assert!(found.contains(&TokenKind::Error(LexErrorKind::UnterminatedString)));
        assert!(found.contains(&TokenKind::Eof));
    }

    #[test]
    fn test_invalid_multibyte_character() {
        let tokens = tokenize("é");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].lexeme, "é");
        assert_eq!(tokens[0].loc.length, 2);
    }
}

mod lexer_location_tests {
    use super::*;

    #[test]
    fn test_columns_and_lines() {
        let tokens = tokenize("1 +\n  22");
        assert_eq!(tokens[0].loc, Location::new(1, 1, 1));
        assert_eq!(tokens[1].loc, Location::new(1, 3, 1));
        assert_eq!(tokens[2].loc, Location::new(2, 3, 2));
    }

    #[test]
    fn test_from_offset() {
        let source = "1 +\n  22 * 3";
        let mut lexer = Lexer::from_offset(source, 6);
        let token = lexer.next_token();
        assert_eq!(token.lexeme, "22");
        assert_eq!(token.loc, Location::new(2, 3, 2));
        assert_eq!(lexer.next_token().kind, TokenKind::Star);
    }

    #[test]
    fn test_from_offset_is_clamped() {
        let mut lexer = Lexer::from_offset("1", 99);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);

        // Offset 1 is inside the two-byte 'é'
        let mut lexer = Lexer::from_offset("é1", 1);
        assert_eq!(lexer.next_token().lexeme, "é");
    }
}
