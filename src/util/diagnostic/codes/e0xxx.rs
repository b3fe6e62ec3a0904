//! 错误码定义
//!
//! E0xxx: 词法和语法分析阶段的错误码

use super::{DiagnosticBuilder, ErrorCategory, ErrorCodeDefinition};
use crate::util::diagnostic::ErrorKind;

pub static E0001: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0001",
    category: ErrorCategory::Lexer,
    kind: ErrorKind::Syntax,
    message_template: "expected {expected}, found {found}",
};

pub static E0002: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0002",
    category: ErrorCategory::Lexer,
    kind: ErrorKind::Syntax,
    message_template: "unmatched '}' outside of a string interpolation",
};

pub static E0003: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0003",
    category: ErrorCategory::Lexer,
    kind: ErrorKind::InvalidCharacter,
    message_template: "invalid character '{ch}'",
};

pub static E0004: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0004",
    category: ErrorCategory::Lexer,
    kind: ErrorKind::UnterminatedString,
    message_template: "unterminated string",
};

pub static E0005: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0005",
    category: ErrorCategory::Lexer,
    kind: ErrorKind::IntegerOutOfRange,
    message_template: "integer literal '{lexeme}' does not fit in 64 bits",
};

pub static E0006: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0006",
    category: ErrorCategory::Lexer,
    kind: ErrorKind::InvalidExpression,
    message_template: "expected an expression, found {found}",
};

pub static E0007: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0007",
    category: ErrorCategory::Lexer,
    kind: ErrorKind::UnbalancedParenthesis,
    message_template: "unbalanced parenthesis: expected ')', found {found}",
};

pub static E0008: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0008",
    category: ErrorCategory::Lexer,
    kind: ErrorKind::InvalidValue,
    message_template: "float literal '{lexeme}' is out of range",
};

pub static E0009: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0009",
    category: ErrorCategory::Lexer,
    kind: ErrorKind::InvalidValue,
    message_template: "unknown escape sequence '\\{escape}'",
};

pub static E0010: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0010",
    category: ErrorCategory::Lexer,
    kind: ErrorKind::InvalidExpression,
    message_template: "expression nests deeper than {limit} levels",
};

/// E0xxx 错误码列表
pub static E0XXX: &[&ErrorCodeDefinition] = &[
    &E0001, &E0002, &E0003, &E0004, &E0005, &E0006, &E0007, &E0008, &E0009, &E0010,
];

impl ErrorCodeDefinition {
    /// E0001 期望的记号与实际不符
    pub fn unexpected_token(
        expected: &str,
        found: &str,
    ) -> DiagnosticBuilder {
        E0001
            .builder()
            .param("expected", expected)
            .param("found", found)
    }

    /// E0002 不匹配的右花括号
    pub fn unmatched_brace() -> DiagnosticBuilder {
        E0002.builder()
    }

    /// E0003 非法字符
    pub fn invalid_character(ch: &str) -> DiagnosticBuilder {
        E0003.builder().param("ch", ch)
    }

    /// E0004 未闭合的字符串
    pub fn unterminated_string() -> DiagnosticBuilder {
        E0004
            .builder()
            .help("add a closing '\"' to end the string")
    }

    /// E0005 整数字面量越界
    pub fn integer_out_of_range(lexeme: &str) -> DiagnosticBuilder {
        E0005
            .builder()
            .param("lexeme", lexeme)
            .help(format!("the largest integer is {}", i64::MAX))
    }

    /// E0006 缺少表达式
    pub fn expected_expression(found: &str) -> DiagnosticBuilder {
        E0006.builder().param("found", found)
    }

    /// E0007 括号不匹配
    pub fn unbalanced_parenthesis(found: &str) -> DiagnosticBuilder {
        E0007.builder().param("found", found)
    }

    /// E0008 浮点字面量越界
    pub fn float_out_of_range(lexeme: &str) -> DiagnosticBuilder {
        E0008.builder().param("lexeme", lexeme)
    }

    /// E0009 未知转义序列
    pub fn unknown_escape(escape: char) -> DiagnosticBuilder {
        E0009
            .builder()
            .param("escape", escape.to_string())
            .help("supported escapes are \\n \\t \\r \\0 \\\\ \\\" and \\#")
    }

    /// E0010 嵌套过深
    pub fn nesting_too_deep(limit: usize) -> DiagnosticBuilder {
        E0010
            .builder()
            .param("limit", limit.to_string())
            .help("split the expression into smaller parts")
    }
}
