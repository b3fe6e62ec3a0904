//! 错误码定义
//!
//! E1xxx: 类型检查阶段的错误码

use super::{DiagnosticBuilder, ErrorCategory, ErrorCodeDefinition};
use crate::util::diagnostic::ErrorKind;

pub static E1001: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E1001",
    category: ErrorCategory::TypeCheck,
    kind: ErrorKind::UnapplicableOperator,
    message_template: "operator '{op}' cannot be applied to '{left}' and '{right}'",
};

pub static E1002: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E1002",
    category: ErrorCategory::TypeCheck,
    kind: ErrorKind::UnapplicableOperator,
    message_template: "operator '{op}' cannot be applied to '{operand}'",
};

pub static E1003: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E1003",
    category: ErrorCategory::TypeCheck,
    kind: ErrorKind::UnapplicableOperator,
    message_template: "types do not match: cannot compare '{left}' with '{right}'",
};

/// E1xxx 错误码列表
pub static E1XXX: &[&ErrorCodeDefinition] = &[&E1001, &E1002, &E1003];

impl ErrorCodeDefinition {
    /// E1001 二元运算符不适用于操作数类型
    pub fn unapplicable_binary(
        op: &str,
        left: &str,
        right: &str,
    ) -> DiagnosticBuilder {
        E1001
            .builder()
            .param("op", op)
            .param("left", left)
            .param("right", right)
    }

    /// E1002 一元运算符不适用于操作数类型
    pub fn unapplicable_unary(
        op: &str,
        operand: &str,
    ) -> DiagnosticBuilder {
        E1002.builder().param("op", op).param("operand", operand)
    }

    /// E1003 相等比较两侧类型不一致
    pub fn type_mismatch(
        left: &str,
        right: &str,
    ) -> DiagnosticBuilder {
        E1003
            .builder()
            .param("left", left)
            .param("right", right)
            .help("values of different types are never equal; compare values of the same type")
    }
}
