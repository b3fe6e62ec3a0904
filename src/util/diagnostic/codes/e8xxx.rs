//! 错误码定义
//!
//! E8xxx: 内部编译器错误

use super::{DiagnosticBuilder, ErrorCategory, ErrorCodeDefinition};
use crate::util::diagnostic::ErrorKind;

pub static E8001: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E8001",
    category: ErrorCategory::Internal,
    kind: ErrorKind::TooManyConstants,
    message_template: "too many constants in one chunk (limit {limit})",
};

/// E8xxx 错误码列表
pub static E8XXX: &[&ErrorCodeDefinition] = &[&E8001];

impl ErrorCodeDefinition {
    /// E8001 常量池溢出
    pub fn too_many_constants(limit: usize) -> DiagnosticBuilder {
        E8001.builder().param("limit", limit.to_string())
    }
}
