//! 诊断数据结构
//!
//! 提供统一的错误报告机制
//!
//! # 设计原则
//!
//! - `Diagnostic` 的 `message` 在构建时已渲染完成，宿主只负责展示
//! - **只允许通过 `DiagnosticBuilder` 创建诊断**，所有错误码必须在注册表中注册
//! - 诊断不依赖任何终端格式化细节（颜色、插入符号由外部渲染器负责）

use crate::util::span::Location;
use serde::Serialize;

/// 诊断严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    /// 检查是否为错误级别
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// Kind tag of a compile-time error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Syntax,
    InvalidCharacter,
    UnterminatedString,
    IntegerOutOfRange,
    UnapplicableOperator,
    InvalidExpression,
    UnbalancedParenthesis,
    InvalidValue,
    TooManyConstants,
}

impl ErrorKind {
    /// Stable kebab-case name
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax",
            ErrorKind::InvalidCharacter => "invalid-character",
            ErrorKind::UnterminatedString => "unterminated-string",
            ErrorKind::IntegerOutOfRange => "integer-out-of-range",
            ErrorKind::UnapplicableOperator => "unapplicable-operator",
            ErrorKind::InvalidExpression => "invalid-expression",
            ErrorKind::UnbalancedParenthesis => "unbalanced-parenthesis",
            ErrorKind::InvalidValue => "invalid-value",
            ErrorKind::TooManyConstants => "too-many-constants",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 诊断信息（message 已渲染完成）
///
/// **不可直接构造**。必须通过 `DiagnosticBuilder::build()` 创建，
/// 确保所有错误码都经过注册表验证。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// 严重级别
    pub severity: Severity,
    /// 错误种类
    pub kind: ErrorKind,
    /// 错误码
    pub code: &'static str,
    /// 完整消息
    pub message: String,
    /// 帮助信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// 位置信息
    pub location: Location,
    /// 相关诊断
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<Diagnostic>,
}

impl Diagnostic {
    /// 创建错误诊断
    ///
    /// `pub(crate)`: 仅由 `DiagnosticBuilder::build()` 调用。
    pub(crate) fn error(
        kind: ErrorKind,
        code: &'static str,
        message: String,
        location: Location,
    ) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            code,
            message,
            help: None,
            location,
            related: Vec::new(),
        }
    }

    /// 创建附属说明
    pub(crate) fn note(
        kind: ErrorKind,
        code: &'static str,
        message: String,
        location: Location,
    ) -> Self {
        Self {
            severity: Severity::Note,
            ..Self::error(kind, code, message, location)
        }
    }

    /// Is this an error (as opposed to a note)
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}[{}]: {} at {}",
            self.severity, self.code, self.message, self.location
        )
    }
}
