//! 错误码注册表
//!
//! 提供所有编译器错误码的集中定义和管理

pub mod e0xxx;
pub mod e1xxx;
pub mod e8xxx;

pub mod builder;
pub use builder::DiagnosticBuilder;

use crate::util::diagnostic::ErrorKind;
use once_cell::sync::Lazy;

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexer,     // E0xxx: 词法和语法分析
    TypeCheck, // E1xxx: 类型检查
    Internal,  // E8xxx: 内部编译器错误
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexer => write!(f, "Lexer"),
            ErrorCategory::TypeCheck => write!(f, "Type Check"),
            ErrorCategory::Internal => write!(f, "Internal"),
        }
    }
}

/// 错误码定义
#[derive(Debug, Clone, Copy)]
pub struct ErrorCodeDefinition {
    /// 错误码，如 "E1001"
    pub code: &'static str,
    /// 错误类别
    pub category: ErrorCategory,
    /// 错误种类（宿主据此分类）
    pub kind: ErrorKind,
    /// 消息模板，支持 {param} 占位符
    pub message_template: &'static str,
}

/// 完整的错误码注册表
static ERROR_CODES: Lazy<Vec<&'static ErrorCodeDefinition>> = Lazy::new(|| {
    let mut codes: Vec<&'static ErrorCodeDefinition> = Vec::new();

    // E0xxx: 词法和语法分析
    codes.extend(e0xxx::E0XXX.iter().copied());
    // E1xxx: 类型检查
    codes.extend(e1xxx::E1XXX.iter().copied());
    // E8xxx: 内部编译器错误
    codes.extend(e8xxx::E8XXX.iter().copied());

    codes
});

impl ErrorCodeDefinition {
    /// 根据代码查找错误码定义
    pub fn find(code: &str) -> Option<&'static Self> {
        ERROR_CODES.iter().copied().find(|c| c.code == code)
    }

    /// 获取所有错误码
    pub fn all() -> &'static [&'static Self] {
        &ERROR_CODES
    }

    /// 按类别获取错误码
    pub fn by_category(category: ErrorCategory) -> impl Iterator<Item = &'static Self> {
        ERROR_CODES
            .iter()
            .copied()
            .filter(move |c| c.category == category)
    }

    /// 创建 DiagnosticBuilder
    pub fn builder(&'static self) -> DiagnosticBuilder {
        DiagnosticBuilder::new(self)
    }
}
