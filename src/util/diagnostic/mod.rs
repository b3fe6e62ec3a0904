//! 统一诊断系统
//!
//! 编译期错误以结构化事件的形式产生（种类 + 位置 + 消息），
//! 终端渲染（颜色、插入符号、修复建议）由宿主负责。
//!
//! # 模块结构
//!
//! - [`error`] - 诊断数据结构 (Diagnostic, ErrorKind, Severity)
//! - [`codes`] - 错误码注册表与构建器
//! - [`collect`] - `Reporter` 接口与错误收集器
//!
//! # 示例
//!
//! ```
//! use neve::util::diagnostic::{ErrorCodeDefinition, ErrorCollector, Reporter};
//! use neve::util::span::Location;
//!
//! let mut collector = ErrorCollector::new("main.nv");
//! collector.report(
//!     ErrorCodeDefinition::type_mismatch("Bool", "Nil")
//!         .at(Location::new(1, 6, 2))
//!         .build(),
//! );
//! assert_eq!(collector.error_count(), 1);
//! ```

pub mod codes;
pub mod collect;
pub mod error;

// 重新导出
pub use codes::{DiagnosticBuilder, ErrorCategory, ErrorCodeDefinition};
pub use collect::{ErrorCollector, Reporter};
pub use error::{Diagnostic, ErrorKind, Severity};
