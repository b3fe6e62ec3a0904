//! 编译器
//!
//! 解析 → 优化 → 生成字节码。所有错误都通过 [`Reporter`] 报告，
//! 只有无错误时才产生字节码块。

use super::config::CompilerConfig;
use super::parser;
use crate::middle::{codegen, Optimizer};
use crate::util::diagnostic::{Diagnostic, ErrorCodeDefinition, ErrorCollector, Reporter};
use crate::vm::{Chunk, ChunkError};
use tracing::debug;

/// 编译器
///
/// # 示例
///
/// ```
/// use neve::frontend::Compiler;
///
/// let compilation = Compiler::new().compile("1 + 2 * 3", "main.nv");
/// assert_eq!(compilation.error_count(), 0);
/// assert!(compilation.chunk.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用配置创建编译器
    #[inline]
    pub fn with_config(config: CompilerConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// 编译源码，收集全部诊断
    pub fn compile<'src>(
        &self,
        source: &'src str,
        file: &str,
    ) -> Compilation<'src> {
        let mut collector = ErrorCollector::new(file);
        let chunk = self.compile_with_reporter(source, &mut collector);
        Compilation {
            file: collector.file().to_string(),
            chunk,
            diagnostics: collector.into_diagnostics(),
        }
    }

    /// 编译源码，诊断交给调用者提供的 `reporter`
    ///
    /// 有任何错误时返回 `None`。
    pub fn compile_with_reporter<'src>(
        &self,
        source: &'src str,
        reporter: &mut dyn Reporter,
    ) -> Option<Chunk<'src>> {
        debug!("Compiling {} bytes", source.len());

        let output = parser::parse(source, reporter);
        if output.has_errors() {
            debug!("Compilation stopped after {} errors", output.error_count);
            return None;
        }

        let root = Optimizer::new(self.config.optimizer).optimize(output.root);
        match codegen::generate(&root) {
            Ok(chunk) => Some(chunk),
            Err(ChunkError::TooManyConstants { limit }) => {
                reporter.report(
                    ErrorCodeDefinition::too_many_constants(limit)
                        .at(root.full_location())
                        .build(),
                );
                None
            }
        }
    }
}

/// 一次编译的结果
#[derive(Debug, Clone)]
pub struct Compilation<'src> {
    /// 源文件名
    pub file: String,
    /// 无错误时的字节码
    pub chunk: Option<Chunk<'src>>,
    /// 按报告顺序排列的诊断
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation<'_> {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn is_success(&self) -> bool {
        self.chunk.is_some()
    }

    /// 诊断的 JSON 表示
    pub fn diagnostics_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.diagnostics)
    }
}
