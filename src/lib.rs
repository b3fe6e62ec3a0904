//! Neve expression language
//!
//! A small expression language compiled to bytecode for a stack machine:
//! lexer, typing parser with error recovery, tree optimizer, bytecode
//! emitter and virtual machine.
//!
//! # Example
//!
//! ```
//! assert_eq!(neve::run("1 + 2 * 3").unwrap(), "7");
//! assert_eq!(neve::run("\"a\" + \"b\"").unwrap(), "ab");
//! ```

#![warn(rust_2018_idioms)]

pub mod frontend;
pub mod middle;
pub mod util;
pub mod vm;

// Re-exports
pub use anyhow::{Context, Result};
pub use frontend::{Compilation, Compiler, CompilerConfig};
pub use vm::{Chunk, VMConfig, VMError, VM};

use tracing::debug;
use util::config::PipelineConfig;

/// Language version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Language name
pub const NAME: &str = "Neve";

/// Result of executing a compiled chunk
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    /// The formatted result value
    Ok { output: String },
    /// The VM stopped on malformed bytecode
    RuntimeError(VMError),
}

impl ExecutionOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ExecutionOutcome::Ok { .. })
    }
}

/// Compile source text with the default configuration
pub fn compile<'src>(
    source: &'src str,
    file: &str,
) -> Compilation<'src> {
    Compiler::new().compile(source, file)
}

/// Execute a chunk on a fresh VM with the default configuration
pub fn interpret(chunk: &Chunk<'_>) -> ExecutionOutcome {
    interpret_with_config(chunk, VMConfig::default())
}

/// Execute a chunk on a fresh VM
pub fn interpret_with_config(
    chunk: &Chunk<'_>,
    config: VMConfig,
) -> ExecutionOutcome {
    let mut vm = VM::new_with_config(config);
    let outcome = match vm.interpret(chunk) {
        Ok(value) => ExecutionOutcome::Ok {
            output: vm.display(value),
        },
        Err(e) => ExecutionOutcome::RuntimeError(e),
    };
    let stats = vm.shutdown();
    debug!(
        "Heap released: {} allocated, {} released",
        stats.allocated, stats.released
    );
    outcome
}

/// Compile and run source text, returning the formatted result
///
/// Compile errors are summarized into the error message; use
/// [`compile`] to inspect individual diagnostics.
pub fn run(source: &str) -> Result<String> {
    run_with_config(source, &PipelineConfig::default())
}

/// Compile and run source text under a pipeline configuration
pub fn run_with_config(
    source: &str,
    config: &PipelineConfig,
) -> Result<String> {
    let compilation = Compiler::with_config(config.compiler).compile(source, "<input>");
    let Some(chunk) = compilation.chunk.as_ref() else {
        let messages: Vec<String> = compilation
            .diagnostics
            .iter()
            .map(|d| d.to_string())
            .collect();
        anyhow::bail!(
            "{} compile error(s):\n{}",
            compilation.error_count(),
            messages.join("\n")
        );
    };

    match interpret_with_config(chunk, config.vm.clone()) {
        ExecutionOutcome::Ok { output } => Ok(output),
        ExecutionOutcome::RuntimeError(e) => Err(e).context("Runtime error"),
    }
}

/// Read a source file and run it
pub fn run_file(path: &std::path::Path) -> Result<String> {
    let file = util::span::SourceFile::load(path)?;
    run(&file.content)
}

/// Read a pipeline configuration file
pub fn load_config(path: &std::path::Path) -> Result<PipelineConfig> {
    PipelineConfig::load(path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}
