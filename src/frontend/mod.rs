//! Frontend compilation pipeline
//!
//! Source text goes through the lexer and the typing parser, then the
//! middle end rewrites the tree and emits a bytecode chunk.

pub mod compiler;
pub mod config;
pub mod lexer;
pub mod parser;
pub mod types;

pub use compiler::{Compilation, Compiler};
pub use config::CompilerConfig;
