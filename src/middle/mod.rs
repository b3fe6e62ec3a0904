//! Middle end
//!
//! Tree rewrites on the typed AST and bytecode generation.

pub mod codegen;
pub mod optimizer;

pub use codegen::{generate, CodeGenerator};
pub use optimizer::{Optimizer, OptimizerConfig};

#[cfg(test)]
mod tests;
