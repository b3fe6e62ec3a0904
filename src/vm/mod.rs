//! Virtual Machine and bytecode execution
//!
//! This module contains the bytecode format and the stack interpreter.

pub use chunk::{Chunk, ChunkError, Constant, LineRun};
pub use errors::{VMError, VMResult};
pub use executor::{VMConfig, VMStatus, VM};
pub use heap::{Heap, HeapStats, ObjRef, StrData, StrObject};
pub use opcode::Opcode;
pub use value::Value;

pub mod chunk;
pub mod disasm;
mod errors;
mod executor;
pub mod heap;
pub mod opcode;
pub mod value;

#[cfg(test)]
mod tests;
