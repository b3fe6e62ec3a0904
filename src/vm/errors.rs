//! VM errors

use thiserror::Error;

/// VM result
pub type VMResult<T> = Result<T, VMError>;

/// VM errors
///
/// A correct compiler never produces bytecode that triggers these;
/// they guard against hand-built or corrupted chunks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VMError {
    #[error("Invalid opcode: {0:#04x}")]
    InvalidOpcode(u8),

    #[error("Stack underflow")]
    StackUnderflow,

    #[error("Stack overflow (capacity {0})")]
    StackOverflow(usize),

    #[error("Invalid operand")]
    InvalidOperand,

    #[error("Type error: {0}")]
    TypeError(String),

    #[error("Unexpected end of bytecode")]
    UnexpectedEnd,
}
