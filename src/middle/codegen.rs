//! 字节码生成
//!
//! 后序遍历语法树，把每个节点翻译为栈指令：先子节点，后运算符。
//! 每条指令记录其所在的源码行，最后追加 `Return`。

use crate::frontend::parser::ast::{BinaryOp, Node, NodeKind, UnaryOp};
use crate::frontend::types::TypeKind;
use crate::vm::chunk::{Chunk, ChunkError, Constant};
use crate::vm::opcode::Opcode;
use tracing::debug;

/// 把语法树翻译为字节码块
///
/// 树必须来自一次无错误的解析。
pub fn generate<'src>(root: &Node<'src>) -> Result<Chunk<'src>, ChunkError> {
    let mut generator = CodeGenerator::new();
    generator.expression(root)?;
    generator.chunk.write_op(Opcode::Return, root.loc.line);

    debug!(
        "Generated {} bytes, {} constants",
        generator.chunk.len(),
        generator.chunk.constants().len()
    );
    Ok(generator.chunk)
}

/// 代码生成器
#[derive(Debug, Default)]
pub struct CodeGenerator<'src> {
    chunk: Chunk<'src>,
}

impl<'src> CodeGenerator<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已生成的字节码
    pub fn chunk(&self) -> &Chunk<'src> {
        &self.chunk
    }

    pub fn into_chunk(self) -> Chunk<'src> {
        self.chunk
    }

    /// 生成一个表达式的指令，结果留在栈顶
    pub fn expression(
        &mut self,
        node: &Node<'src>,
    ) -> Result<(), ChunkError> {
        let line = node.loc.line;
        match &node.kind {
            NodeKind::Int(i) => self.number(*i as f64, line)?,
            NodeKind::Float(f) => self.number(*f, line)?,
            NodeKind::Bool(true) => self.chunk.write_op(Opcode::True, line),
            NodeKind::Bool(false) => self.chunk.write_op(Opcode::False, line),
            NodeKind::Nil => self.chunk.write_op(Opcode::Nil, line),
            NodeKind::Str(text) => {
                self.chunk.write_constant(Constant::Str(text.clone()), line)?;
            }
            NodeKind::Unary { op, operand } => {
                self.expression(operand)?;
                self.chunk.write_op(unary_opcode(*op), line);
            }
            NodeKind::Binary { op, left, right } => {
                self.expression(left)?;
                self.expression(right)?;
                let concat = *op == BinaryOp::Add
                    && left.ty.kind == TypeKind::Str
                    && right.ty.kind == TypeKind::Str;
                let opcode = if concat {
                    Opcode::Concat
                } else {
                    binary_opcode(*op)
                };
                self.chunk.write_op(opcode, line);
            }
            NodeKind::Interpolation { parts } => self.interpolation(parts, line)?,
        }
        Ok(())
    }

    /// `-1`、`+0`、`1` 有专用指令，其余数字进常量池
    fn number(
        &mut self,
        n: f64,
        line: usize,
    ) -> Result<(), ChunkError> {
        if n == -1.0 {
            self.chunk.write_op(Opcode::MinusOne, line);
        } else if n == 0.0 && n.is_sign_positive() {
            self.chunk.write_op(Opcode::Zero, line);
        } else if n == 1.0 {
            self.chunk.write_op(Opcode::One, line);
        } else {
            self.chunk.write_constant(Constant::Number(n), line)?;
        }
        Ok(())
    }

    /// 每个片段转为字符串后依次拼接
    fn interpolation(
        &mut self,
        parts: &[Node<'src>],
        line: usize,
    ) -> Result<(), ChunkError> {
        if parts.is_empty() {
            self.chunk.write_constant(Constant::Str("".into()), line)?;
            return Ok(());
        }
        for (i, part) in parts.iter().enumerate() {
            self.expression(part)?;
            if part.ty.kind != TypeKind::Str {
                self.chunk.write_op(Opcode::Stringify, part.loc.line);
            }
            if i > 0 {
                self.chunk.write_op(Opcode::Concat, line);
            }
        }
        Ok(())
    }
}

fn unary_opcode(op: UnaryOp) -> Opcode {
    match op {
        UnaryOp::Neg => Opcode::Neg,
        UnaryOp::Not => Opcode::Not,
        UnaryOp::IsNil => Opcode::IsNil,
        UnaryOp::IsZero => Opcode::IsZero,
        UnaryOp::IsNegOne => Opcode::IsMinusOne,
    }
}

fn binary_opcode(op: BinaryOp) -> Opcode {
    match op {
        BinaryOp::Add => Opcode::Add,
        BinaryOp::Sub => Opcode::Sub,
        BinaryOp::Mul => Opcode::Mul,
        BinaryOp::Div => Opcode::Div,
        BinaryOp::Shl => Opcode::Shl,
        BinaryOp::Shr => Opcode::Shr,
        BinaryOp::BitAnd => Opcode::BitAnd,
        BinaryOp::BitXor => Opcode::BitXor,
        BinaryOp::BitOr => Opcode::BitOr,
        BinaryOp::Eq => Opcode::Eq,
        BinaryOp::Neq => Opcode::Neq,
        BinaryOp::Less => Opcode::Less,
        BinaryOp::LessEq => Opcode::LessEq,
        BinaryOp::Greater => Opcode::Greater,
        BinaryOp::GreaterEq => Opcode::GreaterEq,
    }
}
