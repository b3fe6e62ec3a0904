//! 字节码块
//!
//! 字节码缓冲区 + 常量池 + 行号表。行号表按游程编码：
//! 只有当行号与上一条记录不同时才追加，因此偏移量严格递增，
//! 可以直接二分查找。

use super::opcode::Opcode;
use std::borrow::Cow;
use std::fmt;

/// 常量池上限（三字节索引）
pub const MAX_CONSTANTS: usize = 1 << 24;

/// 单字节索引能寻址的最大常量下标
pub const SHORT_CONSTANT_MAX: usize = u8::MAX as usize;

/// 常量池中的值
#[derive(Debug, Clone, PartialEq)]
pub enum Constant<'src> {
    Number(f64),
    Bool(bool),
    Nil,
    /// 字面量借用源码，折叠产生的字符串自有
    Str(Cow<'src, str>),
}

impl fmt::Display for Constant<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Constant::Number(n) => f.write_str(&super::value::format_number(*n)),
            Constant::Bool(b) => write!(f, "{}", b),
            Constant::Nil => f.write_str("nil"),
            Constant::Str(s) => write!(f, "{:?}", s),
        }
    }
}

/// 行号表中的一段：从 `offset` 开始的字节都来自 `line`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun {
    pub offset: usize,
    pub line: usize,
}

/// 字节码块错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkError {
    #[error("Too many constants in one chunk (limit {limit})")]
    TooManyConstants { limit: usize },
}

/// 字节码块
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk<'src> {
    /// 字节码
    code: Vec<u8>,
    /// 常量池（只追加）
    constants: Vec<Constant<'src>>,
    /// 行号游程
    lines: Vec<LineRun>,
}

impl<'src> Chunk<'src> {
    /// 创建空字节码块
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个字节
    pub fn write(
        &mut self,
        byte: u8,
        line: usize,
    ) {
        if self.lines.last().map(|run| run.line) != Some(line) {
            self.lines.push(LineRun {
                offset: self.code.len(),
                line,
            });
        }
        self.code.push(byte);
    }

    /// 追加一条无操作数指令
    #[inline]
    pub fn write_op(
        &mut self,
        op: Opcode,
        line: usize,
    ) {
        self.write(op.into(), line);
    }

    /// 添加常量并返回下标
    pub fn add_constant(
        &mut self,
        constant: Constant<'src>,
    ) -> Result<usize, ChunkError> {
        if self.constants.len() >= MAX_CONSTANTS {
            return Err(ChunkError::TooManyConstants {
                limit: MAX_CONSTANTS,
            });
        }
        self.constants.push(constant);
        Ok(self.constants.len() - 1)
    }

    /// 添加常量并发射加载指令
    ///
    /// 下标不超过 255 时使用 `Const idx`，否则使用
    /// `ConstLong b0 b1 b2`（小端序）。编码由块决定，调用方无需关心。
    pub fn write_constant(
        &mut self,
        constant: Constant<'src>,
        line: usize,
    ) -> Result<usize, ChunkError> {
        let index = self.add_constant(constant)?;

        if index <= SHORT_CONSTANT_MAX {
            self.write_op(Opcode::Const, line);
            self.write(index as u8, line);
        } else {
            self.write_op(Opcode::ConstLong, line);
            for byte in &index.to_le_bytes()[..3] {
                self.write(*byte, line);
            }
        }
        Ok(index)
    }

    /// 解码 `offset` 处加载指令的常量下标
    ///
    /// `offset` 指向操作码本身。
    pub fn constant_index_at(
        &self,
        offset: usize,
    ) -> Option<usize> {
        match Opcode::try_from(*self.code.get(offset)?).ok()? {
            Opcode::Const => self.code.get(offset + 1).map(|&b| b as usize),
            Opcode::ConstLong => {
                let bytes = self.code.get(offset + 1..offset + 4)?;
                Some(bytes[0] as usize | (bytes[1] as usize) << 8 | (bytes[2] as usize) << 16)
            }
            _ => None,
        }
    }

    /// 查找字节所在的源码行
    pub fn get_line(
        &self,
        offset: usize,
    ) -> Option<usize> {
        if offset >= self.code.len() {
            return None;
        }
        let next = self.lines.partition_point(|run| run.offset <= offset);
        next.checked_sub(1).map(|i| self.lines[i].line)
    }

    #[inline]
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    #[inline]
    pub fn constants(&self) -> &[Constant<'src>] {
        &self.constants
    }

    #[inline]
    pub fn constant(
        &self,
        index: usize,
    ) -> Option<&Constant<'src>> {
        self.constants.get(index)
    }

    #[inline]
    pub fn lines(&self) -> &[LineRun] {
        &self.lines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.code.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}
