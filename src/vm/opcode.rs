//! 字节码操作码定义
//!
//! 栈式指令：除 `Const`/`ConstLong` 外所有指令都只有一个字节。
//!
//! 指令编码空间规划：
//! - 0x00-0x0F：常量与立即数
//! - 0x10-0x1F：一元运算与单操作数测试
//! - 0x20-0x2F：算术与字符串运算
//! - 0x30-0x3F：位运算
//! - 0x40-0x4F：比较运算
//! - 0xF0-0xFF：控制

use std::fmt;

/// 字节码操作码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    // =====================
    // 常量与立即数 (0x00-0x0F)
    // =====================
    /// 压入常量
    /// 操作数：const_idx (u8)
    Const = 0x00,

    /// 压入常量（长索引）
    /// 操作数：const_idx (u24，小端序)
    ConstLong = 0x01,

    True = 0x02,
    False = 0x03,
    Nil = 0x04,

    /// 压入 0
    Zero = 0x05,
    /// 压入 1
    One = 0x06,
    /// 压入 -1
    MinusOne = 0x07,

    // =====================
    // 一元运算 (0x10-0x1F)
    // =====================
    /// 取负
    Neg = 0x10,
    /// 逻辑非
    Not = 0x11,
    /// 栈顶是否为 nil
    IsNil = 0x12,
    /// 栈顶是否为 0
    IsZero = 0x13,
    /// 栈顶是否为 -1
    IsMinusOne = 0x14,

    // =====================
    // 算术与字符串 (0x20-0x2F)
    // =====================
    Add = 0x20,
    Sub = 0x21,
    Mul = 0x22,
    Div = 0x23,
    /// 字符串拼接：分配新的字符串对象
    Concat = 0x24,
    /// 将栈顶值转换为字符串对象
    Stringify = 0x25,

    // =====================
    // 位运算 (0x30-0x3F)
    // =====================
    Shl = 0x30,
    Shr = 0x31,
    BitAnd = 0x32,
    BitXor = 0x33,
    BitOr = 0x34,

    // =====================
    // 比较 (0x40-0x4F)
    // =====================
    Eq = 0x40,
    Neq = 0x41,
    Greater = 0x42,
    Less = 0x43,
    GreaterEq = 0x44,
    LessEq = 0x45,

    // =====================
    // 控制 (0xF0-0xFF)
    // =====================
    /// 弹出栈顶作为程序结果并结束
    Return = 0xF0,
}

impl Opcode {
    /// 获取操作码名称
    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Const => "Const",
            Opcode::ConstLong => "ConstLong",
            Opcode::True => "True",
            Opcode::False => "False",
            Opcode::Nil => "Nil",
            Opcode::Zero => "Zero",
            Opcode::One => "One",
            Opcode::MinusOne => "MinusOne",
            Opcode::Neg => "Neg",
            Opcode::Not => "Not",
            Opcode::IsNil => "IsNil",
            Opcode::IsZero => "IsZero",
            Opcode::IsMinusOne => "IsMinusOne",
            Opcode::Add => "Add",
            Opcode::Sub => "Sub",
            Opcode::Mul => "Mul",
            Opcode::Div => "Div",
            Opcode::Concat => "Concat",
            Opcode::Stringify => "Stringify",
            Opcode::Shl => "Shl",
            Opcode::Shr => "Shr",
            Opcode::BitAnd => "BitAnd",
            Opcode::BitXor => "BitXor",
            Opcode::BitOr => "BitOr",
            Opcode::Eq => "Eq",
            Opcode::Neq => "Neq",
            Opcode::Greater => "Greater",
            Opcode::Less => "Less",
            Opcode::GreaterEq => "GreaterEq",
            Opcode::LessEq => "LessEq",
            Opcode::Return => "Return",
        }
    }

    /// 操作数字节数
    pub fn operand_len(&self) -> usize {
        match self {
            Opcode::Const => 1,
            Opcode::ConstLong => 3,
            _ => 0,
        }
    }

    /// 弹出两个值、压入一个值的指令
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Opcode::Add
                | Opcode::Sub
                | Opcode::Mul
                | Opcode::Div
                | Opcode::Concat
                | Opcode::Shl
                | Opcode::Shr
                | Opcode::BitAnd
                | Opcode::BitXor
                | Opcode::BitOr
                | Opcode::Eq
                | Opcode::Neq
                | Opcode::Greater
                | Opcode::Less
                | Opcode::GreaterEq
                | Opcode::LessEq
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> u8 {
        op as u8
    }
}

/// 从字节值解码操作码
///
/// 无效字节返回原值
impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(Opcode::Const),
            0x01 => Ok(Opcode::ConstLong),
            0x02 => Ok(Opcode::True),
            0x03 => Ok(Opcode::False),
            0x04 => Ok(Opcode::Nil),
            0x05 => Ok(Opcode::Zero),
            0x06 => Ok(Opcode::One),
            0x07 => Ok(Opcode::MinusOne),
            0x10 => Ok(Opcode::Neg),
            0x11 => Ok(Opcode::Not),
            0x12 => Ok(Opcode::IsNil),
            0x13 => Ok(Opcode::IsZero),
            0x14 => Ok(Opcode::IsMinusOne),
            0x20 => Ok(Opcode::Add),
            0x21 => Ok(Opcode::Sub),
            0x22 => Ok(Opcode::Mul),
            0x23 => Ok(Opcode::Div),
            0x24 => Ok(Opcode::Concat),
            0x25 => Ok(Opcode::Stringify),
            0x30 => Ok(Opcode::Shl),
            0x31 => Ok(Opcode::Shr),
            0x32 => Ok(Opcode::BitAnd),
            0x33 => Ok(Opcode::BitXor),
            0x34 => Ok(Opcode::BitOr),
            0x40 => Ok(Opcode::Eq),
            0x41 => Ok(Opcode::Neq),
            0x42 => Ok(Opcode::Greater),
            0x43 => Ok(Opcode::Less),
            0x44 => Ok(Opcode::GreaterEq),
            0x45 => Ok(Opcode::LessEq),
            0xF0 => Ok(Opcode::Return),
            other => Err(other),
        }
    }
}
