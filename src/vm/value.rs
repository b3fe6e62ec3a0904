//! 运行时值
//!
//! 数字统一为 `f64`；整数运算（移位、位运算）先截断为 `i64`。
//! 这里的整数辅助函数同时被常量折叠使用，保证编译期与运行期结果一致。

use super::heap::ObjRef;

/// 运行时值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Nil,
    /// 堆对象（目前只有字符串）
    Obj(ObjRef),
}

impl Value {
    /// 类型名（用于错误消息）
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Nil => "nil",
            Value::Obj(_) => "string",
        }
    }

    /// `nil` 与 `false` 为假
    #[inline]
    pub fn is_falsy(&self) -> bool {
        matches!(self, Value::Nil | Value::Bool(false))
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// 整数运算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntOp {
    Shl,
    Shr,
    And,
    Xor,
    Or,
}

/// 执行整数运算
///
/// 移位量取低 6 位，左移按补码回绕，右移为算术右移。
pub fn int_binary(
    op: IntOp,
    a: i64,
    b: i64,
) -> i64 {
    let shift = (b & 63) as u32;
    match op {
        IntOp::Shl => a.wrapping_shl(shift),
        IntOp::Shr => a.wrapping_shr(shift),
        IntOp::And => a & b,
        IntOp::Xor => a ^ b,
        IntOp::Or => a | b,
    }
}

/// 把数字截断为整数（饱和转换，NaN 为 0）
#[inline]
pub fn to_int(n: f64) -> i64 {
    n as i64
}

/// 按 C 的 `%.14g` 格式化数字
pub fn format_number(n: f64) -> String {
    const PRECISION: i32 = 14;

    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // 指数取舍入到 14 位有效数字之后的值
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, n);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (PRECISION - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, n)).to_string()
    }
}

/// 去掉小数部分末尾的 0（以及孤立的小数点）
fn trim_fraction(text: &str) -> &str {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.')
}
