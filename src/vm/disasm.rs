//! 反汇编器
//!
//! 每行一条指令：偏移、行号（与上一字节同行时显示 `|`）、指令名、操作数。

use super::chunk::Chunk;
use super::opcode::Opcode;
use std::fmt::Write;

/// 反汇编整个字节码块
pub fn disassemble(
    chunk: &Chunk<'_>,
    name: &str,
) -> String {
    let mut out = format!("== {} ==\n", name);
    let mut offset = 0;
    while offset < chunk.len() {
        offset = disassemble_instruction(chunk, offset, &mut out);
    }
    out
}

/// 反汇编一条指令，追加到 `out`，返回下一条指令的偏移
pub fn disassemble_instruction(
    chunk: &Chunk<'_>,
    offset: usize,
    out: &mut String,
) -> usize {
    let _ = write!(out, "{:04} ", offset);

    let line = chunk.get_line(offset);
    let previous = offset.checked_sub(1).and_then(|prev| chunk.get_line(prev));
    match line {
        Some(line) if previous != Some(line) => {
            let _ = write!(out, "{:>4} ", line);
        }
        _ => out.push_str("   | "),
    }

    let Some(&byte) = chunk.code().get(offset) else {
        out.push_str("<end>\n");
        return offset + 1;
    };

    match Opcode::try_from(byte) {
        Ok(op @ (Opcode::Const | Opcode::ConstLong)) => {
            match chunk
                .constant_index_at(offset)
                .and_then(|index| chunk.constant(index).map(|c| (index, c)))
            {
                Some((index, constant)) => {
                    let _ = writeln!(out, "{:<10} {:>4} '{}'", op.name(), index, constant);
                }
                None => {
                    let _ = writeln!(out, "{:<10} <bad operand>", op.name());
                }
            }
            offset + 1 + op.operand_len()
        }
        Ok(op) => {
            let _ = writeln!(out, "{}", op.name());
            offset + 1
        }
        Err(byte) => {
            let _ = writeln!(out, "Unknown {:#04x}", byte);
            offset + 1
        }
    }
}
