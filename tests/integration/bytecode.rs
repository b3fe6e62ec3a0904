//! Emitted bytecode: determinism, line table, constant pool

use neve::vm::disasm::disassemble;
use neve::vm::Constant;
use neve::vm::opcode::Opcode;
use neve::{compile, run, Compiler, CompilerConfig};

#[test]
fn test_compilation_is_deterministic() {
    let source = "\"v=#{1 + 2 * 3}\" + \"!\" == \"v=7!\"";
    let first = compile(source, "a.nv").chunk.unwrap();
    let second = compile(source, "b.nv").chunk.unwrap();
    assert_eq!(first, second);
    assert_eq!(disassemble(&first, "x"), disassemble(&second, "x"));
}

#[test]
fn test_line_table() {
    let compiler = Compiler::with_config(CompilerConfig::unoptimized());
    let chunk = compiler.compile("1 +\n2 *\n3", "lines.nv").chunk.unwrap();

    // Every byte maps to a line that exists in the source
    for offset in 0..chunk.len() {
        let line = chunk.get_line(offset).unwrap();
        assert!((1..=3).contains(&line));
    }
    assert_eq!(chunk.get_line(chunk.len()), None);

    let listing = disassemble(&chunk, "lines");
    assert!(listing.starts_with("== lines ==\n0000    1 One\n"));
}

#[test]
fn test_constant_pool_encoding() {
    let source = (2..302).map(|i| i.to_string()).collect::<Vec<_>>().join(" + ");
    let compiler = Compiler::with_config(CompilerConfig::unoptimized());
    let chunk = compiler.compile(&source, "pool.nv").chunk.unwrap();
    assert_eq!(chunk.constants().len(), 300);

    let mut offset = 0;
    let mut seen = Vec::new();
    while offset < chunk.len() {
        let op = Opcode::try_from(chunk.code()[offset]).unwrap();
        if let Some(index) = chunk.constant_index_at(offset) {
            let expected = if index <= 255 {
                Opcode::Const
            } else {
                Opcode::ConstLong
            };
            assert_eq!(op, expected);
            seen.push(index);
        }
        offset += 1 + op.operand_len();
    }
    assert_eq!(seen, (0..300).collect::<Vec<_>>());

    // sum of 2..=301
    assert_eq!(run(&source).unwrap(), "45450");
}

#[test]
fn test_optimized_chunk_is_smaller() {
    let source = "1 + 2 * 3 - 4";
    let plain = Compiler::with_config(CompilerConfig::unoptimized())
        .compile(source, "t.nv")
        .chunk
        .unwrap();
    let folded = compile(source, "t.nv").chunk.unwrap();
    assert!(folded.len() < plain.len());
    assert_eq!(folded.constants(), &[Constant::Number(3.0)]);
    assert_eq!(
        folded.code(),
        &[u8::from(Opcode::Const), 0, u8::from(Opcode::Return)]
    );
}
