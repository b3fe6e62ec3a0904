//! Virtual Machine executor
//!
//! 栈式字节码解释器：取指、解码、执行，直到 `Return`。

use crate::vm::chunk::{Chunk, Constant};
use crate::vm::disasm;
use crate::vm::errors::{VMError, VMResult};
use crate::vm::heap::{Heap, HeapStats, ObjRef};
use crate::vm::opcode::Opcode;
use crate::vm::value::{format_number, int_binary, to_int, IntOp, Value};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// 栈的内联容量，超出后溢出到堆上
const INLINE_STACK: usize = 64;

/// VM 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VMConfig {
    /// 操作数栈最大深度
    pub stack_size: usize,
    /// 是否启用跟踪（每条指令一条 trace 日志）
    pub trace_execution: bool,
    /// `Return` 时是否把结果打印到标准输出
    pub echo_result: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            stack_size: 256,
            trace_execution: false,
            echo_result: false,
        }
    }
}

/// VM 状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMStatus {
    Ready,
    Running,
    Finished,
    Error,
}

/// 虚拟机
///
/// `'a` 是被执行字节码块的借用期：常量池里的字符串以借用方式登记到堆中。
pub struct VM<'a> {
    /// 配置
    config: VMConfig,
    /// 状态
    status: VMStatus,
    /// 操作数栈
    stack: SmallVec<[Value; INLINE_STACK]>,
    /// 堆对象表
    heap: Heap<'a>,
}

impl Default for VM<'_> {
    fn default() -> Self {
        Self::new_with_config(VMConfig::default())
    }
}

impl<'a> VM<'a> {
    /// 使用默认配置创建 VM
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用配置创建 VM
    pub fn new_with_config(config: VMConfig) -> Self {
        Self {
            config,
            status: VMStatus::Ready,
            stack: SmallVec::new(),
            heap: Heap::new(),
        }
    }

    /// 获取 VM 状态
    pub fn status(&self) -> VMStatus {
        self.status
    }

    pub fn config(&self) -> &VMConfig {
        &self.config
    }

    /// 堆对象表
    pub fn heap(&self) -> &Heap<'a> {
        &self.heap
    }

    /// 执行字节码块，返回 `Return` 弹出的值
    ///
    /// 返回值中的字符串对象在 VM 关闭前一直有效。
    pub fn interpret(
        &mut self,
        chunk: &'a Chunk<'_>,
    ) -> VMResult<Value> {
        debug!(
            "VM start: {} bytes, {} constants",
            chunk.len(),
            chunk.constants().len()
        );
        self.status = VMStatus::Running;
        self.stack.clear();

        let result = self.run(chunk);
        match &result {
            Ok(_) => {
                self.status = VMStatus::Finished;
                debug!("VM finished, {} heap objects", self.heap.len());
            }
            Err(e) => {
                self.status = VMStatus::Error;
                debug!("VM error: {}", e);
            }
        }
        result
    }

    /// 把值转换为文本（数字按 `%.14g`）
    pub fn display(
        &self,
        value: Value,
    ) -> String {
        match value {
            Value::Number(n) => format_number(n),
            Value::Bool(b) => b.to_string(),
            Value::Nil => "nil".to_string(),
            Value::Obj(obj) => self
                .heap
                .get(obj)
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| "<released>".to_string()),
        }
    }

    /// 关闭 VM，释放全部堆对象
    pub fn shutdown(mut self) -> HeapStats {
        self.stack.clear();
        self.heap.release_all();
        self.heap.stats()
    }

    fn run(
        &mut self,
        chunk: &'a Chunk<'_>,
    ) -> VMResult<Value> {
        let objects = self.load_string_constants(chunk);
        let code = chunk.code();
        let mut ip = 0;

        loop {
            if self.config.trace_execution {
                self.trace_state(chunk, ip);
            }

            let byte = *code.get(ip).ok_or(VMError::UnexpectedEnd)?;
            let op = Opcode::try_from(byte).map_err(VMError::InvalidOpcode)?;
            ip += 1;

            match op {
                Opcode::Const | Opcode::ConstLong => {
                    let index = chunk
                        .constant_index_at(ip - 1)
                        .ok_or(VMError::UnexpectedEnd)?;
                    ip += op.operand_len();
                    let value = self.constant_value(chunk, &objects, index)?;
                    self.push(value)?;
                }
                Opcode::True => self.push(Value::Bool(true))?,
                Opcode::False => self.push(Value::Bool(false))?,
                Opcode::Nil => self.push(Value::Nil)?,
                Opcode::Zero => self.push(Value::Number(0.0))?,
                Opcode::One => self.push(Value::Number(1.0))?,
                Opcode::MinusOne => self.push(Value::Number(-1.0))?,

                Opcode::Neg => {
                    let n = self.peek_number(op)?;
                    self.replace_top(Value::Number(-n))?;
                }
                Opcode::Not => {
                    let top = self.peek()?;
                    self.replace_top(Value::Bool(top.is_falsy()))?;
                }
                Opcode::IsNil => {
                    let top = self.peek()?;
                    self.replace_top(Value::Bool(top == Value::Nil))?;
                }
                Opcode::IsZero => {
                    let n = self.peek_number(op)?;
                    self.replace_top(Value::Bool(n == 0.0))?;
                }
                Opcode::IsMinusOne => {
                    let n = self.peek_number(op)?;
                    self.replace_top(Value::Bool(n == -1.0))?;
                }

                Opcode::Add => self.arithmetic(op, |a, b| a + b)?,
                Opcode::Sub => self.arithmetic(op, |a, b| a - b)?,
                Opcode::Mul => self.arithmetic(op, |a, b| a * b)?,
                Opcode::Div => self.arithmetic(op, |a, b| a / b)?,

                Opcode::Concat => {
                    let b = self.pop_string(op)?;
                    let a = self.pop_string(op)?;
                    let obj = self.heap.alloc_owned(a + &b);
                    self.push(Value::Obj(obj))?;
                }
                Opcode::Stringify => {
                    let value = self.pop()?;
                    let obj = match value {
                        Value::Obj(obj) => obj,
                        other => {
                            let text = self.display(other);
                            self.heap.alloc_owned(text)
                        }
                    };
                    self.push(Value::Obj(obj))?;
                }

                Opcode::Shl => self.integer(op, IntOp::Shl)?,
                Opcode::Shr => self.integer(op, IntOp::Shr)?,
                Opcode::BitAnd => self.integer(op, IntOp::And)?,
                Opcode::BitXor => self.integer(op, IntOp::Xor)?,
                Opcode::BitOr => self.integer(op, IntOp::Or)?,

                Opcode::Eq | Opcode::Neq => {
                    let b = self.pop()?;
                    let a = self.pop()?;
                    let equal = self.values_equal(a, b);
                    self.push(Value::Bool(equal == (op == Opcode::Eq)))?;
                }
                Opcode::Greater => self.comparison(op, |a, b| a > b)?,
                Opcode::Less => self.comparison(op, |a, b| a < b)?,
                Opcode::GreaterEq => self.comparison(op, |a, b| a >= b)?,
                Opcode::LessEq => self.comparison(op, |a, b| a <= b)?,

                Opcode::Return => {
                    let result = self.pop()?;
                    if self.config.echo_result {
                        println!("{}", self.display(result));
                    }
                    return Ok(result);
                }
            }
        }
    }

    /// 为常量池中的每个字符串登记一个借用对象
    fn load_string_constants(
        &mut self,
        chunk: &'a Chunk<'_>,
    ) -> Vec<Option<ObjRef>> {
        chunk
            .constants()
            .iter()
            .map(|constant| match constant {
                Constant::Str(text) => Some(self.heap.alloc_borrowed(text)),
                _ => None,
            })
            .collect()
    }

    fn constant_value(
        &self,
        chunk: &Chunk<'_>,
        objects: &[Option<ObjRef>],
        index: usize,
    ) -> VMResult<Value> {
        match chunk.constant(index).ok_or(VMError::InvalidOperand)? {
            Constant::Number(n) => Ok(Value::Number(*n)),
            Constant::Bool(b) => Ok(Value::Bool(*b)),
            Constant::Nil => Ok(Value::Nil),
            Constant::Str(_) => objects
                .get(index)
                .copied()
                .flatten()
                .map(Value::Obj)
                .ok_or(VMError::InvalidOperand),
        }
    }

    fn values_equal(
        &self,
        a: Value,
        b: Value,
    ) -> bool {
        match (a, b) {
            (Value::Obj(x), Value::Obj(y)) => {
                x == y
                    || matches!(
                        (self.heap.get(x), self.heap.get(y)),
                        (Some(x), Some(y)) if x.as_str() == y.as_str()
                    )
            }
            _ => a == b,
        }
    }

    fn arithmetic(
        &mut self,
        op: Opcode,
        f: impl Fn(f64, f64) -> f64,
    ) -> VMResult<()> {
        let (a, b) = self.pop_numbers(op)?;
        self.push(Value::Number(f(a, b)))
    }

    fn comparison(
        &mut self,
        op: Opcode,
        f: impl Fn(f64, f64) -> bool,
    ) -> VMResult<()> {
        let (a, b) = self.pop_numbers(op)?;
        self.push(Value::Bool(f(a, b)))
    }

    fn integer(
        &mut self,
        op: Opcode,
        int_op: IntOp,
    ) -> VMResult<()> {
        let (a, b) = self.pop_numbers(op)?;
        self.push(Value::Number(int_binary(int_op, to_int(a), to_int(b)) as f64))
    }

    #[inline]
    fn push(
        &mut self,
        value: Value,
    ) -> VMResult<()> {
        if self.stack.len() >= self.config.stack_size {
            return Err(VMError::StackOverflow(self.config.stack_size));
        }
        self.stack.push(value);
        Ok(())
    }

    #[inline]
    fn pop(&mut self) -> VMResult<Value> {
        self.stack.pop().ok_or(VMError::StackUnderflow)
    }

    #[inline]
    fn peek(&self) -> VMResult<Value> {
        self.stack.last().copied().ok_or(VMError::StackUnderflow)
    }

    #[inline]
    fn replace_top(
        &mut self,
        value: Value,
    ) -> VMResult<()> {
        let top = self.stack.last_mut().ok_or(VMError::StackUnderflow)?;
        *top = value;
        Ok(())
    }

    fn peek_number(
        &self,
        op: Opcode,
    ) -> VMResult<f64> {
        let top = self.peek()?;
        top.as_number().ok_or_else(|| type_error(op, top))
    }

    /// 弹出两个数字，返回 (左, 右)
    fn pop_numbers(
        &mut self,
        op: Opcode,
    ) -> VMResult<(f64, f64)> {
        let b = self.pop()?;
        let a = self.pop()?;
        match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => Ok((x, y)),
            (None, _) => Err(type_error(op, a)),
            (_, None) => Err(type_error(op, b)),
        }
    }

    fn pop_string(
        &mut self,
        op: Opcode,
    ) -> VMResult<String> {
        let value = self.pop()?;
        match value {
            Value::Obj(obj) => self
                .heap
                .get(obj)
                .map(|s| s.as_str().to_string())
                .ok_or(VMError::InvalidOperand),
            other => Err(type_error(op, other)),
        }
    }

    fn trace_state(
        &self,
        chunk: &Chunk<'_>,
        ip: usize,
    ) {
        let stack: Vec<String> = self
            .stack
            .iter()
            .map(|v| format!("[{}]", self.display(*v)))
            .collect();
        trace!("    {}", stack.join(" "));

        let mut line = String::new();
        disasm::disassemble_instruction(chunk, ip, &mut line);
        trace!("{}", line.trim_end());
    }
}

fn type_error(
    op: Opcode,
    value: Value,
) -> VMError {
    VMError::TypeError(format!("{} cannot operate on {}", op, value.type_name()))
}
