//! 表达式优化器
//!
//! 后序遍历类型化语法树：子节点先优化，然后依次尝试
//! 消去双重一元运算、常量折叠、相等比较特化。
//!
//! 每一种改写都保证与未改写时的运行结果完全一致：
//! - 整数折叠只在操作数和结果都能被 `f64` 精确表示时进行
//! - 运行时得到 `-0` 的整数运算折叠为 `-0.0`，保留零的符号
//! - 移位与位运算复用 VM 的整数辅助函数
//! - 字符串插值按 VM 的格式化规则折叠

use crate::frontend::parser::ast::{BinaryOp, Node, NodeKind, UnaryOp};
use crate::frontend::types::{Type, TypeKind};
use crate::util::span::Location;
use crate::vm::value::{format_number, int_binary, IntOp};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// 能被 `f64` 精确表示的整数范围上界
const EXACT_INT_LIMIT: i64 = 1 << 53;

/// 优化开关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// 折叠字面量上的运算
    pub fold_constants: bool,
    /// `x == nil`、`x == 0`、`x == -1` 改写为单操作数测试
    pub specialize_equality: bool,
    /// `-(-x)`、`not not x` 消去
    pub collapse_double_unary: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            fold_constants: true,
            specialize_equality: true,
            collapse_double_unary: true,
        }
    }
}

impl OptimizerConfig {
    /// 关闭全部改写
    pub fn disabled() -> Self {
        Self {
            fold_constants: false,
            specialize_equality: false,
            collapse_double_unary: false,
        }
    }
}

/// 语法树优化器
#[derive(Debug, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
    /// 已执行的改写次数
    rewrites: usize,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            rewrites: 0,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// 到目前为止执行的改写次数
    pub fn rewrites(&self) -> usize {
        self.rewrites
    }

    /// 优化一棵语法树
    pub fn optimize<'src>(
        &mut self,
        node: Node<'src>,
    ) -> Node<'src> {
        let before = self.rewrites;
        let node = self.visit(node);
        debug!("Optimizer applied {} rewrites", self.rewrites - before);
        node
    }

    fn visit<'src>(
        &mut self,
        node: Node<'src>,
    ) -> Node<'src> {
        let Node { kind, ty, loc, .. } = node;
        match kind {
            NodeKind::Unary { op, operand } => {
                let operand = self.visit(*operand);
                self.rewrite_unary(Node::unary(op, operand, ty, loc))
            }
            NodeKind::Binary { op, left, right } => {
                let left = self.visit(*left);
                let right = self.visit(*right);
                self.rewrite_binary(Node::binary(op, left, right, ty, loc))
            }
            NodeKind::Interpolation { parts } => {
                let parts = parts.into_iter().map(|part| self.visit(part)).collect();
                self.rewrite_interpolation(Node::new(NodeKind::Interpolation { parts }, ty, loc))
            }
            kind => Node::new(kind, ty, loc),
        }
    }

    fn rewrite_unary<'src>(
        &mut self,
        node: Node<'src>,
    ) -> Node<'src> {
        let node = if self.config.collapse_double_unary {
            match collapse(node) {
                Ok(inner) => {
                    self.rewrites += 1;
                    return inner;
                }
                Err(node) => node,
            }
        } else {
            node
        };

        if self.config.fold_constants {
            if let Some(folded) = fold_unary(&node) {
                self.rewrites += 1;
                return folded;
            }
        }
        node
    }

    fn rewrite_binary<'src>(
        &mut self,
        node: Node<'src>,
    ) -> Node<'src> {
        if self.config.fold_constants {
            if let Some(folded) = fold_binary(&node) {
                self.rewrites += 1;
                return folded;
            }
        }

        if self.config.specialize_equality {
            let Node { kind, ty, loc, .. } = node;
            return match kind {
                NodeKind::Binary { op, left, right } if op.is_equality() => {
                    match specialize(op, *left, *right, loc) {
                        Ok(test) => {
                            self.rewrites += 1;
                            test
                        }
                        Err((left, right)) => Node::binary(op, left, right, ty, loc),
                    }
                }
                kind => Node::new(kind, ty, loc),
            };
        }
        node
    }

    fn rewrite_interpolation<'src>(
        &mut self,
        node: Node<'src>,
    ) -> Node<'src> {
        if !self.config.fold_constants {
            return node;
        }
        let folded = match &node.kind {
            NodeKind::Interpolation { parts } => join_literals(parts),
            _ => None,
        };
        match folded {
            Some(text) => {
                self.rewrites += 1;
                Node::string(Cow::Owned(text), node.loc)
            }
            None => node,
        }
    }
}

/// 全部片段都是字面量时拼接成一个字符串
fn join_literals(parts: &[Node<'_>]) -> Option<String> {
    let mut text = String::new();
    for part in parts {
        Literal::of(part)?.append_to(&mut text);
    }
    Some(text)
}

/// 消去 `-(-x)`（数字）与 `not not x`（布尔值），不可消去时原样返回
fn collapse<'src>(node: Node<'src>) -> Result<Node<'src>, Node<'src>> {
    if !collapses(&node) {
        return Err(node);
    }
    let Node { kind, ty, loc, .. } = node;
    match kind {
        NodeKind::Unary { op, operand } => {
            let Node {
                kind: inner_kind,
                ty: inner_ty,
                loc: inner_loc,
                ..
            } = *operand;
            match inner_kind {
                NodeKind::Unary { operand: x, .. } => Ok(*x),
                inner_kind => Err(Node::unary(op, Node::new(inner_kind, inner_ty, inner_loc), ty, loc)),
            }
        }
        kind => Err(Node::new(kind, ty, loc)),
    }
}

fn collapses(node: &Node<'_>) -> bool {
    let NodeKind::Unary { op, operand } = &node.kind else {
        return false;
    };
    let NodeKind::Unary {
        op: inner_op,
        operand: inner,
    } = &operand.kind
    else {
        return false;
    };
    if op != inner_op {
        return false;
    }
    match op {
        UnaryOp::Neg => inner.ty.is_numeric(),
        UnaryOp::Not => inner.ty.kind == TypeKind::Bool,
        _ => false,
    }
}

/// 字面量值
#[derive(Debug, Clone, Copy)]
enum Literal<'a> {
    Int(i64),
    Float(f64),
    Bool(bool),
    Nil,
    Str(&'a str),
}

impl<'a> Literal<'a> {
    fn of(node: &'a Node<'_>) -> Option<Self> {
        match &node.kind {
            NodeKind::Int(i) => Some(Literal::Int(*i)),
            NodeKind::Float(f) => Some(Literal::Float(*f)),
            NodeKind::Bool(b) => Some(Literal::Bool(*b)),
            NodeKind::Nil if !node.ty.is_unknown() => Some(Literal::Nil),
            NodeKind::Str(s) => Some(Literal::Str(s)),
            _ => None,
        }
    }

    /// 运行时看到的数字
    fn number(self) -> Option<f64> {
        match self {
            Literal::Int(i) => Some(i as f64),
            Literal::Float(f) => Some(f),
            _ => None,
        }
    }

    fn exact_int(self) -> Option<i64> {
        match self {
            Literal::Int(i) if is_exact(i) => Some(i),
            _ => None,
        }
    }

    /// 与 VM 的相等比较一致：数字按 `f64`，字符串按内容
    fn equals(
        self,
        other: Self,
    ) -> bool {
        match (self, other) {
            (Literal::Bool(a), Literal::Bool(b)) => a == b,
            (Literal::Nil, Literal::Nil) => true,
            (Literal::Str(a), Literal::Str(b)) => a == b,
            (a, b) => match (a.number(), b.number()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }

    /// 按 VM 的 `Stringify` 规则追加文本
    fn append_to(
        self,
        out: &mut String,
    ) {
        match self {
            Literal::Str(s) => out.push_str(s),
            Literal::Bool(b) => out.push_str(if b { "true" } else { "false" }),
            Literal::Nil => out.push_str("nil"),
            Literal::Int(i) => out.push_str(&format_number(i as f64)),
            Literal::Float(f) => out.push_str(&format_number(f)),
        }
    }
}

#[inline]
fn is_exact(i: i64) -> bool {
    (-EXACT_INT_LIMIT..=EXACT_INT_LIMIT).contains(&i)
}

/// 整数折叠结果；运行时为 `-0` 时保留为浮点 `-0.0`
fn int_result<'src>(
    result: i64,
    runtime: f64,
    node: &Node<'src>,
) -> Node<'src> {
    if result == 0 && runtime.is_sign_negative() {
        Node::new(NodeKind::Float(-0.0), node.ty, node.loc)
    } else {
        Node::int(result, node.loc)
    }
}

fn fold_unary<'src>(node: &Node<'src>) -> Option<Node<'src>> {
    let NodeKind::Unary { op, operand } = &node.kind else {
        return None;
    };
    let value = Literal::of(operand)?;
    let loc = node.loc;

    let folded = match (op, value) {
        (UnaryOp::Neg, Literal::Int(i)) if is_exact(i) => int_result(-i, -(i as f64), node),
        (UnaryOp::Neg, Literal::Float(f)) => Node::float(-f, loc),
        (UnaryOp::Not, Literal::Bool(b)) => Node::bool(!b, loc),
        (UnaryOp::Not, Literal::Nil) => Node::bool(true, loc),
        (UnaryOp::IsNil, value) => Node::bool(matches!(value, Literal::Nil), loc),
        (UnaryOp::IsZero, value) => Node::bool(value.number()? == 0.0, loc),
        (UnaryOp::IsNegOne, value) => Node::bool(value.number()? == -1.0, loc),
        _ => return None,
    };
    Some(folded)
}

fn fold_binary<'src>(node: &Node<'src>) -> Option<Node<'src>> {
    let NodeKind::Binary { op, left, right } = &node.kind else {
        return None;
    };
    let (a, b) = (Literal::of(left)?, Literal::of(right)?);
    let loc = node.loc;

    let folded = match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => match (a, b) {
            (Literal::Str(x), Literal::Str(y)) if *op == BinaryOp::Add => {
                Node::string(Cow::Owned(format!("{}{}", x, y)), loc)
            }
            (Literal::Int(_), Literal::Int(_)) => {
                let (x, y) = (a.exact_int()?, b.exact_int()?);
                let (result, runtime) = match op {
                    BinaryOp::Add => (x.checked_add(y), x as f64 + y as f64),
                    BinaryOp::Sub => (x.checked_sub(y), x as f64 - y as f64),
                    _ => (x.checked_mul(y), x as f64 * y as f64),
                };
                int_result(result.filter(|r| is_exact(*r))?, runtime, node)
            }
            _ => {
                let (x, y) = (a.number()?, b.number()?);
                let result = match op {
                    BinaryOp::Add => x + y,
                    BinaryOp::Sub => x - y,
                    _ => x * y,
                };
                Node::float(result, loc)
            }
        },
        BinaryOp::Div => Node::float(a.number()? / b.number()?, loc),
        BinaryOp::Less | BinaryOp::LessEq | BinaryOp::Greater | BinaryOp::GreaterEq => {
            let (x, y) = (a.number()?, b.number()?);
            let result = match op {
                BinaryOp::Less => x < y,
                BinaryOp::LessEq => x <= y,
                BinaryOp::Greater => x > y,
                _ => x >= y,
            };
            Node::bool(result, loc)
        }
        BinaryOp::Eq => Node::bool(a.equals(b), loc),
        BinaryOp::Neq => Node::bool(!a.equals(b), loc),
        BinaryOp::Shl | BinaryOp::Shr | BinaryOp::BitAnd | BinaryOp::BitXor | BinaryOp::BitOr => {
            let int_op = match op {
                BinaryOp::Shl => IntOp::Shl,
                BinaryOp::Shr => IntOp::Shr,
                BinaryOp::BitAnd => IntOp::And,
                BinaryOp::BitXor => IntOp::Xor,
                _ => IntOp::Or,
            };
            Node::int(int_binary(int_op, a.exact_int()?, b.exact_int()?), loc)
        }
    };
    Some(folded)
}

/// 可被特化的比较对象
fn equality_test(node: &Node<'_>) -> Option<UnaryOp> {
    match &node.kind {
        NodeKind::Nil if !node.ty.is_unknown() => Some(UnaryOp::IsNil),
        NodeKind::Int(0) => Some(UnaryOp::IsZero),
        NodeKind::Float(f) if *f == 0.0 => Some(UnaryOp::IsZero),
        NodeKind::Int(-1) => Some(UnaryOp::IsNegOne),
        NodeKind::Float(f) if *f == -1.0 => Some(UnaryOp::IsNegOne),
        // 未折叠的 `-1`
        NodeKind::Unary {
            op: UnaryOp::Neg,
            operand,
        } => match operand.kind {
            NodeKind::Int(1) => Some(UnaryOp::IsNegOne),
            NodeKind::Float(f) if f == 1.0 => Some(UnaryOp::IsNegOne),
            _ => None,
        },
        _ => None,
    }
}

/// 把 `x == c` / `c == x` 改写为 `test x`，`!=` 再包一层 `not`
fn specialize<'src>(
    op: BinaryOp,
    left: Node<'src>,
    right: Node<'src>,
    loc: Location,
) -> Result<Node<'src>, (Node<'src>, Node<'src>)> {
    let (test, subject) = if let Some(test) = equality_test(&right) {
        (test, left)
    } else if let Some(test) = equality_test(&left) {
        (test, right)
    } else {
        return Err((left, right));
    };

    let node = Node::unary(test, subject, Type::BOOL, loc);
    Ok(match op {
        BinaryOp::Neq => Node::unary(UnaryOp::Not, node, Type::BOOL, loc),
        _ => node,
    })
}
