//! Typed expression tree

use crate::frontend::types::Type;
use crate::util::span::Location;
use std::borrow::Cow;
use std::fmt;

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Shl,
    Shr,
    BitAnd,
    BitXor,
    BitOr,
    Eq,
    Neq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

impl BinaryOp {
    /// Source spelling
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
        }
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, BinaryOp::Eq | BinaryOp::Neq)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operator
///
/// The three tests never come out of the parser; the optimizer produces
/// them from equality comparisons against an immediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
    IsNil,
    IsZero,
    IsNegOne,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
            UnaryOp::IsNil => "is-nil",
            UnaryOp::IsZero => "is-zero",
            UnaryOp::IsNegOne => "is-neg-one",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Node payload
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind<'src> {
    Int(i64),
    Float(f64),
    Bool(bool),
    Nil,
    /// Borrowed from the source unless escapes or folding produced new text
    Str(Cow<'src, str>),
    Unary {
        op: UnaryOp,
        operand: Box<Node<'src>>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node<'src>>,
        right: Box<Node<'src>>,
    },
    /// String segments and embedded expressions, in source order
    Interpolation { parts: Vec<Node<'src>> },
}

/// Expression node with its inferred type
///
/// Literals carry their own location, operators the location of the
/// operator token.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'src> {
    pub kind: NodeKind<'src>,
    pub ty: Type,
    pub loc: Location,
    /// Levels below and including this node; a literal has height 1
    height: usize,
}

impl<'src> Node<'src> {
    pub fn new(
        kind: NodeKind<'src>,
        ty: Type,
        loc: Location,
    ) -> Self {
        let below = match &kind {
            NodeKind::Unary { operand, .. } => operand.height,
            NodeKind::Binary { left, right, .. } => left.height.max(right.height),
            NodeKind::Interpolation { parts } => parts.iter().map(|p| p.height).max().unwrap_or(0),
            _ => 0,
        };
        Self {
            kind,
            ty,
            loc,
            height: below + 1,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn int(
        value: i64,
        loc: Location,
    ) -> Self {
        Self::new(NodeKind::Int(value), Type::INT, loc)
    }

    pub fn float(
        value: f64,
        loc: Location,
    ) -> Self {
        Self::new(NodeKind::Float(value), Type::FLOAT, loc)
    }

    pub fn bool(
        value: bool,
        loc: Location,
    ) -> Self {
        Self::new(NodeKind::Bool(value), Type::BOOL, loc)
    }

    pub fn nil(loc: Location) -> Self {
        Self::new(NodeKind::Nil, Type::NIL, loc)
    }

    pub fn string(
        value: Cow<'src, str>,
        loc: Location,
    ) -> Self {
        Self::new(NodeKind::Str(value), Type::STR, loc)
    }

    /// Stand-in for an expression that failed to parse
    pub fn poisoned(loc: Location) -> Self {
        Self::new(NodeKind::Nil, Type::UNKNOWN, loc)
    }

    pub fn unary(
        op: UnaryOp,
        operand: Node<'src>,
        ty: Type,
        loc: Location,
    ) -> Self {
        Self::new(
            NodeKind::Unary {
                op,
                operand: Box::new(operand),
            },
            ty,
            loc,
        )
    }

    pub fn binary(
        op: BinaryOp,
        left: Node<'src>,
        right: Node<'src>,
        ty: Type,
        loc: Location,
    ) -> Self {
        Self::new(
            NodeKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            ty,
            loc,
        )
    }

    /// Literal without subtrees
    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Int(_) | NodeKind::Float(_) | NodeKind::Bool(_) | NodeKind::Nil | NodeKind::Str(_)
        )
    }

    /// Span covering the whole subtree
    pub fn full_location(&self) -> Location {
        match &self.kind {
            NodeKind::Binary { left, right, .. } => Location::merge(
                Location::merge(left.full_location(), self.loc),
                right.full_location(),
            ),
            NodeKind::Unary { operand, .. } => Location::merge(self.loc, operand.full_location()),
            NodeKind::Interpolation { parts } => match (parts.first(), parts.last()) {
                (Some(first), Some(last)) => Location::merge(first.full_location(), last.full_location()),
                _ => self.loc,
            },
            _ => self.loc,
        }
    }
}
