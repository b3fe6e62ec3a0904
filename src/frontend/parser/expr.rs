//! Expression grammar
//!
//! One method per precedence level, lowest first. Each level parses the
//! next one up and then folds same-level operators into left-associative
//! `Binary` nodes, typing every node as it is built.

use super::ast::{BinaryOp, Node, NodeKind, UnaryOp};
use super::state::{ParserState, MAX_NESTING};
use crate::frontend::lexer::{Token, TokenKind};
use crate::frontend::types::{Type, TypeKind};
use crate::util::diagnostic::ErrorCodeDefinition;
use crate::util::span::Location;
use std::borrow::Cow;

/// Operator table for one binary level
type Level = &'static [(TokenKind, BinaryOp)];

const BIT_OR: Level = &[(TokenKind::Pipe, BinaryOp::BitOr)];
const BIT_XOR: Level = &[(TokenKind::Caret, BinaryOp::BitXor)];
const BIT_AND: Level = &[(TokenKind::Amp, BinaryOp::BitAnd)];
const EQUALITY: Level = &[(TokenKind::EqEq, BinaryOp::Eq), (TokenKind::Neq, BinaryOp::Neq)];
const COMPARISON: Level = &[
    (TokenKind::Lt, BinaryOp::Less),
    (TokenKind::Le, BinaryOp::LessEq),
    (TokenKind::Gt, BinaryOp::Greater),
    (TokenKind::Ge, BinaryOp::GreaterEq),
];
const SHIFT: Level = &[(TokenKind::Shl, BinaryOp::Shl), (TokenKind::Shr, BinaryOp::Shr)];
const TERM: Level = &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)];
const FACTOR: Level = &[(TokenKind::Star, BinaryOp::Mul), (TokenKind::Slash, BinaryOp::Div)];

/// Result type of a binary operator, or `None` when it does not apply
///
/// Unknown operands yield Unknown without an error.
pub fn binary_result(
    op: BinaryOp,
    left: Type,
    right: Type,
) -> Option<Type> {
    if left.is_unknown() || right.is_unknown() {
        return Some(Type::UNKNOWN);
    }
    let both_numeric = left.is_numeric() && right.is_numeric();
    let both_int = left.kind == TypeKind::Int && right.kind == TypeKind::Int;

    match op {
        BinaryOp::Add if left.kind == TypeKind::Str && right.kind == TypeKind::Str => Some(Type::STR),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul if both_numeric => {
            Some(if left == right { left } else { Type::FLOAT })
        }
        BinaryOp::Div if both_numeric => Some(Type::FLOAT),
        BinaryOp::Less | BinaryOp::LessEq | BinaryOp::Greater | BinaryOp::GreaterEq if both_numeric => {
            Some(Type::BOOL)
        }
        BinaryOp::Eq | BinaryOp::Neq if left == right => Some(Type::BOOL),
        BinaryOp::Shl | BinaryOp::Shr | BinaryOp::BitAnd | BinaryOp::BitXor | BinaryOp::BitOr if both_int => {
            Some(Type::INT)
        }
        _ => None,
    }
}

/// Result type of a unary operator, or `None` when it does not apply
pub fn unary_result(
    op: UnaryOp,
    operand: Type,
) -> Option<Type> {
    if operand.is_unknown() {
        return Some(Type::UNKNOWN);
    }
    match op {
        UnaryOp::Neg if operand.is_numeric() => Some(operand),
        UnaryOp::Not if matches!(operand.kind, TypeKind::Bool | TypeKind::Nil) => Some(Type::BOOL),
        UnaryOp::IsNil => Some(Type::BOOL),
        UnaryOp::IsZero | UnaryOp::IsNegOne if operand.is_numeric() => Some(Type::BOOL),
        _ => None,
    }
}

impl<'src> ParserState<'src, '_> {
    /// Parse a full expression
    pub fn expression(&mut self) -> Node<'src> {
        self.bit_or()
    }

    fn bit_or(&mut self) -> Node<'src> {
        self.binary_level(BIT_OR, Self::bit_xor)
    }

    fn bit_xor(&mut self) -> Node<'src> {
        self.binary_level(BIT_XOR, Self::bit_and)
    }

    fn bit_and(&mut self) -> Node<'src> {
        self.binary_level(BIT_AND, Self::equality)
    }

    fn equality(&mut self) -> Node<'src> {
        self.binary_level(EQUALITY, Self::comparison)
    }

    fn comparison(&mut self) -> Node<'src> {
        self.binary_level(COMPARISON, Self::shift)
    }

    fn shift(&mut self) -> Node<'src> {
        self.binary_level(SHIFT, Self::term)
    }

    fn term(&mut self) -> Node<'src> {
        self.binary_level(TERM, Self::factor)
    }

    fn factor(&mut self) -> Node<'src> {
        self.binary_level(FACTOR, Self::unary)
    }

    fn binary_level(
        &mut self,
        operators: Level,
        next: fn(&mut Self) -> Node<'src>,
    ) -> Node<'src> {
        let mut left = next(self);
        while let Some(&(_, op)) = operators.iter().find(|(kind, _)| self.at(*kind)) {
            let op_loc = self.current().loc;
            self.advance();
            let right = next(self);
            left = self.make_binary(op, left, right, op_loc);
        }
        left
    }

    fn unary(&mut self) -> Node<'src> {
        if !self.enter_nesting() {
            return Node::poisoned(self.current().loc);
        }
        let node = self.prefixed();
        self.leave_nesting();
        node
    }

    fn prefixed(&mut self) -> Node<'src> {
        let op = match self.current().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::KwNot => UnaryOp::Not,
            _ => return self.primary(),
        };
        let op_loc = self.current().loc;
        self.advance();
        let operand = self.unary();
        self.make_unary(op, operand, op_loc)
    }

    fn primary(&mut self) -> Node<'src> {
        let token = self.current();
        match token.kind {
            TokenKind::IntLiteral => {
                self.advance();
                self.int_literal(token)
            }
            TokenKind::FloatLiteral => {
                self.advance();
                self.float_literal(token)
            }
            TokenKind::KwTrue => {
                self.advance();
                Node::bool(true, token.loc)
            }
            TokenKind::KwFalse => {
                self.advance();
                Node::bool(false, token.loc)
            }
            TokenKind::KwNil => {
                self.advance();
                Node::nil(token.loc)
            }
            TokenKind::StringLiteral => {
                self.advance();
                let text = self.unescape(strip_segment(token), token.loc);
                Node::string(text, token.loc)
            }
            TokenKind::Interpolation => self.interpolation(),
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression();
                if !self.eat(TokenKind::RParen) {
                    let found = self.current().describe();
                    self.error_at_current(ErrorCodeDefinition::unbalanced_parenthesis(&found));
                }
                inner
            }
            _ => {
                self.error_at_current(ErrorCodeDefinition::expected_expression(&token.describe()));
                Node::poisoned(token.loc)
            }
        }
    }

    /// `"text #{expr} more"`, entered on the first Interpolation token
    fn interpolation(&mut self) -> Node<'src> {
        let start = self.current().loc;
        let mut parts = Vec::new();

        loop {
            let segment = self.current();
            self.advance();

            let text = strip_segment(segment);
            if !text.is_empty() {
                let text = self.unescape(text, segment.loc);
                parts.push(Node::string(text, segment.loc));
            }
            if segment.kind == TokenKind::StringLiteral {
                break;
            }

            parts.push(self.expression());

            let resumes = matches!(
                self.current().kind,
                TokenKind::Interpolation | TokenKind::StringLiteral
            ) && self.current().lexeme.starts_with('}');
            if !resumes {
                let found = self.current().describe();
                self.error_at_current(ErrorCodeDefinition::unexpected_token("'}'", &found));
                break;
            }
        }

        self.bounded(Node::new(NodeKind::Interpolation { parts }, Type::STR, start))
    }

    /// Poison trees taller than the nesting limit
    ///
    /// Keeps every later tree walk within a bounded recursion depth.
    fn bounded(
        &mut self,
        node: Node<'src>,
    ) -> Node<'src> {
        if node.height() <= MAX_NESTING {
            return node;
        }
        let loc = node.full_location();
        self.nesting_too_deep(loc);
        Node::poisoned(node.loc)
    }

    fn int_literal(
        &mut self,
        token: Token<'src>,
    ) -> Node<'src> {
        match token.lexeme.parse::<i64>() {
            Ok(value) => Node::int(value, token.loc),
            Err(_) => {
                self.error(
                    ErrorCodeDefinition::integer_out_of_range(token.lexeme),
                    token.loc,
                );
                Node::int(i64::MAX, token.loc)
            }
        }
    }

    fn float_literal(
        &mut self,
        token: Token<'src>,
    ) -> Node<'src> {
        match token.lexeme.parse::<f64>() {
            Ok(value) if value.is_finite() => Node::float(value, token.loc),
            _ => {
                self.error(
                    ErrorCodeDefinition::float_out_of_range(token.lexeme),
                    token.loc,
                );
                Node::float(f64::MAX, token.loc)
            }
        }
    }

    /// Resolve backslash escapes, borrowing when there are none
    fn unescape(
        &mut self,
        raw: &'src str,
        loc: Location,
    ) -> Cow<'src, str> {
        if !raw.contains('\\') {
            return Cow::Borrowed(raw);
        }

        let mut text = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                text.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some('r') => text.push('\r'),
                Some('0') => text.push('\0'),
                Some(c @ ('\\' | '"' | '#')) => text.push(c),
                Some(other) => {
                    self.error(ErrorCodeDefinition::unknown_escape(other), loc);
                    text.push(other);
                }
                None => text.push('\\'),
            }
        }
        Cow::Owned(text)
    }

    fn make_binary(
        &mut self,
        op: BinaryOp,
        left: Node<'src>,
        right: Node<'src>,
        op_loc: Location,
    ) -> Node<'src> {
        let (left_ty, right_ty) = (left.ty, right.ty);
        let mut node = Node::binary(op, left, right, Type::UNKNOWN, op_loc);

        match binary_result(op, left_ty, right_ty) {
            Some(ty) => node.ty = ty,
            None => {
                let loc = node.full_location();
                let builder = if op.is_equality() {
                    ErrorCodeDefinition::type_mismatch(left_ty.name, right_ty.name)
                } else {
                    ErrorCodeDefinition::unapplicable_binary(op.symbol(), left_ty.name, right_ty.name)
                };
                self.error(builder, loc);
            }
        }
        self.bounded(node)
    }

    fn make_unary(
        &mut self,
        op: UnaryOp,
        operand: Node<'src>,
        op_loc: Location,
    ) -> Node<'src> {
        let operand_ty = operand.ty;
        let mut node = Node::unary(op, operand, Type::UNKNOWN, op_loc);

        match unary_result(op, operand_ty) {
            Some(ty) => node.ty = ty,
            None => {
                let loc = node.full_location();
                self.error(
                    ErrorCodeDefinition::unapplicable_unary(op.symbol(), operand_ty.name),
                    loc,
                );
            }
        }
        self.bounded(node)
    }
}

/// Text of a string token without its delimiters
///
/// Segments open with `"` or with the `}` that closed an interpolation.
/// Only a complete string literal ends in a closing `"`; a segment cut
/// at `#{` has no closing delimiter.
fn strip_segment(token: Token<'_>) -> &str {
    let lexeme = token.lexeme;
    let body = lexeme
        .strip_prefix('"')
        .or_else(|| lexeme.strip_prefix('}'))
        .unwrap_or(lexeme);
    match token.kind {
        TokenKind::StringLiteral => body.strip_suffix('"').unwrap_or(body),
        _ => body,
    }
}
