//! S-expression dump of the typed tree

use super::ast::{Node, NodeKind};
use std::fmt::Write;

/// Render a tree as an s-expression, e.g. `(+ 1 (* 2 3))`
pub fn render(node: &Node<'_>) -> String {
    let mut out = String::new();
    write_node(&mut out, node, false);
    out
}

/// Like [`render`], with every operator node annotated with its type
pub fn render_typed(node: &Node<'_>) -> String {
    let mut out = String::new();
    write_node(&mut out, node, true);
    out
}

fn write_node(
    out: &mut String,
    node: &Node<'_>,
    typed: bool,
) {
    match &node.kind {
        NodeKind::Int(value) => {
            let _ = write!(out, "{}", value);
        }
        NodeKind::Float(value) => {
            let _ = write!(out, "{:?}", value);
        }
        NodeKind::Bool(value) => {
            let _ = write!(out, "{}", value);
        }
        NodeKind::Nil => out.push_str("nil"),
        NodeKind::Str(text) => {
            let _ = write!(out, "{:?}", text);
        }
        NodeKind::Unary { op, operand } => {
            out.push('(');
            out.push_str(op.symbol());
            annotate(out, node, typed);
            out.push(' ');
            write_node(out, operand, typed);
            out.push(')');
        }
        NodeKind::Binary { op, left, right } => {
            out.push('(');
            out.push_str(op.symbol());
            annotate(out, node, typed);
            out.push(' ');
            write_node(out, left, typed);
            out.push(' ');
            write_node(out, right, typed);
            out.push(')');
        }
        NodeKind::Interpolation { parts } => {
            out.push_str("(interp");
            annotate(out, node, typed);
            for part in parts {
                out.push(' ');
                write_node(out, part, typed);
            }
            out.push(')');
        }
    }
}

fn annotate(
    out: &mut String,
    node: &Node<'_>,
    typed: bool,
) {
    if typed {
        out.push(':');
        out.push_str(node.ty.name);
    }
}
