//! DSEL text serialization.
//!
//! This module turns an [`ElNode`] tree back into DSEL source. Output is
//! deterministic: it depends only on the tree, and parsing it with
//! [`crate::el::parse`] yields an equal tree.
//!
//! # Layout
//!
//! - **Compact** via `compact = true` - the whole expression on one line
//! - **Pretty** via `compact = false` - each `&&`/`||` operand on its own
//!   line, nested chains indented by one `indent_unit` per level
//!
//! Parentheses are emitted only where precedence requires them. Pretty
//! output parses back with any indent unit: [`crate::el::parse`] skips
//! indents made of whitespace or symbols such as `-`, and
//! [`ElNodePrinter::parse`] reads back any unit.
//!
//! # Examples
//!
//! ```
//! use tql_dsel::el::{BinaryOp, Builtin, ElNode};
//! use tql_dsel::printer::ElNodePrinter;
//!
//! let node = ElNode::binary(
//!     BinaryOp::Or,
//!     ElNode::builtin(Builtin::IsEmpty, vec![ElNode::field("field1")]),
//!     ElNode::builtin(Builtin::IsEmpty, vec![ElNode::field("accountNumber")]),
//! );
//!
//! assert_eq!(
//!     ElNodePrinter::new("  ", true).pretty_print(&node),
//!     "isEmpty(field1) || isEmpty(accountNumber)"
//! );
//! assert_eq!(
//!     ElNodePrinter::new("  ", false).pretty_print(&node),
//!     "isEmpty(field1)\n|| isEmpty(accountNumber)"
//! );
//! ```

use std::fmt;

use crate::{
    el::{self, BinaryOp, ElNode, LiteralKind},
    error::ParseError,
};

#[derive(Debug, Clone)]
pub struct ElNodePrinter {
    indent_unit: String,
    compact: bool,
}

/// Which side of a binary operator an operand sits on.
#[derive(Clone, Copy, PartialEq)]
enum Side {
    Left,
    Right,
}

impl ElNodePrinter {
    pub fn new(indent_unit: impl Into<String>, compact: bool) -> Self {
        ElNodePrinter {
            indent_unit: indent_unit.into(),
            compact,
        }
    }

    pub fn pretty_print(&self, node: &ElNode) -> String {
        self.print_node(node, 0)
    }

    /// Parses text this printer produced.
    pub fn parse(&self, text: &str) -> Result<ElNode, ParseError> {
        el::parse_indented(text, &self.indent_unit)
    }

    fn print_node(&self, node: &ElNode, depth: usize) -> String {
        match node {
            ElNode::Literal { kind, value } => match kind {
                LiteralKind::String => format!("'{}'", escape_string(value)),
                LiteralKind::Null => "null".to_string(),
                _ => value.clone(),
            },
            ElNode::FieldRef(name) => name.clone(),
            ElNode::Call { name, args } => {
                let args: Vec<String> = args.iter().map(|a| self.print_node(a, depth + 1)).collect();
                format!("{name}({})", args.join(", "))
            }
            ElNode::ArrayLiteral(items) => {
                let items: Vec<String> = items.iter().map(|i| self.print_node(i, depth + 1)).collect();
                format!("[{}]", items.join(", "))
            }
            ElNode::UnaryOp { op, operand } => {
                let inner = self.print_node(operand, depth);
                if matches!(operand.as_ref(), ElNode::BinaryOp { .. }) {
                    format!("{}({inner})", op.symbol())
                } else {
                    format!("{}{inner}", op.symbol())
                }
            }
            ElNode::BinaryOp { op, left, right } => {
                let left = self.print_operand(*op, left, Side::Left, depth);
                let right = self.print_operand(*op, right, Side::Right, depth);
                if op.is_logical() && !self.compact {
                    format!("{left}\n{}{op} {right}", self.indent(depth))
                } else {
                    format!("{left} {op} {right}")
                }
            }
        }
    }

    fn print_operand(&self, parent: BinaryOp, child: &ElNode, side: Side, depth: usize) -> String {
        let ElNode::BinaryOp { op: child_op, .. } = child else {
            return self.print_node(child, depth);
        };

        let needs_parens = if parent.is_comparison() {
            true
        } else {
            child_op.precedence() < parent.precedence()
                || (child_op.precedence() == parent.precedence() && side == Side::Right)
        };

        if needs_parens {
            format!("({})", self.print_node(child, depth + 1))
        } else if *child_op == parent {
            // Same chain, continuation lines stay at this depth
            self.print_node(child, depth)
        } else {
            self.print_node(child, depth + 1)
        }
    }

    fn indent(&self, level: usize) -> String {
        self.indent_unit.repeat(level)
    }
}

impl Default for ElNodePrinter {
    fn default() -> Self {
        ElNodePrinter::new("  ", true)
    }
}

/// Escapes a string for a single-quoted DSEL literal.
fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

// Convenience functions

/// Prints `node` with the given indent unit and layout.
pub fn pretty_print(node: &ElNode, indent_unit: &str, compact: bool) -> String {
    ElNodePrinter::new(indent_unit, compact).pretty_print(node)
}

/// Prints `node` on a single line.
pub fn to_dsel(node: &ElNode) -> String {
    ElNodePrinter::default().pretty_print(node)
}

impl fmt::Display for ElNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_dsel(self))
    }
}
