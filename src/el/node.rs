use crate::el::{BinaryOp, Builtin, FunctionName, UnaryOp};

/// Type tag of a DSEL literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String,
    Integer,
    Decimal,
    Boolean,
    Null,
}

/// DSEL abstract syntax tree node.
///
/// Trees are built fresh by the converters or the DSEL parser and are never
/// shared; every child is owned by its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElNode {
    /// Function call
    ///
    /// # Example
    /// ```text
    /// complies(name, 'Aaa Aaaa')
    /// ```
    Call {
        name: FunctionName,
        args: Vec<ElNode>,
    },

    /// Binary operation (comparison or logical)
    ///
    /// # Examples
    /// ```text
    /// field1 == 'abc'
    /// isEmpty(a) || isEmpty(b)
    /// ```
    BinaryOp {
        op: BinaryOp,
        left: Box<ElNode>,
        right: Box<ElNode>,
    },

    /// Unary operation
    ///
    /// # Example
    /// ```text
    /// !isOfType(field1, 'STRING')
    /// ```
    UnaryOp { op: UnaryOp, operand: Box<ElNode> },

    /// Literal; `value` is the unescaped string content or the number text
    /// exactly as written
    Literal { kind: LiteralKind, value: String },

    /// Reference to a record field
    FieldRef(String),

    /// Array literal
    ///
    /// # Example
    /// ```text
    /// [1, 2, 3]
    /// ```
    ArrayLiteral(Vec<ElNode>),
}

impl ElNode {
    pub fn call(name: impl Into<FunctionName>, args: Vec<ElNode>) -> Self {
        ElNode::Call {
            name: name.into(),
            args,
        }
    }

    pub fn builtin(builtin: Builtin, args: Vec<ElNode>) -> Self {
        ElNode::call(builtin, args)
    }

    pub fn binary(op: BinaryOp, left: ElNode, right: ElNode) -> Self {
        ElNode::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(operand: ElNode) -> Self {
        ElNode::UnaryOp {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        }
    }

    pub fn field(name: impl Into<String>) -> Self {
        ElNode::FieldRef(name.into())
    }

    pub fn literal(kind: LiteralKind, value: impl Into<String>) -> Self {
        ElNode::Literal {
            kind,
            value: value.into(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        ElNode::literal(LiteralKind::String, value)
    }

    pub fn boolean(value: bool) -> Self {
        ElNode::literal(LiteralKind::Boolean, value.to_string())
    }

    /// Folds operands into a left-nested chain: `a op b op c` becomes
    /// `(a op b) op c`. Returns `None` for an empty list.
    pub fn left_fold(op: BinaryOp, operands: impl IntoIterator<Item = ElNode>) -> Option<Self> {
        operands
            .into_iter()
            .reduce(|left, right| ElNode::binary(op, left, right))
    }

    /// Operands of a left-nested chain of `op`, leftmost first.
    ///
    /// Only the left spine is flattened; a right operand that is itself an
    /// `op` node stays a single operand.
    pub fn left_spine(&self, op: BinaryOp) -> Vec<&ElNode> {
        let mut operands = Vec::new();
        let mut current = self;
        while let ElNode::BinaryOp {
            op: node_op,
            left,
            right,
        } = current
        {
            if *node_op != op {
                break;
            }
            operands.push(right.as_ref());
            current = left.as_ref();
        }
        operands.push(current);
        operands.reverse();
        operands
    }
}
