use crate::ast::{
    operand::{ArrayOperand, ColumnIndexOperand, ScalarOperand},
    operator::{LogicalOperator, Operator, OperatorKind},
};
use serde::Serialize;

/// A node of a parsed filter expression.
///
/// Trees are built once and never mutated; rewriting passes consume a tree
/// and return a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Operator(OperatorNode),
    ColumnIndex(ColumnIndexOperand),
    Scalar(ScalarOperand),
    Array(ArrayOperand),
}

/// A comparison over a column, or a logical combination of predicates.
///
/// Comparisons hold a [`ColumnIndexOperand`] on the left and a scalar or
/// array operand (or nothing, for null tests) on the right. Logical nodes
/// hold operator nodes only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorNode {
    pub kind: OperatorKind,
    pub left: Box<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<Node>>,
}

impl Node {
    pub fn column(index: usize) -> Self {
        Node::ColumnIndex(ColumnIndexOperand { index })
    }

    pub fn scalar(type_oid: i32, raw_text: impl Into<String>) -> Self {
        Node::Scalar(ScalarOperand::new(type_oid, raw_text))
    }

    pub fn array<I, S>(type_oid: i32, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::Array(ArrayOperand {
            type_oid,
            elements: elements.into_iter().map(Into::into).collect(),
        })
    }

    pub fn comparison(operator: Operator, index: usize, value: Option<Node>) -> Self {
        Node::Operator(OperatorNode {
            kind: OperatorKind::Comparison(operator),
            left: Box::new(Node::column(index)),
            right: value.map(Box::new),
        })
    }

    pub fn and(left: Node, right: Node) -> Self {
        Self::logical(LogicalOperator::And, left, Some(right))
    }

    pub fn or(left: Node, right: Node) -> Self {
        Self::logical(LogicalOperator::Or, left, Some(right))
    }

    pub fn not(child: Node) -> Self {
        Self::logical(LogicalOperator::Not, child, None)
    }

    fn logical(operator: LogicalOperator, left: Node, right: Option<Node>) -> Self {
        Node::Operator(OperatorNode {
            kind: OperatorKind::Logical(operator),
            left: Box::new(left),
            right: right.map(Box::new),
        })
    }

    pub fn as_operator(&self) -> Option<&OperatorNode> {
        match self {
            Node::Operator(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_operand(&self) -> bool {
        !matches!(self, Node::Operator(_))
    }

    /// Number of operator nodes in the tree.
    pub fn predicate_count(&self) -> usize {
        match self {
            Node::Operator(node) => {
                1 + node.left.predicate_count()
                    + node.right.as_ref().map_or(0, |r| r.predicate_count())
            }
            _ => 0,
        }
    }
}

impl OperatorNode {
    /// Rebuilds an operator node from children resolved by a rewriting
    /// pass. Returns `None` when the mandatory left child is gone.
    pub fn assemble(kind: OperatorKind, left: Option<Node>, right: Option<Node>) -> Option<Node> {
        Some(Node::Operator(OperatorNode {
            kind,
            left: Box::new(left?),
            right: right.map(Box::new),
        }))
    }

    pub fn operator(&self) -> Option<Operator> {
        match self.kind {
            OperatorKind::Comparison(op) => Some(op),
            OperatorKind::Logical(_) => None,
        }
    }

    pub fn logical_operator(&self) -> Option<LogicalOperator> {
        match self.kind {
            OperatorKind::Logical(op) => Some(op),
            OperatorKind::Comparison(_) => None,
        }
    }

    pub fn is_logical(&self) -> bool {
        self.kind.is_logical()
    }

    pub fn child_count(&self) -> usize {
        1 + usize::from(self.right.is_some())
    }

    /// The column a comparison applies to.
    pub fn column(&self) -> Option<&ColumnIndexOperand> {
        match self.left.as_ref() {
            Node::ColumnIndex(column) if !self.is_logical() => Some(column),
            _ => None,
        }
    }

    /// The value operand of a comparison, if it has one.
    pub fn value(&self) -> Option<&Node> {
        if self.is_logical() {
            return None;
        }
        self.right.as_deref().filter(|node| node.is_operand())
    }

    pub fn scalar(&self) -> Option<&ScalarOperand> {
        match self.value() {
            Some(Node::Scalar(scalar)) => Some(scalar),
            _ => None,
        }
    }
}
