//! Human readable rendering of filter trees, used in logs and by the CLI.
//!
//! Columns print as `_<index>_`, literals verbatim:
//! `((_1_ > 2008-02-01 AND _1_ < 2008-12-01) AND _2_ > 1200)`.

use crate::ast::{
    node::{Node, OperatorNode},
    operand::{ArrayOperand, ColumnIndexOperand, ScalarOperand},
    operator::{LogicalOperator, Operator, OperatorKind},
};
use std::fmt;

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Operator(node) => write!(f, "{node}"),
            Node::ColumnIndex(column) => write!(f, "{column}"),
            Node::Scalar(scalar) => write!(f, "{scalar}"),
            Node::Array(array) => write!(f, "{array}"),
        }
    }
}

impl fmt::Display for ColumnIndexOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}_", self.index)
    }
}

impl fmt::Display for ScalarOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_text)
    }
}

impl fmt::Display for ArrayOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.elements.join(","))
    }
}

impl fmt::Display for OperatorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OperatorKind::Logical(LogicalOperator::Not) => write!(f, "NOT ({})", self.left),
            OperatorKind::Logical(op) => match &self.right {
                Some(right) => write!(f, "({} {op} {right})", self.left),
                None => write!(f, "({} {op})", self.left),
            },
            OperatorKind::Comparison(op) => match (op, &self.right) {
                (Operator::Noop, None) => write!(f, "{}", self.left),
                (Operator::IsNull | Operator::IsNotNull, _) | (_, None) => {
                    write!(f, "{} {}", self.left, op.symbol())
                }
                (Operator::Noop, Some(right)) => match right.as_ref() {
                    Node::Scalar(s) if s.raw_text.eq_ignore_ascii_case("true") => {
                        write!(f, "{}", self.left)
                    }
                    other => write!(f, "{} = {other}", self.left),
                },
                (_, Some(right)) => write!(f, "{} {} {right}", self.left, op.symbol()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_display() {
        let node = Node::comparison(
            Operator::GreaterThanOrEqual,
            1,
            Some(Node::scalar(25, "2016-01-03")),
        );
        assert_eq!(node.to_string(), "_1_ >= 2016-01-03");
    }

    #[test]
    fn test_null_tests_and_in() {
        assert_eq!(
            Node::comparison(Operator::IsNotNull, 3, None).to_string(),
            "_3_ IS NOT NULL"
        );
        let node = Node::comparison(Operator::In, 0, Some(Node::array(1016, ["194", "82756"])));
        assert_eq!(node.to_string(), "_0_ IN (194,82756)");
    }

    #[test]
    fn test_boolean_noop_display() {
        let truthy = Node::comparison(Operator::Noop, 4, Some(Node::scalar(16, "true")));
        let falsy = Node::comparison(Operator::Noop, 4, Some(Node::scalar(16, "false")));
        assert_eq!(Node::not(truthy).to_string(), "NOT (_4_)");
        assert_eq!(Node::not(falsy).to_string(), "NOT (_4_ = false)");
    }

    #[test]
    fn test_comparison_without_value() {
        assert_eq!(Node::comparison(Operator::Noop, 4, None).to_string(), "_4_");
        assert_eq!(Node::comparison(Operator::IsNull, 2, None).to_string(), "_2_ IS NULL");
        assert_eq!(Node::comparison(Operator::LessThan, 1, None).to_string(), "_1_ <");
    }

    #[test]
    fn test_logical_display() {
        let a = Node::comparison(Operator::Equals, 1, Some(Node::scalar(25, "foobar")));
        let b = Node::comparison(Operator::NotEquals, 2, Some(Node::scalar(23, "999")));
        assert_eq!(
            Node::or(a, b).to_string(),
            "(_1_ = foobar OR _2_ <> 999)"
        );
    }
}
