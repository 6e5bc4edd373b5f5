//! Search arguments in the shape the ORC reader consumes: a list of
//! predicate leaves and a boolean expression over their positions.

use crate::value::Literal;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafOperator {
    Equals,
    LessThan,
    LessThanEquals,
    In,
    IsNull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafType {
    Long,
    Float,
    String,
    Date,
    Decimal,
    Timestamp,
    Boolean,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredicateLeaf {
    pub operator: LeafOperator,
    pub leaf_type: LeafType,
    pub column: String,
    pub literals: Vec<Literal>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionTree {
    Leaf(usize),
    And(Vec<ExpressionTree>),
    Or(Vec<ExpressionTree>),
    Not(Box<ExpressionTree>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchArgument {
    pub leaves: Vec<PredicateLeaf>,
    pub expression: ExpressionTree,
}

impl SearchArgument {
    pub fn leaf(&self, index: usize) -> Option<&PredicateLeaf> {
        self.leaves.get(index)
    }
}

impl ExpressionTree {
    /// Builds an `AND`, flattening nested conjunctions.
    pub fn and(left: ExpressionTree, right: ExpressionTree) -> Self {
        Self::flatten(left, right, true)
    }

    pub fn or(left: ExpressionTree, right: ExpressionTree) -> Self {
        Self::flatten(left, right, false)
    }

    pub fn not(child: ExpressionTree) -> Self {
        ExpressionTree::Not(Box::new(child))
    }

    fn flatten(left: ExpressionTree, right: ExpressionTree, conjunction: bool) -> Self {
        let mut children = Vec::new();
        for child in [left, right] {
            match (child, conjunction) {
                (ExpressionTree::And(nested), true) | (ExpressionTree::Or(nested), false) => {
                    children.extend(nested)
                }
                (other, _) => children.push(other),
            }
        }
        if conjunction {
            ExpressionTree::And(children)
        } else {
            ExpressionTree::Or(children)
        }
    }
}

impl fmt::Display for LeafOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeafOperator::Equals => "EQUALS",
            LeafOperator::LessThan => "LESS_THAN",
            LeafOperator::LessThanEquals => "LESS_THAN_EQUALS",
            LeafOperator::In => "IN",
            LeafOperator::IsNull => "IS_NULL",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for PredicateLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {}", self.operator, self.column)?;
        for literal in &self.literals {
            write!(f, " {literal}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for ExpressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, children) = match self {
            ExpressionTree::Leaf(index) => return write!(f, "leaf-{index}"),
            ExpressionTree::Not(child) => return write!(f, "(not {child})"),
            ExpressionTree::And(children) => ("and", children),
            ExpressionTree::Or(children) => ("or", children),
        };
        write!(f, "({name}")?;
        for child in children {
            write!(f, " {child}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for SearchArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, leaf) in self.leaves.iter().enumerate() {
            write!(f, "leaf-{index} = {leaf}, ")?;
        }
        write!(f, "expr = {}", self.expression)
    }
}
