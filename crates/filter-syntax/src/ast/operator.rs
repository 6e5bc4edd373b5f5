use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operators. Discriminants are the wire codes of the `o<code>`
/// opcode and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    /// Bare boolean truth test.
    Noop = 0,
    LessThan = 1,
    GreaterThan = 2,
    LessThanOrEqual = 3,
    GreaterThanOrEqual = 4,
    Equals = 5,
    NotEquals = 6,
    Like = 7,
    IsNull = 8,
    IsNotNull = 9,
    In = 10,
}

impl Operator {
    pub const ALL: [Operator; 11] = [
        Operator::Noop,
        Operator::LessThan,
        Operator::GreaterThan,
        Operator::LessThanOrEqual,
        Operator::GreaterThanOrEqual,
        Operator::Equals,
        Operator::NotEquals,
        Operator::Like,
        Operator::IsNull,
        Operator::IsNotNull,
        Operator::In,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    /// Null tests take a column and no value.
    pub fn is_null_test(self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }

    /// The operator to use once the operands are swapped, so that
    /// `5 < col` becomes `col > 5`. `None` when the operands cannot trade
    /// places, as with `'abc' LIKE col`.
    pub fn mirrored(self) -> Option<Self> {
        match self {
            Operator::LessThan => Some(Operator::GreaterThan),
            Operator::GreaterThan => Some(Operator::LessThan),
            Operator::LessThanOrEqual => Some(Operator::GreaterThanOrEqual),
            Operator::GreaterThanOrEqual => Some(Operator::LessThanOrEqual),
            Operator::Equals | Operator::NotEquals => Some(self),
            _ => None,
        }
    }

    /// SQL spelling of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Noop => "",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::Equals => "=",
            Operator::NotEquals => "<>",
            Operator::Like => "LIKE",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
            Operator::In => "IN",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::Noop => "NOOP",
            Operator::LessThan => "LESS_THAN",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            Operator::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            Operator::Equals => "EQUALS",
            Operator::NotEquals => "NOT_EQUALS",
            Operator::Like => "LIKE",
            Operator::IsNull => "IS_NULL",
            Operator::IsNotNull => "IS_NOT_NULL",
            Operator::In => "IN",
        };
        write!(f, "{name}")
    }
}

/// Logical combinators, wire codes of the `l<code>` opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicalOperator {
    And = 0,
    Or = 1,
    Not = 2,
}

impl LogicalOperator {
    pub const ALL: [LogicalOperator; 3] =
        [LogicalOperator::And, LogicalOperator::Or, LogicalOperator::Not];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn arity(self) -> usize {
        match self {
            LogicalOperator::Not => 1,
            LogicalOperator::And | LogicalOperator::Or => 2,
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOperator::And => write!(f, "AND"),
            LogicalOperator::Or => write!(f, "OR"),
            LogicalOperator::Not => write!(f, "NOT"),
        }
    }
}

/// The operator carried by an [`OperatorNode`](crate::ast::node::OperatorNode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "operator", rename_all = "snake_case")]
pub enum OperatorKind {
    Comparison(Operator),
    Logical(LogicalOperator),
}

impl OperatorKind {
    pub fn is_logical(&self) -> bool {
        matches!(self, OperatorKind::Logical(_))
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorKind::Comparison(op) => write!(f, "{op}"),
            OperatorKind::Logical(op) => write!(f, "{op}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_codes_are_fixed() {
        let codes: Vec<u32> = Operator::ALL.iter().map(|op| op.code()).collect();
        assert_eq!(codes, (0..=10).collect::<Vec<_>>());
        assert_eq!(Operator::from_code(5), Some(Operator::Equals));
        assert_eq!(Operator::from_code(11), None);

        assert_eq!(LogicalOperator::from_code(0), Some(LogicalOperator::And));
        assert_eq!(LogicalOperator::from_code(2), Some(LogicalOperator::Not));
        assert_eq!(LogicalOperator::from_code(7), None);
    }

    #[test]
    fn test_mirrored_operators() {
        assert_eq!(Operator::LessThan.mirrored(), Some(Operator::GreaterThan));
        assert_eq!(Operator::GreaterThanOrEqual.mirrored(), Some(Operator::LessThanOrEqual));
        assert_eq!(Operator::Equals.mirrored(), Some(Operator::Equals));
        assert_eq!(Operator::Like.mirrored(), None);
        assert_eq!(Operator::In.mirrored(), None);
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(format!("{}", Operator::LessThan), "LESS_THAN");
        assert_eq!(format!("{}", LogicalOperator::Or), "OR");
        assert_eq!(Operator::NotEquals.symbol(), "<>");
    }
}
