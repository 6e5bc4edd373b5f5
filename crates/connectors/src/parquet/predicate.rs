//! Row-group filter predicates in the parquet-mr `FilterApi` shape.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Binary(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterPredicate {
    /// A comparison against a typed column; a `None` value compares with null.
    Compare {
        op: CompareOp,
        column: String,
        value: Option<FilterValue>,
    },
    And(Box<FilterPredicate>, Box<FilterPredicate>),
    Or(Box<FilterPredicate>, Box<FilterPredicate>),
    Not(Box<FilterPredicate>),
}

impl FilterPredicate {
    pub fn compare(op: CompareOp, column: impl Into<String>, value: Option<FilterValue>) -> Self {
        FilterPredicate::Compare {
            op,
            column: column.into(),
            value,
        }
    }

    pub fn and(left: FilterPredicate, right: FilterPredicate) -> Self {
        FilterPredicate::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: FilterPredicate, right: FilterPredicate) -> Self {
        FilterPredicate::Or(Box::new(left), Box::new(right))
    }

    pub fn not(child: FilterPredicate) -> Self {
        FilterPredicate::Not(Box::new(child))
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompareOp::Eq => "eq",
            CompareOp::NotEq => "noteq",
            CompareOp::Lt => "lt",
            CompareOp::LtEq => "lteq",
            CompareOp::Gt => "gt",
            CompareOp::GtEq => "gteq",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Int(v) => write!(f, "{v}"),
            FilterValue::Long(v) => write!(f, "{v}"),
            FilterValue::Float(v) => write!(f, "{}", ryu::Buffer::new().format(*v)),
            FilterValue::Double(v) => write!(f, "{}", ryu::Buffer::new().format(*v)),
            FilterValue::Boolean(v) => write!(f, "{v}"),
            FilterValue::Binary(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterPredicate::Compare { op, column, value } => match value {
                Some(value) => write!(f, "{op}({column}, {value})"),
                None => write!(f, "{op}({column}, null)"),
            },
            FilterPredicate::And(l, r) => write!(f, "and({l}, {r})"),
            FilterPredicate::Or(l, r) => write!(f, "or({l}, {r})"),
            FilterPredicate::Not(c) => write!(f, "not({c})"),
        }
    }
}
