use thiserror::Error;

/// What went wrong while scanning or assembling a filter string.
///
/// Positions are byte offsets into the filter string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("filter parsing ended with no result")]
    EmptyResult,

    #[error("unknown opcode {opcode}({code}) at {position}")]
    UnknownOpcode {
        opcode: char,
        code: u32,
        position: usize,
    },

    #[error("numeric argument expected at {0}")]
    NumericExpected(usize),

    #[error("invalid numeric argument {0}")]
    InvalidNumber(String),

    #[error("value {value} larger than intmax ending at {position}")]
    IntOverflow { value: i64, position: usize },

    #[error("negative value {value} not allowed ending at {position}")]
    NegativeValue { value: i64, position: usize },

    #[error("datatype OID should follow at {0}")]
    DataTypeExpected(usize),

    #[error("invalid DataType OID at {0}")]
    InvalidDataType(usize),

    #[error("expected non-scalar datatype, but got datatype with oid = {0}")]
    ScalarTypeForArray(i32),

    #[error("data length delimiter 's' expected at {0}")]
    LengthDelimiterExpected(usize),

    #[error("data delimiter 'd' expected at {0}")]
    DataDelimiterExpected(usize),

    #[error("data size larger than filter string starting at {0}")]
    TruncatedLiteral(usize),

    #[error("filter string is shorter than expected")]
    TruncatedArray,

    #[error("literal starting at {0} is not valid UTF-8")]
    InvalidUtf8(usize),

    #[error("unknown op ending at {0}")]
    UnknownOperator(usize),

    #[error("missing operands for op {operator} at {position}")]
    MissingOperands { operator: String, position: usize },

    #[error("invalid operands for op {operator} at {position}: {reason}")]
    InvalidOperands {
        operator: String,
        position: usize,
        reason: &'static str,
    },

    #[error("Stack not empty, missing operators?")]
    StackNotEmpty,

    #[error("filter parsing failed, missing operators?")]
    MissingOperators,
}

/// A filter string that could not be turned into a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} (filter string: '{filter}')")]
pub struct MalformedExpression {
    #[source]
    pub kind: SyntaxError,
    pub filter: String,
}

impl MalformedExpression {
    pub fn new(kind: SyntaxError, filter: &str) -> Self {
        Self {
            kind,
            filter: filter.to_string(),
        }
    }
}

pub type ParseResult<T> = Result<T, MalformedExpression>;
