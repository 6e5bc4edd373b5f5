use filter_syntax::MalformedExpression;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PushdownError {
    /// The filter string could not be parsed.
    #[error(transparent)]
    Malformed(#[from] MalformedExpression),

    /// A builder reached a node shape the pruner should have removed.
    #[error("Unsupported construct: {0}")]
    UnsupportedConstruct(String),

    /// An operator the backend cannot express.
    #[error("not supported {0}")]
    UnsupportedOperator(String),

    /// A column whose type the backend cannot filter on.
    #[error("column '{column}' of type {type_name} is not supported")]
    UnsupportedColumnType { column: String, type_name: String },

    /// A column index or name that does not resolve.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A literal whose text does not parse as its declared type.
    #[error("Cannot decode '{value}' as {data_type}: {reason}")]
    ValueDecode {
        value: String,
        data_type: String,
        reason: String,
    },
}

/// Coarse classification callers use to pick a recovery policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller or protocol bug; always fail the request.
    MalformedExpression,
    /// Internal fault; fail or fall back to no pushdown.
    UnsupportedConstruct,
    /// Corrupted input; fail the request.
    ValueDecode,
}

impl PushdownError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PushdownError::Malformed(_) => ErrorKind::MalformedExpression,
            PushdownError::UnsupportedConstruct(_)
            | PushdownError::UnsupportedOperator(_)
            | PushdownError::UnsupportedColumnType { .. }
            | PushdownError::ColumnNotFound(_) => ErrorKind::UnsupportedConstruct,
            PushdownError::ValueDecode { .. } => ErrorKind::ValueDecode,
        }
    }

    pub fn unsupported_type(column: &str, type_name: impl fmt::Display) -> Self {
        PushdownError::UnsupportedColumnType {
            column: column.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MalformedExpression => write!(f, "malformed expression"),
            ErrorKind::UnsupportedConstruct => write!(f, "unsupported construct"),
            ErrorKind::ValueDecode => write!(f, "value decode error"),
        }
    }
}

pub type Result<T> = std::result::Result<T, PushdownError>;
