use crate::ast::operator::{LogicalOperator, Operator};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range of the token in the filter string.
    pub span: (usize, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Operands
    Column(usize),
    Scalar { type_oid: i32, value: String },
    Array { type_oid: i32, elements: Vec<String> },

    // Operators
    Operator(Operator),
    Logical(LogicalOperator),
}

impl Token {
    /// Offset just past the token, where operator errors are reported.
    pub fn end(&self) -> usize {
        self.span.1
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Column(index) => write!(f, "a{index}"),
            TokenKind::Scalar { type_oid, value } => {
                write!(f, "c{type_oid}s{}d{value}", value.len())
            }
            TokenKind::Array { type_oid, elements } => {
                write!(f, "m{type_oid}")?;
                for element in elements {
                    write!(f, "s{}d{element}", element.len())?;
                }
                Ok(())
            }
            TokenKind::Operator(op) => write!(f, "o{}", op.code()),
            TokenKind::Logical(op) => write!(f, "l{}", op.code()),
        }
    }
}
