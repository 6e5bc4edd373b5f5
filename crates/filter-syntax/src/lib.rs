//! Parser and tree model for postfix filter strings.
//!
//! ```text
//! a1c25s4drow2o5a6c23s2d42o2l0   =>   (_1_ = row2 AND _6_ > 42)
//! ```

pub mod ast;
pub mod builder;
pub mod error;
pub mod lexer;
pub mod writer;

pub use ast::{
    node::{Node, OperatorNode},
    operand::{ArrayOperand, ColumnIndexOperand, ScalarOperand},
    operator::{LogicalOperator, Operator, OperatorKind},
    visitor::{TreeFolder, TreeVisitor, fold, traverse, traverse_all},
};
pub use builder::parse;
pub use error::{MalformedExpression, ParseResult, SyntaxError};
pub use writer::to_filter_string;
