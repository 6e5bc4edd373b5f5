//! Search arguments for stripe and row-group elimination in ORC files.

pub mod builder;
pub mod sarg;

pub use builder::SearchArgumentBuilder;
pub use sarg::{ExpressionTree, LeafOperator, LeafType, PredicateLeaf, SearchArgument};
