//! `WHERE` clauses and `SELECT` queries for relational databases.

pub mod dialect;
pub mod predicate;
pub mod query;

pub use dialect::{DbProduct, Dialect, IdentifierQuoting};
pub use predicate::SqlPredicateBuilder;
pub use query::{QuerySource, SqlQueryBuilder};
