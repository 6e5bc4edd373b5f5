//! The SQL subset understood by S3 Select.

pub mod predicate;
pub mod query;

pub use predicate::S3SelectPredicateBuilder;
pub use query::S3SelectQueryBuilder;
