//! Row-group filter predicates for Parquet files.

pub mod builder;
pub mod predicate;
pub mod schema;

pub use builder::FilterPredicateBuilder;
pub use predicate::{CompareOp, FilterPredicate, FilterValue};
pub use schema::{LogicalType, ParquetField, ParquetSchema, SchemaResolver};
