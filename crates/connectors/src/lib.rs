//! Backend predicate builders and the `compile` entry point.
//!
//! ```
//! use connectors::{BackendContext, IdentifierQuoting, DbProduct, compile};
//! use model::{ColumnDescriptor, DataType};
//!
//! let columns = vec![ColumnDescriptor::new("id", DataType::Integer, 0)];
//! let context = BackendContext::Jdbc { product: DbProduct::Postgres, quoting: IdentifierQuoting::Dialect };
//! let predicate = compile("a0c23s2d11o5", &columns, &context.capabilities(), &context).unwrap();
//! assert_eq!(predicate.unwrap().to_string(), "\"id\" = 11");
//! ```

pub mod compile;
pub mod error;
pub mod orc;
pub mod parquet;
pub mod s3;
pub mod sql;
pub mod value;

pub use compile::{BackendContext, NativePredicate, compile, plan_for};
pub use error::{ErrorKind, PushdownError};
pub use sql::{DbProduct, Dialect, IdentifierQuoting};
pub use value::Literal;
