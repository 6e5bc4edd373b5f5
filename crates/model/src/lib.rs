pub mod core;

pub use core::{column::ColumnDescriptor, data_type::DataType, storage::StorageCategory};
