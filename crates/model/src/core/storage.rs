use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical representation a backend uses to store a column's values.
///
/// The category of a column is configuration: it comes from the column
/// catalog or from the file schema of the backend being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageCategory {
    Boolean,
    Int32,
    Int64,
    /// 96-bit encoded timestamp.
    Int96,
    Float,
    Double,
    Binary,
    FixedLenByteArray,
}

impl fmt::Display for StorageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageCategory::Boolean => "BOOLEAN",
            StorageCategory::Int32 => "INT32",
            StorageCategory::Int64 => "INT64",
            StorageCategory::Int96 => "INT96",
            StorageCategory::Float => "FLOAT",
            StorageCategory::Double => "DOUBLE",
            StorageCategory::Binary => "BINARY",
            StorageCategory::FixedLenByteArray => "FIXED_LEN_BYTE_ARRAY",
        };
        write!(f, "{name}")
    }
}
