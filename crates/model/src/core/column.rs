use crate::core::{data_type::DataType, storage::StorageCategory};
use serde::{Deserialize, Serialize};

/// A column of the table being scanned, as described by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub type_oid: i32,
    /// Ordinal position of the column in the table definition.
    pub index: usize,
    #[serde(default)]
    pub type_name: String,
    /// Precision/scale/length modifiers, e.g. the width of a `char(n)`.
    #[serde(default)]
    pub type_modifiers: Option<Vec<i32>>,
    #[serde(default = "default_projected")]
    pub projected: bool,
    #[serde(default)]
    pub storage: Option<StorageCategory>,
}

fn default_projected() -> bool {
    true
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, data_type: DataType, index: usize) -> Self {
        Self {
            name: name.into(),
            type_oid: data_type.oid(),
            index,
            type_name: data_type.name().to_string(),
            type_modifiers: None,
            projected: true,
            storage: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<i32>) -> Self {
        self.type_modifiers = Some(modifiers);
        self
    }

    pub fn with_storage(mut self, storage: StorageCategory) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_projected(mut self, projected: bool) -> Self {
        self.projected = projected;
        self
    }

    pub fn data_type(&self) -> Option<DataType> {
        DataType::from_oid(self.type_oid)
    }

    /// Declared width of a fixed-length column, if any.
    pub fn width(&self) -> Option<usize> {
        self.type_modifiers
            .as_ref()
            .and_then(|m| m.first())
            .and_then(|w| usize::try_from(*w).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults_from_json() {
        let json = r#"{ "name": "grade", "type_oid": 1042, "index": 3, "type_modifiers": [5] }"#;
        let column: ColumnDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(column.data_type(), Some(DataType::Bpchar));
        assert_eq!(column.width(), Some(5));
        assert!(column.projected);
        assert_eq!(column.storage, None);
    }

    #[test]
    fn test_unknown_oid_has_no_data_type() {
        let mut column = ColumnDescriptor::new("c", DataType::Integer, 0);
        column.type_oid = 5;
        assert_eq!(column.data_type(), None);
        assert_eq!(column.width(), None);
    }
}
