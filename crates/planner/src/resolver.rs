use model::{ColumnDescriptor, DataType, StorageCategory};

/// Resolves the column index of a filter to the caller's column catalog.
pub trait ColumnResolver {
    fn column(&self, index: usize) -> Option<&ColumnDescriptor>;

    fn data_type(&self, index: usize) -> Option<DataType> {
        self.column(index).and_then(ColumnDescriptor::data_type)
    }

    /// Physical storage category of the column in the scanned backend.
    fn storage(&self, index: usize) -> Option<StorageCategory> {
        self.column(index).and_then(|c| c.storage)
    }
}

impl ColumnResolver for [ColumnDescriptor] {
    fn column(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.get(index)
    }
}

impl ColumnResolver for Vec<ColumnDescriptor> {
    fn column(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.get(index)
    }
}

impl<R: ColumnResolver + ?Sized> ColumnResolver for &R {
    fn column(&self, index: usize) -> Option<&ColumnDescriptor> {
        (**self).column(index)
    }

    fn data_type(&self, index: usize) -> Option<DataType> {
        (**self).data_type(index)
    }

    fn storage(&self, index: usize) -> Option<StorageCategory> {
        (**self).storage(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reports every column as text stored in BINARY.
    struct TextOnly(Vec<ColumnDescriptor>);

    impl ColumnResolver for TextOnly {
        fn column(&self, index: usize) -> Option<&ColumnDescriptor> {
            self.0.get(index)
        }

        fn data_type(&self, _index: usize) -> Option<DataType> {
            Some(DataType::Text)
        }

        fn storage(&self, _index: usize) -> Option<StorageCategory> {
            Some(StorageCategory::Binary)
        }
    }

    #[test]
    fn test_reference_forwards_overrides() {
        let resolver = TextOnly(vec![ColumnDescriptor::new("id", DataType::Integer, 0)]);
        let by_ref = &resolver;
        assert_eq!(ColumnResolver::data_type(&by_ref, 0), Some(DataType::Text));
        assert_eq!(ColumnResolver::storage(&by_ref, 0), Some(StorageCategory::Binary));
        assert_eq!(ColumnResolver::column(&by_ref, 0).map(|c| c.name.as_str()), Some("id"));
    }
}
