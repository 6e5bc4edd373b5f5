use model::{ColumnDescriptor, StorageCategory};
use planner::ColumnResolver;
use serde::{Deserialize, Serialize};

/// Logical annotation on a Parquet primitive field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicalType {
    String,
    Date,
    Decimal,
    TimestampMillis,
    TimestampMicros,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParquetField {
    pub name: String,
    pub physical: StorageCategory,
    #[serde(default)]
    pub logical: Option<LogicalType>,
}

impl ParquetField {
    pub fn new(name: impl Into<String>, physical: StorageCategory) -> Self {
        Self {
            name: name.into(),
            physical,
            logical: None,
        }
    }

    pub fn with_logical(mut self, logical: LogicalType) -> Self {
        self.logical = Some(logical);
        self
    }
}

/// The flat schema of a Parquet file, as read from its footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParquetSchema {
    pub fields: Vec<ParquetField>,
}

impl ParquetSchema {
    pub fn new(fields: Vec<ParquetField>) -> Self {
        Self { fields }
    }

    /// Looks a field up by name, falling back to the lower-cased name since
    /// the source engine folds unquoted identifiers.
    pub fn field(&self, name: &str) -> Option<&ParquetField> {
        self.fields.iter().find(|f| f.name == name).or_else(|| {
            let lowered = name.to_lowercase();
            self.fields.iter().find(|f| f.name == lowered)
        })
    }
}

/// Resolves columns against the catalog but takes each column's storage
/// category from the file schema.
pub struct SchemaResolver<'a, R: ColumnResolver + ?Sized> {
    columns: &'a R,
    schema: &'a ParquetSchema,
}

impl<'a, R: ColumnResolver + ?Sized> SchemaResolver<'a, R> {
    pub fn new(columns: &'a R, schema: &'a ParquetSchema) -> Self {
        Self { columns, schema }
    }
}

impl<R: ColumnResolver + ?Sized> ColumnResolver for SchemaResolver<'_, R> {
    fn column(&self, index: usize) -> Option<&ColumnDescriptor> {
        self.columns.column(index)
    }

    /// Decimal fields hold unscaled values and report no category, so
    /// their leaves are pruned.
    fn storage(&self, index: usize) -> Option<StorageCategory> {
        let column = self.columns.column(index)?;
        self.schema
            .field(&column.name)
            .filter(|f| f.logical != Some(LogicalType::Decimal))
            .map(|f| f.physical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::DataType;

    fn schema() -> ParquetSchema {
        ParquetSchema::new(vec![
            ParquetField::new("id", StorageCategory::Int32),
            ParquetField::new("Name", StorageCategory::Binary).with_logical(LogicalType::String),
            ParquetField::new("tm", StorageCategory::Int96),
            ParquetField::new("amt", StorageCategory::Int32).with_logical(LogicalType::Decimal),
        ])
    }

    #[test]
    fn test_field_lookup_falls_back_to_lower_case() {
        let schema = schema();
        assert_eq!(schema.field("Name").unwrap().physical, StorageCategory::Binary);
        assert_eq!(schema.field("ID").unwrap().name, "id");
        assert!(schema.field("name").is_none());
    }

    #[test]
    fn test_resolver_takes_storage_from_schema() {
        let schema = schema();
        let columns = vec![
            ColumnDescriptor::new("id", DataType::Integer, 0).with_storage(StorageCategory::Int64),
            ColumnDescriptor::new("tm", DataType::Timestamp, 1),
            ColumnDescriptor::new("missing", DataType::Text, 2),
            ColumnDescriptor::new("amt", DataType::Numeric, 3),
        ];
        let resolver = SchemaResolver::new(&columns, &schema);

        assert_eq!(resolver.storage(0), Some(StorageCategory::Int32));
        assert_eq!(resolver.storage(1), Some(StorageCategory::Int96));
        assert_eq!(resolver.storage(2), None);
        assert_eq!(resolver.storage(3), None);
        assert_eq!(resolver.data_type(1), Some(DataType::Timestamp));
    }

    #[test]
    fn test_schema_from_json() {
        let json = r#"{ "fields": [ { "name": "d", "physical": "INT32", "logical": "DATE" } ] }"#;
        let schema: ParquetSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.field("d").unwrap().logical, Some(LogicalType::Date));
    }
}
