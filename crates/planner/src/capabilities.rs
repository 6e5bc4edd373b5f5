use filter_syntax::{LogicalOperator, Operator};
use model::{DataType, StorageCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a backend can evaluate natively.
///
/// `data_types` and `storage` are unrestricted when `None`. When `storage`
/// is restricted, a column whose storage category is unknown is treated as
/// unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet {
    pub operators: BTreeSet<Operator>,
    #[serde(default = "all_logical_operators")]
    pub logical_operators: BTreeSet<LogicalOperator>,
    #[serde(default)]
    pub data_types: Option<BTreeSet<DataType>>,
    #[serde(default)]
    pub storage: Option<BTreeSet<StorageCategory>>,
}

fn all_logical_operators() -> BTreeSet<LogicalOperator> {
    LogicalOperator::ALL.into_iter().collect()
}

const INTEGRAL_TYPES: [DataType; 3] = [DataType::Smallint, DataType::Integer, DataType::Bigint];
const TEXT_TYPES: [DataType; 3] = [DataType::Text, DataType::Varchar, DataType::Bpchar];

impl CapabilitySet {
    pub fn new<I: IntoIterator<Item = Operator>>(operators: I) -> Self {
        Self {
            operators: operators.into_iter().collect(),
            logical_operators: all_logical_operators(),
            data_types: None,
            storage: None,
        }
    }

    /// Every operator, every type.
    pub fn all() -> Self {
        Self::new(Operator::ALL)
    }

    pub fn with_logical_operators<I: IntoIterator<Item = LogicalOperator>>(mut self, ops: I) -> Self {
        self.logical_operators = ops.into_iter().collect();
        self
    }

    pub fn with_data_types<I: IntoIterator<Item = DataType>>(mut self, types: I) -> Self {
        self.data_types = Some(types.into_iter().collect());
        self
    }

    pub fn with_storage<I: IntoIterator<Item = StorageCategory>>(mut self, storage: I) -> Self {
        self.storage = Some(storage.into_iter().collect());
        self
    }

    pub fn without(mut self, operator: Operator) -> Self {
        self.operators.remove(&operator);
        self
    }

    /// Columnar search-argument backend.
    pub fn orc() -> Self {
        Self::all().without(Operator::Like).with_data_types(
            INTEGRAL_TYPES
                .into_iter()
                .chain(TEXT_TYPES)
                .chain([
                    DataType::Real,
                    DataType::Float8,
                    DataType::Numeric,
                    DataType::Boolean,
                    DataType::Date,
                    DataType::Timestamp,
                ]),
        )
    }

    /// Columnar filter-predicate backend.
    pub fn parquet() -> Self {
        Self::all()
            .without(Operator::Like)
            .without(Operator::In)
            .with_storage([
                StorageCategory::Int32,
                StorageCategory::Int64,
                StorageCategory::Boolean,
                StorageCategory::Binary,
                StorageCategory::Float,
                StorageCategory::Double,
            ])
    }

    /// Relational databases.
    pub fn jdbc() -> Self {
        Self::all()
    }

    /// Object-store select service.
    pub fn s3_select() -> Self {
        Self::all().without(Operator::Like).with_data_types(
            INTEGRAL_TYPES.into_iter().chain(TEXT_TYPES).chain([
                DataType::Real,
                DataType::Float8,
                DataType::Boolean,
                DataType::Date,
                DataType::Timestamp,
            ]),
        )
    }

    pub fn supports_operator(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }

    pub fn supports_logical(&self, operator: LogicalOperator) -> bool {
        self.logical_operators.contains(&operator)
    }

    pub fn supports_data_type(&self, data_type: Option<DataType>) -> bool {
        match (&self.data_types, data_type) {
            (None, _) => true,
            (Some(types), Some(data_type)) => types.contains(&data_type),
            (Some(_), None) => false,
        }
    }

    pub fn supports_storage(&self, storage: Option<StorageCategory>) -> bool {
        match (&self.storage, storage) {
            (None, _) => true,
            (Some(allowed), Some(category)) => allowed.contains(&category),
            (Some(_), None) => false,
        }
    }
}
