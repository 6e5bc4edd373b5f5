use crate::{
    error::{PushdownError, Result},
    parquet::{
        predicate::{CompareOp, FilterPredicate, FilterValue},
        schema::{LogicalType, ParquetField, ParquetSchema},
    },
    value::Literal,
};
use chrono::{DateTime, NaiveDate};
use filter_syntax::{LogicalOperator, Node, Operator, OperatorNode, TreeFolder, fold};
use model::{DataType, StorageCategory};
use planner::ColumnResolver;

/// Builds a row-group [`FilterPredicate`] typed by the file schema.
pub struct FilterPredicateBuilder<'a, R: ColumnResolver + ?Sized> {
    columns: &'a R,
    schema: &'a ParquetSchema,
}

impl<'a, R: ColumnResolver + ?Sized> FilterPredicateBuilder<'a, R> {
    pub fn new(columns: &'a R, schema: &'a ParquetSchema) -> Self {
        Self { columns, schema }
    }

    pub fn build(mut self, root: &Node) -> Result<FilterPredicate> {
        fold(root, &mut self)
    }
}

fn compare_op(operator: Operator) -> Result<CompareOp> {
    match operator {
        Operator::Equals | Operator::Noop => Ok(CompareOp::Eq),
        Operator::NotEquals => Ok(CompareOp::NotEq),
        Operator::LessThan => Ok(CompareOp::Lt),
        Operator::LessThanOrEqual => Ok(CompareOp::LtEq),
        Operator::GreaterThan => Ok(CompareOp::Gt),
        Operator::GreaterThanOrEqual => Ok(CompareOp::GtEq),
        other => Err(PushdownError::UnsupportedOperator(other.to_string())),
    }
}

fn days_since_epoch(date: NaiveDate) -> Result<i32> {
    let days = date
        .signed_duration_since(DateTime::UNIX_EPOCH.date_naive())
        .num_days();
    i32::try_from(days).map_err(|_| PushdownError::ValueDecode {
        value: date.to_string(),
        data_type: DataType::Date.to_string(),
        reason: "date out of range".to_string(),
    })
}

/// Converts literal text to the value type of the field's physical storage.
fn field_value(field: &ParquetField, raw: &str) -> Result<FilterValue> {
    let value = match (field.physical, field.logical) {
        (_, Some(LogicalType::Decimal)) => {
            return Err(PushdownError::unsupported_type(&field.name, "DECIMAL"));
        }
        (StorageCategory::Int64, Some(logical @ (LogicalType::TimestampMillis | LogicalType::TimestampMicros))) => {
            match Literal::decode(DataType::Timestamp, raw)? {
                Literal::Timestamp(ts) if logical == LogicalType::TimestampMillis => {
                    FilterValue::Long(ts.and_utc().timestamp_millis())
                }
                Literal::Timestamp(ts) => FilterValue::Long(ts.and_utc().timestamp_micros()),
                other => return Err(PushdownError::UnsupportedConstruct(format!("timestamp literal {other}"))),
            }
        }
        (StorageCategory::Int32, Some(LogicalType::Date)) => match Literal::decode(DataType::Date, raw)? {
            Literal::Date(date) => FilterValue::Int(days_since_epoch(date)?),
            other => return Err(PushdownError::UnsupportedConstruct(format!("date literal {other}"))),
        },
        (StorageCategory::Int32, _) => {
            let literal = Literal::decode(DataType::Integer, raw)?;
            let value = literal.as_i64().and_then(|v| i32::try_from(v).ok());
            FilterValue::Int(value.ok_or_else(|| {
                PushdownError::UnsupportedConstruct(format!("int32 literal {literal}"))
            })?)
        }
        (StorageCategory::Int64, _) => {
            let literal = Literal::decode(DataType::Bigint, raw)?;
            FilterValue::Long(literal.as_i64().ok_or_else(|| {
                PushdownError::UnsupportedConstruct(format!("int64 literal {literal}"))
            })?)
        }
        (StorageCategory::Float, _) => match Literal::decode(DataType::Real, raw)? {
            Literal::Float(v) => FilterValue::Float(v),
            other => return Err(PushdownError::UnsupportedConstruct(format!("float literal {other}"))),
        },
        (StorageCategory::Double, _) => match Literal::decode(DataType::Float8, raw)? {
            Literal::Double(v) => FilterValue::Double(v),
            other => return Err(PushdownError::UnsupportedConstruct(format!("double literal {other}"))),
        },
        (StorageCategory::Boolean, _) => {
            let literal = Literal::decode(DataType::Boolean, raw)?;
            FilterValue::Boolean(literal.as_bool().ok_or_else(|| {
                PushdownError::UnsupportedConstruct(format!("boolean literal {literal}"))
            })?)
        }
        (StorageCategory::Binary, _) => FilterValue::Binary(raw.to_string()),
        (physical, _) => return Err(PushdownError::unsupported_type(&field.name, physical)),
    };
    Ok(value)
}

impl<R: ColumnResolver + ?Sized> TreeFolder for FilterPredicateBuilder<'_, R> {
    type Output = FilterPredicate;
    type Error = PushdownError;

    fn fold_comparison(&mut self, node: &OperatorNode, operator: Operator) -> Result<FilterPredicate> {
        let index = node
            .column()
            .ok_or_else(|| PushdownError::UnsupportedConstruct(format!("comparison {node} has no column")))?
            .index;
        let column = self
            .columns
            .column(index)
            .ok_or_else(|| PushdownError::ColumnNotFound(index.to_string()))?;
        let field = self
            .schema
            .field(&column.name)
            .ok_or_else(|| PushdownError::ColumnNotFound(column.name.clone()))?;

        if matches!(field.physical, StorageCategory::Int96 | StorageCategory::FixedLenByteArray) {
            return Err(PushdownError::unsupported_type(&field.name, field.physical));
        }

        match operator {
            Operator::IsNull => return Ok(FilterPredicate::compare(CompareOp::Eq, &field.name, None)),
            Operator::IsNotNull => {
                return Ok(FilterPredicate::compare(CompareOp::NotEq, &field.name, None));
            }
            _ => {}
        }

        let op = compare_op(operator)?;
        if field.physical == StorageCategory::Boolean && !matches!(op, CompareOp::Eq | CompareOp::NotEq) {
            return Err(PushdownError::UnsupportedOperator(format!(
                "{operator} on boolean column '{}'",
                field.name
            )));
        }

        let value = match (operator, node.scalar()) {
            (_, Some(scalar)) => field_value(field, &scalar.raw_text)?,
            (Operator::Noop, None) => field_value(field, "true")?,
            (_, None) => {
                return Err(PushdownError::UnsupportedConstruct(format!(
                    "{operator} without a scalar operand"
                )));
            }
        };
        Ok(FilterPredicate::compare(op, &field.name, Some(value)))
    }

    fn fold_logical(
        &mut self,
        operator: LogicalOperator,
        left: FilterPredicate,
        right: Option<FilterPredicate>,
    ) -> Result<FilterPredicate> {
        match (operator, right) {
            (LogicalOperator::Not, _) => Ok(FilterPredicate::not(left)),
            (LogicalOperator::And, Some(right)) => Ok(FilterPredicate::and(left, right)),
            (LogicalOperator::Or, Some(right)) => Ok(FilterPredicate::or(left, right)),
            (operator, None) => Err(PushdownError::UnsupportedConstruct(format!(
                "{operator} with a single operand"
            ))),
        }
    }

    fn unexpected(&mut self, node: &Node) -> PushdownError {
        PushdownError::UnsupportedConstruct(format!("operand {node} in predicate position"))
    }
}
