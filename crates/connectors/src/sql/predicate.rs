use crate::{
    error::{PushdownError, Result},
    sql::dialect::{Dialect, IdentifierQuoting},
    value::Literal,
};
use filter_syntax::{LogicalOperator, Node, Operator, OperatorNode, TreeFolder, fold};
use model::{ColumnDescriptor, DataType, core::utils::quote_sql_string};
use planner::ColumnResolver;

/// Renders a pruned tree as the body of a SQL `WHERE` clause.
///
/// Literals are serialized by the type of the column they are compared
/// with. Numbers and temporal values are checked with [`Literal::decode`]
/// first and then written verbatim; booleans are written as `TRUE`/`FALSE`.
pub struct SqlPredicateBuilder<'a, R: ColumnResolver + ?Sized> {
    columns: &'a R,
    dialect: &'a dyn Dialect,
    quoting: &'a IdentifierQuoting,
}

impl<'a, R: ColumnResolver + ?Sized> SqlPredicateBuilder<'a, R> {
    pub fn new(columns: &'a R, dialect: &'a dyn Dialect, quoting: &'a IdentifierQuoting) -> Self {
        Self {
            columns,
            dialect,
            quoting,
        }
    }

    pub fn build(mut self, root: &Node) -> Result<String> {
        fold(root, &mut self)
    }

    fn serialize_value(&self, column: &ColumnDescriptor, raw: &str) -> Result<String> {
        let data_type = column
            .data_type()
            .ok_or_else(|| PushdownError::unsupported_type(&column.name, column.type_oid))?;
        match data_type {
            DataType::Smallint
            | DataType::Integer
            | DataType::Bigint
            | DataType::Real
            | DataType::Float8
            | DataType::Numeric => {
                Literal::decode(data_type, raw)?;
                Ok(raw.to_string())
            }
            DataType::Boolean => {
                let value = Literal::decode(data_type, raw)?.as_bool().unwrap_or_default();
                Ok(if value { "TRUE" } else { "FALSE" }.to_string())
            }
            DataType::Text | DataType::Varchar | DataType::Bpchar => Ok(quote_sql_string(raw)),
            DataType::Date => {
                Literal::decode(data_type, raw)?;
                Ok(self.dialect.wrap_date(raw))
            }
            DataType::Timestamp => {
                Literal::decode(data_type, raw)?;
                Ok(self.dialect.wrap_timestamp(raw))
            }
            other => Err(PushdownError::unsupported_type(&column.name, other)),
        }
    }
}

impl<R: ColumnResolver + ?Sized> TreeFolder for SqlPredicateBuilder<'_, R> {
    type Output = String;
    type Error = PushdownError;

    fn fold_comparison(&mut self, node: &OperatorNode, operator: Operator) -> Result<String> {
        let index = node
            .column()
            .ok_or_else(|| PushdownError::UnsupportedConstruct(format!("comparison {node} has no column")))?
            .index;
        let column = self
            .columns
            .column(index)
            .ok_or_else(|| PushdownError::ColumnNotFound(index.to_string()))?;
        let reference = self.quoting.apply(self.dialect, &column.name);

        let sql = match operator {
            Operator::IsNull | Operator::IsNotNull => format!("{reference} {}", operator.symbol()),
            Operator::Noop => {
                let value = match node.scalar() {
                    Some(scalar) => Literal::decode(DataType::Boolean, &scalar.raw_text)?
                        .as_bool()
                        .unwrap_or(true),
                    None => true,
                };
                let value = if value { "TRUE" } else { "FALSE" };
                format!("{reference} = {value}")
            }
            Operator::Like => {
                let scalar = node.scalar().ok_or_else(|| {
                    PushdownError::UnsupportedConstruct(format!("{operator} without a scalar operand"))
                })?;
                format!("{reference} LIKE {}", quote_sql_string(&scalar.raw_text))
            }
            Operator::In => {
                let values = match node.value() {
                    Some(Node::Array(array)) => array
                        .elements
                        .iter()
                        .map(|element| self.serialize_value(column, element))
                        .collect::<Result<Vec<_>>>()?,
                    Some(Node::Scalar(scalar)) => vec![self.serialize_value(column, &scalar.raw_text)?],
                    _ => {
                        return Err(PushdownError::UnsupportedConstruct(format!(
                            "{operator} without a value list"
                        )));
                    }
                };
                format!("{reference} IN ({})", values.join(","))
            }
            _ => {
                let scalar = node.scalar().ok_or_else(|| {
                    PushdownError::UnsupportedConstruct(format!("{operator} without a scalar operand"))
                })?;
                let value = self.serialize_value(column, &scalar.raw_text)?;
                format!("{reference} {} {value}", operator.symbol())
            }
        };
        Ok(sql)
    }

    fn fold_logical(&mut self, operator: LogicalOperator, left: String, right: Option<String>) -> Result<String> {
        match (operator, right) {
            (LogicalOperator::Not, _) => Ok(format!("NOT ({left})")),
            (operator, Some(right)) => Ok(format!("({left} {operator} {right})")),
            (operator, None) => Err(PushdownError::UnsupportedConstruct(format!(
                "{operator} with a single operand"
            ))),
        }
    }

    fn unexpected(&mut self, node: &Node) -> PushdownError {
        PushdownError::UnsupportedConstruct(format!("operand {node} in predicate position"))
    }
}
