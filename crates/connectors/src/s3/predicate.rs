use crate::{
    error::{PushdownError, Result},
    value::Literal,
};
use filter_syntax::{LogicalOperator, Node, Operator, OperatorNode, TreeFolder, fold};
use model::{ColumnDescriptor, DataType, core::utils::quote_sql_string};
use planner::ColumnResolver;

pub(crate) const TABLE_ALIAS: &str = "s";

/// Column reference in an S3 Select query: `s._<n>` by position or
/// `s."name"` by header name.
pub(crate) fn column_reference(column: &ColumnDescriptor, positional: bool) -> String {
    if positional {
        format!("{TABLE_ALIAS}._{}", column.index + 1)
    } else {
        format!(r#"{TABLE_ALIAS}."{}""#, column.name)
    }
}

/// Renders a pruned tree in the SQL subset understood by S3 Select.
///
/// Every value in an object is text, so column references are cast to the
/// column's type before comparison.
pub struct S3SelectPredicateBuilder<'a, R: ColumnResolver + ?Sized> {
    columns: &'a R,
    positional: bool,
}

impl<'a, R: ColumnResolver + ?Sized> S3SelectPredicateBuilder<'a, R> {
    pub fn new(columns: &'a R, positional: bool) -> Self {
        Self { columns, positional }
    }

    pub fn build(mut self, root: &Node) -> Result<String> {
        fold(root, &mut self)
    }

    fn typed_reference(&self, column: &ColumnDescriptor, data_type: DataType) -> Result<String> {
        let reference = column_reference(column, self.positional);
        let typed = match data_type {
            DataType::Smallint | DataType::Integer | DataType::Bigint => {
                format!("CAST({reference} AS int)")
            }
            DataType::Boolean => format!("CAST({reference} AS bool)"),
            DataType::Float8 => format!("CAST({reference} AS float)"),
            DataType::Real => format!("CAST({reference} AS decimal)"),
            DataType::Text | DataType::Varchar | DataType::Bpchar => reference,
            DataType::Date | DataType::Timestamp => format!("TO_TIMESTAMP({reference})"),
            other => return Err(PushdownError::unsupported_type(&column.name, other)),
        };
        Ok(typed)
    }
}

fn serialize_value(data_type: DataType, raw: &str) -> Result<String> {
    match data_type {
        DataType::Text | DataType::Varchar | DataType::Bpchar => Ok(quote_sql_string(raw)),
        DataType::Date | DataType::Timestamp => {
            Literal::decode(data_type, raw)?;
            Ok(format!("TO_TIMESTAMP('{raw}')"))
        }
        DataType::Boolean => {
            let value = Literal::decode(data_type, raw)?.as_bool().unwrap_or_default();
            Ok(value.to_string())
        }
        _ => {
            Literal::decode(data_type, raw)?;
            Ok(raw.to_string())
        }
    }
}

impl<R: ColumnResolver + ?Sized> TreeFolder for S3SelectPredicateBuilder<'_, R> {
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
        let data_type = column
            .data_type()
            .ok_or_else(|| PushdownError::unsupported_type(&column.name, column.type_oid))?;
        let reference = self.typed_reference(column, data_type)?;

        let sql = match operator {
            Operator::IsNull | Operator::IsNotNull => format!("{reference} {}", operator.symbol()),
            Operator::Noop => {
                let value = match node.scalar() {
                    Some(scalar) => Literal::decode(DataType::Boolean, &scalar.raw_text)?
                        .as_bool()
                        .unwrap_or(true),
                    None => true,
                };
                if value {
                    reference
                } else {
                    format!("{reference} = false")
                }
            }
            Operator::In => {
                let values = match node.value() {
                    Some(Node::Array(array)) => array
                        .elements
                        .iter()
                        .map(|element| serialize_value(data_type, element))
                        .collect::<Result<Vec<_>>>()?,
                    Some(Node::Scalar(scalar)) => vec![serialize_value(data_type, &scalar.raw_text)?],
                    _ => {
                        return Err(PushdownError::UnsupportedConstruct(format!(
                            "{operator} without a value list"
                        )));
                    }
                };
                format!("{reference} IN ({})", values.join(","))
            }
            Operator::Like => return Err(PushdownError::UnsupportedOperator(operator.to_string())),
            _ => {
                let scalar = node.scalar().ok_or_else(|| {
                    PushdownError::UnsupportedConstruct(format!("{operator} without a scalar operand"))
                })?;
                let value = serialize_value(data_type, &scalar.raw_text)?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use filter_syntax::parse;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", DataType::Integer, 0),
            ColumnDescriptor::new("cdate", DataType::Date, 1),
            ColumnDescriptor::new("amt", DataType::Float8, 2),
            ColumnDescriptor::new("grade", DataType::Text, 3),
            ColumnDescriptor::new("b", DataType::Boolean, 4),
            ColumnDescriptor::new("ratio", DataType::Real, 5),
            ColumnDescriptor::new("raw", DataType::Bytea, 6),
        ]
    }

    fn render(filter: &str, positional: bool) -> Result<String> {
        let cols = columns();
        S3SelectPredicateBuilder::new(&cols, positional).build(&parse(filter).unwrap())
    }

    #[test]
    fn test_references() {
        assert_eq!(render("a0c20s1d1o5", true).unwrap(), "CAST(s._1 AS int) = 1");
        assert_eq!(render("a0c20s1d1o5", false).unwrap(), r#"CAST(s."id" AS int) = 1"#);
    }

    #[test]
    fn test_typed_casts() {
        assert_eq!(
            render("a1c25s10d2008-02-01o2a1c25s10d2008-12-01o1l0a2c20s4d1200o2l0", true).unwrap(),
            "((TO_TIMESTAMP(s._2) > TO_TIMESTAMP('2008-02-01') AND TO_TIMESTAMP(s._2) < \
             TO_TIMESTAMP('2008-12-01')) AND CAST(s._3 AS float) > 1200)"
        );
        assert_eq!(render("a5c700s3d0.5o3", true).unwrap(), "CAST(s._6 AS decimal) <= 0.5");
    }

    #[test]
    fn test_in_lists() {
        assert_eq!(render("a0m1016s3d194s5d82756o10", true).unwrap(), "CAST(s._1 AS int) IN (194,82756)");
        assert_eq!(
            render("a3m1009s5dA'B'Cs1dBo10", false).unwrap(),
            r#"s."grade" IN ('A''B''C','B')"#
        );
    }

    #[test]
    fn test_null_tests() {
        assert_eq!(render("a3o9", true).unwrap(), "s._4 IS NOT NULL");
        assert_eq!(render("a3o8", false).unwrap(), r#"s."grade" IS NULL"#);
    }

    #[test]
    fn test_boolean_noop() {
        assert_eq!(render("a4c16s4dtrueo0l2", true).unwrap(), "NOT (CAST(s._5 AS bool))");
        assert_eq!(render("a4c16s5dfalseo0", true).unwrap(), "CAST(s._5 AS bool) = false");
    }

    #[test]
    fn test_boolean_literals_are_normalized() {
        assert_eq!(render("a4c16s1dto5", false).unwrap(), r#"CAST(s."b" AS bool) = true"#);
        assert_eq!(render("a4c16s1dFo6", true).unwrap(), "CAST(s._5 AS bool) <> false");
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            render("a6o8", true).unwrap_err().to_string(),
            "column 'raw' of type bytea is not supported"
        );
        assert!(matches!(
            render("a3c25s2dA%o7", true).unwrap_err(),
            PushdownError::UnsupportedOperator(_)
        ));
    }
}
