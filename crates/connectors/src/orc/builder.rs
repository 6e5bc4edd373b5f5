use crate::{
    error::{PushdownError, Result},
    orc::sarg::{ExpressionTree, LeafOperator, LeafType, PredicateLeaf, SearchArgument},
    value::Literal,
};
use filter_syntax::{LogicalOperator, Node, Operator, OperatorNode, TreeFolder, fold};
use model::{ColumnDescriptor, DataType};
use planner::ColumnResolver;

/// Builds a [`SearchArgument`] from a pruned tree.
///
/// The search argument only knows `=`, `<`, `<=`, `IN` and `IS NULL`; the
/// remaining comparisons are expressed through negation.
pub struct SearchArgumentBuilder<'a, R: ColumnResolver + ?Sized> {
    columns: &'a R,
    /// File field names by ordinal, when columns are matched by position.
    field_names: Option<&'a [String]>,
    leaves: Vec<PredicateLeaf>,
}

impl<'a, R: ColumnResolver + ?Sized> SearchArgumentBuilder<'a, R> {
    pub fn new(columns: &'a R) -> Self {
        Self {
            columns,
            field_names: None,
            leaves: Vec::new(),
        }
    }

    pub fn positional(columns: &'a R, field_names: &'a [String]) -> Self {
        Self {
            columns,
            field_names: Some(field_names),
            leaves: Vec::new(),
        }
    }

    pub fn build(mut self, root: &Node) -> Result<SearchArgument> {
        let expression = fold(root, &mut self)?;
        Ok(SearchArgument {
            leaves: self.leaves,
            expression,
        })
    }

    fn field_name(&self, column: &ColumnDescriptor) -> Result<String> {
        match self.field_names {
            Some(names) => names.get(column.index).cloned().ok_or_else(|| {
                PushdownError::ColumnNotFound(format!(
                    "no file field at position {} for column '{}'",
                    column.index, column.name
                ))
            }),
            None => Ok(column.name.clone()),
        }
    }

    /// Adds a leaf, reusing an identical one if it already exists.
    fn leaf(
        &mut self,
        operator: LeafOperator,
        leaf_type: LeafType,
        column: &str,
        literals: Vec<Literal>,
    ) -> ExpressionTree {
        let leaf = PredicateLeaf {
            operator,
            leaf_type,
            column: column.to_string(),
            literals,
        };
        let position = match self.leaves.iter().position(|l| *l == leaf) {
            Some(position) => position,
            None => {
                self.leaves.push(leaf);
                self.leaves.len() - 1
            }
        };
        ExpressionTree::Leaf(position)
    }
}

fn leaf_type(data_type: DataType) -> Option<LeafType> {
    match data_type {
        DataType::Smallint | DataType::Integer | DataType::Bigint => Some(LeafType::Long),
        DataType::Real | DataType::Float8 => Some(LeafType::Float),
        DataType::Numeric => Some(LeafType::Decimal),
        DataType::Text | DataType::Varchar | DataType::Bpchar => Some(LeafType::String),
        DataType::Boolean => Some(LeafType::Boolean),
        DataType::Date => Some(LeafType::Date),
        DataType::Timestamp => Some(LeafType::Timestamp),
        _ => None,
    }
}

/// Decodes a literal against the column type, widening floats to doubles.
fn leaf_literal(data_type: DataType, raw: &str) -> Result<Literal> {
    let literal = Literal::decode(data_type, raw)?;
    Ok(match literal {
        Literal::Float(_) => Literal::Double(literal.as_f64().unwrap_or(f64::NAN)),
        other => other,
    })
}

impl<R: ColumnResolver + ?Sized> TreeFolder for SearchArgumentBuilder<'_, R> {
    type Output = ExpressionTree;
    type Error = PushdownError;

    fn fold_comparison(&mut self, node: &OperatorNode, operator: Operator) -> Result<ExpressionTree> {
        let index = node
            .column()
            .ok_or_else(|| PushdownError::UnsupportedConstruct(format!("comparison {node} has no column")))?
            .index;
        let column = self
            .columns
            .column(index)
            .ok_or_else(|| PushdownError::ColumnNotFound(index.to_string()))?;
        let name = self.field_name(column)?;
        let data_type = column
            .data_type()
            .ok_or_else(|| PushdownError::unsupported_type(&column.name, column.type_oid))?;
        let leaf_type =
            leaf_type(data_type).ok_or_else(|| PushdownError::unsupported_type(&column.name, data_type))?;

        let scalar_literal = || -> Result<Literal> {
            let scalar = node.scalar().ok_or_else(|| {
                PushdownError::UnsupportedConstruct(format!("{operator} without a scalar operand"))
            })?;
            leaf_literal(data_type, &scalar.raw_text)
        };

        let tree = match operator {
            Operator::IsNull => self.leaf(LeafOperator::IsNull, leaf_type, &name, vec![]),
            Operator::IsNotNull => {
                ExpressionTree::not(self.leaf(LeafOperator::IsNull, leaf_type, &name, vec![]))
            }
            Operator::Noop => {
                let value = match node.scalar() {
                    Some(scalar) => leaf_literal(data_type, &scalar.raw_text)?,
                    None => Literal::Boolean(true),
                };
                self.leaf(LeafOperator::Equals, leaf_type, &name, vec![value])
            }
            Operator::Equals => {
                let value = scalar_literal()?;
                self.leaf(LeafOperator::Equals, leaf_type, &name, vec![value])
            }
            Operator::NotEquals => {
                let value = scalar_literal()?;
                ExpressionTree::not(self.leaf(LeafOperator::Equals, leaf_type, &name, vec![value]))
            }
            Operator::LessThan => {
                let value = scalar_literal()?;
                self.leaf(LeafOperator::LessThan, leaf_type, &name, vec![value])
            }
            Operator::LessThanOrEqual => {
                let value = scalar_literal()?;
                self.leaf(LeafOperator::LessThanEquals, leaf_type, &name, vec![value])
            }
            Operator::GreaterThan => {
                let value = scalar_literal()?;
                ExpressionTree::not(self.leaf(LeafOperator::LessThanEquals, leaf_type, &name, vec![value]))
            }
            Operator::GreaterThanOrEqual => {
                let value = scalar_literal()?;
                ExpressionTree::not(self.leaf(LeafOperator::LessThan, leaf_type, &name, vec![value]))
            }
            Operator::In => {
                let values = match node.value() {
                    Some(Node::Array(array)) => array
                        .elements
                        .iter()
                        .map(|element| leaf_literal(data_type, element))
                        .collect::<Result<Vec<_>>>()?,
                    _ => vec![scalar_literal()?],
                };
                self.leaf(LeafOperator::In, leaf_type, &name, values)
            }
            Operator::Like => return Err(PushdownError::UnsupportedOperator(operator.to_string())),
        };
        Ok(tree)
    }

    fn fold_logical(
        &mut self,
        operator: LogicalOperator,
        left: ExpressionTree,
        right: Option<ExpressionTree>,
    ) -> Result<ExpressionTree> {
        match (operator, right) {
            (LogicalOperator::Not, _) => Ok(ExpressionTree::not(left)),
            (LogicalOperator::And, Some(right)) => Ok(ExpressionTree::and(left, right)),
            (LogicalOperator::Or, Some(right)) => Ok(ExpressionTree::or(left, right)),
            (operator, None) => Err(PushdownError::UnsupportedConstruct(format!(
                "{operator} with a single operand"
            ))),
        }
    }

    fn unexpected(&mut self, node: &Node) -> PushdownError {
        PushdownError::UnsupportedConstruct(format!("operand {node} in predicate position"))
    }
}
