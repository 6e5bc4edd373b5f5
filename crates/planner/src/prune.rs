use crate::{capabilities::CapabilitySet, resolver::ColumnResolver};
use filter_syntax::{LogicalOperator, Node, Operator, OperatorKind, OperatorNode, TreeVisitor};
use tracing::debug;

/// Rewrites a tree to the largest part a backend can evaluate without
/// excluding rows the full predicate would accept.
///
/// - a comparison survives if its operator, its column's source type and its
///   column's storage category are all supported;
/// - `AND` keeps whichever children survive;
/// - `OR` and `NOT` survive only if every child does.
///
/// Under an odd number of `NOT`s dropping a conjunct would narrow the
/// result, so there `AND` also needs both children.
pub struct CapabilityPruner<'a, R: ColumnResolver + ?Sized> {
    capabilities: &'a CapabilitySet,
    columns: &'a R,
    negations: usize,
}

impl<'a, R: ColumnResolver + ?Sized> CapabilityPruner<'a, R> {
    pub fn new(capabilities: &'a CapabilitySet, columns: &'a R) -> Self {
        Self {
            capabilities,
            columns,
            negations: 0,
        }
    }

    fn negated(&self) -> bool {
        self.negations % 2 == 1
    }

    fn supports(&self, node: &OperatorNode, operator: Operator) -> bool {
        let Some(column) = node.column() else {
            return false;
        };
        let index = column.index;

        if self.columns.column(index).is_none() {
            debug!(index, "Column is not in the catalog");
            return false;
        }
        // Storage is checked first: a column the backend cannot decode is
        // unsupported for every operator, null tests included.
        let storage = self.columns.storage(index);
        if !self.capabilities.supports_storage(storage) {
            debug!(index, ?storage, "Storage category is not supported");
            return false;
        }
        let data_type = self.columns.data_type(index);
        if !self.capabilities.supports_data_type(data_type) {
            debug!(index, ?data_type, "Column type is not supported");
            return false;
        }
        if !self.capabilities.supports_operator(operator) {
            debug!(index, %operator, "Operator is not supported");
            return false;
        }
        true
    }

    fn prune_logical(
        &self,
        operator: LogicalOperator,
        left: Option<Node>,
        right: Option<Node>,
    ) -> Option<Node> {
        if !self.capabilities.supports_logical(operator) {
            debug!(%operator, "Logical operator is not supported");
            return match operator {
                // Either conjunct alone accepts a superset of the rows.
                LogicalOperator::And if !self.negated() => left.or(right),
                _ => None,
            };
        }

        match operator {
            LogicalOperator::And => match (left, right) {
                (Some(left), Some(right)) => Some(Node::and(left, right)),
                (Some(_), None) | (None, Some(_)) if self.negated() => {
                    debug!("Dropped negated AND with an unsupported conjunct");
                    None
                }
                (Some(child), None) | (None, Some(child)) => {
                    debug!(kept = %child, "Dropped unsupported conjunct");
                    Some(child)
                }
                (None, None) => None,
            },
            LogicalOperator::Or => match (left, right) {
                (Some(left), Some(right)) => Some(Node::or(left, right)),
                _ => {
                    debug!("Dropped OR with an unsupported disjunct");
                    None
                }
            },
            LogicalOperator::Not => left.map(Node::not),
        }
    }
}

impl<R: ColumnResolver + ?Sized> TreeVisitor for CapabilityPruner<'_, R> {
    fn enter_operator(&mut self, kind: OperatorKind) {
        if kind == OperatorKind::Logical(LogicalOperator::Not) {
            self.negations += 1;
        }
    }

    fn visit_operator(
        &mut self,
        kind: OperatorKind,
        left: Option<Node>,
        right: Option<Node>,
    ) -> Option<Node> {
        match kind {
            OperatorKind::Comparison(operator) => {
                let node = OperatorNode::assemble(kind, left, right)?;
                let supported = node
                    .as_operator()
                    .is_some_and(|op| self.supports(op, operator));
                if supported {
                    Some(node)
                } else {
                    debug!(dropped = %node, "Dropped unsupported predicate");
                    None
                }
            }
            OperatorKind::Logical(operator) => {
                if operator == LogicalOperator::Not {
                    self.negations -= 1;
                }
                self.prune_logical(operator, left, right)
            }
        }
    }
}

/// Prunes `root` against a capability set. `None` means nothing can be
/// pushed down.
pub fn prune<R: ColumnResolver + ?Sized>(
    root: Node,
    capabilities: &CapabilitySet,
    columns: &R,
) -> Option<Node> {
    filter_syntax::traverse(root, &mut CapabilityPruner::new(capabilities, columns))
}
