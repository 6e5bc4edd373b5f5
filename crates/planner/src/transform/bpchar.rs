use crate::resolver::ColumnResolver;
use filter_syntax::{LogicalOperator, Node, Operator, OperatorKind, OperatorNode, TreeVisitor};
use model::{
    DataType,
    core::utils::{right_pad, right_trim_whitespace},
};
use tracing::debug;

/// Widens comparisons against `char(n)` literals so they match values
/// whether the backend stored them padded or trimmed.
///
/// `_1_ = 'a '` becomes `(_1_ = 'a ' OR _1_ = 'a')`; for `<>` the
/// alternatives are joined with `AND` instead.
pub struct BpCharTransformer<'a, R: ColumnResolver + ?Sized> {
    columns: &'a R,
    pad: bool,
}

impl<'a, R: ColumnResolver + ?Sized> BpCharTransformer<'a, R> {
    /// Adds both a padded and a trimmed alternative.
    pub fn new(columns: &'a R) -> Self {
        Self { columns, pad: true }
    }

    /// Adds only the trimmed alternative, for backends that never store
    /// the padding.
    pub fn trim_only(columns: &'a R) -> Self {
        Self {
            columns,
            pad: false,
        }
    }

    fn rewrite(&self, node: Node, operator: Operator, index: usize, value: &str) -> Node {
        let length = value.chars().count();
        let width = self.columns.column(index).and_then(|c| c.width());
        let needs_padding = self.pad && width.is_some_and(|w| length < w);
        let needs_trimming = value.ends_with(' ');

        if !needs_padding && !needs_trimming {
            return node;
        }

        let combine = match operator {
            Operator::NotEquals => LogicalOperator::And,
            _ => LogicalOperator::Or,
        };
        let alternative = |literal: String| {
            Node::comparison(
                operator,
                index,
                Some(Node::scalar(DataType::Bpchar.oid(), literal)),
            )
        };
        let join = |left: Node, right: Node| match combine {
            LogicalOperator::And => Node::and(left, right),
            _ => Node::or(left, right),
        };

        let mut result = node;
        if let (true, Some(width)) = (needs_padding, width) {
            result = join(result, alternative(right_pad(value, width)));
        }
        if needs_trimming {
            result = join(result, alternative(right_trim_whitespace(value).to_string()));
        }
        debug!(index, rewritten = %result, "Expanded fixed-width character predicate");
        result
    }
}

impl<R: ColumnResolver + ?Sized> TreeVisitor for BpCharTransformer<'_, R> {
    fn visit_operator(
        &mut self,
        kind: OperatorKind,
        left: Option<Node>,
        right: Option<Node>,
    ) -> Option<Node> {
        let node = OperatorNode::assemble(kind, left, right)?;
        let OperatorKind::Comparison(operator) = kind else {
            return Some(node);
        };

        let target = node.as_operator().and_then(|op| {
            let column = op.column()?;
            let scalar = op.scalar()?;
            (scalar.type_oid == DataType::Bpchar.oid())
                .then(|| (column.index, scalar.raw_text.clone()))
        });

        match target {
            Some((index, value)) => Some(self.rewrite(node, operator, index, &value)),
            None => Some(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_syntax::traverse;
    use model::ColumnDescriptor;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("grade", DataType::Bpchar, 0).with_modifiers(vec![3]),
            ColumnDescriptor::new("code", DataType::Bpchar, 1),
            ColumnDescriptor::new("name", DataType::Text, 2),
        ]
    }

    fn cmp(op: Operator, index: usize, oid: i32, value: &str) -> Node {
        Node::comparison(op, index, Some(Node::scalar(oid, value)))
    }

    #[test]
    fn test_short_literal_is_padded() {
        let cols = columns();
        let tree = cmp(Operator::Equals, 0, 1042, "a");
        let result = traverse(tree, &mut BpCharTransformer::new(&cols)).unwrap();
        assert_eq!(result.to_string(), "(_0_ = a OR _0_ = a  )");
    }

    #[test]
    fn test_trailing_space_is_trimmed_for_not_equals() {
        let cols = columns();
        let tree = cmp(Operator::NotEquals, 1, 1042, "b ");
        let result = traverse(tree, &mut BpCharTransformer::new(&cols)).unwrap();
        assert_eq!(result.to_string(), "(_1_ <> b  AND _1_ <> b)");
    }

    #[test]
    fn test_padding_and_trimming() {
        let cols = columns();
        let tree = cmp(Operator::Equals, 0, 1042, "a ");
        let result = traverse(tree, &mut BpCharTransformer::new(&cols)).unwrap();
        assert_eq!(
            result.to_string(),
            "((_0_ = a  OR _0_ = a  ) OR _0_ = a)"
        );
    }

    #[test]
    fn test_trim_only_skips_padding() {
        let cols = columns();
        let tree = cmp(Operator::Equals, 0, 1042, "a");
        let result = traverse(tree.clone(), &mut BpCharTransformer::trim_only(&cols)).unwrap();
        assert_eq!(result, tree);
    }

    #[test]
    fn test_other_types_untouched() {
        let cols = columns();
        let tree = Node::and(
            cmp(Operator::Equals, 2, 25, "x "),
            Node::comparison(Operator::IsNull, 0, None),
        );
        let result = traverse(tree.clone(), &mut BpCharTransformer::new(&cols)).unwrap();
        assert_eq!(result, tree);
    }
}
