use crate::ast::{
    node::{Node, OperatorNode},
    operator::{LogicalOperator, Operator, OperatorKind},
};

/// A rewriting pass over a filter tree.
///
/// Children are visited before their parent. A visitor that returns `None`
/// removes the node from the tree; the parent then sees a missing child.
pub trait TreeVisitor {
    /// Called on the way down, before the children of an operator node.
    fn enter_operator(&mut self, _kind: OperatorKind) {}

    fn visit_operand(&mut self, operand: Node) -> Option<Node> {
        Some(operand)
    }

    fn visit_operator(
        &mut self,
        kind: OperatorKind,
        left: Option<Node>,
        right: Option<Node>,
    ) -> Option<Node>;
}

/// Runs a single rewriting pass, bottom-up.
pub fn traverse<V: TreeVisitor + ?Sized>(root: Node, visitor: &mut V) -> Option<Node> {
    match root {
        Node::Operator(OperatorNode { kind, left, right }) => {
            visitor.enter_operator(kind);
            let left = traverse(*left, visitor);
            let right = right.and_then(|r| traverse(*r, visitor));
            visitor.visit_operator(kind, left, right)
        }
        operand => visitor.visit_operand(operand),
    }
}

/// Runs several passes in order, stopping as soon as one drops the root.
pub fn traverse_all(root: Node, visitors: &mut [&mut dyn TreeVisitor]) -> Option<Node> {
    visitors
        .iter_mut()
        .try_fold(root, |tree, visitor| traverse(tree, &mut **visitor))
}

/// A fold of a filter tree into a backend-specific value.
///
/// Comparisons are handed over whole; logical nodes receive their already
/// folded children.
pub trait TreeFolder {
    type Output;
    type Error;

    fn fold_comparison(
        &mut self,
        node: &OperatorNode,
        operator: Operator,
    ) -> Result<Self::Output, Self::Error>;

    fn fold_logical(
        &mut self,
        operator: LogicalOperator,
        left: Self::Output,
        right: Option<Self::Output>,
    ) -> Result<Self::Output, Self::Error>;

    /// Called for a bare operand at a predicate position.
    fn unexpected(&mut self, node: &Node) -> Self::Error;
}

pub fn fold<F: TreeFolder + ?Sized>(root: &Node, folder: &mut F) -> Result<F::Output, F::Error> {
    let node = match root {
        Node::Operator(node) => node,
        other => return Err(folder.unexpected(other)),
    };

    match node.kind {
        OperatorKind::Comparison(operator) => folder.fold_comparison(node, operator),
        OperatorKind::Logical(operator) => {
            let left = fold(&node.left, folder)?;
            let right = match &node.right {
                Some(right) => Some(fold(right, folder)?),
                None => None,
            };
            folder.fold_logical(operator, left, right)
        }
    }
}
