use crate::{
    ast::{
        node::{Node, OperatorNode},
        operator::{LogicalOperator, Operator, OperatorKind},
    },
    error::{MalformedExpression, ParseResult, SyntaxError},
    lexer::{
        Lexer,
        token::TokenKind,
    },
};
use tracing::debug;

pub type BuildResult<T> = Result<T, SyntaxError>;

/// Parse a postfix filter string into a tree.
///
/// Comparisons are normalized so the column is always on the left; a
/// `<literal> <column> <op>` sequence yields the mirrored operator.
pub fn parse(input: &str) -> ParseResult<Node> {
    let root = build_tree(input).map_err(|kind| MalformedExpression::new(kind, input))?;
    debug!(filter = input, tree = %root, "Parsed filter");
    Ok(root)
}

fn build_tree(input: &str) -> BuildResult<Node> {
    let mut stack: Vec<Node> = Vec::new();

    for token in Lexer::new(input) {
        let token = token?;
        let position = token.end();
        match token.kind {
            TokenKind::Column(index) => stack.push(Node::column(index)),
            TokenKind::Scalar { type_oid, value } => stack.push(Node::scalar(type_oid, value)),
            TokenKind::Array { type_oid, elements } => stack.push(Node::array(type_oid, elements)),
            TokenKind::Operator(op) => {
                let node = build_comparison(&mut stack, op, position)?;
                stack.push(node);
            }
            TokenKind::Logical(op) => {
                let node = build_logical(&mut stack, op, position)?;
                stack.push(node);
            }
        }
    }

    match stack.len() {
        0 => Err(SyntaxError::EmptyResult),
        1 => match stack.pop() {
            Some(root @ Node::Operator(_)) => Ok(root),
            _ => Err(SyntaxError::MissingOperators),
        },
        _ => Err(SyntaxError::StackNotEmpty),
    }
}

fn build_comparison(stack: &mut Vec<Node>, op: Operator, position: usize) -> BuildResult<Node> {
    let missing = || SyntaxError::MissingOperands {
        operator: op.to_string(),
        position,
    };
    let invalid = |reason| SyntaxError::InvalidOperands {
        operator: op.to_string(),
        position,
        reason,
    };

    match op {
        Operator::IsNull | Operator::IsNotNull => match stack.pop().ok_or_else(missing)? {
            column @ Node::ColumnIndex(_) => Ok(comparison(op, column, None)),
            _ => Err(invalid("null test requires a column operand")),
        },
        Operator::Noop => {
            let top = stack.pop().ok_or_else(missing)?;
            match top {
                column @ Node::ColumnIndex(_) => Ok(comparison(op, column, None)),
                value @ Node::Scalar(_) => match stack.pop() {
                    Some(column @ Node::ColumnIndex(_)) => Ok(comparison(op, column, Some(value))),
                    Some(_) => Err(invalid("boolean test requires a column operand")),
                    None => Err(missing()),
                },
                _ => Err(invalid("boolean test requires a column operand")),
            }
        }
        _ => {
            let right = stack.pop().ok_or_else(missing)?;
            let left = stack.pop().ok_or_else(missing)?;
            let (column, value, op) = match (left, right) {
                (column @ Node::ColumnIndex(_), value) => (column, value, op),
                (value, column @ Node::ColumnIndex(_)) => match op.mirrored() {
                    Some(mirrored) => (column, value, mirrored),
                    None => return Err(invalid("operator cannot take the column on the right")),
                },
                _ => return Err(invalid("comparison requires a column operand")),
            };
            match (&value, op) {
                (Node::Scalar(_), _) | (Node::Array(_), Operator::In) => {
                    Ok(comparison(op, column, Some(value)))
                }
                (Node::Array(_), _) => Err(invalid("list operand is only valid with IN")),
                _ => Err(invalid("comparison requires a value operand")),
            }
        }
    }
}

fn build_logical(
    stack: &mut Vec<Node>,
    op: LogicalOperator,
    position: usize,
) -> BuildResult<Node> {
    let mut children = Vec::with_capacity(op.arity());
    for _ in 0..op.arity() {
        let child = stack.pop().ok_or_else(|| SyntaxError::MissingOperands {
            operator: op.to_string(),
            position,
        })?;
        if child.is_operand() {
            return Err(SyntaxError::InvalidOperands {
                operator: op.to_string(),
                position,
                reason: "logical operator requires predicate operands",
            });
        }
        children.push(child);
    }

    // Popped in reverse order.
    let left = children.pop();
    let right = children.pop();
    OperatorNode::assemble(OperatorKind::Logical(op), left, right).ok_or(
        SyntaxError::MissingOperands {
            operator: op.to_string(),
            position,
        },
    )
}

fn comparison(op: Operator, column: Node, value: Option<Node>) -> Node {
    Node::Operator(OperatorNode {
        kind: OperatorKind::Comparison(op),
        left: Box::new(column),
        right: value.map(Box::new),
    })
}
