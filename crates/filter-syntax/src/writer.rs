use crate::ast::{node::Node, operator::OperatorKind};

/// Serializes a tree back into the postfix wire grammar.
pub fn to_filter_string(root: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, root);
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::ColumnIndex(column) => out.push_str(&format!("a{}", column.index)),
        Node::Scalar(scalar) => out.push_str(&format!(
            "c{}s{}d{}",
            scalar.type_oid,
            scalar.raw_text.len(),
            scalar.raw_text
        )),
        Node::Array(array) => {
            out.push_str(&format!("m{}", array.type_oid));
            for element in &array.elements {
                out.push_str(&format!("s{}d{element}", element.len()));
            }
        }
        Node::Operator(op) => {
            write_node(out, &op.left);
            if let Some(right) = &op.right {
                write_node(out, right);
            }
            match op.kind {
                OperatorKind::Comparison(cmp) => out.push_str(&format!("o{}", cmp.code())),
                OperatorKind::Logical(logical) => out.push_str(&format!("l{}", logical.code())),
            }
        }
    }
}
