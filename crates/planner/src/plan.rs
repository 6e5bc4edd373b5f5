use crate::{
    capabilities::CapabilitySet, prune::CapabilityPruner, resolver::ColumnResolver,
    transform::BpCharTransformer,
};
use filter_syntax::{Node, ParseResult, TreeVisitor, parse, traverse_all};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How comparisons against fixed-width character literals are widened
/// after pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedWidthRewrite {
    #[default]
    Off,
    TrimOnly,
    PadAndTrim,
}

/// Parses a filter string and reduces it to what the backend can evaluate.
///
/// Returns `Ok(None)` when nothing can be pushed down. Malformed input is
/// always an error.
pub fn plan<R: ColumnResolver + ?Sized>(
    filter: &str,
    columns: &R,
    capabilities: &CapabilitySet,
    fixed_width: FixedWidthRewrite,
) -> ParseResult<Option<Node>> {
    let root = parse(filter)?;
    Ok(plan_tree(root, columns, capabilities, fixed_width))
}

pub fn plan_tree<R: ColumnResolver + ?Sized>(
    root: Node,
    columns: &R,
    capabilities: &CapabilitySet,
    fixed_width: FixedWidthRewrite,
) -> Option<Node> {
    let mut pruner = CapabilityPruner::new(capabilities, columns);
    let mut transformer = match fixed_width {
        FixedWidthRewrite::Off => None,
        FixedWidthRewrite::TrimOnly => Some(BpCharTransformer::trim_only(columns)),
        FixedWidthRewrite::PadAndTrim => Some(BpCharTransformer::new(columns)),
    };

    let mut passes: Vec<&mut dyn TreeVisitor> = vec![&mut pruner];
    if let Some(transformer) = transformer.as_mut() {
        passes.push(transformer);
    }

    let planned = traverse_all(root, &mut passes);
    match &planned {
        Some(tree) => debug!(pushed = %tree, "Planned pushdown predicate"),
        None => debug!("Nothing to push down"),
    }
    planned
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{ColumnDescriptor, DataType};

    #[test]
    fn test_transform_runs_after_pruning() {
        let columns = vec![
            ColumnDescriptor::new("grade", DataType::Bpchar, 0).with_modifiers(vec![2]),
            ColumnDescriptor::new("id", DataType::Integer, 1),
        ];
        let caps = CapabilitySet::all().without(filter_syntax::Operator::Like);

        let planned = plan(
            "a0c1042s1dao5a1c25s2d1%o7l0",
            &columns,
            &caps,
            FixedWidthRewrite::PadAndTrim,
        )
        .unwrap()
        .unwrap();
        assert_eq!(planned.to_string(), "(_0_ = a OR _0_ = a )");
    }

    #[test]
    fn test_malformed_filter_propagates() {
        let columns: Vec<ColumnDescriptor> = Vec::new();
        let result = plan("a1c25s9dab", &columns, &CapabilitySet::all(), FixedWidthRewrite::Off);
        assert!(result.is_err());
    }
}
