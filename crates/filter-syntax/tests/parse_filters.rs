//! Parsing whole filter strings through the public API

use filter_syntax::{
    LogicalOperator, Node, Operator, OperatorKind, SyntaxError, parse, to_filter_string,
};

fn single_comparison(filter: &str) -> (usize, Operator, Option<String>) {
    let root = parse(filter).unwrap();
    let op = root.as_operator().unwrap();
    (
        op.column().unwrap().index,
        op.operator().unwrap(),
        op.scalar().map(|s| s.raw_text.clone()),
    )
}

#[test]
fn test_every_comparison_operator_column_on_left() {
    let cases = [
        ("a1c20s1d1o1", Operator::LessThan),
        ("a1c20s1d1o2", Operator::GreaterThan),
        ("a1c20s1d1o3", Operator::LessThanOrEqual),
        ("a1c20s1d1o4", Operator::GreaterThanOrEqual),
        ("a1c20s1d1o5", Operator::Equals),
        ("a1c20s1d1o6", Operator::NotEquals),
        ("a1c25s2d1%o7", Operator::Like),
    ];
    for (filter, expected) in cases {
        let (index, op, _) = single_comparison(filter);
        assert_eq!(index, 1, "{filter}");
        assert_eq!(op, expected, "{filter}");
    }
}

#[test]
fn test_every_comparison_operator_column_on_right() {
    let cases = [
        ("c20s1d1a1o1", Operator::GreaterThan),
        ("c20s1d1a1o2", Operator::LessThan),
        ("c20s1d1a1o3", Operator::GreaterThanOrEqual),
        ("c20s1d1a1o4", Operator::LessThanOrEqual),
        ("c20s1d1a1o5", Operator::Equals),
        ("c20s1d1a1o6", Operator::NotEquals),
    ];
    for (filter, expected) in cases {
        assert_eq!(single_comparison(filter).1, expected, "{filter}");
    }
}

#[test]
fn test_in_with_list() {
    let root = parse("a1m1005s1d1s1d2s1d3o10").unwrap();
    let op = root.as_operator().unwrap();
    assert_eq!(op.operator(), Some(Operator::In));
    match op.value() {
        Some(Node::Array(array)) => {
            assert_eq!(array.type_oid, 1005);
            assert_eq!(array.elements, vec!["1", "2", "3"]);
        }
        other => panic!("expected array operand, got {other:?}"),
    }
}

#[test]
fn test_nested_logical_expression() {
    let filter = "a1c1082s10d2008-02-01o2a1c1082s10d2008-12-01o1l0a2c23s4d1200o2l0";
    let root = parse(filter).unwrap();
    assert_eq!(
        root.to_string(),
        "((_1_ > 2008-02-01 AND _1_ < 2008-12-01) AND _2_ > 1200)"
    );
    assert_eq!(root.predicate_count(), 5);
}

#[test]
fn test_not_of_or() {
    let root = parse("a0o8a1c25s1dxo6l1l2").unwrap();
    let op = root.as_operator().unwrap();
    assert_eq!(op.kind, OperatorKind::Logical(LogicalOperator::Not));
    assert_eq!(root.to_string(), "NOT ((_0_ IS NULL OR _1_ <> x))");
}

#[test]
fn test_single_comparison_round_trip() {
    for (index, op, literal) in [
        (0usize, Operator::Equals, "17"),
        (4, Operator::LessThan, "2016-01-03"),
        (12, Operator::NotEquals, "it's"),
        (3, Operator::Like, "%o5l0%"),
    ] {
        let tree = Node::comparison(op, index, Some(Node::scalar(25, literal)));
        let filter = to_filter_string(&tree);
        assert_eq!(single_comparison(&filter), (index, op, Some(literal.to_string())));
    }
}

#[test]
fn test_truncated_literal_is_malformed() {
    let err = parse("a1c25s10dshort").unwrap_err();
    assert_eq!(err.kind, SyntaxError::TruncatedLiteral(8));
    assert_eq!(err.filter, "a1c25s10dshort");
    assert!(err.to_string().ends_with("(filter string: 'a1c25s10dshort')"));
}

#[test]
fn test_tree_serializes_to_json() {
    let root = parse("a1o9").unwrap();
    let json = serde_json::to_value(&root).unwrap();
    assert_eq!(json["node"], "operator");
    assert_eq!(json["kind"]["type"], "comparison");
    assert_eq!(json["kind"]["operator"], "IS_NOT_NULL");
    assert_eq!(json["left"]["node"], "column_index");
    assert_eq!(json["left"]["index"], 1);
    assert!(json.get("right").is_none());
}
