use connectors::{
    BackendContext, DbProduct, ErrorKind, IdentifierQuoting, NativePredicate, PushdownError, compile,
    parquet::{LogicalType, ParquetField, ParquetSchema},
};
use filter_syntax::{Node, Operator, parse};
use model::{ColumnDescriptor, DataType, StorageCategory};
use planner::{CapabilitySet, prune};

/// Seventeen columns; the last one is an integer called `col`.
fn wide_catalog(last: DataType) -> Vec<ColumnDescriptor> {
    let mut columns: Vec<_> = (0..16)
        .map(|i| ColumnDescriptor::new(format!("c{i}"), DataType::Text, i))
        .collect();
    columns.push(ColumnDescriptor::new("col", last, 16));
    columns
}

fn sales() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", DataType::Integer, 0).with_storage(StorageCategory::Int32),
        ColumnDescriptor::new("name", DataType::Text, 1).with_storage(StorageCategory::Binary),
        ColumnDescriptor::new("cdate", DataType::Date, 2).with_storage(StorageCategory::Int32),
        ColumnDescriptor::new("amt", DataType::Float8, 3).with_storage(StorageCategory::Double),
        ColumnDescriptor::new("grade", DataType::Bpchar, 4)
            .with_modifiers(vec![3])
            .with_storage(StorageCategory::Binary),
        ColumnDescriptor::new("b", DataType::Boolean, 5).with_storage(StorageCategory::Boolean),
        ColumnDescriptor::new("tm", DataType::Timestamp, 6).with_storage(StorageCategory::Int96),
    ]
}

fn s3(positional: bool) -> BackendContext {
    BackendContext::S3Select { positional }
}

#[test]
fn test_equals_on_integer_column_reaches_postgres() {
    let columns = wide_catalog(DataType::Integer);
    let filter = "a16c23s2d11o5";

    let tree = parse(filter).unwrap();
    assert_eq!(prune(tree.clone(), &CapabilitySet::new([Operator::Equals]), &columns), Some(tree));

    let context = BackendContext::Jdbc {
        product: DbProduct::Postgres,
        quoting: IdentifierQuoting::Dialect,
    };
    let compiled = compile(filter, &columns, &context.capabilities(), &context).unwrap();
    assert_eq!(compiled, Some(NativePredicate::SqlWhere("\"col\" = 11".to_string())));
}

#[test]
fn test_unsupported_storage_drops_conjunct() {
    let columns = sales();
    let tree = parse("a1c25s4drow2o5a6c1114s19d2013-07-23 21:00:00o5l0").unwrap();

    let pruned = prune(tree, &CapabilitySet::parquet(), &columns);
    assert_eq!(
        pruned,
        Some(Node::comparison(Operator::Equals, 1, Some(Node::scalar(25, "row2"))))
    );
}

#[test]
fn test_unsupported_storage_drops_disjunction() {
    let columns = sales();
    let tree = parse("a1c25s4drow2o5a6c1114s19d2013-07-23 21:00:00o5l1").unwrap();
    assert_eq!(prune(tree, &CapabilitySet::parquet(), &columns), None);
}

#[test]
fn test_in_list_depends_on_capabilities() {
    let columns = wide_catalog(DataType::Integer);
    let filter = "a16m1007s2d11s2d12o10";
    let context = s3(true);

    let without_in = context.capabilities().without(Operator::In);
    assert_eq!(prune(parse(filter).unwrap(), &without_in, &columns), None);
    assert_eq!(compile(filter, &columns, &without_in, &context).unwrap(), None);

    let compiled = compile(filter, &columns, &context.capabilities(), &context)
        .unwrap()
        .unwrap();
    assert_eq!(compiled.to_string(), "CAST(s._17 AS int) IN (11,12)");
}

#[test]
fn test_negated_boolean_noop_for_object_store() {
    let columns = sales();
    let context = s3(true);
    let compiled = compile("a5c16s4dtrueo0l2", &columns, &context.capabilities(), &context)
        .unwrap()
        .unwrap();
    assert_eq!(compiled.to_string(), "NOT (CAST(s._6 AS bool))");

    let context = s3(false);
    let compiled = compile("a5c16s4dtrueo0l2", &columns, &context.capabilities(), &context)
        .unwrap()
        .unwrap();
    assert_eq!(compiled.to_string(), r#"NOT (CAST(s."b" AS bool))"#);
}

#[test]
fn test_truncated_literal_is_malformed() {
    let columns = sales();
    for context in [
        s3(true),
        BackendContext::Orc { field_names: None },
        BackendContext::Jdbc {
            product: DbProduct::MySql,
            quoting: IdentifierQuoting::None,
        },
    ] {
        let err = compile("a1c25s20drow2o5", &columns, &context.capabilities(), &context).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedExpression);
        assert!(matches!(err, PushdownError::Malformed(_)));
        assert!(err.to_string().ends_with("(filter string: 'a1c25s20drow2o5')"));
    }
}

#[test]
fn test_orc_search_argument_with_fixed_width_literal() {
    let columns = sales();
    let context = BackendContext::Orc { field_names: None };
    let compiled = compile("a4c1042s1dao5a0c23s1d7o2l0", &columns, &context.capabilities(), &context)
        .unwrap()
        .unwrap();
    assert_eq!(
        compiled.to_string(),
        "leaf-0 = (EQUALS grade a), leaf-1 = (EQUALS grade a  ), leaf-2 = (LESS_THAN_EQUALS id 7), \
         expr = (and (or leaf-0 leaf-1) (not leaf-2))"
    );
}

#[test]
fn test_orc_drops_like_but_keeps_conjunct() {
    let columns = sales();
    let context = BackendContext::Orc {
        field_names: Some(vec!["_col0".into(), "_col1".into()]),
    };
    let compiled = compile("a0c23s1d1o5a1c25s2dr%o7l0", &columns, &context.capabilities(), &context)
        .unwrap()
        .unwrap();
    assert_eq!(compiled.to_string(), "leaf-0 = (EQUALS _col0 1), expr = leaf-0");
}

#[test]
fn test_parquet_trims_fixed_width_literal() {
    let columns = sales();
    let context = BackendContext::Parquet {
        schema: ParquetSchema::new(vec![
            ParquetField::new("grade", StorageCategory::Binary).with_logical(LogicalType::String),
            ParquetField::new("cdate", StorageCategory::Int32).with_logical(LogicalType::Date),
        ]),
    };
    let compiled = compile(
        "a4c1042s2dA o5a2c1082s10d1970-01-02o4l0",
        &columns,
        &context.capabilities(),
        &context,
    )
    .unwrap()
    .unwrap();
    assert_eq!(
        compiled.to_string(),
        "and(or(eq(grade, A ), eq(grade, A)), gteq(cdate, 1))"
    );
}

#[test]
fn test_parquet_in_is_pruned_not_rejected() {
    let columns = sales();
    let context = BackendContext::Parquet {
        schema: ParquetSchema::new(vec![ParquetField::new("id", StorageCategory::Int32)]),
    };
    let compiled = compile("a0m1007s1d1s1d2o10", &columns, &context.capabilities(), &context).unwrap();
    assert_eq!(compiled, None);
}

#[test]
fn test_mysql_where_clause() {
    let columns = sales();
    let context = BackendContext::Jdbc {
        product: DbProduct::MySql,
        quoting: IdentifierQuoting::None,
    };
    let compiled = compile(
        "a2c25s10d2008-02-01o2a2c25s10d2008-12-01o1l0a3c20s4d1200o2l0",
        &columns,
        &context.capabilities(),
        &context,
    )
    .unwrap()
    .unwrap();
    assert_eq!(
        compiled.to_string(),
        "((cdate > DATE('2008-02-01') AND cdate < DATE('2008-12-01')) AND amt > 1200)"
    );
}

#[test]
fn test_parquet_decimal_conjunct_is_pruned() {
    let columns = vec![
        ColumnDescriptor::new("name", DataType::Text, 0),
        ColumnDescriptor::new("amt", DataType::Numeric, 1),
    ];
    let context = BackendContext::Parquet {
        schema: ParquetSchema::new(vec![
            ParquetField::new("name", StorageCategory::Binary).with_logical(LogicalType::String),
            ParquetField::new("amt", StorageCategory::Int32).with_logical(LogicalType::Decimal),
        ]),
    };
    let capabilities = context.capabilities();

    let compiled = compile("a0c25s4drow2o5a1c1700s2d10o5l0", &columns, &capabilities, &context)
        .unwrap()
        .unwrap();
    assert_eq!(compiled.to_string(), "eq(name, row2)");

    assert_eq!(compile("a1c1700s2d10o5", &columns, &capabilities, &context).unwrap(), None);
    assert_eq!(
        compile("a0c25s4drow2o5a1c1700s4d10.5o5l1", &columns, &capabilities, &context).unwrap(),
        None
    );
}

#[test]
fn test_parquet_timestamp_millis_becomes_long() {
    let columns = vec![
        ColumnDescriptor::new("name", DataType::Text, 0),
        ColumnDescriptor::new("tm", DataType::Timestamp, 1),
    ];
    let context = BackendContext::Parquet {
        schema: ParquetSchema::new(vec![
            ParquetField::new("name", StorageCategory::Binary),
            ParquetField::new("tm", StorageCategory::Int64).with_logical(LogicalType::TimestampMillis),
        ]),
    };
    let compiled = compile(
        "a0c25s4drow2o5a1c1114s19d2013-07-23 21:00:00o5l0",
        &columns,
        &context.capabilities(),
        &context,
    )
    .unwrap()
    .unwrap();
    assert_eq!(compiled.to_string(), "and(eq(name, row2), eq(tm, 1374613200000))");
}

#[test]
fn test_boolean_literal_is_normalized() {
    let columns = vec![ColumnDescriptor::new("b", DataType::Boolean, 0)];
    let jdbc = BackendContext::Jdbc {
        product: DbProduct::Postgres,
        quoting: IdentifierQuoting::None,
    };
    let compiled = compile("a0c16s1dto5", &columns, &jdbc.capabilities(), &jdbc).unwrap();
    assert_eq!(compiled, Some(NativePredicate::SqlWhere("b = TRUE".to_string())));

    let context = s3(false);
    let compiled = compile("a0c16s1dto5", &columns, &context.capabilities(), &context).unwrap();
    assert_eq!(compiled, Some(NativePredicate::S3Select(r#"CAST(s."b" AS bool) = true"#.to_string())));
}

#[test]
fn test_like_with_column_on_the_right_is_malformed() {
    let columns = vec![ColumnDescriptor::new("pat", DataType::Text, 0)];
    let context = BackendContext::Jdbc {
        product: DbProduct::Postgres,
        quoting: IdentifierQuoting::None,
    };
    let err = compile("c25s3dabca0o7", &columns, &context.capabilities(), &context).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedExpression);
}
