use crate::sql::{
    dialect::{DbProduct, IdentifierQuoting},
    predicate::SqlPredicateBuilder,
};
use filter_syntax::ParseResult;
use model::ColumnDescriptor;
use planner::{CapabilitySet, FixedWidthRewrite, plan};
use tracing::{debug, warn};

const SUBQUERY_ALIAS: &str = "source_query";

/// What the generated `SELECT` reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    Table(String),
    /// A caller-supplied query, wrapped as a derived table.
    Subquery(String),
}

/// Assembles the `SELECT` sent to a relational database for one scan.
pub struct SqlQueryBuilder<'a> {
    columns: &'a [ColumnDescriptor],
    source: QuerySource,
    product: DbProduct,
    quoting: IdentifierQuoting,
    capabilities: CapabilitySet,
}

impl<'a> SqlQueryBuilder<'a> {
    pub fn new(columns: &'a [ColumnDescriptor], source: QuerySource, product: DbProduct) -> Self {
        Self {
            columns,
            source,
            product,
            quoting: IdentifierQuoting::None,
            capabilities: CapabilitySet::jdbc(),
        }
    }

    pub fn with_quoting(mut self, quoting: IdentifierQuoting) -> Self {
        self.quoting = quoting;
        self
    }

    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Builds the query for an optional filter string.
    ///
    /// A filter that cannot be pushed down leaves the `WHERE` clause out;
    /// only a malformed filter is an error.
    pub fn build_select_query(&self, filter: Option<&str>) -> ParseResult<String> {
        let dialect = self.product.dialect();
        let projected: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.projected)
            .map(|c| self.quoting.apply(dialect, &c.name))
            .collect();
        let column_list = if projected.is_empty() {
            "1".to_string()
        } else {
            projected.join(", ")
        };

        let mut query = format!("SELECT {column_list} FROM ");
        match &self.source {
            QuerySource::Table(table) => query.push_str(table),
            QuerySource::Subquery(sql) => query.push_str(&format!("({sql}) {SUBQUERY_ALIAS}")),
        }

        if let Some(filter) = filter {
            query.push_str(&self.where_clause(filter)?);
        }
        debug!(dialect = dialect.name(), %query, "Built select query");
        Ok(query)
    }

    fn where_clause(&self, filter: &str) -> ParseResult<String> {
        let Some(tree) = plan(filter, self.columns, &self.capabilities, FixedWidthRewrite::Off)? else {
            return Ok(String::new());
        };
        let builder = SqlPredicateBuilder::new(self.columns, self.product.dialect(), &self.quoting);
        match builder.build(&tree) {
            Ok(predicate) => Ok(format!(" WHERE {predicate}")),
            Err(e) => {
                warn!(error = %e, filter, "WHERE clause is omitted");
                Ok(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::DataType;

    const SQL: &str = "SELECT id, cdate, amt, grade, b FROM sales";

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("id", DataType::Integer, 0),
            ColumnDescriptor::new("cdate", DataType::Date, 1),
            ColumnDescriptor::new("amt", DataType::Float8, 2),
            ColumnDescriptor::new("grade", DataType::Text, 3),
            ColumnDescriptor::new("b", DataType::Boolean, 4),
        ]
    }

    fn sales(columns: &[ColumnDescriptor]) -> SqlQueryBuilder<'_> {
        SqlQueryBuilder::new(columns, QuerySource::Table("sales".into()), DbProduct::MySql)
    }

    #[test]
    fn test_no_filter() {
        let cols = columns();
        assert_eq!(sales(&cols).build_select_query(None).unwrap(), SQL);
    }

    #[test]
    fn test_where_clause() {
        let cols = columns();
        let builder = sales(&cols);
        assert_eq!(
            builder.build_select_query(Some("a0c20s1d1o5")).unwrap(),
            format!("{SQL} WHERE id = 1")
        );
        assert_eq!(
            builder.build_select_query(Some("a1c25s10d2008-02-01o2a2c20s4d1200o2l1")).unwrap(),
            format!("{SQL} WHERE (cdate > DATE('2008-02-01') OR amt > 1200)")
        );
    }

    #[test]
    fn test_quoted_identifiers() {
        let cols = columns();
        let query = SqlQueryBuilder::new(&cols, QuerySource::Table("sales".into()), DbProduct::Postgres)
            .with_quoting(IdentifierQuoting::Dialect)
            .build_select_query(Some("a0c20s1d1o5"))
            .unwrap();
        assert_eq!(
            query,
            "SELECT \"id\", \"cdate\", \"amt\", \"grade\", \"b\" FROM sales WHERE \"id\" = 1"
        );
    }

    #[test]
    fn test_only_projected_columns_are_selected() {
        let cols: Vec<_> = columns()
            .into_iter()
            .map(|c| {
                let projected = c.name == "id" || c.name == "amt";
                c.with_projected(projected)
            })
            .collect();
        assert_eq!(
            sales(&cols).build_select_query(Some("a0c20s1d1o5")).unwrap(),
            "SELECT id, amt FROM sales WHERE id = 1"
        );
    }

    #[test]
    fn test_subquery_source() {
        let cols = columns();
        let query = SqlQueryBuilder::new(
            &cols,
            QuerySource::Subquery("SELECT a, b FROM c WHERE d = 'foo'".into()),
            DbProduct::MySql,
        )
        .build_select_query(Some("a0c20s1d1o5"))
        .unwrap();
        assert_eq!(
            query,
            "SELECT id, cdate, amt, grade, b FROM (SELECT a, b FROM c WHERE d = 'foo') source_query WHERE id = 1"
        );
    }

    #[test]
    fn test_failed_predicate_omits_where() {
        let cols = columns();
        assert_eq!(sales(&cols).build_select_query(Some("a0c25s3dabco5")).unwrap(), SQL);
    }

    #[test]
    fn test_pruned_predicate_omits_where() {
        let cols = columns();
        let builder = sales(&cols).with_capabilities(CapabilitySet::jdbc().without(filter_syntax::Operator::In));
        assert_eq!(builder.build_select_query(Some("a0m1016s3d194s5d82756o10")).unwrap(), SQL);
    }

    #[test]
    fn test_malformed_filter_is_an_error() {
        let cols = columns();
        assert!(sales(&cols).build_select_query(Some("a0c20s9d1o5")).is_err());
    }

    #[test]
    fn test_negated_boolean() {
        let cols = columns();
        assert_eq!(
            sales(&cols).build_select_query(Some("a4c16s4dtrueo0l2")).unwrap(),
            format!("{SQL} WHERE NOT (b = TRUE)")
        );
    }
}
