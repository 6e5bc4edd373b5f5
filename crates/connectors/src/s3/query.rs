use crate::s3::predicate::{S3SelectPredicateBuilder, TABLE_ALIAS, column_reference};
use filter_syntax::ParseResult;
use model::ColumnDescriptor;
use planner::{CapabilitySet, FixedWidthRewrite, plan};
use tracing::warn;

const S3_SELECT_SOURCE: &str = "S3Object";

/// Assembles the S3 Select query for one object.
pub struct S3SelectQueryBuilder<'a> {
    columns: &'a [ColumnDescriptor],
    positional: bool,
    capabilities: CapabilitySet,
}

impl<'a> S3SelectQueryBuilder<'a> {
    pub fn new(columns: &'a [ColumnDescriptor], positional: bool) -> Self {
        Self {
            columns,
            positional,
            capabilities: CapabilitySet::s3_select(),
        }
    }

    /// Non-projected columns are selected as `null` so the column layout of
    /// every record is preserved.
    pub fn build_select_query(&self, filter: Option<&str>) -> ParseResult<String> {
        let column_list = self
            .columns
            .iter()
            .map(|c| {
                if c.projected {
                    column_reference(c, self.positional)
                } else {
                    "null".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut query = format!("SELECT {column_list} FROM {S3_SELECT_SOURCE} {TABLE_ALIAS}");
        if let Some(filter) = filter
            && let Some(tree) = plan(filter, self.columns, &self.capabilities, FixedWidthRewrite::Off)?
        {
            match S3SelectPredicateBuilder::new(self.columns, self.positional).build(&tree) {
                Ok(predicate) => {
                    query.push_str(" WHERE ");
                    query.push_str(&predicate);
                }
                Err(e) => warn!(error = %e, filter, "WHERE clause is omitted"),
            }
        }
        Ok(query)
    }
}
