use crate::{
    error::{ErrorKind, PushdownError, Result},
    orc::{SearchArgument, SearchArgumentBuilder},
    parquet::{FilterPredicate, FilterPredicateBuilder, ParquetSchema, SchemaResolver},
    s3::S3SelectPredicateBuilder,
    sql::{DbProduct, IdentifierQuoting, SqlPredicateBuilder},
};
use filter_syntax::Node;
use model::ColumnDescriptor;
use planner::{CapabilitySet, FixedWidthRewrite, plan};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, warn};

/// Backend-specific inputs to [`compile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum BackendContext {
    Orc {
        /// File field names by ordinal; set when columns are matched by
        /// position instead of by name.
        #[serde(default)]
        field_names: Option<Vec<String>>,
    },
    Parquet {
        schema: ParquetSchema,
    },
    Jdbc {
        #[serde(default)]
        product: DbProduct,
        #[serde(default)]
        quoting: IdentifierQuoting,
    },
    S3Select {
        #[serde(default)]
        positional: bool,
    },
}

impl BackendContext {
    pub fn name(&self) -> &'static str {
        match self {
            BackendContext::Orc { .. } => "orc",
            BackendContext::Parquet { .. } => "parquet",
            BackendContext::Jdbc { .. } => "jdbc",
            BackendContext::S3Select { .. } => "s3_select",
        }
    }

    /// The preset capability set of the backend.
    pub fn capabilities(&self) -> CapabilitySet {
        match self {
            BackendContext::Orc { .. } => CapabilitySet::orc(),
            BackendContext::Parquet { .. } => CapabilitySet::parquet(),
            BackendContext::Jdbc { .. } => CapabilitySet::jdbc(),
            BackendContext::S3Select { .. } => CapabilitySet::s3_select(),
        }
    }

    fn fixed_width(&self) -> FixedWidthRewrite {
        match self {
            BackendContext::Orc { .. } => FixedWidthRewrite::PadAndTrim,
            BackendContext::Parquet { .. } => FixedWidthRewrite::TrimOnly,
            _ => FixedWidthRewrite::Off,
        }
    }
}

/// A predicate in the form a backend evaluates natively.
#[derive(Debug, Clone, PartialEq)]
pub enum NativePredicate {
    SearchArgument(SearchArgument),
    FilterPredicate(FilterPredicate),
    /// The body of a `WHERE` clause.
    SqlWhere(String),
    S3Select(String),
}

impl fmt::Display for NativePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativePredicate::SearchArgument(sarg) => write!(f, "{sarg}"),
            NativePredicate::FilterPredicate(predicate) => write!(f, "{predicate}"),
            NativePredicate::SqlWhere(sql) | NativePredicate::S3Select(sql) => write!(f, "{sql}"),
        }
    }
}

/// Parses and prunes a filter for a backend, resolving storage categories
/// from the Parquet schema when there is one.
pub fn plan_for(
    filter: &str,
    columns: &[ColumnDescriptor],
    capabilities: &CapabilitySet,
    context: &BackendContext,
) -> Result<Option<Node>> {
    let planned = match context {
        BackendContext::Parquet { schema } => plan(
            filter,
            &SchemaResolver::new(columns, schema),
            capabilities,
            context.fixed_width(),
        )?,
        _ => plan(filter, columns, capabilities, context.fixed_width())?,
    };
    Ok(planned)
}

/// Compiles a serialized filter into a backend-native predicate.
///
/// `Ok(None)` means no pushdown: the caller scans unfiltered and applies
/// the original predicate itself. A malformed filter is always an error.
/// A relational builder failure is logged and turns into `Ok(None)`.
pub fn compile(
    filter: &str,
    columns: &[ColumnDescriptor],
    capabilities: &CapabilitySet,
    context: &BackendContext,
) -> Result<Option<NativePredicate>> {
    let Some(tree) = plan_for(filter, columns, capabilities, context)? else {
        debug!(backend = context.name(), filter, "No pushdown");
        return Ok(None);
    };

    let built = match context {
        BackendContext::Orc { field_names } => {
            let builder = match field_names {
                Some(names) => SearchArgumentBuilder::positional(columns, names),
                None => SearchArgumentBuilder::new(columns),
            };
            builder.build(&tree).map(NativePredicate::SearchArgument)
        }
        BackendContext::Parquet { schema } => FilterPredicateBuilder::new(columns, schema)
            .build(&tree)
            .map(NativePredicate::FilterPredicate),
        BackendContext::Jdbc { product, quoting } => {
            return match SqlPredicateBuilder::new(columns, product.dialect(), quoting).build(&tree) {
                Ok(sql) => Ok(Some(NativePredicate::SqlWhere(sql))),
                Err(e) => {
                    warn!(error = %e, filter, "WHERE clause is omitted");
                    Ok(None)
                }
            };
        }
        BackendContext::S3Select { positional } => S3SelectPredicateBuilder::new(columns, *positional)
            .build(&tree)
            .map(NativePredicate::S3Select),
    };

    built.map(Some).inspect_err(|e| report(e, context, filter))
}

fn report(e: &PushdownError, context: &BackendContext, filter: &str) {
    match e.kind() {
        ErrorKind::UnsupportedConstruct => {
            error!(backend = context.name(), error = %e, filter, "Predicate builder rejected a pruned tree")
        }
        kind => debug!(backend = context.name(), %kind, error = %e, filter, "Predicate compilation failed"),
    }
}
