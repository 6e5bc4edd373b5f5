//! Defines the `Dialect` trait for database-specific literal and identifier syntax.

use serde::{Deserialize, Serialize};

pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> &'static str;

    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Renders a `YYYY-MM-DD` literal as a date expression.
    fn wrap_date(&self, value: &str) -> String;

    /// Renders a `YYYY-MM-DD HH:MM:SS[.f]` literal as a timestamp expression.
    fn wrap_timestamp(&self, value: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{ident}""#)
    }

    fn wrap_date(&self, value: &str) -> String {
        format!("date'{value}'")
    }

    fn wrap_timestamp(&self, value: &str) -> String {
        format!("'{value}'")
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#"`{ident}`"#)
    }

    fn wrap_date(&self, value: &str) -> String {
        format!("DATE('{value}')")
    }

    fn wrap_timestamp(&self, value: &str) -> String {
        format!("'{value}'")
    }
}

#[derive(Debug, Clone)]
pub struct Oracle;

impl Dialect for Oracle {
    fn name(&self) -> &'static str {
        "Oracle"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{ident}""#)
    }

    fn wrap_date(&self, value: &str) -> String {
        format!("to_date('{value}', 'YYYY-MM-DD')")
    }

    fn wrap_timestamp(&self, value: &str) -> String {
        format!("to_timestamp('{value}', 'YYYY-MM-DD HH:MI:SS.FF')")
    }
}

#[derive(Debug, Clone)]
pub struct SqlServer;

impl Dialect for SqlServer {
    fn name(&self) -> &'static str {
        "Microsoft SQL Server"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{ident}""#)
    }

    fn wrap_date(&self, value: &str) -> String {
        format!("'{value}'")
    }

    fn wrap_timestamp(&self, value: &str) -> String {
        format!("'{value}'")
    }
}

#[derive(Debug, Clone)]
pub struct S3Select;

impl Dialect for S3Select {
    fn name(&self) -> &'static str {
        "S3 Select"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{ident}""#)
    }

    fn wrap_date(&self, value: &str) -> String {
        format!("TO_TIMESTAMP('{value}')")
    }

    fn wrap_timestamp(&self, value: &str) -> String {
        format!("TO_TIMESTAMP('{value}')")
    }
}

/// The database product behind a relational connection.
///
/// Deserializes from its own name (`"sql_server"`) or from the product name
/// a driver reports (`"Microsoft SQL Server"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum DbProduct {
    #[default]
    Postgres,
    #[serde(rename = "mysql")]
    MySql,
    Oracle,
    SqlServer,
    S3Select,
}

impl DbProduct {
    /// Resolves the product name reported by a driver, e.g.
    /// `"Microsoft SQL Server"`. Unknown products behave like PostgreSQL.
    pub fn from_product_name(name: &str) -> Self {
        let name = name.to_uppercase();
        if name.contains("MICROSOFT") {
            DbProduct::SqlServer
        } else if name.contains("MYSQL") {
            DbProduct::MySql
        } else if name.contains("ORACLE") {
            DbProduct::Oracle
        } else if name.contains("S3 SELECT") {
            DbProduct::S3Select
        } else {
            DbProduct::Postgres
        }
    }

    pub fn dialect(&self) -> &'static dyn Dialect {
        match self {
            DbProduct::Postgres => &Postgres,
            DbProduct::MySql => &MySql,
            DbProduct::Oracle => &Oracle,
            DbProduct::SqlServer => &SqlServer,
            DbProduct::S3Select => &S3Select,
        }
    }
}

impl From<String> for DbProduct {
    fn from(name: String) -> Self {
        match name.as_str() {
            "postgres" => DbProduct::Postgres,
            "sql_server" => DbProduct::SqlServer,
            "s3_select" => DbProduct::S3Select,
            _ => DbProduct::from_product_name(&name),
        }
    }
}

/// How column names are written in a generated WHERE clause.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierQuoting {
    /// Names are written as-is.
    #[default]
    None,
    /// Names use the dialect's quote character.
    Dialect,
    /// Names are wrapped in the given quote string on both sides.
    Custom(String),
}

impl IdentifierQuoting {
    pub fn apply(&self, dialect: &dyn Dialect, ident: &str) -> String {
        match self {
            IdentifierQuoting::None => ident.to_string(),
            IdentifierQuoting::Dialect => dialect.quote_identifier(ident),
            IdentifierQuoting::Custom(quote) => format!("{quote}{ident}{quote}"),
        }
    }
}
