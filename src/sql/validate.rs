//! Validation of emitted SQL.
//!
//! Parses a SQL string back with sqlparser-rs using the matching parser
//! dialect. Used by the `sql --validate` command and throughout the tests.

use sqlparser::dialect::{
    DuckDbDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};
use sqlparser::parser::Parser;

use super::dialect::Dialect;

/// Emitted SQL that sqlparser rejected.
#[derive(Debug, thiserror::Error)]
#[error("Invalid SQL for {dialect}: {message}\nSQL: {sql}")]
pub struct ValidationError {
    pub dialect: Dialect,
    pub message: String,
    pub sql: String,
}

/// Validates that a SQL string is syntactically valid for the given dialect.
///
/// Returns the number of statements parsed.
///
/// # Example
///
/// ```ignore
/// use ecom_report::sql::{validate_sql, Dialect};
///
/// validate_sql("SELECT * FROM orders", Dialect::Postgres).unwrap();
/// ```
pub fn validate_sql(sql: &str, dialect: Dialect) -> Result<usize, ValidationError> {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Sqlite => Box::new(SQLiteDialect {}),
        Dialect::DuckDb => Box::new(DuckDbDialect {}),
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::TSql => Box::new(MsSqlDialect {}),
    };

    Parser::parse_sql(&*parser_dialect, sql)
        .map(|statements| statements.len())
        .map_err(|e| ValidationError {
            dialect,
            message: e.to_string(),
            sql: sql.to_string(),
        })
}
