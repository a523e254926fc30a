//! PostgreSQL: ANSI quoting and numbered `$n` parameters.

use super::SqlDialect;
use crate::sql::ddl::ColumnType;

#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn param(&self, position: usize) -> String {
        format!("${}", position)
    }

    fn type_name(&self, ty: ColumnType) -> &'static str {
        match ty {
            ColumnType::BigInt => "BIGINT",
            ColumnType::Flag => "SMALLINT",
            ColumnType::Double => "DOUBLE PRECISION",
            ColumnType::Text => "TEXT",
            ColumnType::Key => "VARCHAR(64)",
        }
    }
}
