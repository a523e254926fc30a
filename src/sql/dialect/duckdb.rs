//! DuckDB. Postgres-compatible spelling, except `?` parameters and
//! `DOUBLE`.

use super::SqlDialect;
use crate::sql::ddl::ColumnType;

#[derive(Debug, Clone, Copy)]
pub struct DuckDb;

impl SqlDialect for DuckDb {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn type_name(&self, ty: ColumnType) -> &'static str {
        match ty {
            ColumnType::BigInt => "BIGINT",
            ColumnType::Flag => "SMALLINT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Text => "TEXT",
            ColumnType::Key => "VARCHAR(64)",
        }
    }
}
