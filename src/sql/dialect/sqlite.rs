//! SQLite, the dialect the store executes.
//!
//! Column types use SQLite's affinity names, so an `INTEGER PRIMARY KEY`
//! becomes the rowid alias. OFFSET is only legal after a LIMIT, and
//! `LIMIT -1` means no limit.

use super::{limit_offset, SqlDialect};
use crate::sql::ddl::ColumnType;
use crate::sql::token::TokenStream;

#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn type_name(&self, ty: ColumnType) -> &'static str {
        match ty {
            ColumnType::BigInt | ColumnType::Flag => "INTEGER",
            ColumnType::Double => "REAL",
            ColumnType::Text | ColumnType::Key => "TEXT",
        }
    }

    fn paginate(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        limit_offset(limit, offset, Some("-1"))
    }
}
