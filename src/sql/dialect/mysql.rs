//! MySQL.
//!
//! Backtick quoting. TEXT columns cannot be indexed without a prefix
//! length, which is why keys are VARCHAR. OFFSET needs a LIMIT, and the
//! documented "all rows" limit is the largest u64.

use super::{limit_offset, quote_with, SqlDialect};
use crate::sql::ddl::ColumnType;
use crate::sql::token::TokenStream;

#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote(&self, ident: &str) -> String {
        quote_with('`', '`', ident)
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

    fn paginate(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        limit_offset(limit, offset, Some("18446744073709551615"))
    }
}
