//! T-SQL (SQL Server).
//!
//! Bracket quoting, `@pn` parameters, Unicode text types and OFFSET/FETCH
//! pagination, which SQL Server only accepts after an ORDER BY. CREATE
//! TABLE has no IF NOT EXISTS form.

use super::{quote_with, SqlDialect};
use crate::sql::ddl::ColumnType;
use crate::sql::token::{Keyword, Token, TokenStream};

#[derive(Debug, Clone, Copy)]
pub struct TSql;

impl SqlDialect for TSql {
    fn name(&self) -> &'static str {
        "tsql"
    }

    fn quote(&self, ident: &str) -> String {
        quote_with('[', ']', ident)
    }

    fn param(&self, position: usize) -> String {
        format!("@p{}", position)
    }

    fn type_name(&self, ty: ColumnType) -> &'static str {
        match ty {
            ColumnType::BigInt => "BIGINT",
            ColumnType::Flag => "SMALLINT",
            ColumnType::Double => "FLOAT",
            ColumnType::Text => "NVARCHAR(MAX)",
            ColumnType::Key => "NVARCHAR(64)",
        }
    }

    fn paginate(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.keyword(Keyword::Offset)
            .space()
            .push(Token::UInt(offset.unwrap_or(0)))
            .space()
            .keyword(Keyword::Rows);
        if let Some(n) = limit {
            ts.space()
                .keyword(Keyword::FetchNext)
                .space()
                .push(Token::UInt(n))
                .space()
                .keyword(Keyword::RowsOnly);
        }
        ts
    }

    fn create_if_not_exists(&self) -> bool {
        false
    }
}
