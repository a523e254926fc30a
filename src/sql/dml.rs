//! INSERT with one bind parameter per column.
//!
//! The store is reloaded wholesale and never updated in place, and row data
//! is always bound, never rendered into the statement.
//!
//! ```ignore
//! let insert = Insert::new("customers", &["customer_id", "name"]);
//! assert_eq!(
//!     insert.to_sql(Dialect::Postgres),
//!     r#"INSERT INTO "customers" ("customer_id", "name") VALUES ($1, $2)"#
//! );
//! ```

use super::dialect::Dialect;
use super::token::{Keyword, Token, TokenStream};

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an Insert does nothing until rendered with to_sql()"]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
}

impl Insert {
    pub fn new(table: &str, columns: &[&str]) -> Self {
        Self {
            table: table.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn to_tokens(&self) -> TokenStream {
        let positions: Vec<usize> = (1..=self.columns.len()).collect();

        let mut ts = TokenStream::new();
        ts.keyword(Keyword::InsertInto)
            .space()
            .ident(&self.table)
            .space()
            .paren_list(&self.columns, |ts, c| {
                ts.ident(c);
            })
            .space()
            .keyword(Keyword::Values)
            .space()
            .paren_list(&positions, |ts, p| {
                ts.push(Token::Param(*p));
            });
        ts
    }

    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens().render(dialect)
    }
}
