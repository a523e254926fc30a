//! Target dialects.
//!
//! Every builder emits one token stream for all targets. A dialect only
//! decides spelling:
//!
//! | | quoting | params | pagination | `CREATE ... IF NOT EXISTS` |
//! |---|---|---|---|---|
//! | SQLite | `"x"` | `?` | `LIMIT -1 OFFSET n` when only offset | yes |
//! | DuckDB | `"x"` | `?` | `LIMIT/OFFSET` | yes |
//! | Postgres | `"x"` | `$n` | `LIMIT/OFFSET` | yes |
//! | MySQL | `` `x` `` | `?` | `LIMIT <u64::MAX> OFFSET n` when only offset | yes |
//! | T-SQL | `[x]` | `@pn` | `OFFSET n ROWS FETCH NEXT m ROWS ONLY` | no |

mod duckdb;
mod mysql;
mod postgres;
mod sqlite;
mod tsql;

pub use duckdb::DuckDb;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;
pub use tsql::TSql;

use std::fmt;
use std::str::FromStr;

use super::ddl::ColumnType;
use super::token::{Keyword, Token, TokenStream};

/// How one dialect spells the parts of a statement that differ between
/// targets.
pub trait SqlDialect: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Quote a table, column or alias name.
    fn quote(&self, ident: &str) -> String {
        quote_with('"', '"', ident)
    }

    /// Bind parameter at a 1-based position.
    fn param(&self, _position: usize) -> String {
        "?".to_string()
    }

    fn type_name(&self, ty: ColumnType) -> &'static str;

    /// Pagination clause. Called only when at least one of the two is set.
    fn paginate(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        limit_offset(limit, offset, None)
    }

    fn create_if_not_exists(&self) -> bool {
        true
    }
}

/// Wrap `ident` in `open`/`close`, doubling any `close` inside it.
fn quote_with(open: char, close: char, ident: &str) -> String {
    let mut quoted = String::with_capacity(ident.len() + 2);
    quoted.push(open);
    for ch in ident.chars() {
        if ch == close {
            quoted.push(close);
        }
        quoted.push(ch);
    }
    quoted.push(close);
    quoted
}

/// `LIMIT n OFFSET m`. Dialects that reject a bare OFFSET pass their
/// spelling of "no limit" as `unbounded`.
fn limit_offset(
    limit: Option<u64>,
    offset: Option<u64>,
    unbounded: Option<&'static str>,
) -> TokenStream {
    let mut ts = TokenStream::new();
    match (limit, unbounded) {
        (Some(n), _) => {
            ts.keyword(Keyword::Limit).space().push(Token::UInt(n));
        }
        (None, Some(all)) if offset.is_some() => {
            ts.keyword(Keyword::Limit).space().push(Token::Verbatim(all));
        }
        _ => {}
    }
    if let Some(n) = offset {
        if !ts.is_empty() {
            ts.space();
        }
        ts.keyword(Keyword::Offset).space().push(Token::UInt(n));
    }
    ts
}

/// Supported targets. SQLite is the one the store executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Sqlite,
    DuckDb,
    Postgres,
    MySql,
    TSql,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::Sqlite,
        Dialect::DuckDb,
        Dialect::Postgres,
        Dialect::MySql,
        Dialect::TSql,
    ];

    /// The spelling rules for this target.
    pub fn syntax(self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Sqlite => &Sqlite,
            Dialect::DuckDb => &DuckDb,
            Dialect::Postgres => &Postgres,
            Dialect::MySql => &MySql,
            Dialect::TSql => &TSql,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.syntax().name())
    }
}

/// A dialect name that [`Dialect::from_str`] does not recognise.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dialect '{0}' (expected sqlite, duckdb, postgres, mysql or tsql)")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let dialect = match name.as_str() {
            "sqlite" | "sqlite3" => Dialect::Sqlite,
            "duckdb" => Dialect::DuckDb,
            "postgres" | "postgresql" | "pg" => Dialect::Postgres,
            "mysql" => Dialect::MySql,
            "tsql" | "mssql" | "sqlserver" => Dialect::TSql,
            _ => return Err(UnknownDialect(name)),
        };
        Ok(dialect)
    }
}
