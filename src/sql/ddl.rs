//! CREATE TABLE and DROP TABLE for the store schema.
//!
//! ```ignore
//! let customers = CreateTable::new("customers")
//!     .column(Column::new("customer_id", ColumnType::BigInt).primary_key())
//!     .column(Column::new("name", ColumnType::Text).not_null());
//!
//! println!("{}", customers.to_sql(Dialect::Postgres));
//! ```

use super::dialect::Dialect;
use super::expr::Expr;
use super::token::{Keyword, Token, TokenStream};

/// The kinds of value the store holds. Each dialect names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Counts, ratings and numeric ids.
    BigInt,
    /// A 0/1 boolean, stored as a small integer.
    Flag,
    /// Prices and amounts.
    Double,
    /// Free text and ISO-8601 dates.
    Text,
    /// Text id of at most 64 characters, bounded so it can be indexed.
    Key,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub not_null: bool,
    pub primary_key: bool,
    pub check: Option<Expr>,
}

impl Column {
    pub fn new(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            not_null: false,
            primary_key: false,
            check: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn check(mut self, expr: Expr) -> Self {
        self.check = Some(expr);
        self
    }

    fn write_to(&self, ts: &mut TokenStream) {
        ts.ident(&self.name).space().push(Token::Type(self.ty));
        if self.not_null {
            ts.space().keyword(Keyword::NotNull);
        }
        if self.primary_key {
            ts.space().keyword(Keyword::PrimaryKey);
        }
        if let Some(check) = &self.check {
            ts.space().keyword(Keyword::Check).space().push(Token::Open);
            check.write_to(ts);
            ts.push(Token::Close);
        }
    }
}

/// Single-column foreign key: `column` references `table.target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: String,
    pub table: String,
    pub target: String,
}

impl ForeignKey {
    fn write_to(&self, ts: &mut TokenStream) {
        ts.keyword(Keyword::ForeignKey)
            .space()
            .paren_list(&[&self.column], |ts, c| {
                ts.ident(c);
            })
            .space()
            .keyword(Keyword::References)
            .space()
            .ident(&self.table)
            .space()
            .paren_list(&[&self.target], |ts, c| {
                ts.ident(c);
            });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a CreateTable does nothing until rendered with to_sql()"]
pub struct CreateTable {
    pub name: String,
    pub if_not_exists: bool,
    pub columns: Vec<Column>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl CreateTable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            if_not_exists: false,
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Ignored by dialects without `CREATE TABLE IF NOT EXISTS`.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn foreign_key(mut self, column: &str, table: &str, target: &str) -> Self {
        self.foreign_keys.push(ForeignKey {
            column: column.to_string(),
            table: table.to_string(),
            target: target.to_string(),
        });
        self
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn to_tokens(&self, dialect: Dialect) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.keyword(Keyword::CreateTable).space();
        if self.if_not_exists && dialect.syntax().create_if_not_exists() {
            ts.keyword(Keyword::IfNotExists).space();
        }
        ts.ident(&self.name).space().push(Token::Open);

        // columns first, then table-level keys, one entry per line
        let entries: Vec<TokenStream> = self
            .columns
            .iter()
            .map(|c| {
                let mut entry = TokenStream::new();
                c.write_to(&mut entry);
                entry
            })
            .chain(self.foreign_keys.iter().map(|fk| {
                let mut entry = TokenStream::new();
                fk.write_to(&mut entry);
                entry
            }))
            .collect();
        ts.indented_lines(&entries, |ts, entry| {
            ts.extend_from(entry);
        });

        ts.newline().push(Token::Close);
        ts
    }

    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens(dialect).render(dialect)
    }
}

/// `DROP TABLE IF EXISTS`. Every supported dialect accepts the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a DropTable does nothing until rendered with to_sql()"]
pub struct DropTable {
    pub name: String,
}

impl DropTable {
    pub fn if_exists(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn to_sql(&self, dialect: Dialect) -> String {
        let mut ts = TokenStream::new();
        ts.keyword(Keyword::DropTable)
            .space()
            .keyword(Keyword::IfExists)
            .space()
            .ident(&self.name);
        ts.render(dialect)
    }
}
