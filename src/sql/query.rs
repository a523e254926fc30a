//! SELECT statements.
//!
//! A statement reads one table, inner-joins others onto it, and may sort and
//! paginate. There is no outer join: a row either matches every join
//! condition or is absent, never padded with NULLs.
//!
//! ```ignore
//! let o = TableRef::aliased("orders", "o");
//! let c = TableRef::aliased("customers", "c");
//!
//! let sql = Select::new(o.clone())
//!     .item(o.col("order_id"))
//!     .item(c.col("name").aliased("customer_name"))
//!     .inner_join(c.clone(), o.col("customer_id").equals(c.col("customer_id")))
//!     .order_by(o.col("order_date"), SortDir::Desc)
//!     .to_sql(Dialect::Postgres);
//! ```

use super::dialect::Dialect;
use super::expr::Expr;
use super::token::{Keyword, TokenStream};

/// An entry in the SELECT list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: Option<String>,
}

impl SelectItem {
    /// Result-set column name: the alias, else the referenced column.
    pub fn output_name(&self) -> Option<&str> {
        match (&self.alias, &self.expr) {
            (Some(alias), _) => Some(alias),
            (None, Expr::Column { name, .. }) => Some(name),
            _ => None,
        }
    }

    fn write_to(&self, ts: &mut TokenStream) {
        self.expr.write_to(ts);
        if let Some(alias) = &self.alias {
            ts.space().keyword(Keyword::As).space().ident(alias);
        }
    }
}

impl From<Expr> for SelectItem {
    fn from(expr: Expr) -> Self {
        SelectItem { expr, alias: None }
    }
}

/// A table in FROM or JOIN position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
        }
    }

    pub fn aliased(name: &str, alias: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: Some(alias.to_string()),
        }
    }

    /// A column of this table, qualified by the alias if there is one.
    pub fn col(&self, column: &str) -> Expr {
        Expr::qualified(self.alias.as_deref().unwrap_or(&self.name), column)
    }

    fn write_to(&self, ts: &mut TokenStream) {
        ts.ident(&self.name);
        if let Some(alias) = &self.alias {
            ts.space().keyword(Keyword::As).space().ident(alias);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Join {
    table: TableRef,
    on: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SortKey {
    expr: Expr,
    dir: SortDir,
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a Select does nothing until rendered with to_sql()"]
pub struct Select {
    items: Vec<SelectItem>,
    from: TableRef,
    joins: Vec<Join>,
    sort: Vec<SortKey>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Select {
    pub fn new(from: TableRef) -> Self {
        Self {
            items: Vec::new(),
            from,
            joins: Vec::new(),
            sort: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// `SELECT COUNT(*) FROM table`
    pub fn count_rows(table: &str) -> Self {
        Self::new(TableRef::new(table)).item(Expr::CountStar)
    }

    pub fn item(mut self, item: impl Into<SelectItem>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn inner_join(mut self, table: TableRef, on: Expr) -> Self {
        self.joins.push(Join { table, on });
        self
    }

    /// Append a sort key; earlier keys take precedence.
    pub fn order_by(mut self, expr: Expr, dir: SortDir) -> Self {
        self.sort.push(SortKey { expr, dir });
        self
    }

    /// T-SQL paginates with OFFSET/FETCH, which SQL Server only accepts
    /// after an ORDER BY.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Result-set column names, in SELECT order.
    pub fn output_columns(&self) -> Vec<&str> {
        self.items.iter().filter_map(SelectItem::output_name).collect()
    }

    pub fn to_tokens(&self, dialect: Dialect) -> TokenStream {
        let mut ts = TokenStream::new();

        ts.keyword(Keyword::Select)
            .indented_lines(&self.items, |ts, item| item.write_to(ts));

        ts.newline().keyword(Keyword::From).space();
        self.from.write_to(&mut ts);

        for join in &self.joins {
            ts.newline().keyword(Keyword::InnerJoin).space();
            join.table.write_to(&mut ts);
            ts.space().keyword(Keyword::On).space();
            join.on.write_to(&mut ts);
        }

        if !self.sort.is_empty() {
            ts.newline().keyword(Keyword::OrderBy).space();
            ts.comma_list(&self.sort, |ts, key| {
                key.expr.write_to(ts);
                ts.space().keyword(match key.dir {
                    SortDir::Asc => Keyword::Asc,
                    SortDir::Desc => Keyword::Desc,
                });
            });
        }

        if self.limit.is_some() || self.offset.is_some() {
            let page = dialect.syntax().paginate(self.limit, self.offset);
            ts.newline().extend_from(&page);
        }

        ts
    }

    pub fn to_sql(&self, dialect: Dialect) -> String {
        self.to_tokens(dialect).render(dialect)
    }
}
