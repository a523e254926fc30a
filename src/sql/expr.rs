//! Scalar expressions.
//!
//! Just enough for the statements this crate emits: join conditions
//! (`o.customer_id = c.customer_id`), `COUNT(*)` and the
//! `in_stock IN (0, 1)` check.

use super::dialect::Dialect;
use super::query::SelectItem;
use super::token::{Keyword, Token, TokenStream};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `qualifier.name`, or a bare `name`.
    Column {
        qualifier: Option<String>,
        name: String,
    },
    CountStar,
    Equals(Box<Expr>, Box<Expr>),
    /// `expr IN (v, ...)`; the list is never empty.
    OneOf(Box<Expr>, Vec<i64>),
}

impl Expr {
    pub fn column(name: &str) -> Self {
        Expr::Column {
            qualifier: None,
            name: name.to_string(),
        }
    }

    pub fn qualified(qualifier: &str, name: &str) -> Self {
        Expr::Column {
            qualifier: Some(qualifier.to_string()),
            name: name.to_string(),
        }
    }

    pub fn equals(self, other: Expr) -> Self {
        Expr::Equals(Box::new(self), Box::new(other))
    }

    pub fn one_of(self, values: &[i64]) -> Self {
        debug_assert!(!values.is_empty(), "IN () is not valid SQL");
        Expr::OneOf(Box::new(self), values.to_vec())
    }

    /// Name this expression in a SELECT list.
    pub fn aliased(self, alias: &str) -> SelectItem {
        SelectItem {
            expr: self,
            alias: Some(alias.to_string()),
        }
    }

    pub(crate) fn write_to(&self, ts: &mut TokenStream) {
        match self {
            Expr::Column { qualifier, name } => {
                if let Some(q) = qualifier {
                    ts.ident(q).push(Token::Dot);
                }
                ts.ident(name);
            }
            Expr::CountStar => {
                ts.keyword(Keyword::Count)
                    .push(Token::Open)
                    .push(Token::Star)
                    .push(Token::Close);
            }
            Expr::Equals(left, right) => {
                left.write_to(ts);
                ts.space().push(Token::Equals).space();
                right.write_to(ts);
            }
            Expr::OneOf(expr, values) => {
                expr.write_to(ts);
                ts.space()
                    .keyword(Keyword::In)
                    .space()
                    .paren_list(values, |ts, v| {
                        ts.push(Token::Int(*v));
                    });
            }
        }
    }

    pub fn to_sql(&self, dialect: Dialect) -> String {
        let mut ts = TokenStream::new();
        self.write_to(&mut ts);
        ts.render(dialect)
    }
}
