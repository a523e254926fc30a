//! The SQL builder.
//!
//! Statements are built as values and rendered per [`Dialect`]. It covers
//! exactly what this crate emits:
//!
//! - [`query`]: the report SELECT and row counts
//! - [`ddl`]: the store schema
//! - [`dml`]: the loader's parameterized INSERT
//! - [`expr`]: join conditions, `COUNT(*)` and the flag check
//! - [`token`] and [`dialect`]: rendering
//! - [`validate`]: parse emitted SQL back with sqlparser

pub mod ddl;
pub mod dialect;
pub mod dml;
pub mod expr;
pub mod query;
pub mod token;
pub mod validate;

pub use ddl::{Column, ColumnType, CreateTable, DropTable, ForeignKey};
pub use dialect::{Dialect, SqlDialect, UnknownDialect};
pub use dml::Insert;
pub use expr::Expr;
pub use query::{Select, SelectItem, SortDir, TableRef};
pub use token::{Keyword, Token, TokenStream};
pub use validate::{validate_sql, ValidationError};
