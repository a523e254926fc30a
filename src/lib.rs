//! # ecom-report
//!
//! An order-overview report over a small e-commerce database, with the
//! multi-dialect SQL builder that produces it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          CSV files (data/<table>.csv)                    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [loader]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Dataset (model row types)                       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [store: schema DDL + INSERT]
//! ┌─────────────────────────────────────────────────────────┐
//! │          SQLite (customers, products, orders,            │
//! │                  order_items, reviews)                   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [report: 4-way inner join]
//! ┌─────────────────────────────────────────────────────────┐
//! │          OrderOverviewRow, newest orders first           │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The report query is built once with [`sql::Select`] and can be rendered
//! for SQLite, DuckDB, Postgres, MySQL or T-SQL. [`report::OrderOverview::evaluate`]
//! computes the same rows in memory without a database.

pub mod config;
pub mod loader;
pub mod model;
pub mod report;
pub mod schema;
pub mod sql;
pub mod store;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{Settings, SettingsError};
    pub use crate::loader::{load_into, read_dataset, LoadError, LoadSummary};
    pub use crate::model::{
        Customer, Dataset, Order, OrderItem, OrderOverviewRow, Product, Review,
    };
    pub use crate::report::{OrderOverview, ReportOptions};
    pub use crate::schema::{Table, LOAD_ORDER};
    pub use crate::sql::{Dialect, Expr, Select, SortDir, TableRef};
    pub use crate::store::{Store, StoreError, StoreOptions, TableCount};
}
