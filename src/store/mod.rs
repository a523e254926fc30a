//! SQLite-backed store for the e-commerce tables.
//!
//! Wraps a single rusqlite [`Connection`]. All SQL is produced by the SQL
//! builder in its SQLite rendition: schema DDL, parameterized inserts,
//! `COUNT(*)` queries and the order-overview report.
//!
//! # Design
//!
//! - One connection per store; open one store per thread for concurrency
//! - Replacing the dataset resets the schema and inserts inside one transaction
//! - Foreign key enforcement is a connection option, on by default

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde::{Deserialize, Serialize};

use crate::model::{Customer, Dataset, Order, OrderItem, OrderOverviewRow, Product, Review};
use crate::report::{OrderOverview, ReportOptions};
use crate::schema::{self, Table, LOAD_ORDER};
use crate::sql::{Dialect, Insert, Select};

const DIALECT: Dialect = Dialect::Sqlite;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Table '{0}' does not exist; load the data first")]
    MissingTable(Table),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Connection options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreOptions {
    /// Enforce foreign keys (`PRAGMA foreign_keys = ON`).
    pub foreign_keys: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { foreign_keys: true }
    }
}

/// Row count for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: Table,
    pub rows: u64,
}

/// SQLite store.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a store at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>, options: &StoreOptions) -> StoreResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        log::debug!("opening store at {}", path.display());
        let conn = Connection::open(path)?;
        Self::with_connection(conn, options)
    }

    /// Open an existing store without write access.
    ///
    /// Never creates the file or its directories; a missing file is
    /// [`StoreError::NotFound`].
    pub fn open_read_only(path: impl AsRef<Path>, options: &StoreOptions) -> StoreResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }

        log::debug!("opening store read-only at {}", path.display());
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::with_connection(conn, options)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory(options: &StoreOptions) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, options)
    }

    fn with_connection(conn: Connection, options: &StoreOptions) -> StoreResult<Self> {
        conn.pragma_update(None, "foreign_keys", options.foreign_keys)?;
        Ok(Self { conn })
    }

    /// Whether foreign keys are enforced on this connection.
    pub fn foreign_keys_enabled(&self) -> StoreResult<bool> {
        let on: i64 = self
            .conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
        Ok(on == 1)
    }

    /// Create any missing tables.
    pub fn ensure_schema(&self) -> StoreResult<()> {
        for sql in schema::create_statements(DIALECT, true) {
            log::debug!("executing: {}", sql);
            self.conn.execute(&sql, [])?;
        }
        Ok(())
    }

    /// Drop every table and create it again, empty.
    pub fn reset_schema(&self) -> StoreResult<()> {
        reset_schema_on(&self.conn)
    }

    /// Whether `table` exists in the database.
    pub fn table_exists(&self, table: Table) -> StoreResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
                params![table.name()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn require_tables(&self, tables: &[Table]) -> StoreResult<()> {
        for table in tables {
            if !self.table_exists(*table)? {
                return Err(StoreError::MissingTable(*table));
            }
        }
        Ok(())
    }

    /// Insert a whole dataset in referential order inside one transaction.
    ///
    /// Either every row is inserted or none is.
    pub fn insert_dataset(&mut self, data: &Dataset) -> StoreResult<Vec<TableCount>> {
        let tx = self.conn.transaction()?;
        let counts = insert_all(&tx, data)?;
        tx.commit()?;

        log_counts(&counts);
        Ok(counts)
    }

    /// Replace the store contents with `data`.
    ///
    /// The schema reset and the inserts share one transaction, so a failed
    /// load leaves the previous contents in place.
    pub fn replace_dataset(&mut self, data: &Dataset) -> StoreResult<Vec<TableCount>> {
        let tx = self.conn.transaction()?;
        reset_schema_on(&tx)?;
        let counts = insert_all(&tx, data)?;
        tx.commit()?;

        log_counts(&counts);
        Ok(counts)
    }

    /// `SELECT COUNT(*)` for one table.
    pub fn row_count(&self, table: Table) -> StoreResult<u64> {
        self.require_tables(&[table])?;

        let sql = Select::count_rows(table.name()).to_sql(DIALECT);
        log::debug!("executing: {}", sql);

        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Row counts for every table, in referential order.
    pub fn row_counts(&self) -> StoreResult<Vec<TableCount>> {
        LOAD_ORDER
            .iter()
            .map(|&table| {
                Ok(TableCount {
                    table,
                    rows: self.row_count(table)?,
                })
            })
            .collect()
    }

    /// Run the order-overview report.
    pub fn order_overview(&self, options: &ReportOptions) -> StoreResult<Vec<OrderOverviewRow>> {
        self.require_tables(&[
            Table::Orders,
            Table::Customers,
            Table::OrderItems,
            Table::Products,
        ])?;

        let sql = OrderOverview::to_sql_with(DIALECT, options);
        log::debug!("executing: {}", sql);

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(OrderOverviewRow {
                    order_id: row.get(0)?,
                    customer_name: row.get(1)?,
                    product_name: row.get(2)?,
                    quantity: row.get(3)?,
                    item_price: row.get(4)?,
                    total_amount: row.get(5)?,
                    order_date: row.get(6)?,
                    city: row.get(7)?,
                    category: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("order overview returned {} rows", rows.len());
        Ok(rows)
    }
}

fn reset_schema_on(conn: &Connection) -> StoreResult<()> {
    for sql in schema::drop_statements(DIALECT) {
        log::debug!("executing: {}", sql);
        conn.execute(&sql, [])?;
    }
    for sql in schema::create_statements(DIALECT, false) {
        log::debug!("executing: {}", sql);
        conn.execute(&sql, [])?;
    }
    log::info!("created {} tables", LOAD_ORDER.len());
    Ok(())
}

fn insert_all(conn: &Connection, data: &Dataset) -> StoreResult<Vec<TableCount>> {
    Ok(vec![
        TableCount {
            table: Table::Customers,
            rows: insert_customers(conn, &data.customers)?,
        },
        TableCount {
            table: Table::Products,
            rows: insert_products(conn, &data.products)?,
        },
        TableCount {
            table: Table::Orders,
            rows: insert_orders(conn, &data.orders)?,
        },
        TableCount {
            table: Table::OrderItems,
            rows: insert_order_items(conn, &data.order_items)?,
        },
        TableCount {
            table: Table::Reviews,
            rows: insert_reviews(conn, &data.reviews)?,
        },
    ])
}

fn log_counts(counts: &[TableCount]) {
    for count in counts {
        log::info!("inserted {} rows into {}", count.rows, count.table);
    }
}

fn insert_sql(table: Table) -> String {
    Insert::new(table.name(), &table.columns()).to_sql(DIALECT)
}

fn insert_customers(conn: &Connection, rows: &[Customer]) -> StoreResult<u64> {
    let mut stmt = conn.prepare(&insert_sql(Table::Customers))?;
    for c in rows {
        stmt.execute(params![
            c.customer_id,
            c.name,
            c.email,
            c.phone,
            c.created_at,
            c.city,
            c.state
        ])?;
    }
    Ok(rows.len() as u64)
}

fn insert_products(conn: &Connection, rows: &[Product]) -> StoreResult<u64> {
    let mut stmt = conn.prepare(&insert_sql(Table::Products))?;
    for p in rows {
        stmt.execute(params![
            p.product_id,
            p.product_name,
            p.category,
            p.price,
            p.in_stock,
            p.added_at
        ])?;
    }
    Ok(rows.len() as u64)
}

fn insert_orders(conn: &Connection, rows: &[Order]) -> StoreResult<u64> {
    let mut stmt = conn.prepare(&insert_sql(Table::Orders))?;
    for o in rows {
        stmt.execute(params![
            o.order_id,
            o.customer_id,
            o.order_date,
            o.total_amount,
            o.payment_method,
            o.order_status
        ])?;
    }
    Ok(rows.len() as u64)
}

fn insert_order_items(conn: &Connection, rows: &[OrderItem]) -> StoreResult<u64> {
    let mut stmt = conn.prepare(&insert_sql(Table::OrderItems))?;
    for i in rows {
        stmt.execute(params![
            i.item_id,
            i.order_id,
            i.product_id,
            i.quantity,
            i.item_price
        ])?;
    }
    Ok(rows.len() as u64)
}

fn insert_reviews(conn: &Connection, rows: &[Review]) -> StoreResult<u64> {
    let mut stmt = conn.prepare(&insert_sql(Table::Reviews))?;
    for r in rows {
        stmt.execute(params![
            r.review_id,
            r.customer_id,
            r.product_id,
            r.rating,
            r.comment,
            r.review_date
        ])?;
    }
    Ok(rows.len() as u64)
}
