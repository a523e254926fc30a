//! The five-table e-commerce schema.
//!
//! Table definitions are built with the SQL builder so the same schema can
//! be printed for any dialect, while the store executes the SQLite rendition.
//!
//! ```text
//! customers ──< orders ──< order_items >── products
//!     │                                       │
//!     └──────────────< reviews >──────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::sql::{Column, ColumnType, CreateTable, Dialect, DropTable, Expr};

/// A table in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Customers,
    Products,
    Orders,
    OrderItems,
    Reviews,
}

/// Tables in referential order: every table appears after the tables its
/// foreign keys point at.
pub const LOAD_ORDER: [Table; 5] = [
    Table::Customers,
    Table::Products,
    Table::Orders,
    Table::OrderItems,
    Table::Reviews,
];

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Customers => "customers",
            Table::Products => "products",
            Table::Orders => "orders",
            Table::OrderItems => "order_items",
            Table::Reviews => "reviews",
        }
    }

    /// Column names in declaration order. Also the CSV header order.
    pub fn columns(&self) -> Vec<&'static str> {
        match self {
            Table::Customers => vec![
                "customer_id",
                "name",
                "email",
                "phone",
                "created_at",
                "city",
                "state",
            ],
            Table::Products => vec![
                "product_id",
                "product_name",
                "category",
                "price",
                "in_stock",
                "added_at",
            ],
            Table::Orders => vec![
                "order_id",
                "customer_id",
                "order_date",
                "total_amount",
                "payment_method",
                "order_status",
            ],
            Table::OrderItems => vec![
                "item_id",
                "order_id",
                "product_id",
                "quantity",
                "item_price",
            ],
            Table::Reviews => vec![
                "review_id",
                "customer_id",
                "product_id",
                "rating",
                "comment",
                "review_date",
            ],
        }
    }

    /// CREATE TABLE definition for this table. Every column is NOT NULL.
    pub fn create_table(&self) -> CreateTable {
        let key = |name: &str| Column::new(name, ColumnType::Key).not_null();
        let text = |name: &str| Column::new(name, ColumnType::Text).not_null();
        let int = |name: &str| Column::new(name, ColumnType::BigInt).not_null();
        let real = |name: &str| Column::new(name, ColumnType::Double).not_null();
        let table = CreateTable::new(self.name());

        match self {
            Table::Customers => table
                .column(Column::new("customer_id", ColumnType::BigInt).primary_key())
                .column(text("name"))
                .column(text("email"))
                .column(text("phone"))
                .column(text("created_at"))
                .column(text("city"))
                .column(text("state")),

            Table::Products => table
                .column(Column::new("product_id", ColumnType::Key).primary_key())
                .column(text("product_name"))
                .column(text("category"))
                .column(real("price"))
                .column(
                    Column::new("in_stock", ColumnType::Flag)
                        .not_null()
                        .check(Expr::column("in_stock").one_of(&[0, 1])),
                )
                .column(text("added_at")),

            Table::Orders => table
                .column(Column::new("order_id", ColumnType::Key).primary_key())
                .column(int("customer_id"))
                .column(text("order_date"))
                .column(real("total_amount"))
                .column(text("payment_method"))
                .column(text("order_status"))
                .foreign_key("customer_id", "customers", "customer_id"),

            Table::OrderItems => table
                .column(Column::new("item_id", ColumnType::Key).primary_key())
                .column(key("order_id"))
                .column(key("product_id"))
                .column(int("quantity"))
                .column(real("item_price"))
                .foreign_key("order_id", "orders", "order_id")
                .foreign_key("product_id", "products", "product_id"),

            Table::Reviews => table
                .column(Column::new("review_id", ColumnType::Key).primary_key())
                .column(int("customer_id"))
                .column(key("product_id"))
                .column(int("rating"))
                .column(text("comment"))
                .column(text("review_date"))
                .foreign_key("customer_id", "customers", "customer_id")
                .foreign_key("product_id", "products", "product_id"),
        }
    }

    /// DROP TABLE IF EXISTS for this table.
    pub fn drop_table(&self) -> DropTable {
        DropTable::if_exists(self.name())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a table name is not part of the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown table: {0}")]
pub struct UnknownTable(pub String);

impl FromStr for Table {
    type Err = UnknownTable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LOAD_ORDER
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownTable(s.to_string()))
    }
}

/// DROP statements in reverse referential order, so no table is dropped
/// while another still references it.
pub fn drop_statements(dialect: Dialect) -> Vec<String> {
    LOAD_ORDER
        .iter()
        .rev()
        .map(|t| t.drop_table().to_sql(dialect))
        .collect()
}

/// CREATE statements in referential order.
pub fn create_statements(dialect: Dialect, if_not_exists: bool) -> Vec<String> {
    LOAD_ORDER
        .iter()
        .map(|t| {
            let create = t.create_table();
            if if_not_exists {
                create.if_not_exists().to_sql(dialect)
            } else {
                create.to_sql(dialect)
            }
        })
        .collect()
}

/// Full schema script: drops followed by creates, `;`-terminated.
pub fn schema_script(dialect: Dialect) -> String {
    drop_statements(dialect)
        .into_iter()
        .chain(create_statements(dialect, false))
        .map(|stmt| format!("{};\n", stmt))
        .collect::<Vec<_>>()
        .join("\n")
}
