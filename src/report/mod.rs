//! The order-overview report.
//!
//! Joins orders to customers, order items and products, one output row per
//! order item, most recent orders first:
//!
//! ```text
//! orders o
//!   INNER JOIN customers   c  ON o.customer_id = c.customer_id
//!   INNER JOIN order_items oi ON o.order_id    = oi.order_id
//!   INNER JOIN products    p  ON oi.product_id = p.product_id
//! ORDER BY o.order_date DESC, o.order_id ASC, oi.item_id ASC
//! ```
//!
//! Orders without a customer or without items, and items without a product,
//! produce no rows. Equal order dates are broken by order id, then item id,
//! so the output is fully deterministic.
//!
//! The same report can be rendered as SQL for any [`Dialect`] or evaluated
//! directly over an in-memory [`Dataset`]; both yield identical rows.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Customer, Dataset, Order, OrderItem, OrderOverviewRow, Product};
use crate::schema::Table;
use crate::sql::{Dialect, Select, SortDir, TableRef};

/// Output columns, in order.
pub const COLUMNS: [&str; 9] = [
    "order_id",
    "customer_name",
    "product_name",
    "quantity",
    "item_price",
    "total_amount",
    "order_date",
    "city",
    "category",
];

/// Pagination applied after sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ReportOptions {
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    fn apply(&self, mut query: Select) -> Select {
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        if let Some(offset) = self.offset {
            query = query.offset(offset);
        }
        query
    }
}

/// The order-overview report.
pub struct OrderOverview;

impl OrderOverview {
    /// The report as a dialect-independent query.
    pub fn query() -> Select {
        let o = TableRef::aliased(Table::Orders.name(), "o");
        let c = TableRef::aliased(Table::Customers.name(), "c");
        let oi = TableRef::aliased(Table::OrderItems.name(), "oi");
        let p = TableRef::aliased(Table::Products.name(), "p");

        Select::new(o.clone())
            .item(o.col("order_id"))
            .item(c.col("name").aliased("customer_name"))
            .item(p.col("product_name"))
            .item(oi.col("quantity"))
            .item(oi.col("item_price"))
            .item(o.col("total_amount"))
            .item(o.col("order_date"))
            .item(c.col("city"))
            .item(p.col("category"))
            .inner_join(c.clone(), o.col("customer_id").equals(c.col("customer_id")))
            .inner_join(oi.clone(), o.col("order_id").equals(oi.col("order_id")))
            .inner_join(p.clone(), oi.col("product_id").equals(p.col("product_id")))
            .order_by(o.col("order_date"), SortDir::Desc)
            .order_by(o.col("order_id"), SortDir::Asc)
            .order_by(oi.col("item_id"), SortDir::Asc)
    }

    /// The report query with pagination applied.
    pub fn paginated(options: &ReportOptions) -> Select {
        options.apply(Self::query())
    }

    /// Render the report for a dialect.
    pub fn to_sql(dialect: Dialect) -> String {
        Self::query().to_sql(dialect)
    }

    /// Render the paginated report for a dialect.
    pub fn to_sql_with(dialect: Dialect, options: &ReportOptions) -> String {
        Self::paginated(options).to_sql(dialect)
    }

    /// Evaluate the report over an in-memory dataset.
    ///
    /// Keys must be unique per table, as the store's primary keys
    /// guarantee. Debug builds assert it.
    pub fn evaluate(data: &Dataset) -> Vec<OrderOverviewRow> {
        Self::evaluate_with(data, &ReportOptions::default())
    }

    /// Evaluate the report with pagination.
    pub fn evaluate_with(data: &Dataset, options: &ReportOptions) -> Vec<OrderOverviewRow> {
        let customers: HashMap<i64, &Customer> =
            data.customers.iter().map(|c| (c.customer_id, c)).collect();
        let products: HashMap<&str, &Product> = data
            .products
            .iter()
            .map(|p| (p.product_id.as_str(), p))
            .collect();
        let orders: HashMap<&str, &Order> = data
            .orders
            .iter()
            .map(|o| (o.order_id.as_str(), o))
            .collect();
        debug_assert_eq!(
            customers.len(),
            data.customers.len(),
            "duplicate customer_id in dataset"
        );
        debug_assert_eq!(
            products.len(),
            data.products.len(),
            "duplicate product_id in dataset"
        );
        debug_assert_eq!(
            orders.len(),
            data.orders.len(),
            "duplicate order_id in dataset"
        );

        let mut joined: Vec<(&Order, &Customer, &OrderItem, &Product)> = data
            .order_items
            .iter()
            .filter_map(|item| {
                let order = orders.get(item.order_id.as_str())?;
                let customer = customers.get(&order.customer_id)?;
                let product = products.get(item.product_id.as_str())?;
                Some((*order, *customer, item, *product))
            })
            .collect();

        joined.sort_by(|a, b| compare_rows((a.0, a.2), (b.0, b.2)));

        let offset = options.offset.unwrap_or(0) as usize;
        let limit = options.limit.map_or(usize::MAX, |l| l as usize);

        joined
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(order, customer, item, product)| OrderOverviewRow {
                order_id: order.order_id.clone(),
                customer_name: customer.name.clone(),
                product_name: product.product_name.clone(),
                quantity: item.quantity,
                item_price: item.item_price,
                total_amount: order.total_amount,
                order_date: order.order_date.clone(),
                city: customer.city.clone(),
                category: product.category.clone(),
            })
            .collect()
    }
}

/// order_date DESC, order_id ASC, item_id ASC
fn compare_rows(a: (&Order, &OrderItem), b: (&Order, &OrderItem)) -> Ordering {
    b.0.order_date
        .cmp(&a.0.order_date)
        .then_with(|| a.0.order_id.cmp(&b.0.order_id))
        .then_with(|| a.1.item_id.cmp(&b.1.item_id))
}
