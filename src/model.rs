//! Row types for the five source tables and the order-overview report.
//!
//! Field names match the column names, so rows serialize under the same
//! keys the tables and CSV headers use.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub price: f64,
    pub in_stock: bool,
    pub added_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer_id: i64,
    /// ISO-8601 text; sorts chronologically as a string.
    pub order_date: String,
    pub total_amount: f64,
    pub payment_method: String,
    pub order_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub item_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: String,
    pub customer_id: i64,
    pub product_id: String,
    pub rating: i64,
    pub comment: String,
    pub review_date: String,
}

/// The contents of all five tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub reviews: Vec<Review>,
}

/// One line of the order-overview report: an order item flattened with its
/// order, customer and product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderOverviewRow {
    pub order_id: String,
    pub customer_name: String,
    pub product_name: String,
    pub quantity: i64,
    pub item_price: f64,
    pub total_amount: f64,
    pub order_date: String,
    pub city: String,
    pub category: String,
}
