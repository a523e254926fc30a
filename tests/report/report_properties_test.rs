use std::collections::{HashMap, HashSet};

use ecom_report::model::{Customer, Dataset, Order, OrderItem, Product};
use ecom_report::report::{OrderOverview, ReportOptions};
use ecom_report::store::{Store, StoreOptions};
use proptest::prelude::*;

const DATES: [&str; 4] = ["2023-11-30", "2024-01-02", "2024-01-02T08:30:00", "2024-02-29"];

/// Datasets with unique keys whose foreign keys sometimes dangle.
fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    let customers = prop::collection::vec(("[A-Z][a-z]{1,6}", "[A-Z][a-z]{2,8}"), 0..5);
    let products = prop::collection::vec(("[a-z]{3,8}", "[a-z]{3,6}"), 0..5);
    // customer ids 1..=5 may or may not exist
    let orders = prop::collection::vec((1i64..7, 0usize..DATES.len(), 0u32..100_000), 0..8);
    // order and product indexes past the end dangle
    let items = prop::collection::vec((0usize..10, 0usize..7, 1i64..5, 0u32..10_000), 0..20);

    (customers, products, orders, items).prop_map(|(customers, products, orders, items)| {
        Dataset {
            customers: customers
                .into_iter()
                .enumerate()
                .map(|(i, (name, city))| Customer {
                    customer_id: i as i64 + 1,
                    email: format!("{}@example.com", name.to_lowercase()),
                    name,
                    phone: "555-0100".to_string(),
                    created_at: "2023-01-01".to_string(),
                    city,
                    state: "CA".to_string(),
                })
                .collect(),
            products: products
                .into_iter()
                .enumerate()
                .map(|(i, (name, category))| Product {
                    product_id: format!("P{}", i),
                    product_name: name,
                    category,
                    price: 1.0,
                    in_stock: i % 2 == 0,
                    added_at: "2023-01-01".to_string(),
                })
                .collect(),
            orders: orders
                .into_iter()
                .enumerate()
                .map(|(i, (customer_id, date, cents))| Order {
                    order_id: format!("O{}", i),
                    customer_id,
                    order_date: DATES[date].to_string(),
                    total_amount: f64::from(cents) / 100.0,
                    payment_method: "paypal".to_string(),
                    order_status: "shipped".to_string(),
                })
                .collect(),
            order_items: items
                .into_iter()
                .enumerate()
                .map(|(i, (order, product, quantity, cents))| OrderItem {
                    item_id: format!("I{}", i),
                    order_id: format!("O{}", order),
                    product_id: format!("P{}", product),
                    quantity,
                    item_price: f64::from(cents) / 100.0,
                })
                .collect(),
            reviews: vec![],
        }
    })
}

fn unenforced_store(data: &Dataset) -> Store {
    let mut store = Store::open_in_memory(&StoreOptions {
        foreign_keys: false,
    })
    .unwrap();
    store.replace_dataset(data).unwrap();
    store
}

/// Items whose order, the order's customer, and product all exist.
fn joinable_items(data: &Dataset) -> usize {
    let customers: HashSet<i64> = data.customers.iter().map(|c| c.customer_id).collect();
    let products: HashSet<&str> = data.products.iter().map(|p| p.product_id.as_str()).collect();
    let orders: HashMap<&str, i64> = data
        .orders
        .iter()
        .map(|o| (o.order_id.as_str(), o.customer_id))
        .collect();

    data.order_items
        .iter()
        .filter(|i| {
            orders
                .get(i.order_id.as_str())
                .is_some_and(|c| customers.contains(c))
                && products.contains(i.product_id.as_str())
        })
        .count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sqlite_matches_in_memory_evaluation(data in dataset_strategy()) {
        let store = unenforced_store(&data);
        let from_sql = store.order_overview(&ReportOptions::default()).unwrap();
        prop_assert_eq!(from_sql, OrderOverview::evaluate(&data));
    }

    #[test]
    fn row_count_is_inner_join_cardinality(data in dataset_strategy()) {
        let rows = OrderOverview::evaluate(&data);
        prop_assert_eq!(rows.len(), joinable_items(&data));
    }

    #[test]
    fn rows_are_non_increasing_by_date(data in dataset_strategy()) {
        let rows = OrderOverview::evaluate(&data);
        for pair in rows.windows(2) {
            prop_assert!(pair[0].order_date >= pair[1].order_date);
        }
    }

    #[test]
    fn rows_carry_their_order_customer_and_product(data in dataset_strategy()) {
        let orders: HashMap<&str, &Order> =
            data.orders.iter().map(|o| (o.order_id.as_str(), o)).collect();
        let customers: HashMap<i64, &Customer> =
            data.customers.iter().map(|c| (c.customer_id, c)).collect();

        for row in OrderOverview::evaluate(&data) {
            let order = orders[row.order_id.as_str()];
            let customer = customers[&order.customer_id];
            prop_assert_eq!(&row.order_date, &order.order_date);
            prop_assert_eq!(row.total_amount, order.total_amount);
            prop_assert_eq!(&row.customer_name, &customer.name);
            prop_assert_eq!(&row.city, &customer.city);
            prop_assert!(data
                .products
                .iter()
                .any(|p| p.product_name == row.product_name && p.category == row.category));
        }
    }

    #[test]
    fn pages_concatenate_to_full_report(data in dataset_strategy(), page in 1u64..5) {
        let full = OrderOverview::evaluate(&data);
        let mut paged = Vec::new();
        let mut offset = 0;
        loop {
            let options = ReportOptions::default().limit(page).offset(offset);
            let chunk = OrderOverview::evaluate_with(&data, &options);
            if chunk.is_empty() {
                break;
            }
            offset += chunk.len() as u64;
            paged.extend(chunk);
        }
        prop_assert_eq!(paged, full);
    }
}
