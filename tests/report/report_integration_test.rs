use ecom_report::model::{Customer, Dataset, Order, OrderItem, OrderOverviewRow, Product};
use ecom_report::report::{OrderOverview, ReportOptions};
use ecom_report::store::{Store, StoreError, StoreOptions};

fn customer(id: i64, name: &str, city: &str) -> Customer {
    Customer {
        customer_id: id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "555-0100".to_string(),
        created_at: "2023-01-15".to_string(),
        city: city.to_string(),
        state: "OR".to_string(),
    }
}

fn product(id: &str, name: &str, category: &str, price: f64) -> Product {
    Product {
        product_id: id.to_string(),
        product_name: name.to_string(),
        category: category.to_string(),
        price,
        in_stock: true,
        added_at: "2023-01-01".to_string(),
    }
}

fn order(id: &str, customer_id: i64, total: f64, date: &str) -> Order {
    Order {
        order_id: id.to_string(),
        customer_id,
        order_date: date.to_string(),
        total_amount: total,
        payment_method: "credit_card".to_string(),
        order_status: "delivered".to_string(),
    }
}

fn item(id: &str, order_id: &str, product_id: &str, quantity: i64, price: f64) -> OrderItem {
    OrderItem {
        item_id: id.to_string(),
        order_id: order_id.to_string(),
        product_id: product_id.to_string(),
        quantity,
        item_price: price,
    }
}

fn store_with(data: &Dataset, options: StoreOptions) -> Store {
    let mut store = Store::open_in_memory(&options).unwrap();
    store.replace_dataset(data).unwrap();
    store
}

fn run(store: &Store) -> Vec<OrderOverviewRow> {
    store.order_overview(&ReportOptions::default()).unwrap()
}

#[test]
fn test_single_order_scenario() {
    let data = Dataset {
        customers: vec![customer(1, "Alice", "Springfield")],
        products: vec![product("P1", "Widget", "Tools", 25.0)],
        orders: vec![order("O1", 1, 50.0, "2024-01-02")],
        order_items: vec![item("I1", "O1", "P1", 2, 25.0)],
        reviews: vec![],
    };

    let rows = run(&store_with(&data, StoreOptions::default()));

    assert_eq!(
        rows,
        vec![OrderOverviewRow {
            order_id: "O1".to_string(),
            customer_name: "Alice".to_string(),
            product_name: "Widget".to_string(),
            quantity: 2,
            item_price: 25.0,
            total_amount: 50.0,
            order_date: "2024-01-02".to_string(),
            city: "Springfield".to_string(),
            category: "Tools".to_string(),
        }]
    );
}

#[test]
fn test_order_with_two_items_yields_two_rows() {
    let data = Dataset {
        customers: vec![customer(1, "Alice", "Springfield")],
        products: vec![
            product("P1", "Widget", "Tools", 25.0),
            product("P2", "Gadget", "Electronics", 40.0),
        ],
        orders: vec![order("O1", 1, 90.0, "2024-01-02")],
        order_items: vec![
            item("I1", "O1", "P1", 2, 25.0),
            item("I2", "O1", "P2", 1, 40.0),
        ],
        reviews: vec![],
    };

    let rows = run(&store_with(&data, StoreOptions::default()));
    assert_eq!(rows.len(), 2);

    for row in &rows {
        assert_eq!(row.order_id, "O1");
        assert_eq!(row.customer_name, "Alice");
        assert_eq!(row.total_amount, 90.0);
        assert_eq!(row.order_date, "2024-01-02");
        assert_eq!(row.city, "Springfield");
    }

    assert_eq!(rows[0].product_name, "Widget");
    assert_eq!(rows[0].quantity, 2);
    assert_eq!(rows[1].product_name, "Gadget");
    assert_eq!(rows[1].item_price, 40.0);
}

#[test]
fn test_orders_without_items_or_customer_are_excluded() {
    let data = Dataset {
        customers: vec![customer(1, "Alice", "Springfield")],
        products: vec![product("P1", "Widget", "Tools", 25.0)],
        orders: vec![
            order("O1", 1, 50.0, "2024-01-02"),
            order("O2", 1, 0.0, "2024-01-05"),
            order("O3", 42, 25.0, "2024-01-06"),
        ],
        order_items: vec![
            item("I1", "O1", "P1", 2, 25.0),
            item("I2", "O3", "P1", 1, 25.0),
        ],
        reviews: vec![],
    };

    // O3 points at a customer that does not exist, which only an
    // unenforced store accepts.
    let store = store_with(
        &data,
        StoreOptions {
            foreign_keys: false,
        },
    );
    let rows = run(&store);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].order_id, "O1");
    assert_eq!(rows, OrderOverview::evaluate(&data));
}

#[test]
fn test_item_without_product_is_excluded() {
    let data = Dataset {
        customers: vec![customer(1, "Alice", "Springfield")],
        products: vec![product("P1", "Widget", "Tools", 25.0)],
        orders: vec![order("O1", 1, 75.0, "2024-01-02")],
        order_items: vec![
            item("I1", "O1", "P1", 2, 25.0),
            item("I2", "O1", "P-GONE", 1, 25.0),
        ],
        reviews: vec![],
    };

    let store = store_with(
        &data,
        StoreOptions {
            foreign_keys: false,
        },
    );
    let rows = run(&store);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].product_name, "Widget");
}

#[test]
fn test_enforced_store_rejects_dangling_order() {
    let data = Dataset {
        customers: vec![customer(1, "Alice", "Springfield")],
        products: vec![],
        orders: vec![order("O1", 2, 50.0, "2024-01-02")],
        order_items: vec![],
        reviews: vec![],
    };

    let mut store = Store::open_in_memory(&StoreOptions::default()).unwrap();
    let err = store.replace_dataset(&data).unwrap_err();
    assert!(matches!(err, StoreError::Sqlite(_)));
}

#[test]
fn test_sorted_by_date_descending_with_id_tie_break() {
    let data = Dataset {
        customers: vec![
            customer(1, "Alice", "Springfield"),
            customer(2, "Bob", "Shelbyville"),
        ],
        products: vec![product("P1", "Widget", "Tools", 10.0)],
        orders: vec![
            order("O-B", 2, 10.0, "2024-03-01"),
            order("O-A", 1, 10.0, "2024-03-01"),
            order("O-C", 1, 10.0, "2023-12-31"),
            order("O-D", 2, 10.0, "2024-03-02"),
        ],
        order_items: vec![
            item("I1", "O-A", "P1", 1, 10.0),
            item("I2", "O-B", "P1", 1, 10.0),
            item("I3", "O-C", "P1", 1, 10.0),
            item("I4", "O-D", "P1", 1, 10.0),
        ],
        reviews: vec![],
    };

    let rows = run(&store_with(&data, StoreOptions::default()));
    let ids: Vec<&str> = rows.iter().map(|r| r.order_id.as_str()).collect();
    assert_eq!(ids, vec!["O-D", "O-A", "O-B", "O-C"]);

    for pair in rows.windows(2) {
        assert!(pair[0].order_date >= pair[1].order_date);
    }
}

#[test]
fn test_pagination_matches_in_memory() {
    let data = Dataset {
        customers: vec![customer(1, "Alice", "Springfield")],
        products: vec![product("P1", "Widget", "Tools", 10.0)],
        orders: (1..=6)
            .map(|i| order(&format!("O{}", i), 1, 10.0, &format!("2024-02-0{}", i)))
            .collect(),
        order_items: (1..=6)
            .map(|i| item(&format!("I{}", i), &format!("O{}", i), "P1", 1, 10.0))
            .collect(),
        reviews: vec![],
    };
    let store = store_with(&data, StoreOptions::default());

    for options in [
        ReportOptions::default().limit(2),
        ReportOptions::default().limit(2).offset(2),
        ReportOptions::default().offset(5),
        ReportOptions::default().offset(10),
    ] {
        assert_eq!(
            store.order_overview(&options).unwrap(),
            OrderOverview::evaluate_with(&data, &options),
            "options: {:?}",
            options
        );
    }

    let page = store
        .order_overview(&ReportOptions::default().limit(2).offset(2))
        .unwrap();
    let ids: Vec<&str> = page.iter().map(|r| r.order_id.as_str()).collect();
    assert_eq!(ids, vec!["O4", "O3"]);
}

#[test]
fn test_report_on_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("ecom.db");

    let data = Dataset {
        customers: vec![customer(1, "Alice", "Springfield")],
        products: vec![product("P1", "Widget", "Tools", 25.0)],
        orders: vec![order("O1", 1, 50.0, "2024-01-02")],
        order_items: vec![item("I1", "O1", "P1", 2, 25.0)],
        reviews: vec![],
    };

    {
        let mut store = Store::open(&path, &StoreOptions::default()).unwrap();
        store.replace_dataset(&data).unwrap();
    }

    let reopened = Store::open_read_only(&path, &StoreOptions::default()).unwrap();
    assert_eq!(run(&reopened).len(), 1);
}

#[test]
fn test_report_on_missing_database_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("typo").join("nope.db");

    let err = Store::open_read_only(&path, &StoreOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, StoreError::NotFound(ref p) if *p == path));
    assert!(!path.exists());
    assert!(!dir.path().join("typo").exists());
}

#[test]
fn test_empty_store_returns_no_rows() {
    let store = Store::open_in_memory(&StoreOptions::default()).unwrap();
    store.ensure_schema().unwrap();
    assert!(run(&store).is_empty());
}
