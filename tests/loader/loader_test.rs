use std::fs;
use std::path::Path;

use ecom_report::loader::{self, LoadError};
use ecom_report::report::ReportOptions;
use ecom_report::schema::Table;
use ecom_report::store::{Store, StoreOptions};
use tempfile::TempDir;

const CUSTOMERS: &str = "\
customer_id,name,email,phone,created_at,city,state
1,Alice,alice@example.com,555-0100,2023-01-15,Springfield,IL
2,Bob,bob@example.com,555-0101,2023-02-20,Shelbyville,IL
";

const PRODUCTS: &str = "\
product_id,product_name,category,price,in_stock,added_at
P1,Widget,Tools,25.0,TRUE,2023-01-01
P2,Gadget,Electronics,40,false,2023-01-02
P3,Doohickey,Tools,5.5, True ,2023-01-03
P4,Gizmo,Toys,12.0,1,2023-01-04
";

const ORDERS: &str = "\
order_id,customer_id,order_date,total_amount,payment_method,order_status
O1,1,2024-01-02,50.0,credit_card,delivered
O2,2,2024-01-05,45.5,paypal,shipped
";

const ORDER_ITEMS: &str = "\
item_id,order_id,product_id,quantity,item_price
I1,O1,P1,2,25.0
I2,O2,P2,1,40.0
I3,O2,P3,1,5.5
";

const REVIEWS: &str = "\
review_id,customer_id,product_id,rating,comment,review_date
R1,1,P1,5,\"Great, sturdy widget\",2024-01-10
";

fn write_fixture(dir: &Path) {
    fs::write(dir.join("customers.csv"), CUSTOMERS).unwrap();
    fs::write(dir.join("products.csv"), PRODUCTS).unwrap();
    fs::write(dir.join("orders.csv"), ORDERS).unwrap();
    fs::write(dir.join("order_items.csv"), ORDER_ITEMS).unwrap();
    fs::write(dir.join("reviews.csv"), REVIEWS).unwrap();
}

fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    dir
}

#[test]
fn test_read_dataset() {
    let dir = fixture_dir();
    let data = loader::read_dataset(dir.path()).unwrap();

    assert_eq!(data.customers.len(), 2);
    assert_eq!(data.products.len(), 4);
    assert_eq!(data.orders.len(), 2);
    assert_eq!(data.order_items.len(), 3);
    assert_eq!(data.reviews.len(), 1);
    assert_eq!(data.reviews[0].comment, "Great, sturdy widget");
    assert_eq!(data.products[1].price, 40.0);
}

#[test]
fn test_in_stock_normalization() {
    let dir = fixture_dir();
    let data = loader::read_dataset(dir.path()).unwrap();

    let in_stock: Vec<(&str, bool)> = data
        .products
        .iter()
        .map(|p| (p.product_id.as_str(), p.in_stock))
        .collect();
    assert_eq!(
        in_stock,
        vec![("P1", true), ("P2", false), ("P3", true), ("P4", false)]
    );
}

#[test]
fn test_load_into_store() {
    let dir = fixture_dir();
    let mut store = Store::open_in_memory(&StoreOptions::default()).unwrap();

    let summary = loader::load_into(&mut store, dir.path()).unwrap();
    assert_eq!(summary.total_rows(), 12);

    let counts: Vec<(Table, u64)> = summary.counts.iter().map(|c| (c.table, c.rows)).collect();
    assert_eq!(
        counts,
        vec![
            (Table::Customers, 2),
            (Table::Products, 4),
            (Table::Orders, 2),
            (Table::OrderItems, 3),
            (Table::Reviews, 1),
        ]
    );
    assert_eq!(store.row_counts().unwrap(), summary.counts);

    let rows = store.order_overview(&ReportOptions::default()).unwrap();
    let lines: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.order_id.as_str(), r.product_name.as_str()))
        .collect();
    assert_eq!(
        lines,
        vec![("O2", "Gadget"), ("O2", "Doohickey"), ("O1", "Widget")]
    );
}

#[test]
fn test_reload_replaces_data() {
    let dir = fixture_dir();
    let db = dir.path().join("ecom.db");

    let mut store = Store::open(&db, &StoreOptions::default()).unwrap();
    loader::load_into(&mut store, dir.path()).unwrap();
    loader::load_into(&mut store, dir.path()).unwrap();

    assert_eq!(store.row_count(Table::Customers).unwrap(), 2);
    assert_eq!(store.row_count(Table::OrderItems).unwrap(), 3);
}

#[test]
fn test_missing_csv_leaves_store_untouched() {
    let dir = fixture_dir();
    let mut store = Store::open_in_memory(&StoreOptions::default()).unwrap();
    loader::load_into(&mut store, dir.path()).unwrap();

    fs::remove_file(dir.path().join("reviews.csv")).unwrap();

    let err = loader::load_into(&mut store, dir.path()).unwrap_err();
    match &err {
        LoadError::MissingCsv(path) => assert!(path.ends_with("reviews.csv")),
        other => panic!("unexpected error: {}", other),
    }
    assert!(err.to_string().starts_with("Missing CSV:"));

    assert_eq!(store.row_count(Table::Customers).unwrap(), 2);
}

#[test]
fn test_malformed_csv() {
    let dir = fixture_dir();
    fs::write(
        dir.path().join("orders.csv"),
        "order_id,customer_id,order_date,total_amount,payment_method,order_status\n\
         O1,not-a-number,2024-01-02,50.0,credit_card,delivered\n",
    )
    .unwrap();

    let err = loader::read_dataset(dir.path()).unwrap_err();
    match err {
        LoadError::Csv { path, .. } => assert!(path.ends_with("orders.csv")),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_dangling_foreign_key_keeps_previous_load() {
    let dir = fixture_dir();
    let mut store = Store::open_in_memory(&StoreOptions::default()).unwrap();
    loader::load_into(&mut store, dir.path()).unwrap();

    fs::write(
        dir.path().join("order_items.csv"),
        "item_id,order_id,product_id,quantity,item_price\nI1,O1,P404,1,1.0\n",
    )
    .unwrap();

    let err = loader::load_into(&mut store, dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::Store(_)));

    assert_eq!(store.row_count(Table::OrderItems).unwrap(), 3);
    assert_eq!(
        store.order_overview(&ReportOptions::default()).unwrap().len(),
        3
    );
}

#[test]
fn test_empty_text_cell_is_rejected() {
    let dir = fixture_dir();
    fs::write(
        dir.path().join("reviews.csv"),
        "review_id,customer_id,product_id,rating,comment,review_date\n\
         R1,1,P1,5,Solid,2024-01-10\n\
         R2,2,P2,3,,2024-01-11\n",
    )
    .unwrap();

    let err = loader::read_dataset(dir.path()).unwrap_err();
    match err {
        LoadError::EmptyValue { path, line, column } => {
            assert!(path.ends_with("reviews.csv"));
            assert_eq!(line, 3);
            assert_eq!(column, "comment");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_empty_in_stock_reads_as_out_of_stock() {
    let dir = fixture_dir();
    fs::write(
        dir.path().join("products.csv"),
        "product_id,product_name,category,price,in_stock,added_at\n\
         P1,Widget,Tools,25.0,,2023-01-01\n",
    )
    .unwrap();

    let data = loader::read_dataset(dir.path()).unwrap();
    assert_eq!(data.products.len(), 1);
    assert!(!data.products[0].in_stock);
}
