//! CSV loader.
//!
//! Reads `<data_dir>/<table>.csv` for each of the five tables and replaces
//! the store contents with them. Every file is read and parsed before the
//! store is touched, so a missing or malformed file leaves the database as
//! it was.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::model::{Dataset, Product};
use crate::schema::{Table, LOAD_ORDER};
use crate::store::{Store, StoreError, TableCount};

/// Errors that can occur while loading CSV files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Missing CSV: {0}")]
    MissingCsv(PathBuf),

    #[error("Failed to parse {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Empty value in column '{column}' at {} line {line}", .path.display())]
    EmptyValue {
        path: PathBuf,
        line: u64,
        column: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Outcome of a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub data_dir: PathBuf,
    pub counts: Vec<TableCount>,
}

impl LoadSummary {
    pub fn total_rows(&self) -> u64 {
        self.counts.iter().map(|c| c.rows).sum()
    }
}

/// Normalize a raw `in_stock` cell.
///
/// Only `TRUE` (any case, surrounding whitespace ignored) is in stock.
/// `FALSE` and every other value, including `1`, are out of stock.
pub fn normalize_in_stock(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("TRUE")
}

/// `products.csv` row before `in_stock` normalization.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    product_id: String,
    product_name: String,
    category: String,
    price: f64,
    in_stock: String,
    added_at: String,
}

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        Product {
            in_stock: normalize_in_stock(&r.in_stock),
            product_id: r.product_id,
            product_name: r.product_name,
            category: r.category,
            price: r.price,
            added_at: r.added_at,
        }
    }
}

/// Path of the CSV file for `table` under `data_dir`.
pub fn csv_path(data_dir: &Path, table: Table) -> PathBuf {
    data_dir.join(format!("{}.csv", table.name()))
}

/// Columns where an empty cell is a value rather than a missing one.
/// A blank `in_stock` reads as out of stock.
const BLANK_ALLOWED: [&str; 1] = ["in_stock"];

/// Read every row of one table's CSV file.
///
/// Every column is NOT NULL in the store, so an empty cell is rejected
/// here with its line number instead of loading as an empty string.
pub fn read_table<T: DeserializeOwned>(data_dir: &Path, table: Table) -> LoadResult<Vec<T>> {
    let path = csv_path(data_dir, table);
    if !path.is_file() {
        return Err(LoadError::MissingCsv(path));
    }

    let csv_err = |source| LoadError::Csv {
        path: path.clone(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(&path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;

        if let Some((column, _)) = headers
            .iter()
            .zip(record.iter())
            .find(|(column, value)| value.is_empty() && !BLANK_ALLOWED.contains(column))
        {
            return Err(LoadError::EmptyValue {
                path: path.clone(),
                line: record.position().map_or(0, |p| p.line()),
                column: column.to_string(),
            });
        }

        rows.push(record.deserialize(Some(&headers)).map_err(csv_err)?);
    }

    log::debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read all five CSV files into a dataset.
pub fn read_dataset(data_dir: &Path) -> LoadResult<Dataset> {
    // Report every missing file up front rather than failing halfway.
    if let Some(missing) = LOAD_ORDER
        .iter()
        .map(|&t| csv_path(data_dir, t))
        .find(|p| !p.is_file())
    {
        return Err(LoadError::MissingCsv(missing));
    }

    let products: Vec<ProductRecord> = read_table(data_dir, Table::Products)?;

    Ok(Dataset {
        customers: read_table(data_dir, Table::Customers)?,
        products: products.into_iter().map(Product::from).collect(),
        orders: read_table(data_dir, Table::Orders)?,
        order_items: read_table(data_dir, Table::OrderItems)?,
        reviews: read_table(data_dir, Table::Reviews)?,
    })
}

/// Replace the store contents with the CSV files in `data_dir`.
pub fn load_into(store: &mut Store, data_dir: &Path) -> LoadResult<LoadSummary> {
    log::info!("loading CSV files from {}", data_dir.display());

    let data = read_dataset(data_dir)?;
    let counts = store.replace_dataset(&data)?;

    Ok(LoadSummary {
        data_dir: data_dir.to_path_buf(),
        counts,
    })
}
