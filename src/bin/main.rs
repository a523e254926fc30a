//! ecom-report CLI - load e-commerce CSVs and run the order-overview report
//!
//! Usage:
//!   ecom-report [--config <file>] load [--data-dir <dir>] [--db <path>]
//!   ecom-report [--config <file>] report [--db <path>] [--limit N] [--offset N] [--format table|json|csv]
//!   ecom-report [--config <file>] sql [--dialect <dialect>] [--limit N] [--offset N] [--validate]
//!   ecom-report [--config <file>] schema [--dialect <dialect>]
//!   ecom-report [--config <file>] counts [--db <path>]
//!
//! Examples:
//!   ecom-report load --data-dir data
//!   ecom-report report --limit 20 --format json
//!   ecom-report sql --dialect tsql --limit 10 --validate

use clap::{Parser, Subcommand, ValueEnum};
use ecom_report::config::{Settings, SettingsError};
use ecom_report::loader;
use ecom_report::model::OrderOverviewRow;
use ecom_report::report::{OrderOverview, ReportOptions, COLUMNS};
use ecom_report::schema;
use ecom_report::sql::{validate_sql, Dialect};
use ecom_report::store::{Store, StoreError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ecom-report")]
#[command(about = "Load e-commerce CSV data into SQLite and run the order overview report")]
#[command(version)]
struct Cli {
    /// Path to a config file (defaults to ECOM_REPORT_CONFIG, ./ecom-report.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recreate the database from the CSV files
    Load {
        /// Directory holding customers.csv, products.csv, orders.csv, order_items.csv, reviews.csv
        #[arg(short = 'd', long)]
        data_dir: Option<PathBuf>,

        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Run the order overview report
    Report {
        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,

        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<u64>,

        /// Rows to skip
        #[arg(short, long)]
        offset: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the report SQL for a dialect
    Sql {
        /// SQL dialect to generate
        #[arg(short, long)]
        dialect: Option<DialectArg>,

        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<u64>,

        /// Rows to skip
        #[arg(short, long)]
        offset: Option<u64>,

        /// Parse the generated SQL back to check it
        #[arg(long)]
        validate: bool,
    },

    /// Print the schema DDL for a dialect
    Schema {
        /// SQL dialect to generate
        #[arg(short, long)]
        dialect: Option<DialectArg>,
    },

    /// Print row counts per table
    Counts {
        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Sqlite,
    Duckdb,
    Postgres,
    Mysql,
    Tsql,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Sqlite => Dialect::Sqlite,
            DialectArg::Duckdb => Dialect::DuckDb,
            DialectArg::Postgres => Dialect::Postgres,
            DialectArg::Mysql => Dialect::MySql,
            DialectArg::Tsql => Dialect::TSql,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Aligned text table
    Table,
    /// Pretty-printed JSON array
    Json,
    /// CSV with a header row
    Csv,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Load { data_dir, db } => cmd_load(&settings, data_dir, db),
        Commands::Report {
            db,
            limit,
            offset,
            format,
        } => cmd_report(&settings, db, limit, offset, format),
        Commands::Sql {
            dialect,
            limit,
            offset,
            validate,
        } => cmd_sql(&settings, dialect, limit, offset, validate),
        Commands::Schema { dialect } => cmd_schema(&settings, dialect),
        Commands::Counts { db } => cmd_counts(&settings, db),
    }
}

fn load_settings(config: Option<&Path>) -> Result<Settings, SettingsError> {
    match config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

fn resolve_dialect(settings: &Settings, arg: Option<DialectArg>) -> Result<Dialect, SettingsError> {
    match arg {
        Some(d) => Ok(d.into()),
        None => settings.report.dialect(),
    }
}

fn db_path(settings: &Settings, db: Option<PathBuf>) -> Result<PathBuf, String> {
    match db {
        Some(p) => Ok(p),
        None => settings
            .database
            .resolved_path()
            .map_err(|e| format!("Configuration error: {}", e)),
    }
}

/// Open or create the database for `load`.
fn open_store(settings: &Settings, db: Option<PathBuf>) -> Result<Store, String> {
    let path = db_path(settings, db)?;
    Store::open(&path, &settings.database.store_options())
        .map_err(|e| format!("Error opening database '{}': {}", path.display(), e))
}

/// Open a database that `load` already created. Read-only.
fn open_existing_store(settings: &Settings, db: Option<PathBuf>) -> Result<Store, String> {
    let path = db_path(settings, db)?;
    match Store::open_read_only(&path, &settings.database.store_options()) {
        Ok(store) => Ok(store),
        Err(e @ StoreError::NotFound(_)) => {
            Err(format!("{} (run `ecom-report load` first)", e))
        }
        Err(e) => Err(format!("Error opening database '{}': {}", path.display(), e)),
    }
}

fn cmd_load(settings: &Settings, data_dir: Option<PathBuf>, db: Option<PathBuf>) -> ExitCode {
    let data_dir = match data_dir {
        Some(d) => d,
        None => match settings.data.resolved_dir() {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let mut store = match open_store(settings, db) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::FAILURE;
        }
    };

    match loader::load_into(&mut store, &data_dir) {
        Ok(summary) => {
            println!("Row counts:");
            for count in &summary.counts {
                println!("- {}: {}", count.table, count.rows);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Load error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_report(
    settings: &Settings,
    db: Option<PathBuf>,
    limit: Option<u64>,
    offset: Option<u64>,
    format: OutputFormat,
) -> ExitCode {
    let store = match open_existing_store(settings, db) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::FAILURE;
        }
    };

    let options = ReportOptions {
        limit: limit.or(settings.report.limit),
        offset,
    };

    let rows = match store.order_overview(&options) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Report error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let rendered = match format {
        OutputFormat::Table => Ok(render_table(&rows)),
        OutputFormat::Json => serde_json::to_string_pretty(&rows).map_err(|e| e.to_string()),
        OutputFormat::Csv => render_csv(&rows),
    };

    match rendered {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Output error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_sql(
    settings: &Settings,
    dialect: Option<DialectArg>,
    limit: Option<u64>,
    offset: Option<u64>,
    validate: bool,
) -> ExitCode {
    let dialect = match resolve_dialect(settings, dialect) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = ReportOptions {
        limit: limit.or(settings.report.limit),
        offset,
    };
    let sql = OrderOverview::to_sql_with(dialect, &options);

    if validate {
        if let Err(e) = validate_sql(&sql, dialect) {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
        log::info!("report SQL parsed as {}", dialect);
    }

    println!("{}", sql);
    ExitCode::SUCCESS
}

fn cmd_schema(settings: &Settings, dialect: Option<DialectArg>) -> ExitCode {
    match resolve_dialect(settings, dialect) {
        Ok(dialect) => {
            print!("{}", schema::schema_script(dialect));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_counts(settings: &Settings, db: Option<PathBuf>) -> ExitCode {
    let store = match open_existing_store(settings, db) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::FAILURE;
        }
    };

    match store.row_counts() {
        Ok(counts) => {
            println!("Row counts:");
            for count in &counts {
                println!("- {}: {}", count.table, count.rows);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error counting rows: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn row_cells(row: &OrderOverviewRow) -> [String; 9] {
    [
        row.order_id.clone(),
        row.customer_name.clone(),
        row.product_name.clone(),
        row.quantity.to_string(),
        format!("{:.2}", row.item_price),
        format!("{:.2}", row.total_amount),
        row.order_date.clone(),
        row.city.clone(),
        row.category.clone(),
    ]
}

fn render_table(rows: &[OrderOverviewRow]) -> String {
    let cells: Vec<[String; 9]> = rows.iter().map(row_cells).collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let format_line = |values: Vec<&str>| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(COLUMNS.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &cells {
        lines.push(format_line(row.iter().map(String::as_str).collect()));
    }
    lines.push(format!("({} rows)", rows.len()));
    lines.join("\n")
}

fn render_csv(rows: &[OrderOverviewRow]) -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).map_err(|e| e.to_string())?;
    }
    // serialize() only writes the header alongside the first row
    if rows.is_empty() {
        writer.write_record(COLUMNS).map_err(|e| e.to_string())?;
    }
    let bytes = writer.into_inner().map_err(|e| e.to_string())?;
    let out = String::from_utf8(bytes).map_err(|e| e.to_string())?;
    Ok(out.trim_end().to_string())
}
