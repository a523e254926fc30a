//! Configuration module for ecom-report.
//!
//! Handles the TOML settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, DataSettings, DatabaseSettings, ReportSettings, Settings, SettingsError,
    CONFIG_ENV_VAR,
};
