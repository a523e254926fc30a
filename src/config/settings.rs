//! TOML-based configuration for ecom-report.
//!
//! Supports a config file (ecom-report.toml) with environment variable
//! expansion in paths.
//!
//! Example configuration:
//! ```toml
//! [database]
//! path = "${ECOM_HOME}/ecom.db"
//! foreign_keys = true
//!
//! [data]
//! dir = "data"
//!
//! [report]
//! dialect = "sqlite"
//! limit = 50
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::ReportOptions;
use crate::sql::Dialect;
use crate::store::StoreOptions;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ECOM_REPORT_CONFIG";

/// Problems reading or interpreting `ecom-report.toml`.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("No config file at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable '{0}' is not set")]
    UnsetVariable(String),

    #[error(transparent)]
    Dialect(#[from] crate::sql::UnknownDialect),
}

/// Contents of `ecom-report.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub data: DataSettings,
    pub report: ReportSettings,
}

/// SQLite database settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Database file (supports ${ENV_VAR} expansion).
    pub path: String,

    /// Enforce foreign keys on every connection.
    pub foreign_keys: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "ecom.db".to_string(),
            foreign_keys: true,
        }
    }
}

impl DatabaseSettings {
    /// Database path with environment variables expanded.
    pub fn resolved_path(&self) -> Result<PathBuf, SettingsError> {
        expand_env_vars(&self.path).map(PathBuf::from)
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            foreign_keys: self.foreign_keys,
        }
    }
}

/// CSV input settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory holding `<table>.csv` files.
    pub dir: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
        }
    }
}

impl DataSettings {
    pub fn resolved_dir(&self) -> Result<PathBuf, SettingsError> {
        expand_env_vars(&self.dir).map(PathBuf::from)
    }
}

/// Report defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Dialect used by the `sql` and `schema` commands.
    pub dialect: String,

    /// Default row limit.
    pub limit: Option<u64>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            dialect: Dialect::default().to_string(),
            limit: None,
        }
    }
}

impl ReportSettings {
    /// Get the dialect type.
    pub fn dialect(&self) -> Result<Dialect, SettingsError> {
        Ok(self.dialect.parse::<Dialect>()?)
    }

    /// Report options from the configured defaults.
    pub fn options(&self) -> ReportOptions {
        ReportOptions {
            limit: self.limit,
            offset: None,
        }
    }
}

impl Settings {
    /// Read settings from one TOML file. Missing sections take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }

        let settings: Settings = toml::from_str(&fs::read_to_string(path)?)?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Settings from the first config file found, else defaults.
    ///
    /// `ECOM_REPORT_CONFIG` wins and must point at a file. Otherwise
    /// `./ecom-report.toml` is tried, then `<config_dir>/ecom-report/config.toml`.
    pub fn load() -> Result<Self, SettingsError> {
        if let Some(explicit) = env::var_os(CONFIG_ENV_VAR) {
            return Self::from_file(PathBuf::from(explicit));
        }

        let user_config = dirs::config_dir().map(|dir| dir.join("ecom-report").join("config.toml"));
        match std::iter::once(PathBuf::from("ecom-report.toml"))
            .chain(user_config)
            .find(|candidate| candidate.is_file())
        {
            Some(found) => Self::from_file(found),
            None => {
                log::debug!("no config file found, using defaults");
                Ok(Settings::default())
            }
        }
    }
}

/// Substitute `${NAME}` and `$NAME` with the environment variable's value.
///
/// A bare name runs while characters are alphanumeric or `_`. A `$` that
/// starts no name is kept.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        let (name, tail) = match after.strip_prefix('{') {
            // an unterminated brace takes the rest of the string
            Some(braced) => match braced.find('}') {
                Some(end) => (&braced[..end], &braced[end + 1..]),
                None => (braced, ""),
            },
            None => {
                let end = after
                    .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                    .unwrap_or(after.len());
                if end == 0 {
                    out.push('$');
                    rest = after;
                    continue;
                }
                after.split_at(end)
            }
        };

        let value = env::var(name).map_err(|_| SettingsError::UnsetVariable(name.to_string()))?;
        out.push_str(&value);
        rest = tail;
    }

    out.push_str(rest);
    Ok(out)
}
