//! Back office configuration.
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `backoffice.toml`, then `DEPOT_*` environment variables.
//!
//! ```toml
//! export_dir = "exports"
//! log_filter = "info,depot_store=debug"
//! customers_file = "clientes.csv"
//!
//! [[discounts]]
//! product = "gas 15kg"
//! channel = "local"
//! amounts = [5500, 6000]
//! ```

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use depot_core::{Channel, DiscountCatalog};
use serde::Deserialize;

const DEFAULT_CONFIG_NAME: &str = "backoffice";

/// One row of a configured discount table.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountRow {
    pub product: String,
    pub channel: String,
    pub amounts: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackofficeConfig {
    /// Directory for CSV exports
    pub export_dir: PathBuf,

    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Customer sheet loaded at startup
    pub customers_file: Option<PathBuf>,

    /// Replaces the built-in discount table when present
    pub discounts: Option<Vec<DiscountRow>>,
}

impl BackofficeConfig {
    /// Loads configuration.
    ///
    /// An explicit `path` must exist; the default `backoffice.toml` is
    /// optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config = Config::builder()
            .set_default("export_dir", "exports")?
            .set_default("log_filter", "info")?
            .add_source(file)
            .add_source(Environment::with_prefix("DEPOT"))
            .build()?;

        let loaded: BackofficeConfig = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.export_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("export_dir".to_string()));
        }

        for row in self.discounts.iter().flatten() {
            if row.product.trim().is_empty() {
                return Err(ConfigError::InvalidValue("discounts.product".to_string()));
            }
            if Channel::parse(&row.channel).is_none() {
                return Err(ConfigError::InvalidValue(format!(
                    "discounts.channel '{}'",
                    row.channel
                )));
            }
            if row.amounts.iter().any(|amount| *amount < 0) {
                return Err(ConfigError::InvalidValue(format!(
                    "discounts.amounts for '{}'",
                    row.product
                )));
            }
        }
        Ok(())
    }

    /// The discount catalog for this run.
    pub fn discount_catalog(&self) -> DiscountCatalog {
        match &self.discounts {
            Some(rows) => DiscountCatalog::from_entries(rows.iter().filter_map(|row| {
                Channel::parse(&row.channel)
                    .map(|channel| (row.product.as_str(), channel, row.amounts.clone()))
            })),
            None => DiscountCatalog::standard(),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
