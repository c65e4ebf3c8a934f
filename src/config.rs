//! # Café Configuration
//!
//! Read once at startup from an optional `cafe.toml` in the working
//! directory. Every key is optional; anything left out keeps its default.
//!
//! ```toml
//! tables = 6
//! history_path = "customer_data.csv"
//!
//! [[menu]]
//! kind = "coffee"
//! price = 20.0
//! prep_minutes = 5
//! ```
//!
//! A `menu` table, when present, replaces the whole standard menu.

use crate::menu::{standard_items, MenuCatalog};
use crate::model::MenuItem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "cafe.toml";
pub const DEFAULT_HISTORY_FILE: &str = "customer_data.csv";
pub const DEFAULT_TABLES: u32 = 6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CafeConfig {
    /// Tables are numbered `1..=tables`.
    pub tables: u32,
    pub history_path: PathBuf,
    pub menu: Vec<MenuItem>,
}

impl Default for CafeConfig {
    fn default() -> Self {
        Self {
            tables: DEFAULT_TABLES,
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
            menu: standard_items(),
        }
    }
}

impl CafeConfig {
    /// Reads and validates `path`. A missing file yields the defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(text) => {
                let config = Self::from_toml_str(&text)?;
                info!(path = %path.display(), tables = config.tables, "Configuration loaded");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No configuration file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tables == 0 {
            return Err(ConfigError::Invalid("at least one table is required".into()));
        }
        self.catalog().map(|_| ())
    }

    /// The validated menu.
    pub fn catalog(&self) -> Result<MenuCatalog, ConfigError> {
        MenuCatalog::new(self.menu.clone())
    }
}
