//! product-viewer configuration file
//!
//! Parses `~/.product-viewer/config.yaml`. Every section and field is
//! optional; anything missing falls back to the built-in defaults.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ADDRESS_LINE, DEFAULT_CATEGORIES,
    DEFAULT_COMPANY_NAME, DEFAULT_CURRENCY_SYMBOL, DEFAULT_REPORT_CURRENCY_MARKER,
    DEFAULT_REPORT_FILE_NAME,
};
use crate::filter::CategoryFilter;
use catalog_rs::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),
    #[error("Could not determine home directory")]
    NoHomeDirectory,
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Catalog service endpoint
    pub api: ClientConfig,
    /// PDF report settings
    pub report: ReportConfig,
    /// Terminal display settings
    pub display: DisplayConfig,
}

/// Settings for the generated PDF report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Company name in the page header
    pub company_name: String,
    /// Address/contact line under the company name
    pub address_line: String,
    /// Output file name
    pub file_name: String,
    /// Prefix of the Rate column
    pub currency_marker: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            address_line: DEFAULT_ADDRESS_LINE.to_string(),
            file_name: DEFAULT_REPORT_FILE_NAME.to_string(),
            currency_marker: DEFAULT_REPORT_CURRENCY_MARKER.to_string(),
        }
    }
}

/// Settings for the terminal table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Currency symbol shown before rates
    pub currency_symbol: String,
    /// Category filter options
    pub categories: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl DisplayConfig {
    /// Category options with "All" always first and no duplicates
    pub fn category_filters(&self) -> Vec<CategoryFilter> {
        let mut filters = vec![CategoryFilter::All];
        for label in &self.categories {
            let filter = CategoryFilter::from_label(label.trim());
            if !filters.contains(&filter) {
                filters.push(filter);
            }
        }
        filters
    }
}

impl ViewerConfig {
    /// Load configuration from the default location
    ///
    /// A missing default file is not an error; defaults are used instead.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Get the default config path (~/.product-viewer/config.yaml)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(app_dir()?.join(CONFIG_FILE_NAME))
    }
}

/// The per-user application directory (~/.product-viewer)
pub fn app_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs_next::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
    Ok(home.join(APP_DIR_NAME))
}
