//! Catalog endpoint configuration
//!
//! The `api` section of the product-viewer config file.

use serde::{Deserialize, Serialize};

/// Default catalog service base URL
pub const DEFAULT_BASE_URL: &str = "https://ramesh-agency-product-backend.onrender.com/api/products";

/// Default route of the product list under the base URL
pub const DEFAULT_LIST_PATH: &str = "/list";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the catalog service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the products resource
    pub base_url: String,
    /// Route of the list endpoint, relative to `base_url`
    pub list_path: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            list_path: DEFAULT_LIST_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at a different base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Full URL of the product list endpoint
    ///
    /// Joins `base_url` and `list_path` with exactly one slash.
    pub fn list_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.list_path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }
}
