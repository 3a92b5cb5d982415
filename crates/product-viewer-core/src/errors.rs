//! Error formatting utilities
//!
//! Provides user-friendly error message formatting for catalog errors, and
//! the error type for rejected dashboard transitions.

use catalog_rs::{CatalogError, ProductId};
use thiserror::Error;

/// A dashboard transition that is not allowed in the current state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("products are not loaded")]
    NotLoaded,
    #[error("products are already loading")]
    LoadInProgress,
    #[error("no products selected")]
    EmptySelection,
    #[error("an export is already running")]
    ExportInProgress,
    #[error("product {0} is not in the current list")]
    NotVisible(ProductId),
}

/// Format a CatalogError into a user-friendly message
///
/// Transforms technical error messages into actionable, human-readable text.
///
/// # Examples
///
/// ```
/// use catalog_rs::CatalogError;
/// use product_viewer_core::errors::format_catalog_error;
///
/// let error = CatalogError::Connection("connection refused".to_string());
/// let message = format_catalog_error(&error);
/// assert!(message.contains("refused"));
/// ```
pub fn format_catalog_error(error: &CatalogError) -> String {
    match error {
        CatalogError::Connection(msg) => format_connection_error(msg),
        CatalogError::Timeout(secs) => {
            format!("Request timed out after {}s - the service may be waking up, try again", secs)
        }
        CatalogError::Status { status, .. } => format_status_error(*status),
        CatalogError::Decode(msg) => format!("Unexpected response from the product service: {}", msg),
        CatalogError::InvalidUrl(url) => format!("Invalid endpoint '{}' - check the api section of your config", url),
        CatalogError::Http(e) => format!("Request failed: {}", e),
    }
}

/// Format a connection error message
fn format_connection_error(msg: &str) -> String {
    let lower = msg.to_lowercase();
    if lower.contains("certificate") || lower.contains("tls") || lower.contains("ssl") {
        "TLS/certificate error talking to the product service".to_string()
    } else if lower.contains("refused") {
        "Connection refused - is the product service running?".to_string()
    } else if lower.contains("dns") || lower.contains("resolve") {
        "DNS resolution failed - check the endpoint hostname".to_string()
    } else {
        format!("Connection failed: {}", msg)
    }
}

/// Format an HTTP status error
fn format_status_error(status: u16) -> String {
    match status {
        404 => "Product list not found (HTTP 404) - check the endpoint path".to_string(),
        401 | 403 => format!("Access denied by the product service (HTTP {})", status),
        502..=504 => format!("Product service unavailable (HTTP {}) - try again shortly", status),
        s if s >= 500 => format!("Product service error (HTTP {})", s),
        s => format!("Unexpected response status HTTP {}", s),
    }
}

/// Categorize an error for display purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network/connection issues
    Network,
    /// Timeout issues
    Timeout,
    /// The service answered with an error status
    Server,
    /// The service answered with unusable data
    Data,
    /// Configuration issues
    Config,
    /// Other/unknown issues
    Other,
}

impl ErrorCategory {
    /// Get a short label for the category
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network",
            ErrorCategory::Timeout => "Timeout",
            ErrorCategory::Server => "Server",
            ErrorCategory::Data => "Data",
            ErrorCategory::Config => "Config",
            ErrorCategory::Other => "Error",
        }
    }
}

/// Categorize a CatalogError
pub fn categorize_error(error: &CatalogError) -> ErrorCategory {
    match error {
        CatalogError::Connection(_) => ErrorCategory::Network,
        CatalogError::Timeout(_) => ErrorCategory::Timeout,
        CatalogError::Status { .. } => ErrorCategory::Server,
        CatalogError::Decode(_) => ErrorCategory::Data,
        CatalogError::InvalidUrl(_) => ErrorCategory::Config,
        CatalogError::Http(e) if e.is_timeout() => ErrorCategory::Timeout,
        CatalogError::Http(_) => ErrorCategory::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_connection_error() {
        assert!(format_connection_error("connection refused").contains("refused"));
        assert!(format_connection_error("invalid peer certificate").contains("TLS"));
        assert!(format_connection_error("failed to lookup address").contains("Connection failed"));
    }

    #[test]
    fn test_format_status_error() {
        assert!(format_status_error(404).contains("not found"));
        assert!(format_status_error(503).contains("unavailable"));
        assert!(format_status_error(500).contains("service error"));
        assert!(format_status_error(418).contains("418"));
    }

    #[test]
    fn test_categorize_error() {
        let error = CatalogError::Connection("refused".to_string());
        assert_eq!(categorize_error(&error), ErrorCategory::Network);

        let error = CatalogError::Status { status: 500, body: String::new() };
        assert_eq!(categorize_error(&error), ErrorCategory::Server);

        let error = CatalogError::Decode("missing field `products`".to_string());
        assert_eq!(categorize_error(&error), ErrorCategory::Data);

        let error = CatalogError::InvalidUrl("x".to_string());
        assert_eq!(categorize_error(&error).label(), "Config");
    }
}
