//! product-viewer-core: Core business logic for product-viewer
//!
//! This crate contains the filtering, selection and dashboard state logic
//! for the product-viewer TUI. It is intentionally kept independent of any
//! TUI framework to enable:
//!
//! - Unit testing without UI dependencies
//! - Reuse in CLI tools or other consumers
//! - Clear separation between business logic and presentation
//!
//! # Modules
//!
//! - [`filter`] - Search and category filtering of the catalog
//! - [`selection`] - Product selection, the select-all toggle and row cursor
//! - [`async_state`] - Load lifecycle of the catalog (loading, loaded, error)
//! - [`dashboard`] - The dashboard state machine and its read-only snapshot
//! - [`config`] - YAML configuration file
//! - [`formatting`] - Currency and text formatting helpers
//! - [`errors`] - Error formatting utilities for user-friendly messages
//! - [`constants`] - Shared defaults (categories, report header, paths)

pub mod async_state;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod filter;
pub mod formatting;
pub mod selection;

// Re-export commonly used items at crate root
pub use async_state::*;
pub use config::{ConfigError, DisplayConfig, ReportConfig, ViewerConfig};
pub use dashboard::*;
pub use errors::*;
pub use filter::*;
pub use formatting::*;
pub use selection::*;
