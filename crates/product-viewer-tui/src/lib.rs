//! product-viewer-tui: Terminal UI for browsing the product catalog
//!
//! Wires the core dashboard state to a ratatui front end and the PDF
//! report generator.

pub mod action;
pub mod app;
pub mod components;
pub mod export_log;
pub mod tui;
pub mod ui_ext;

pub use app::App;
