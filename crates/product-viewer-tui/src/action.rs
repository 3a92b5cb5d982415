//! Actions for the product-viewer TUI
//!
//! Actions represent events that can modify application state.

use catalog_rs::ProductId;

/// Actions that can be dispatched in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,

    // Data loading
    Reload,

    // Search
    SearchChanged(String),
    CycleCategory { forward: bool },

    // Selection
    ToggleProduct(ProductId),
    ToggleSelectAll,
    ClearSelection,

    /// Generate the PDF report for the selection
    Export,

    // UI state
    Tick,
    Resize(u16, u16),
}
