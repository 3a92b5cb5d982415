//! Dashboard state machine
//!
//! [`DashboardState`] owns everything the product dashboard shows: the
//! catalog load, the search criteria, the selection and the export status.
//! It only changes through the transition methods below, and UI components
//! read it through a [`DashboardSnapshot`].

use crate::async_state::{AsyncState, AsyncStateExt, LoadPhase, LoadTicket};
use crate::errors::DashboardError;
use crate::filter::{CategoryFilter, SearchState, filter_products, filter_refs};
use crate::formatting::export_button_label;
use crate::selection::{SelectAllToggle, Selection};
use catalog_rs::{CatalogPayload, Product, ProductId};
use serde::Serialize;
use std::path::PathBuf;

/// Result of the most recent export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExportOutcome {
    /// The report was written
    Saved { path: PathBuf, count: usize },
    /// Report generation or writing failed
    Failed(String),
}

/// The dashboard state
#[derive(Debug, Clone, Serialize)]
pub struct DashboardState {
    catalog: AsyncState<Vec<Product>>,
    /// Records dropped by validation in the last successful load
    rejected: usize,
    search: SearchState,
    /// Category options, "All" first
    categories: Vec<CategoryFilter>,
    selection: Selection,
    select_all: SelectAllToggle,
    /// Number of products being exported, while an export runs
    exporting: Option<usize>,
    just_exported: bool,
    last_export: Option<ExportOutcome>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(vec![CategoryFilter::All])
    }
}

impl DashboardState {
    /// Create the initial state: loading, empty catalog
    pub fn new(categories: Vec<CategoryFilter>) -> Self {
        let categories = if categories.is_empty() {
            vec![CategoryFilter::All]
        } else {
            categories
        };
        Self {
            catalog: AsyncState::new(),
            rejected: 0,
            search: SearchState::default(),
            categories,
            selection: Selection::new(),
            select_all: SelectAllToggle::default(),
            exporting: None,
            just_exported: false,
            last_export: None,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.catalog.phase()
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_loaded()
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.is_some()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn categories(&self) -> &[CategoryFilter] {
        &self.categories
    }

    /// The last successfully loaded catalog
    ///
    /// Kept while a reload is in flight; empty before the first load and
    /// after a failed one.
    pub fn catalog(&self) -> &[Product] {
        self.catalog.data().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Catalog narrowed by the current search, in catalog order
    pub fn filtered(&self) -> Vec<Product> {
        filter_products(self.catalog(), &self.search.query, &self.search.category)
    }

    fn ensure_loaded(&self) -> Result<(), DashboardError> {
        if self.catalog.is_loaded() {
            Ok(())
        } else {
            Err(DashboardError::NotLoaded)
        }
    }

    /// Start fetching the catalog
    pub fn begin_load(&mut self) -> Result<LoadTicket, DashboardError> {
        let ticket = self.catalog.begin().ok_or(DashboardError::LoadInProgress)?;
        tracing::debug!("Catalog load started");
        Ok(ticket)
    }

    /// Apply the result of a fetch
    ///
    /// Returns false if the ticket is stale and the result was discarded.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<CatalogPayload, String>) -> bool {
        let rejected = result.as_ref().map(|p| p.rejected.len()).unwrap_or(0);
        let applied = self.catalog.finish(ticket, result.map(|p| p.products));
        if !applied {
            tracing::debug!("Discarding stale catalog result");
            return false;
        }

        self.rejected = rejected;
        self.selection.clear();
        self.select_all = SelectAllToggle::default();

        match self.catalog.error() {
            Some(error) => tracing::warn!("Catalog load failed: {}", error),
            None => tracing::info!("Catalog loaded: {} products", self.catalog().len()),
        }
        true
    }

    /// Change the name query
    ///
    /// Returns whether the query changed. Any change clears the selection.
    pub fn set_query(&mut self, query: impl Into<String>) -> Result<bool, DashboardError> {
        self.ensure_loaded()?;
        let query = query.into();
        if query == self.search.query {
            return Ok(false);
        }
        self.search.query = query;
        self.selection.clear();
        Ok(true)
    }

    /// Change the category criterion
    pub fn set_category(&mut self, category: CategoryFilter) -> Result<bool, DashboardError> {
        self.ensure_loaded()?;
        if category == self.search.category {
            return Ok(false);
        }
        self.search.category = category;
        self.selection.clear();
        Ok(true)
    }

    /// Step to the next (or previous) category option, wrapping around
    pub fn cycle_category(&mut self, forward: bool) -> Result<&CategoryFilter, DashboardError> {
        self.ensure_loaded()?;
        let len = self.categories.len();
        let next = match self.categories.iter().position(|c| *c == self.search.category) {
            Some(current) if forward => (current + 1) % len,
            Some(current) => (current + len - 1) % len,
            None => 0,
        };
        let category = self.categories[next].clone();
        self.set_category(category)?;
        Ok(&self.search.category)
    }

    /// Select or deselect one product of the filtered list
    pub fn toggle(&mut self, id: &ProductId) -> Result<(), DashboardError> {
        self.ensure_loaded()?;
        let visible = filter_refs(self.catalog(), &self.search.query, &self.search.category);
        if !visible.iter().any(|p| p.id == *id) {
            return Err(DashboardError::NotVisible(id.clone()));
        }
        self.selection.toggle_id(id);
        Ok(())
    }

    /// Press the "Select All" control
    pub fn press_select_all(&mut self) -> Result<(), DashboardError> {
        self.ensure_loaded()?;
        let catalog = self.catalog.data().map(Vec::as_slice).unwrap_or(&[]);
        let visible = filter_refs(catalog, &self.search.query, &self.search.category);
        self.select_all.press(&mut self.selection, visible);
        Ok(())
    }

    /// Deselect everything
    pub fn clear_selection(&mut self) -> Result<(), DashboardError> {
        self.ensure_loaded()?;
        self.selection.clear();
        Ok(())
    }

    /// Start an export of the selected products
    ///
    /// Returns the products to export in selection order.
    pub fn begin_export(&mut self) -> Result<Vec<Product>, DashboardError> {
        if self.exporting.is_some() {
            return Err(DashboardError::ExportInProgress);
        }
        let products = self.selection.resolve(self.catalog());
        if products.is_empty() {
            return Err(DashboardError::EmptySelection);
        }
        self.exporting = Some(products.len());
        self.just_exported = false;
        Ok(products)
    }

    /// Record the end of an export
    pub fn finish_export(&mut self, result: Result<PathBuf, String>) {
        let count = self.exporting.take().unwrap_or(0);
        match result {
            Ok(path) => {
                tracing::info!("Exported {} products to {}", count, path.display());
                self.just_exported = true;
                self.last_export = Some(ExportOutcome::Saved { path, count });
            }
            Err(error) => {
                tracing::error!("Export failed: {}", error);
                self.just_exported = false;
                self.last_export = Some(ExportOutcome::Failed(error));
            }
        }
    }

    /// Drop the transient "exported" highlight
    pub fn clear_export_flash(&mut self) {
        self.just_exported = false;
    }

    /// Read-only view for the UI
    pub fn snapshot(&self) -> DashboardSnapshot {
        let filtered = self.filtered();
        DashboardSnapshot {
            phase: self.catalog.phase(),
            status: self.catalog.status_text(),
            load_error: self.catalog.error().map(str::to_string),
            total: self.catalog().len(),
            rejected: self.rejected,
            search: self.search.clone(),
            select_all_checked: self.select_all.is_checked(filtered.len()),
            filtered,
            selection: self.selection.clone(),
            exporting: self.exporting.is_some(),
            just_exported: self.just_exported,
            last_export: self.last_export.clone(),
        }
    }
}

/// Point-in-time view of the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub phase: LoadPhase,
    /// Short status text ("Loading...", "Ready", ...)
    pub status: &'static str,
    pub load_error: Option<String>,
    /// Size of the whole catalog
    pub total: usize,
    pub rejected: usize,
    pub search: SearchState,
    /// Products matching the search, in catalog order
    pub filtered: Vec<Product>,
    pub selection: Selection,
    pub select_all_checked: bool,
    pub exporting: bool,
    pub just_exported: bool,
    pub last_export: Option<ExportOutcome>,
}

impl DashboardSnapshot {
    /// Whether a query or category narrows the list
    pub fn is_filtering(&self) -> bool {
        self.search.is_active()
    }

    pub fn is_selected(&self, id: &ProductId) -> bool {
        self.selection.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn can_export(&self) -> bool {
        !self.selection.is_empty() && !self.exporting
    }

    /// Label of the export button
    pub fn export_label(&self) -> String {
        export_button_label(self.exporting, self.selection.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            product_name: name.to_string(),
            category: category.to_string(),
            size: "M".to_string(),
            per_unit: "pcs".to_string(),
            rate: 100.into(),
        }
    }

    fn payload(products: Vec<Product>) -> CatalogPayload {
        CatalogPayload {
            products,
            rejected: Vec::new(),
        }
    }

    fn categories() -> Vec<CategoryFilter> {
        ["All", "Curtains", "Bedsheet"]
            .iter()
            .map(|c| CategoryFilter::from_label(c))
            .collect()
    }

    fn loaded() -> DashboardState {
        let mut state = DashboardState::new(categories());
        let ticket = state.begin_load().unwrap();
        state.finish_load(
            ticket,
            Ok(payload(vec![
                product("1", "Blue Curtain", "Curtains"),
                product("2", "Red Bedsheet", "Bedsheet"),
                product("3", "Blue Bedsheet", "Bedsheet"),
            ])),
        );
        state
    }

    #[test]
    fn test_initial_state() {
        let state = DashboardState::new(categories());
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, LoadPhase::Loading);
        assert_eq!(snapshot.total, 0);
        assert!(snapshot.filtered.is_empty());
        assert!(!snapshot.can_export());
    }

    #[test]
    fn test_input_ignored_until_loaded() {
        let mut state = DashboardState::new(categories());
        state.begin_load().unwrap();
        assert_eq!(state.set_query("blue"), Err(DashboardError::NotLoaded));
        assert_eq!(state.press_select_all(), Err(DashboardError::NotLoaded));
        assert_eq!(state.begin_load(), Err(DashboardError::LoadInProgress));
    }

    #[test]
    fn test_query_narrows_list() {
        let mut state = loaded();
        state.set_query("blue").unwrap();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.filtered.len(), 2);
        assert!(snapshot.is_filtering());

        state.set_query("red").unwrap();
        assert_eq!(state.snapshot().filtered.len(), 1);

        state.set_query("green").unwrap();
        assert!(state.snapshot().filtered.is_empty());
    }

    #[test]
    fn test_search_change_clears_selection() {
        let mut state = loaded();
        state.toggle(&ProductId::new("1")).unwrap();
        assert_eq!(state.selection().len(), 1);

        assert!(state.set_query("blue").unwrap());
        assert!(state.selection().is_empty());

        state.toggle(&ProductId::new("3")).unwrap();
        assert!(!state.set_query("blue").unwrap());
        assert_eq!(state.selection().len(), 1);

        state.cycle_category(true).unwrap();
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_cycle_category_wraps() {
        let mut state = loaded();
        assert_eq!(state.cycle_category(true).unwrap().label(), "Curtains");
        assert_eq!(state.cycle_category(true).unwrap().label(), "Bedsheet");
        assert_eq!(state.cycle_category(true).unwrap().label(), "All");
        assert_eq!(state.cycle_category(false).unwrap().label(), "Bedsheet");

        let ids: Vec<String> = state.filtered().iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_toggle_requires_visible_product() {
        let mut state = loaded();
        state.set_category(CategoryFilter::from_label("Curtains")).unwrap();
        assert_eq!(
            state.toggle(&ProductId::new("2")),
            Err(DashboardError::NotVisible(ProductId::new("2")))
        );
        state.toggle(&ProductId::new("1")).unwrap();
        assert!(state.snapshot().is_selected(&ProductId::new("1")));
    }

    #[test]
    fn test_select_all_twice_clears() {
        let mut state = loaded();
        state.set_query("blue").unwrap();

        state.press_select_all().unwrap();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.selected_count(), 2);
        assert!(snapshot.select_all_checked);

        state.press_select_all().unwrap();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.selected_count(), 0);
        assert!(!snapshot.select_all_checked);
    }

    #[test]
    fn test_export_empty_selection_is_rejected() {
        let mut state = loaded();
        assert_eq!(state.begin_export(), Err(DashboardError::EmptySelection));
        assert!(!state.is_exporting());
    }

    #[test]
    fn test_export_lifecycle() {
        let mut state = loaded();
        state.toggle(&ProductId::new("3")).unwrap();
        state.toggle(&ProductId::new("1")).unwrap();

        let products = state.begin_export().unwrap();
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);

        let snapshot = state.snapshot();
        assert!(snapshot.exporting);
        assert!(!snapshot.can_export());
        assert_eq!(snapshot.export_label(), "Generating PDF...");
        assert_eq!(state.begin_export(), Err(DashboardError::ExportInProgress));

        state.finish_export(Ok(PathBuf::from("/tmp/products.pdf")));
        let snapshot = state.snapshot();
        assert!(!snapshot.exporting);
        assert!(snapshot.just_exported);
        assert_eq!(
            snapshot.last_export,
            Some(ExportOutcome::Saved {
                path: PathBuf::from("/tmp/products.pdf"),
                count: 2
            })
        );

        state.clear_export_flash();
        assert!(!state.snapshot().just_exported);
    }

    #[test]
    fn test_failed_export_allows_retry() {
        let mut state = loaded();
        state.toggle(&ProductId::new("1")).unwrap();
        state.begin_export().unwrap();
        state.finish_export(Err("disk full".to_string()));

        let snapshot = state.snapshot();
        assert!(!snapshot.just_exported);
        assert_eq!(snapshot.last_export, Some(ExportOutcome::Failed("disk full".to_string())));
        assert!(state.begin_export().is_ok());
    }

    #[test]
    fn test_load_error_empties_catalog() {
        let mut state = loaded();
        state.toggle(&ProductId::new("1")).unwrap();

        let ticket = state.begin_load().unwrap();
        assert!(state.finish_load(ticket, Err("Connection refused".to_string())));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, LoadPhase::LoadError);
        assert_eq!(snapshot.load_error.as_deref(), Some("Connection refused"));
        assert_eq!(snapshot.total, 0);
        assert_eq!(snapshot.selected_count(), 0);
    }

    #[test]
    fn test_reload_replaces_catalog() {
        let mut state = loaded();
        state.toggle(&ProductId::new("1")).unwrap();

        let ticket = state.begin_load().unwrap();
        let mut fresh = payload(vec![product("9", "Jute Rug", "Rugs")]);
        fresh.rejected.push(catalog_rs::RejectedRecord {
            index: 1,
            reason: "missing rate".to_string(),
        });
        state.finish_load(ticket, Ok(fresh));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.rejected, 1);
        assert_eq!(snapshot.selected_count(), 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = loaded();
        state.toggle(&ProductId::new("2")).unwrap();

        let value = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(value["phase"], "Loaded");
        assert_eq!(value["total"], 3);
        assert_eq!(value["selection"]["ids"][0], "2");
        assert_eq!(value["search"]["category"], "All");
    }

    #[test]
    fn test_catalog_kept_during_reload_and_dropped_on_failure() {
        let mut state = loaded();
        let ticket = state.begin_load().unwrap();
        assert_eq!(state.phase(), LoadPhase::Loading);
        assert_eq!(state.catalog().len(), 3);

        state.finish_load(ticket, Err("Connection refused".to_string()));
        assert!(state.catalog().is_empty());
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut state = DashboardState::new(categories());
        let first = state.begin_load().unwrap();
        state.finish_load(first, Ok(payload(vec![product("1", "A", "Curtains")])));
        let _second = state.begin_load().unwrap();

        assert!(!state.finish_load(first, Ok(payload(Vec::new()))));
        assert_eq!(state.phase(), LoadPhase::Loading);
        assert_eq!(state.snapshot().total, 1);
    }
}
