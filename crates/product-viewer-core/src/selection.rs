//! Selection abstractions for the product table
//!
//! [`Selection`] tracks which products are marked for export, by id.
//! [`SelectAllToggle`] models the "Select All" checkbox and [`Cursor`]
//! the focused row.

use catalog_rs::{Product, ProductId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Set of selected products in insertion order
///
/// Membership is by [`ProductId`], never by reference, since filtering
/// re-derives the product list on every change.
///
/// # Examples
///
/// ```
/// use catalog_rs::ProductId;
/// use product_viewer_core::selection::Selection;
///
/// let mut selection = Selection::new();
/// let id = ProductId::new("64f0a1");
///
/// selection.toggle_id(&id);
/// assert!(selection.contains(&id));
/// selection.toggle_id(&id);
/// assert!(selection.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    ids: Vec<ProductId>,
    #[serde(skip)]
    index: HashSet<ProductId>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in the order they were selected
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Check whether a product id is selected
    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains(id)
    }

    /// Remove the product if selected, otherwise append it
    pub fn toggle(&mut self, product: &Product) {
        self.toggle_id(&product.id);
    }

    /// Id-based variant of [`Selection::toggle`]
    pub fn toggle_id(&mut self, id: &ProductId) {
        if self.index.remove(id) {
            self.ids.retain(|selected| selected != id);
        } else {
            self.index.insert(id.clone());
            self.ids.push(id.clone());
        }
    }

    /// Replace the selection with exactly the given products, in their order
    pub fn select_all<'a, I>(&mut self, products: I)
    where
        I: IntoIterator<Item = &'a Product>,
    {
        self.clear();
        for product in products {
            if self.index.insert(product.id.clone()) {
                self.ids.push(product.id.clone());
            }
        }
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        self.ids.clear();
        self.index.clear();
    }

    /// Look up the selected products in selection order
    ///
    /// Ids missing from `catalog` are skipped.
    pub fn resolve(&self, catalog: &[Product]) -> Vec<Product> {
        let by_id: HashMap<&ProductId, &Product> = catalog.iter().map(|p| (&p.id, p)).collect();
        self.ids
            .iter()
            .filter_map(|id| by_id.get(id).map(|p| (*p).clone()))
            .collect()
    }
}

/// The "Select All" control
///
/// It is a toggle whose flag is independent of the selection contents:
/// the first press selects the filtered list, the next press clears the
/// selection, whatever happened in between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectAllToggle {
    active: bool,
}

impl SelectAllToggle {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the checkbox renders as checked for a list of this length
    pub fn is_checked(&self, visible_len: usize) -> bool {
        self.active && visible_len > 0
    }

    /// Apply one press of the control to `selection`
    pub fn press<'a, I>(&mut self, selection: &mut Selection, visible: I)
    where
        I: IntoIterator<Item = &'a Product>,
    {
        if self.active {
            selection.clear();
        } else {
            selection.select_all(visible);
        }
        self.active = !self.active;
    }
}

/// Focused row of a list of known length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next row (no wrap, stops at end)
    pub fn next(&mut self, len: usize) {
        if self.index + 1 < len {
            self.index += 1;
        }
    }

    /// Move to the previous row (no wrap, stops at start)
    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.index = 0;
    }

    pub fn last(&mut self, len: usize) {
        self.index = len.saturating_sub(1);
    }

    /// Move up by a page
    pub fn page_up(&mut self, page_size: usize) {
        self.index = self.index.saturating_sub(page_size);
    }

    /// Move down by a page, clamped to the last row
    pub fn page_down(&mut self, page_size: usize, len: usize) {
        self.index = (self.index + page_size).min(len.saturating_sub(1));
    }

    /// Keep the cursor inside a list that may have shrunk
    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }
}
