//! Search and category filtering of the catalog
//!
//! Filtering is a pure function of the catalog and the current
//! [`SearchState`]. The result keeps the catalog's original order.

use crate::constants::ALL_CATEGORIES;
use catalog_rs::Product;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category criterion of a search
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// Match every product
    #[default]
    All,
    /// Match products whose category equals this label exactly
    Only(String),
}

impl CategoryFilter {
    /// Parse a category label, treating "All" and an empty label as match-all
    pub fn from_label(label: &str) -> Self {
        if label.is_empty() || label == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(label.to_string())
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(label) => label,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// Check whether a product falls in this category
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(label) => product.category == *label,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for CategoryFilter {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.label().to_string()
    }
}

/// Current search criteria
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchState {
    /// Free-text query matched against product names
    pub query: String,
    /// Category criterion
    pub category: CategoryFilter,
}

impl SearchState {
    /// True when any criterion narrows the catalog
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.category.is_all()
    }
}

/// Substring match of an already lowercased query in `name`
fn name_matches(name: &str, lowered_query: &str) -> bool {
    lowered_query.is_empty() || name.to_lowercase().contains(lowered_query)
}

/// Filter the catalog by name query and category
///
/// Both predicates must hold. An empty query matches every name.
///
/// # Examples
///
/// ```
/// use catalog_rs::{Product, ProductId};
/// use product_viewer_core::filter::{filter_products, CategoryFilter};
///
/// let catalog = vec![Product {
///     id: ProductId::new("1"),
///     product_name: "Blue Curtain".to_string(),
///     category: "Curtains".to_string(),
///     size: "M".to_string(),
///     per_unit: "pcs".to_string(),
///     rate: 100.into(),
/// }];
///
/// assert_eq!(filter_products(&catalog, "blue", &CategoryFilter::All).len(), 1);
/// assert!(filter_products(&catalog, "red", &CategoryFilter::All).is_empty());
/// ```
pub fn filter_products(catalog: &[Product], query: &str, category: &CategoryFilter) -> Vec<Product> {
    filter_refs(catalog, query, category)
        .into_iter()
        .cloned()
        .collect()
}

/// Borrowing variant of [`filter_products`]
pub fn filter_refs<'a>(
    catalog: &'a [Product],
    query: &str,
    category: &CategoryFilter,
) -> Vec<&'a Product> {
    let query = query.to_lowercase();
    catalog
        .iter()
        .filter(|p| category.matches(p) && name_matches(&p.product_name, &query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_rs::ProductId;

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

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "Blue Curtain", "Curtains"),
            product("2", "Red Sofa Cover", "Sofa Cover"),
            product("3", "Blue Bedsheet", "Bedsheet"),
            product("4", "Curtain Track", "Tracks"),
            product("5", "Velvet Curtain", "Curtains"),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_query_is_case_insensitive_and_ordered() {
        let catalog = catalog();
        assert_eq!(ids(&filter_products(&catalog, "BLUE", &CategoryFilter::All)), vec!["1", "3"]);
        assert_eq!(ids(&filter_products(&catalog, "curtain", &CategoryFilter::All)), vec!["1", "4", "5"]);
    }

    #[test]
    fn test_empty_query_matches_all() {
        let catalog = catalog();
        assert_eq!(filter_products(&catalog, "", &CategoryFilter::All), catalog);
    }

    #[test]
    fn test_category_is_exact() {
        let catalog = catalog();
        let curtains = CategoryFilter::from_label("Curtains");
        assert_eq!(ids(&filter_products(&catalog, "", &curtains)), vec!["1", "5"]);

        // "Curtain Track" is in Tracks, not Curtains
        let lower = CategoryFilter::from_label("curtains");
        assert!(filter_products(&catalog, "", &lower).is_empty());
    }

    #[test]
    fn test_predicates_are_anded() {
        let catalog = catalog();
        let curtains = CategoryFilter::from_label("Curtains");
        assert_eq!(ids(&filter_products(&catalog, "velvet", &curtains)), vec!["5"]);
        assert!(filter_products(&catalog, "track", &curtains).is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        assert!(filter_products(&[], "anything", &CategoryFilter::All).is_empty());
        assert!(filter_products(&[], "", &CategoryFilter::from_label("Tracks")).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = catalog();
        let category = CategoryFilter::from_label("Curtains");
        let once = filter_products(&catalog, "cur", &category);
        let twice = filter_products(&once, "cur", &category);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_search_state_drives_filter() {
        let catalog = catalog();
        let search = SearchState {
            query: "blue".to_string(),
            category: CategoryFilter::from_label("Bedsheet"),
        };
        let matched = filter_refs(&catalog, &search.query, &search.category);
        let ids: Vec<&str> = matched.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
        assert!(search.is_active());
        assert!(!SearchState::default().is_active());
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(CategoryFilter::from_label("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_label(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_label("Tracks").to_string(), "Tracks");
        assert_eq!(String::from(CategoryFilter::All), "All");
    }

    #[test]
    fn test_non_ascii_query() {
        let catalog = vec![product("1", "ÉLAN Pillow Cover", "Pillow Cover")];
        assert_eq!(filter_products(&catalog, "élan", &CategoryFilter::All).len(), 1);
    }
}
