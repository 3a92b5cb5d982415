//! Report content, independent of page geometry

use catalog_rs::Product;
use product_viewer_core::{ReportConfig, format_rate};

/// Column headers, in display order
pub const COLUMNS: [&str; 4] = ["Name", "Size", "Unit", "Rate"];

/// One body row of the product table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub cells: [String; 4],
}

impl ReportRow {
    fn from_product(product: &Product, currency_marker: &str) -> Self {
        Self {
            cells: [
                product.product_name.clone(),
                product.size.clone(),
                product.per_unit.clone(),
                format_rate(product.rate, currency_marker),
            ],
        }
    }

    pub fn name(&self) -> &str {
        &self.cells[0]
    }
}

/// Everything printed in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    /// Company name printed as the page title
    pub title: String,
    /// Address/contact line under the title
    pub subtitle: String,
    /// Body rows in the order the products were given
    pub rows: Vec<ReportRow>,
}

impl ReportDocument {
    /// Build the report for `products`, keeping their order
    pub fn from_products(products: &[Product], config: &ReportConfig) -> Self {
        Self {
            title: config.company_name.clone(),
            subtitle: config.address_line.clone(),
            rows: products
                .iter()
                .map(|p| ReportRow::from_product(p, &config.currency_marker))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
