//! product-viewer-report: PDF reports of selected products
//!
//! Produces a single A4 document with the company header and a table of
//! the given products (Name, Size, Unit, Rate), in the order given.
//!
//! # Example
//!
//! ```no_run
//! use product_viewer_core::ReportConfig;
//! use product_viewer_report::export_report;
//!
//! # fn example(products: Vec<catalog_rs::Product>) -> Result<(), product_viewer_report::ReportError> {
//! if let Some(path) = export_report(&products, &ReportConfig::default(), std::path::Path::new("."))? {
//!     println!("Saved {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod renderer;

pub use document::{ReportDocument, ReportRow};
pub use error::ReportError;

use catalog_rs::Product;
use product_viewer_core::ReportConfig;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Render the report for `products` to PDF bytes
///
/// Returns `Ok(None)` when there is nothing to report.
pub fn generate_report(products: &[Product], config: &ReportConfig) -> Result<Option<Vec<u8>>, ReportError> {
    if products.is_empty() {
        return Ok(None);
    }
    let doc = ReportDocument::from_products(products, config);
    let pages = layout::layout(&doc);
    let bytes = renderer::render(&pages)?;
    tracing::debug!("Rendered report: {} rows, {} bytes", doc.rows.len(), bytes.len());
    Ok(Some(bytes))
}

/// Render the report and write it into `dir` under the configured file name
///
/// Returns the written path, or `Ok(None)` without touching the filesystem
/// when `products` is empty. The file is written next to its destination
/// and renamed into place, so an existing report is either replaced whole or
/// left untouched.
pub fn export_report(
    products: &[Product],
    config: &ReportConfig,
    dir: &Path,
) -> Result<Option<PathBuf>, ReportError> {
    let Some(bytes) = generate_report(products, config)? else {
        return Ok(None);
    };
    if !dir.is_dir() {
        return Err(ReportError::MissingOutputDir(dir.display().to_string()));
    }

    let path = dir.join(&config.file_name);
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    file.persist(&path).map_err(|e| e.error)?;
    tracing::info!("Wrote {} products to {}", products.len(), path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_rs::ProductId;
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            product_name: name.to_string(),
            category: "Curtains".to_string(),
            size: "M".to_string(),
            per_unit: "pcs".to_string(),
            rate: Decimal::from(100),
        }
    }

    #[test]
    fn test_empty_selection_produces_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(generate_report(&[], &ReportConfig::default()).unwrap().is_none());
        assert!(export_report(&[], &ReportConfig::default(), dir.path()).unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_writes_products_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let products = vec![product("1", "Blue Curtain"), product("2", "Red Curtain")];

        let path = export_report(&products, &ReportConfig::default(), dir.path())
            .unwrap()
            .unwrap();
        assert_eq!(path, dir.path().join("products.pdf"));

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("products.pdf"), b"stale").unwrap();

        export_report(&[product("1", "Blue Curtain")], &ReportConfig::default(), dir.path()).unwrap();
        let bytes = std::fs::read(dir.path().join("products.pdf")).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_export_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("products.pdf"), b"stale").unwrap();

        export_report(&[product("1", "Blue Curtain")], &ReportConfig::default(), dir.path()).unwrap();
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("products.pdf")]);
    }

    #[test]
    fn test_failed_export_keeps_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("products.pdf");
        // A directory in the way makes the final rename fail
        std::fs::create_dir(&target).unwrap();

        let result = export_report(&[product("1", "Blue Curtain")], &ReportConfig::default(), dir.path());
        assert!(matches!(result, Err(ReportError::Io(_))));
        assert!(target.is_dir());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_generated_pdf_lists_rows_in_selection_order() {
        let products = vec![product("2", "Red Curtain"), product("1", "Blue Curtain")];
        let bytes = generate_report(&products, &ReportConfig::default()).unwrap().unwrap();

        let pdf = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(pdf.get_pages().len(), 1);
        let text = pdf.extract_text(&[1]).unwrap();

        let title = text.find("RAMESH AGENCY").unwrap();
        let header = text.find("Name").unwrap();
        let red = text.find("Red Curtain").unwrap();
        let blue = text.find("Blue Curtain").unwrap();
        assert!(title < header);
        assert!(header < red);
        assert!(red < blue);
        assert_eq!(text.matches("Rs. 100.00").count(), 2);
    }

    #[test]
    fn test_long_name_survives_in_full() {
        let name = "Premium Blackout Velvet Curtain With Tiebacks And Thermal Lining 7ft";
        let bytes = generate_report(&[product("1", name)], &ReportConfig::default())
            .unwrap()
            .unwrap();
        let text = lopdf::Document::load_mem(&bytes).unwrap().extract_text(&[1]).unwrap();

        let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(flattened.contains(name));
        assert!(!text.contains("..."));
    }

    #[test]
    fn test_export_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let result = export_report(&[product("1", "Blue Curtain")], &ReportConfig::default(), &missing);
        assert!(matches!(result, Err(ReportError::MissingOutputDir(_))));
    }

    #[test]
    fn test_selection_order_reaches_the_table() {
        let products = vec![product("2", "Second"), product("1", "First")];
        let doc = ReportDocument::from_products(&products, &ReportConfig::default());
        let pages = layout::layout(&doc);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].rows.len(), 2);
        let names: Vec<&str> = pages[0]
            .texts()
            .filter(|t| *t == "Second" || *t == "First")
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }
}
