//! Shared constants for product-viewer
//!
//! Defaults for categories, the report header and on-disk locations.

/// Category filter options, in display order ("All" matches everything)
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "All",
    "Curtains",
    "Sofa Cover",
    "Bedsheet",
    "Pillow Cover",
    "Tracks",
    "Accessories",
];

/// Label of the match-all category
pub const ALL_CATEGORIES: &str = "All";

// =============================================================================
// Report defaults
// =============================================================================

/// Company name printed at the top of the report
pub const DEFAULT_COMPANY_NAME: &str = "RAMESH AGENCY";

/// Address and contact line printed under the company name
pub const DEFAULT_ADDRESS_LINE: &str =
    "No.73 Godown Street, J.R.C Complex, Chennai - 600001 | +91 8939670701";

/// File name of the generated report
pub const DEFAULT_REPORT_FILE_NAME: &str = "products.pdf";

/// Currency marker used in the report (PDF base fonts have no rupee glyph)
pub const DEFAULT_REPORT_CURRENCY_MARKER: &str = "Rs.";

/// Currency symbol used in the terminal table
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

// =============================================================================
// Paths
// =============================================================================

/// Directory under $HOME holding the config file and export log
pub const APP_DIR_NAME: &str = ".product-viewer";

/// Config file name inside [`APP_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Export history file name inside [`APP_DIR_NAME`]
pub const EXPORT_LOG_FILE_NAME: &str = "exports.log";

/// How long the export button shows its success state
pub const EXPORT_FLASH_SECS: u64 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_first_category() {
        assert_eq!(DEFAULT_CATEGORIES.first(), Some(&ALL_CATEGORIES));
    }

    #[test]
    fn test_report_defaults_are_latin1() {
        // The report uses WinAnsi base fonts
        for s in [DEFAULT_COMPANY_NAME, DEFAULT_ADDRESS_LINE, DEFAULT_REPORT_CURRENCY_MARKER] {
            assert!(s.chars().all(|c| (c as u32) <= 255), "{s}");
        }
    }
}
