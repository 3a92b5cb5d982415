//! Formatting utilities for consistent display across the application
//!
//! Provides functions for formatting currency amounts, counts and
//! truncated labels.

use rust_decimal::Decimal;

/// Format a currency amount with exactly two decimal places
///
/// # Examples
///
/// ```
/// use product_viewer_core::formatting::format_amount;
///
/// assert_eq!(format_amount(100.into()), "100.00");
/// assert_eq!(format_amount("12.5".parse().unwrap()), "12.50");
/// assert_eq!(format_amount("0.125".parse().unwrap()), "0.13");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Format a rate with a currency prefix
///
/// # Examples
///
/// ```
/// use product_viewer_core::formatting::format_rate;
///
/// assert_eq!(format_rate(100.into(), "₹"), "₹100.00");
/// assert_eq!(format_rate(100.into(), "Rs."), "Rs. 100.00");
/// ```
pub fn format_rate(rate: Decimal, marker: &str) -> String {
    // Multi-character markers ("Rs.") get a separating space
    let separator = if marker.chars().count() > 1 { " " } else { "" };
    format!("{}{}{}", marker, separator, format_amount(rate))
}

/// Truncate a string to a maximum number of characters with ellipsis
///
/// # Examples
///
/// ```
/// use product_viewer_core::formatting::truncate_string;
///
/// assert_eq!(truncate_string("Hello, World!", 10), "Hello, ...");
/// assert_eq!(truncate_string("Short", 10), "Short");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a count with singular/plural form
///
/// # Examples
///
/// ```
/// use product_viewer_core::formatting::pluralize;
///
/// assert_eq!(pluralize(1, "product", "products"), "1 product");
/// assert_eq!(pluralize(0, "product", "products"), "0 products");
/// ```
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Label of the export button for the given state
pub fn export_button_label(exporting: bool, selected: usize) -> String {
    if exporting {
        "Generating PDF...".to_string()
    } else {
        format!("Generate PDF ({})", selected)
    }
}
