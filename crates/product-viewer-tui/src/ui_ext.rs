//! UI extensions for product-viewer-core types
//!
//! Maps UI-agnostic core states to ratatui colors and symbols.

use product_viewer_core::{DashboardSnapshot, ErrorCategory, ExportOutcome, LoadPhase};
use ratatui::style::{Color, Modifier, Style};

/// Extension trait for LoadPhase to provide ratatui colors
pub trait LoadPhaseExt {
    fn color(&self) -> Color;

    /// Get symbol and color together
    fn symbol_and_color(&self) -> (&'static str, Color);
}

impl LoadPhaseExt for LoadPhase {
    fn color(&self) -> Color {
        match self {
            LoadPhase::Loading => Color::Cyan,
            LoadPhase::Loaded => Color::Green,
            LoadPhase::LoadError => Color::Red,
        }
    }

    fn symbol_and_color(&self) -> (&'static str, Color) {
        let symbol = match self {
            LoadPhase::Loading => "◐",
            LoadPhase::Loaded => "●",
            LoadPhase::LoadError => "✗",
        };
        (symbol, self.color())
    }
}

/// Extension trait for ErrorCategory to provide ratatui colors
pub trait ErrorCategoryExt {
    fn color(&self) -> Color;
}

impl ErrorCategoryExt for ErrorCategory {
    fn color(&self) -> Color {
        match self {
            ErrorCategory::Network | ErrorCategory::Timeout => Color::Yellow,
            ErrorCategory::Server | ErrorCategory::Data => Color::Red,
            ErrorCategory::Config => Color::Magenta,
            ErrorCategory::Other => Color::DarkGray,
        }
    }
}

/// Extension trait for ExportOutcome to provide a status line color
pub trait ExportOutcomeExt {
    fn color(&self) -> Color;
}

impl ExportOutcomeExt for ExportOutcome {
    fn color(&self) -> Color {
        match self {
            ExportOutcome::Saved { .. } => Color::Green,
            ExportOutcome::Failed(_) => Color::Red,
        }
    }
}

/// Style of the "Generate PDF" button for the current dashboard state
pub fn export_button_style(snapshot: &DashboardSnapshot) -> Style {
    if snapshot.just_exported {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if snapshot.exporting {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if snapshot.can_export() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use product_viewer_core::DashboardState;

    #[test]
    fn test_load_phase_colors() {
        assert_eq!(LoadPhase::Loading.color(), Color::Cyan);
        assert_eq!(LoadPhase::Loaded.color(), Color::Green);
        assert_eq!(LoadPhase::LoadError.color(), Color::Red);
    }

    #[test]
    fn test_load_phase_symbol_and_color() {
        let (symbol, color) = LoadPhase::Loaded.symbol_and_color();
        assert_eq!(symbol, "●");
        assert_eq!(color, Color::Green);
    }

    #[test]
    fn test_error_category_colors() {
        assert_eq!(ErrorCategory::Network.color(), Color::Yellow);
        assert_eq!(ErrorCategory::Server.color(), Color::Red);
    }

    #[test]
    fn test_export_button_disabled_without_selection() {
        let snapshot = DashboardState::default().snapshot();
        assert_eq!(export_button_style(&snapshot), Style::default().fg(Color::DarkGray));
    }
}
