//! Dashboard component - search, category filter, selection and export
//!
//! Renders a [`DashboardSnapshot`] and turns key presses into actions. It
//! never changes dashboard state itself.

use crate::action::Action;
use crate::components::Component;
use crate::components::product_table::ProductTable;
use crate::ui_ext::{ErrorCategoryExt, ExportOutcomeExt, LoadPhaseExt, export_button_style};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use product_viewer_core::{
    DashboardSnapshot, DashboardState, ErrorCategory, ExportOutcome, LoadPhase, pluralize,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    Normal,
    /// Typing a search query
    Searching,
}

/// The product dashboard screen
pub struct DashboardComponent {
    snapshot: DashboardSnapshot,
    mode: Mode,
    search_input: String,
    table: ProductTable,
    /// Category of the last load error, if any
    error_category: Option<ErrorCategory>,
    /// Endpoint shown in the header
    endpoint: String,
}

impl DashboardComponent {
    pub fn new(endpoint: impl Into<String>, currency_symbol: impl Into<String>) -> Self {
        Self {
            snapshot: DashboardState::default().snapshot(),
            mode: Mode::Normal,
            search_input: String::new(),
            table: ProductTable::new(currency_symbol),
            error_category: None,
            endpoint: endpoint.into(),
        }
    }

    /// Replace the state being displayed
    pub fn set_snapshot(&mut self, snapshot: DashboardSnapshot) {
        if snapshot.phase != LoadPhase::Loaded && self.mode == Mode::Searching {
            self.mode = Mode::Normal;
        }
        if self.mode == Mode::Normal {
            self.search_input = snapshot.search.query.clone();
        }
        self.table.clamp(snapshot.filtered.len());
        self.snapshot = snapshot;
    }

    pub fn set_error_category(&mut self, category: Option<ErrorCategory>) {
        self.error_category = category;
    }

    /// Reset the cursor, e.g. after the catalog was replaced
    pub fn reset_cursor(&mut self) {
        self.table.reset();
    }

    fn is_loaded(&self) -> bool {
        self.snapshot.phase == LoadPhase::Loaded
    }

    fn search_changed(&mut self) -> Option<Action> {
        self.table.reset();
        Some(Action::SearchChanged(self.search_input.clone()))
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('r') => return Some(Action::Reload),
            _ => {}
        }

        // Everything else needs a loaded catalog
        if !self.is_loaded() {
            return None;
        }

        if self.table.handle_key(key, self.snapshot.filtered.len()) {
            return None;
        }

        match key.code {
            KeyCode::Char('/') => {
                self.mode = Mode::Searching;
                self.search_input = self.snapshot.search.query.clone();
                None
            }
            KeyCode::Esc if !self.snapshot.search.query.is_empty() => {
                self.search_input.clear();
                self.search_changed()
            }
            KeyCode::Char('c') => {
                self.table.reset();
                Some(Action::CycleCategory { forward: true })
            }
            KeyCode::Char('C') => {
                self.table.reset();
                Some(Action::CycleCategory { forward: false })
            }
            KeyCode::Char(' ') | KeyCode::Enter => self
                .table
                .current_id(&self.snapshot.filtered)
                .map(Action::ToggleProduct),
            KeyCode::Char('a') => Some(Action::ToggleSelectAll),
            KeyCode::Char('x') if !self.snapshot.selection.is_empty() => Some(Action::ClearSelection),
            KeyCode::Char('p') if self.snapshot.can_export() => Some(Action::Export),
            _ => None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc => {
                // Clear search and leave search mode
                self.mode = Mode::Normal;
                self.search_input.clear();
                self.search_changed()
            }
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                None
            }
            KeyCode::Backspace => {
                self.search_input.pop()?;
                self.search_changed()
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.search_changed()
            }
            _ => None,
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let snapshot = &self.snapshot;
        let (symbol, color) = snapshot.phase.symbol_and_color();

        let mut spans = vec![
            Span::styled("Product Viewer", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(" (", Style::default().fg(Color::DarkGray)),
            Span::raw(&self.endpoint),
            Span::styled(")", Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(format!("{} {}", symbol, snapshot.status), Style::default().fg(color)),
        ];

        if snapshot.phase == LoadPhase::Loaded {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                pluralize(snapshot.total, "product", "products"),
                Style::default().fg(Color::Cyan),
            ));
            if snapshot.is_filtering() {
                spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
                spans.push(Span::raw(format!(
                    "Showing {}",
                    pluralize(snapshot.filtered.len(), "product", "products")
                )));
            }
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                format!("Selected: {}", snapshot.selected_count()),
                Style::default().fg(Color::Magenta),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect) {
        let searching = self.mode == Mode::Searching;
        let mut spans = vec![
            Span::styled("Search: ", Style::default().add_modifier(Modifier::BOLD)),
        ];
        if self.search_input.is_empty() && !searching {
            spans.push(Span::styled("Search products...", Style::default().fg(Color::DarkGray)));
        } else {
            spans.push(Span::raw(&self.search_input));
        }
        if searching {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
        spans.push(Span::raw("   "));
        spans.push(Span::styled("Category: ", Style::default().add_modifier(Modifier::BOLD)));
        spans.push(Span::styled(
            format!("[{}]", self.snapshot.search.category.label()),
            Style::default().fg(Color::Cyan),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_action_bar(&self, frame: &mut Frame, area: Rect) {
        let snapshot = &self.snapshot;
        let checkbox = if snapshot.select_all_checked { "[x]" } else { "[ ]" };

        let mut spans = vec![
            Span::raw(format!("{} Select All", checkbox)),
            Span::raw("   "),
        ];

        let mut label = snapshot.export_label();
        if snapshot.just_exported {
            label = format!("✓ {}", label);
        }
        spans.push(Span::styled(format!(" {} ", label), export_button_style(snapshot)));

        if !snapshot.selection.is_empty() {
            spans.push(Span::raw("   "));
            spans.push(Span::styled("Clear Selection", Style::default().fg(Color::Yellow)));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let snapshot = &self.snapshot;

        let line = if let Some(error) = &snapshot.load_error {
            let category = self.error_category.unwrap_or(ErrorCategory::Other);
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", category.label()),
                    Style::default().fg(category.color()).add_modifier(Modifier::BOLD),
                ),
                Span::styled(error.as_str(), Style::default().fg(Color::Red)),
                Span::styled("  (r to retry)", Style::default().fg(Color::DarkGray)),
            ])
        } else if let Some(outcome) = &snapshot.last_export {
            let text = match outcome {
                ExportOutcome::Saved { path, count } => format!(
                    "Saved {} to {}",
                    pluralize(*count, "product", "products"),
                    path.display()
                ),
                ExportOutcome::Failed(error) => format!("Export failed: {}", error),
            };
            Line::from(Span::styled(text, Style::default().fg(outcome.color())))
        } else if snapshot.rejected > 0 {
            Line::from(Span::styled(
                format!("Skipped {} from the service", pluralize(snapshot.rejected, "invalid record", "invalid records")),
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::default()
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let key = |k: &'static str| Span::styled(k, Style::default().add_modifier(Modifier::BOLD));

        let line = if self.mode == Mode::Searching {
            Line::from(vec![
                key("[Enter]"),
                Span::raw(" keep "),
                key("[Esc]"),
                Span::raw(" clear"),
            ])
        } else {
            Line::from(vec![
                key("[/]"),
                Span::raw(" search "),
                key("[c]"),
                Span::raw(" category "),
                key("[space]"),
                Span::raw(" select "),
                key("[a]"),
                Span::raw(" all "),
                key("[x]"),
                Span::raw(" clear "),
                key("[p]"),
                Span::raw(" pdf "),
                key("[r]"),
                Span::raw(" reload "),
                key("[q]"),
                Span::raw(" quit"),
            ])
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Component for DashboardComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Searching => self.handle_search_key(key),
        })
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if !self.is_loaded() {
            return Ok(None);
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => self.table.select_next(self.snapshot.filtered.len()),
            MouseEventKind::ScrollUp => self.table.select_prev(),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, _action: Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Search bar
            Constraint::Length(1), // Action bar
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer
        ])
        .split(area);

        self.draw_header(frame, chunks[0]);
        self.draw_search_bar(frame, chunks[1]);
        self.draw_action_bar(frame, chunks[2]);

        let table_block = Block::default().borders(Borders::TOP);
        let table_area = table_block.inner(chunks[3]);
        frame.render_widget(table_block, chunks[3]);

        match self.snapshot.phase {
            LoadPhase::Loading if self.snapshot.total == 0 => {
                let loading =
                    Paragraph::new("Loading products...").style(Style::default().fg(Color::DarkGray));
                frame.render_widget(loading, table_area);
            }
            _ => self.table.draw(frame, table_area, &self.snapshot),
        }

        self.draw_status(frame, chunks[4]);
        self.draw_footer(frame, chunks[5]);
        Ok(())
    }
}
