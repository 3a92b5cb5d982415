//! Product table - checkbox list of the filtered catalog

use catalog_rs::{Product, ProductId};
use crossterm::event::{KeyCode, KeyEvent};
use product_viewer_core::{Cursor, DashboardSnapshot, format_rate, truncate_string};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

const NAME_WIDTH: usize = 40;

/// Table of the filtered products with a row cursor
pub struct ProductTable {
    cursor: Cursor,
    table_state: TableState,
    /// Rows visible in the last drawn frame
    page_size: usize,
    currency_symbol: String,
}

impl ProductTable {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            cursor: Cursor::default(),
            table_state,
            page_size: 10,
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor.index()
    }

    /// Product under the cursor
    pub fn current<'a>(&self, products: &'a [Product]) -> Option<&'a Product> {
        products.get(self.cursor.index())
    }

    pub fn current_id(&self, products: &[Product]) -> Option<ProductId> {
        self.current(products).map(|p| p.id.clone())
    }

    /// Move the cursor back to the first row
    pub fn reset(&mut self) {
        self.cursor.first();
        self.sync_state();
    }

    /// Keep the cursor inside a list that may have changed length
    pub fn clamp(&mut self, len: usize) {
        self.cursor.clamp(len);
        self.sync_state();
    }

    pub fn select_next(&mut self, len: usize) {
        self.cursor.next(len);
        self.sync_state();
    }

    pub fn select_prev(&mut self) {
        self.cursor.prev();
        self.sync_state();
    }

    /// Handle a navigation key; returns whether it was consumed
    pub fn handle_key(&mut self, key: KeyEvent, len: usize) -> bool {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.cursor.next(len),
            KeyCode::Char('k') | KeyCode::Up => self.cursor.prev(),
            KeyCode::Char('g') | KeyCode::Home => self.cursor.first(),
            KeyCode::Char('G') | KeyCode::End => self.cursor.last(len),
            KeyCode::PageUp => self.cursor.page_up(self.page_size),
            KeyCode::PageDown => self.cursor.page_down(self.page_size, len),
            _ => return false,
        }
        self.sync_state();
        true
    }

    fn sync_state(&mut self) {
        self.table_state.select(Some(self.cursor.index()));
    }

    fn checkbox(checked: bool) -> &'static str {
        if checked { "[x]" } else { "[ ]" }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, snapshot: &DashboardSnapshot) {
        if snapshot.filtered.is_empty() {
            Self::draw_empty(frame, area);
            return;
        }

        // header + bottom margin
        self.page_size = (area.height as usize).saturating_sub(2).max(1);
        self.clamp(snapshot.filtered.len());

        let rows: Vec<Row> = snapshot
            .filtered
            .iter()
            .map(|product| {
                let selected = snapshot.is_selected(&product.id);
                let style = if selected {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(Self::checkbox(selected)),
                    Cell::from(truncate_string(&product.product_name, NAME_WIDTH)),
                    Cell::from(product.category.clone()).style(Style::default().fg(Color::DarkGray)),
                    Cell::from(product.size.clone()),
                    Cell::from(product.per_unit.clone()),
                    Cell::from(
                        Line::from(format_rate(product.rate, &self.currency_symbol)).alignment(Alignment::Right),
                    ),
                ])
                .style(style)
            })
            .collect();

        let header = Row::new(vec![
            Cell::from(Self::checkbox(snapshot.select_all_checked)),
            Cell::from("NAME"),
            Cell::from("CATEGORY"),
            Cell::from("SIZE"),
            Cell::from("UNIT"),
            Cell::from(Line::from("RATE").alignment(Alignment::Right)),
        ])
        .style(Style::default().add_modifier(Modifier::DIM))
        .bottom_margin(1);

        let widths = [
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Min(12),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_empty(frame: &mut Frame, area: Rect) {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(area);

        let text = vec![
            Line::from(Span::styled(
                "No products found",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Try adjusting your search criteria",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), middle);
    }
}
