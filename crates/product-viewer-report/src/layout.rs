//! Page layout for the product report
//!
//! Turns a [`ReportDocument`] into A4 pages of drawing operations. All
//! positions are in points, measured from the top-left corner of the page.
//! The renderer flips the y axis when writing PDF content.

use crate::document::{COLUMNS, ReportDocument};
use crate::metrics::{Font, fit_text, wrap_text};

const MM: f32 = 72.0 / 25.4;

pub const PAGE_WIDTH: f32 = 210.0 * MM;
pub const PAGE_HEIGHT: f32 = 297.0 * MM;

const MARGIN: f32 = 14.0 * MM;
const TITLE_X: f32 = 105.0 * MM;
const TITLE_BASELINE: f32 = 15.0 * MM;
const SUBTITLE_BASELINE: f32 = 22.0 * MM;
const RULE_Y: f32 = 26.0 * MM;
const RULE_WIDTH: f32 = 0.2 * MM;
const TABLE_TOP: f32 = 30.0 * MM;

const ROW_HEIGHT: f32 = 7.6 * MM;
const CELL_PADDING: f32 = 1.76 * MM;
const LINE_HEIGHT: f32 = BODY_SIZE * 1.15;
const COLUMN_WIDTHS: [f32; 4] = [83.0 * MM, 33.0 * MM, 33.0 * MM, 33.0 * MM];

const TITLE_SIZE: f32 = 22.0;
const SUBTITLE_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;

/// An RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const HEADER_FILL: Rgb = Rgb(15, 23, 42);
    pub const STRIPE: Rgb = Rgb(245, 245, 245);
    pub const BODY_TEXT: Rgb = Rgb(20, 20, 20);

    /// Components scaled to 0.0..=1.0
    pub fn components(&self) -> [f32; 3] {
        [self.0 as f32 / 255.0, self.1 as f32 / 255.0, self.2 as f32 / 255.0]
    }
}

/// A single drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Line {
        x1: f32,
        x2: f32,
        y: f32,
        width: f32,
        color: Rgb,
    },
    Text {
        x: f32,
        baseline: f32,
        font: Font,
        size: f32,
        color: Rgb,
        text: String,
    },
}

/// Column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

fn column_align(column: usize) -> Align {
    if column == 0 { Align::Left } else { Align::Center }
}

/// One laid-out page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPage {
    pub ops: Vec<DrawOp>,
    /// Indices of the document rows placed on this page
    pub rows: Vec<usize>,
}

impl LayoutPage {
    /// Text drawn on the page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Lay out the whole report
///
/// The title block is printed on the first page only; the table header row
/// repeats at the top of every page. Cell text wraps and a row grows to fit
/// its tallest cell; rows are never split across pages.
pub fn layout(doc: &ReportDocument) -> Vec<LayoutPage> {
    let mut pages = Vec::new();
    let mut page = LayoutPage::default();
    draw_title(&mut page, doc);
    let mut y = draw_header_row(&mut page, TABLE_TOP);

    for (index, row) in doc.rows.iter().enumerate() {
        let cells = wrap_cells(row.cells.iter().map(String::as_str), Font::Regular);
        let height = row_height(&cells);
        if y + height > PAGE_HEIGHT - MARGIN && !page.rows.is_empty() {
            pages.push(std::mem::take(&mut page));
            y = draw_header_row(&mut page, MARGIN);
        }
        draw_body_row(&mut page, &cells, index, y, height);
        page.rows.push(index);
        y += height;
    }

    pages.push(page);
    tracing::debug!("Laid out {} rows on {} pages", doc.rows.len(), pages.len());
    pages
}

fn draw_title(page: &mut LayoutPage, doc: &ReportDocument) {
    centered_text(page, &doc.title, Font::Bold, TITLE_SIZE, TITLE_BASELINE);
    centered_text(page, &doc.subtitle, Font::Regular, SUBTITLE_SIZE, SUBTITLE_BASELINE);
    page.ops.push(DrawOp::Line {
        x1: MARGIN,
        x2: PAGE_WIDTH - MARGIN,
        y: RULE_Y,
        width: RULE_WIDTH,
        color: Rgb::BLACK,
    });
}

fn centered_text(page: &mut LayoutPage, text: &str, font: Font, size: f32, baseline: f32) {
    let text = fit_text(text, font, size, PAGE_WIDTH - 2.0 * MARGIN);
    if text.is_empty() {
        return;
    }
    let x = TITLE_X - font.text_width(&text, size) / 2.0;
    page.ops.push(DrawOp::Text {
        x,
        baseline,
        font,
        size,
        color: Rgb::BLACK,
        text,
    });
}

/// Wrapped lines of each cell in a row
fn wrap_cells<'a>(cells: impl Iterator<Item = &'a str>, font: Font) -> Vec<Vec<String>> {
    cells
        .zip(COLUMN_WIDTHS)
        .map(|(cell, width)| wrap_text(cell, font, BODY_SIZE, width - 2.0 * CELL_PADDING))
        .collect()
}

/// Height of a row holding `cells`, never less than a single-line row
fn row_height(cells: &[Vec<String>]) -> f32 {
    let lines = cells.iter().map(Vec::len).max().unwrap_or(0);
    (lines as f32 * LINE_HEIGHT + 2.0 * CELL_PADDING).max(ROW_HEIGHT)
}

/// Draw the column header row at `top`, returning the y of the first body row
fn draw_header_row(page: &mut LayoutPage, top: f32) -> f32 {
    let cells = wrap_cells(COLUMNS.iter().copied(), Font::Bold);
    let height = row_height(&cells);
    page.ops.push(DrawOp::FillRect {
        x: MARGIN,
        y: top,
        width: PAGE_WIDTH - 2.0 * MARGIN,
        height,
        color: Rgb::HEADER_FILL,
    });
    draw_cells(page, &cells, top, height, Font::Bold, Rgb::WHITE);
    top + height
}

fn draw_body_row(page: &mut LayoutPage, cells: &[Vec<String>], index: usize, top: f32, height: f32) {
    if index % 2 == 0 {
        page.ops.push(DrawOp::FillRect {
            x: MARGIN,
            y: top,
            width: PAGE_WIDTH - 2.0 * MARGIN,
            height,
            color: Rgb::STRIPE,
        });
    }
    draw_cells(page, cells, top, height, Font::Regular, Rgb::BODY_TEXT);
}

/// Draw each cell's lines, vertically centred in the row
fn draw_cells(page: &mut LayoutPage, cells: &[Vec<String>], top: f32, height: f32, font: Font, color: Rgb) {
    let mut x = MARGIN;

    for (column, (lines, width)) in cells.iter().zip(COLUMN_WIDTHS).enumerate() {
        let block_top = top + (height - lines.len() as f32 * LINE_HEIGHT) / 2.0;
        for (line_index, text) in lines.iter().enumerate() {
            let baseline = block_top + (line_index as f32 + 0.5) * LINE_HEIGHT + BODY_SIZE * 0.35;
            let text_x = match column_align(column) {
                Align::Left => x + CELL_PADDING,
                Align::Center => x + (width - font.text_width(text, BODY_SIZE)) / 2.0,
            };
            page.ops.push(DrawOp::Text {
                x: text_x,
                baseline,
                font,
                size: BODY_SIZE,
                color,
                text: text.clone(),
            });
        }
        x += width;
    }
}
