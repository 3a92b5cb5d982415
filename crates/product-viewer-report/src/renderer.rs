//! PDF output via `lopdf`
//!
//! Builds the document's object graph in memory from laid-out pages and
//! serializes it. Page content streams are Flate-compressed.

use crate::error::ReportError;
use crate::layout::{DrawOp, LayoutPage, PAGE_HEIGHT, PAGE_WIDTH, Rgb};
use crate::metrics::Font;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::io::Write;

/// In-memory PDF builder
pub struct PdfRenderer {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfRenderer {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for font in [Font::Regular, Font::Bold] {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        document
            .objects
            .insert(resources_id, Object::Dictionary(dictionary! { "Font" => fonts }));

        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
        }
    }

    /// Append one laid-out page
    pub fn add_page(&mut self, page: &LayoutPage) -> Result<(), ReportError> {
        let content: Content = Content {
            operations: page.ops.iter().flat_map(operations).collect(),
        };

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content.encode()?)?;
        let compressed = encoder.finish()?;
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed));

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Write the page tree and catalog, then serialize
    pub fn finish(mut self) -> Result<Vec<u8>, ReportError> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Render all pages to PDF bytes
pub fn render(pages: &[LayoutPage]) -> Result<Vec<u8>, ReportError> {
    let mut renderer = PdfRenderer::new();
    for page in pages {
        renderer.add_page(page)?;
    }
    renderer.finish()
}

/// Flip a top-down y coordinate into PDF user space
fn flip(y: f32) -> f32 {
    PAGE_HEIGHT - y
}

fn color_operands(color: Rgb) -> Vec<Object> {
    color.components().into_iter().map(Object::from).collect()
}

fn operations(op: &DrawOp) -> Vec<Operation> {
    match op {
        DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        } => vec![
            Operation::new("rg", color_operands(*color)),
            Operation::new(
                "re",
                vec![(*x).into(), flip(y + height).into(), (*width).into(), (*height).into()],
            ),
            Operation::new("f", vec![]),
        ],
        DrawOp::Line {
            x1,
            x2,
            y,
            width,
            color,
        } => vec![
            Operation::new("w", vec![(*width).into()]),
            Operation::new("RG", color_operands(*color)),
            Operation::new("m", vec![(*x1).into(), flip(*y).into()]),
            Operation::new("l", vec![(*x2).into(), flip(*y).into()]),
            Operation::new("S", vec![]),
        ],
        DrawOp::Text {
            x,
            baseline,
            font,
            size,
            color,
            text,
        } => vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(font.resource_name().as_bytes().to_vec()), (*size).into()],
            ),
            Operation::new("rg", color_operands(*color)),
            Operation::new("Td", vec![(*x).into(), flip(*baseline).into()]),
            Operation::new(
                "Tj",
                vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ],
    }
}

/// Encode text for a WinAnsi font; characters beyond Latin-1 become '?'
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if (c as u32) <= 255 { c as u8 } else { b'?' })
        .collect()
}
