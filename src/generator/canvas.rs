// file: src/generator/canvas.rs
// description: flowing single-column page layout (cells, line breaks, wrapping) over lopdf
// reference: https://docs.rs/lopdf

use crate::error::{PipelineError, Result};
use crate::generator::fonts::{FontStyle, encode_win_ansi, text_width_pt};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};
use std::path::Path;

/// Points per millimetre.
const K: f32 = 72.0 / 25.4;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const AUTO_BREAK_MARGIN_MM: f32 = 15.0;
/// Horizontal padding inside a cell.
const CELL_PADDING_MM: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Cell {
    pub border: bool,
    pub fill: bool,
    pub align: Align,
    /// Move to the start of the next line afterwards.
    pub newline: bool,
}

impl Cell {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn line() -> Self {
        Self {
            newline: true,
            ..Self::default()
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }

    pub fn newline(mut self) -> Self {
        self.newline = true;
        self
    }
}

/// A text line placed on a page, kept for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub page: usize,
    pub text: String,
    pub style: FontStyle,
    pub size_pt: f32,
}

/// A4 portrait canvas measured in millimetres from the top-left corner.
pub struct PdfCanvas {
    pages: Vec<Vec<Operation>>,
    placed: Vec<PlacedText>,
    x: f32,
    y: f32,
    style: FontStyle,
    size_pt: f32,
    fill_gray: f32,
    last_height: f32,
    page_started: bool,
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfCanvas {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            placed: Vec::new(),
            x: MARGIN_MM,
            y: MARGIN_MM,
            style: FontStyle::Regular,
            size_pt: 12.0,
            fill_gray: 1.0,
            last_height: 0.0,
            page_started: false,
        }
    }

    pub fn add_page(&mut self) {
        self.pages.push(Vec::new());
        self.x = MARGIN_MM;
        self.y = MARGIN_MM;
        self.page_started = false;
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn placed_text(&self) -> &[PlacedText] {
        &self.placed
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.style = style;
        self.size_pt = size_pt;
    }

    /// Fill colour for subsequent filled cells as an 8-bit grey level.
    pub fn set_fill_gray(&mut self, level: u8) {
        self.fill_gray = level as f32 / 255.0;
    }

    fn content_width(&self) -> f32 {
        PAGE_WIDTH_MM - 2.0 * MARGIN_MM
    }

    fn text_width_mm(&self, text: &str) -> f32 {
        text_width_pt(text, self.style, self.size_pt) / K
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn break_page_if_needed(&mut self, height: f32) {
        if self.page_started && self.y + height > PAGE_HEIGHT_MM - AUTO_BREAK_MARGIN_MM {
            let x = self.x;
            self.add_page();
            self.x = x;
        }
    }

    /// Draw a single-line cell. Width 0 extends to the right margin.
    pub fn cell(&mut self, width: f32, height: f32, text: &str, cell: Cell) {
        self.break_page_if_needed(height);

        let width = if width <= 0.0 {
            PAGE_WIDTH_MM - MARGIN_MM - self.x
        } else {
            width
        };

        let (x, y) = (self.x, self.y);
        let fill = self.fill_gray;

        if cell.fill || cell.border {
            let paint = match (cell.fill, cell.border) {
                (true, true) => "B",
                (true, false) => "f",
                _ => "S",
            };
            let ops = self.ops();
            if cell.fill {
                ops.push(Operation::new("g", vec![Object::Real(fill)]));
            }
            ops.push(Operation::new(
                "re",
                vec![
                    Object::Real(x * K),
                    Object::Real((PAGE_HEIGHT_MM - y) * K),
                    Object::Real(width * K),
                    Object::Real(-height * K),
                ],
            ));
            ops.push(Operation::new(paint, vec![]));
        }

        if !text.is_empty() {
            let text_width = self.text_width_mm(text);
            let dx = match cell.align {
                Align::Left => CELL_PADDING_MM,
                Align::Right => width - CELL_PADDING_MM - text_width,
                Align::Center => (width - text_width) / 2.0,
            };
            let baseline = y + 0.5 * height + 0.3 * self.size_pt / K;
            let (style, size) = (self.style, self.size_pt);
            let page = self.pages.len().max(1);

            let ops = self.ops();
            ops.push(Operation::new("g", vec![Object::Real(0.0)]));
            ops.push(Operation::new("BT", vec![]));
            ops.push(Operation::new(
                "Tf",
                vec![style.resource_name().into(), Object::Real(size)],
            ));
            ops.push(Operation::new(
                "Td",
                vec![
                    Object::Real((x + dx) * K),
                    Object::Real((PAGE_HEIGHT_MM - baseline) * K),
                ],
            ));
            ops.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_win_ansi(text))],
            ));
            ops.push(Operation::new("ET", vec![]));

            self.placed.push(PlacedText {
                page,
                text: text.to_string(),
                style,
                size_pt: size,
            });
        }

        self.page_started = true;
        self.last_height = height;

        if cell.newline {
            self.x = MARGIN_MM;
            self.y += height;
        } else {
            self.x += width;
        }
    }

    /// Line break of `height`, or of the last cell height when `None`.
    pub fn ln(&mut self, height: Option<f32>) {
        self.x = MARGIN_MM;
        self.y += height.unwrap_or(self.last_height);
    }

    /// Word-wrapped paragraph, one cell per line. Width 0 spans the page.
    pub fn multi_cell(&mut self, width: f32, line_height: f32, text: &str) {
        let width = if width <= 0.0 {
            PAGE_WIDTH_MM - MARGIN_MM - self.x
        } else {
            width
        };

        for line in self.wrap(text, width - 2.0 * CELL_PADDING_MM) {
            let x = self.x;
            self.cell(width, line_height, &line, Cell::plain());
            self.x = x;
            self.y += line_height;
        }
        self.x = MARGIN_MM;
    }

    /// Greedy word wrap against the current font.
    pub fn wrap(&self, text: &str, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if self.text_width_mm(&candidate) <= max_width || current.is_empty() {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Assemble the pdf document with the three Helvetica faces.
    pub fn into_document(self) -> Result<Document> {
        if self.pages.is_empty() {
            return Err(PipelineError::Generation(
                "Cannot render a document without pages".to_string(),
            ));
        }

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for style in FontStyle::ALL {
            let font_id = doc.add_object(Dictionary::from_iter(vec![
                ("Type", "Font".into()),
                ("Subtype", "Type1".into()),
                ("BaseFont", style.base_font().into()),
                ("Encoding", "WinAnsiEncoding".into()),
            ]));
            fonts.set(style.resource_name(), font_id);
        }
        let resources_id = doc.add_object(Dictionary::from_iter(vec![("Font", fonts.into())]));

        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            Object::Real(PAGE_WIDTH_MM * K),
            Object::Real(PAGE_HEIGHT_MM * K),
        ];

        let mut kids = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
            let page_id = doc.add_object(Dictionary::from_iter(vec![
                ("Type", "Page".into()),
                ("Parent", pages_id.into()),
                ("Contents", content_id.into()),
                ("Resources", resources_id.into()),
                ("MediaBox", media_box.clone().into()),
            ]));
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        let pages = Dictionary::from_iter(vec![
            ("Type", "Pages".into()),
            ("Kids", kids.into()),
            ("Count", count.into()),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", "Catalog".into()),
            ("Pages", pages_id.into()),
        ]));
        doc.trailer.set("Root", catalog_id);

        Ok(doc)
    }

    pub fn to_bytes(self) -> Result<Vec<u8>> {
        let mut doc = self.into_document()?;
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }

    pub fn save(self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_advances_cursor() {
        let mut canvas = PdfCanvas::new();
        canvas.add_page();
        canvas.set_font(FontStyle::Regular, 10.0);

        canvas.cell(80.0, 7.0, "Description", Cell::plain().bordered());
        assert_eq!(canvas.position(), (90.0, 10.0));

        canvas.cell(45.0, 7.0, "Total", Cell::line().align(Align::Right));
        assert_eq!(canvas.position(), (10.0, 17.0));

        canvas.ln(Some(5.0));
        assert_eq!(canvas.position(), (10.0, 22.0));
    }

    #[test]
    fn test_ln_defaults_to_last_height() {
        let mut canvas = PdfCanvas::new();
        canvas.add_page();
        canvas.cell(50.0, 8.0, "Label:", Cell::plain());
        canvas.ln(None);
        assert_eq!(canvas.position(), (10.0, 18.0));
    }

    #[test]
    fn test_auto_page_break() {
        let mut canvas = PdfCanvas::new();
        canvas.add_page();
        for i in 0..40 {
            canvas.cell(0.0, 10.0, &format!("line {}", i), Cell::line());
        }
        assert!(canvas.page_count() >= 2);
        let last = canvas.placed_text().last().unwrap();
        assert_eq!(last.page, canvas.page_count());
    }

    #[test]
    fn test_wrap_respects_width() {
        let mut canvas = PdfCanvas::new();
        canvas.set_font(FontStyle::Regular, 9.0);
        let text = "1. GRANT OF LICENSE: Licensor hereby grants to Licensee a non-exclusive license to distribute the Licensed Content in the Territory.";
        let lines = canvas.wrap(text, 60.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), text);
        canvas.add_page();
        for line in &lines {
            assert!(canvas.text_width_mm(line) <= 60.0);
        }
    }

    #[test]
    fn test_render_roundtrips_through_lopdf() {
        let mut canvas = PdfCanvas::new();
        canvas.add_page();
        canvas.set_font(FontStyle::Bold, 24.0);
        canvas.cell(0.0, 15.0, "INVOICE", Cell::line().align(Align::Center));
        canvas.set_fill_gray(240);
        canvas.cell(80.0, 8.0, "Description", Cell::plain().bordered().filled());

        let bytes = canvas.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[test]
    fn test_empty_canvas_is_an_error() {
        assert!(PdfCanvas::new().to_bytes().is_err());
    }
}
