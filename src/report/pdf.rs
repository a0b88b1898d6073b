//! Minimal fixed-layout PDF writer.
//!
//! Emits an uncompressed PDF 1.4 document: one content stream per page,
//! built-in Type1 Helvetica fonts, and an explicit cross-reference table.
//! No creation metadata is written, so identical drawing operations always
//! produce identical bytes.
//!
//! This is intentionally a small subset of the format, just enough for the
//! text-and-grid tables the report layout draws.

use std::fmt::Write as _;

/// Page width in points (US Letter).
pub const PAGE_WIDTH: f64 = 612.0;
/// Page height in points (US Letter).
pub const PAGE_HEIGHT: f64 = 792.0;

/// Built-in Type1 fonts available to content streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// Regular body font.
    Helvetica,
    /// Bold variant for titles and table headers.
    HelveticaBold,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }
}

/// Drawing operations for one page, in PDF user space (origin bottom-left).
#[derive(Debug, Default, Clone)]
pub struct PageContent {
    ops: String,
}

impl PageContent {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if nothing has been drawn on this page.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Draw `text` with its baseline starting at `(x, y)`.
    pub fn text(&mut self, font: Font, size: f64, x: f64, y: f64, text: &str) {
        let _ = writeln!(
            self.ops,
            "BT /{} {size:.2} Tf 1 0 0 1 {x:.2} {y:.2} Tm ({}) Tj ET",
            font.resource_name(),
            escape_text(text),
        );
    }

    /// Stroke a straight line from `(x1, y1)` to `(x2, y2)`.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let _ = writeln!(self.ops, "{x1:.2} {y1:.2} m {x2:.2} {y2:.2} l S");
    }

    /// Stroke a rectangle with corner `(x, y)` (bottom-left) and size `w` x `h`.
    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let _ = writeln!(self.ops, "{x:.2} {y:.2} {w:.2} {h:.2} re S");
    }

    /// Fill a rectangle with a grayscale level (`0.0` black to `1.0` white).
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, gray: f64) {
        let _ = writeln!(self.ops, "{gray:.2} g {x:.2} {y:.2} {w:.2} {h:.2} re f 0 g");
    }
}

/// Assembles finished pages into the final document bytes.
#[derive(Debug, Default)]
pub struct PdfWriter {
    pages: Vec<PageContent>,
}

impl PdfWriter {
    /// Create a writer with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished page.
    pub fn add_page(&mut self, page: PageContent) {
        self.pages.push(page);
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize the document.
    ///
    /// Object layout: 1 catalog, 2 page tree, 3/4 fonts, then one page
    /// object and one content stream per page. Offsets in the xref table are
    /// exact byte positions, so the output is valid for strict readers.
    pub fn finish(self) -> Vec<u8> {
        let total_objects = 4 + 2 * self.pages.len();
        let mut buf: Vec<u8> = Vec::new();
        let mut offsets = vec![0usize; total_objects + 1];

        buf.extend_from_slice(b"%PDF-1.4\n%\xc7\xec\x8f\xa2\n");

        let kids = (0..self.pages.len())
            .map(|i| format!("{} 0 R", 5 + 2 * i))
            .collect::<Vec<_>>()
            .join(" ");

        push_object(
            &mut buf,
            &mut offsets,
            1,
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        );
        push_object(
            &mut buf,
            &mut offsets,
            2,
            format!(
                "<< /Type /Pages /Kids [{kids}] /Count {} >>",
                self.pages.len()
            ),
        );
        push_object(
            &mut buf,
            &mut offsets,
            3,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        );
        push_object(
            &mut buf,
            &mut offsets,
            4,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string(),
        );

        for (i, page) in self.pages.iter().enumerate() {
            let page_id = 5 + 2 * i;
            let content_id = page_id + 1;
            push_object(
                &mut buf,
                &mut offsets,
                page_id,
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH:.0} {PAGE_HEIGHT:.0}] \
                     /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {content_id} 0 R >>"
                ),
            );

            offsets[content_id] = buf.len();
            let stream = page.ops.as_str();
            buf.extend_from_slice(
                format!(
                    "{content_id} 0 obj\n<< /Length {} >>\nstream\n{stream}endstream\nendobj\n",
                    stream.len()
                )
                .as_bytes(),
            );
        }

        let xref_offset = buf.len();
        buf.extend_from_slice(format!("xref\n0 {}\n", total_objects + 1).as_bytes());
        buf.extend_from_slice(b"0000000000 65535 f \n");
        for id in 1..=total_objects {
            buf.extend_from_slice(format!("{:010} 00000 n \n", offsets[id]).as_bytes());
        }
        buf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
                total_objects + 1
            )
            .as_bytes(),
        );

        buf
    }
}

fn push_object(buf: &mut Vec<u8>, offsets: &mut [usize], id: usize, body: String) {
    offsets[id] = buf.len();
    buf.extend_from_slice(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
}

/// Escape a string for use inside a PDF literal string `(...)`.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
