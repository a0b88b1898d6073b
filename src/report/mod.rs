//! Report rendering: one stored dataset -> a paginated PDF document.
//!
//! The document has four fixed sections in order: title + upload time,
//! summary statistics, equipment type distribution, and a per-row equipment
//! listing re-parsed from the stored raw blob. Layout is fixed (US Letter,
//! one-inch margins) and rendering is deterministic: the same dataset always
//! produces identical bytes.
//!
//! Rendering reads only the five required columns from each raw record and
//! ignores extra columns. It runs from a re-parse of the stored text, not
//! cached rows, so required columns are re-checked defensively even though a
//! persisted dataset passed validation at creation.

pub mod pdf;

use crate::error::{DatasetError, DatasetResult};
use crate::ingest;
use crate::ingest::schema::REQUIRED_COLUMNS;
use crate::types::{Dataset, RawTable};

use self::pdf::{Font, PAGE_HEIGHT, PageContent, PdfWriter};

const MARGIN: f64 = 72.0;
const TITLE_SIZE: f64 = 18.0;
const HEADING_SIZE: f64 = 12.0;
const BODY_SIZE: f64 = 10.0;
const TABLE_FONT_SIZE: f64 = 9.0;
const ROW_HEIGHT: f64 = 18.0;
const CELL_PAD: f64 = 4.0;
const HEADER_GRAY: f64 = 0.8;

// Column widths in points: 3in/2in for the metric tables, matching the
// original report's proportions for the five-column listing.
const TWO_COL_WIDTHS: [f64; 2] = [216.0, 144.0];
const DETAIL_WIDTHS: [f64; 5] = [108.0, 93.6, 72.0, 72.0, 57.6];
const DETAIL_LABELS: [&str; 5] = ["Name", "Type", "Flowrate", "Pressure", "Temp"];

/// Suggested download filename for a dataset report.
pub fn report_filename(name: &str) -> String {
    format!("{name}_report.pdf")
}

/// Re-parse a stored dataset's raw blob into rows.
///
/// Fails with a render error when the blob no longer parses. Detail views
/// and report rendering both run from this reconstruction.
pub fn reparse_stored_table(dataset: &Dataset) -> DatasetResult<RawTable> {
    ingest::parse_csv_text(&dataset.csv_file).map_err(|e| DatasetError::Render {
        message: format!(
            "stored CSV for dataset {} no longer parses: {e}",
            dataset.summary.id
        ),
    })
}

/// Render the full report document for one stored dataset.
pub fn render_report(dataset: &Dataset) -> DatasetResult<Vec<u8>> {
    let table = reparse_stored_table(dataset)?;

    let mut required_idx = Vec::with_capacity(REQUIRED_COLUMNS.len());
    for column in REQUIRED_COLUMNS {
        let idx = table
            .column_index(column)
            .ok_or_else(|| DatasetError::Render {
                message: format!(
                    "stored CSV for dataset {} is missing required column '{column}'",
                    dataset.summary.id
                ),
            })?;
        required_idx.push(idx);
    }

    let summary = &dataset.summary;
    let stats = &summary.stats;

    let mut doc = DocCursor::new();

    doc.text_line(
        Font::HelveticaBold,
        TITLE_SIZE,
        &format!("Equipment Data Report: {}", summary.name),
    );
    doc.gap(10.0);
    doc.text_line(
        Font::Helvetica,
        BODY_SIZE,
        &format!("Uploaded: {}", summary.uploaded_at.format("%Y-%m-%d %H:%M:%S")),
    );
    doc.gap(14.0);

    doc.heading("Summary Statistics");
    let summary_rows = [
        two_cells("Total Equipment Count", stats.total_count.to_string()),
        two_cells("Average Flowrate", format!("{:.2}", stats.avg_flowrate)),
        two_cells("Average Pressure", format!("{:.2}", stats.avg_pressure)),
        two_cells("Average Temperature", format!("{:.2}", stats.avg_temperature)),
    ];
    doc.table(&["Metric", "Value"], &TWO_COL_WIDTHS, &summary_rows);
    doc.gap(20.0);

    doc.heading("Equipment Type Distribution");
    let dist_rows: Vec<Vec<String>> = stats
        .type_distribution
        .iter()
        .map(|(label, count)| vec![label.clone(), count.to_string()])
        .collect();
    doc.table(&["Equipment Type", "Count"], &TWO_COL_WIDTHS, &dist_rows);
    doc.gap(20.0);

    doc.heading("Equipment Details");
    let detail_rows: Vec<Vec<String>> = table
        .rows()
        .map(|row| {
            required_idx
                .iter()
                .map(|&i| row.get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    doc.table(&DETAIL_LABELS, &DETAIL_WIDTHS, &detail_rows);

    Ok(doc.finish())
}

fn two_cells(label: &str, value: String) -> Vec<String> {
    vec![label.to_string(), value]
}

/// Tracks the current page and a top-down layout cursor.
struct DocCursor {
    writer: PdfWriter,
    page: PageContent,
    y: f64,
}

impl DocCursor {
    fn new() -> Self {
        Self {
            writer: PdfWriter::new(),
            page: PageContent::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn break_page(&mut self) {
        let page = std::mem::take(&mut self.page);
        self.writer.add_page(page);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < MARGIN {
            self.break_page();
        }
    }

    fn gap(&mut self, height: f64) {
        self.y -= height;
    }

    fn text_line(&mut self, font: Font, size: f64, text: &str) {
        self.ensure_room(size * 1.2);
        self.y -= size;
        self.page.text(font, size, MARGIN, self.y, text);
        self.y -= size * 0.2;
    }

    fn heading(&mut self, text: &str) {
        // Keep a heading attached to at least the first row of its table.
        self.ensure_room(HEADING_SIZE * 1.2 + 2.0 * ROW_HEIGHT);
        self.y -= HEADING_SIZE;
        self.page
            .text(Font::HelveticaBold, HEADING_SIZE, MARGIN, self.y, text);
        self.y -= 8.0;
    }

    /// Draw a table with a shaded header row. Rows that would cross the
    /// bottom margin start a new page, and the header row is repeated there.
    fn table(&mut self, columns: &[&str], widths: &[f64], rows: &[Vec<String>]) {
        debug_assert_eq!(columns.len(), widths.len());
        self.ensure_room(ROW_HEIGHT * 2.0);
        self.header_row(columns, widths);
        for row in rows {
            if self.y - ROW_HEIGHT < MARGIN {
                self.break_page();
                self.header_row(columns, widths);
            }
            self.row(row, widths, Font::Helvetica, None);
        }
    }

    fn header_row(&mut self, columns: &[&str], widths: &[f64]) {
        let labels: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        self.row(&labels, widths, Font::HelveticaBold, Some(HEADER_GRAY));
    }

    fn row(&mut self, cells: &[String], widths: &[f64], font: Font, fill: Option<f64>) {
        let bottom = self.y - ROW_HEIGHT;
        let mut x = MARGIN;
        for (cell, &width) in cells.iter().zip(widths) {
            if let Some(gray) = fill {
                self.page.fill_rect(x, bottom, width, ROW_HEIGHT, gray);
            }
            self.page.stroke_rect(x, bottom, width, ROW_HEIGHT);
            self.page.text(
                font,
                TABLE_FONT_SIZE,
                x + CELL_PAD,
                bottom + 5.5,
                &fit_cell(cell, width),
            );
            x += width;
        }
        self.y = bottom;
    }

    fn finish(mut self) -> Vec<u8> {
        if !self.page.is_empty() {
            let page = std::mem::take(&mut self.page);
            self.writer.add_page(page);
        }
        self.writer.finish()
    }
}

/// Truncate cell text that cannot fit its column at the table font size.
///
/// Width estimation uses a flat average glyph width; exact font metrics are
/// not worth carrying for a fixed layout.
fn fit_cell(text: &str, width: f64) -> String {
    let max_chars = ((width - 2.0 * CELL_PAD) / (TABLE_FONT_SIZE * 0.55)) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
