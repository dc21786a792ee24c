//! PDF rendering of a [`Report`] through printpdf.
//!
//! A4 portrait, built-in Helvetica, a title line and a five-column table
//! whose header is repeated on every page.

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use tracing::debug;

use crate::error::{AgendaError, AgendaResult};
use crate::report::Report;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_BOTTOM: f32 = 15.0;

const TITLE_SIZE: f32 = 20.0;
const TITLE_TOP: f32 = 22.0;
const MESSAGE_SIZE: f32 = 12.0;
const MESSAGE_TOP: f32 = 35.0;

const TABLE_TOP: f32 = 30.0;
const TABLE_SIZE: f32 = 9.0;
const ROW_HEIGHT: f32 = 6.0;
const CELL_PADDING: f32 = 1.5;

/// Column widths in mm, in header order.
const COLUMN_WIDTHS: [f32; 5] = [22.0, 18.0, 42.0, 60.0, 40.0];

/// Rough Helvetica advance per character, in em.
const AVG_CHAR_EM: f32 = 0.52;
const PT_TO_MM: f32 = 0.352_778;

const LAYER: &str = "Layer 1";

/// Render `report` into PDF bytes.
pub fn render(report: &Report) -> AgendaResult<Vec<u8>> {
    let (doc, layout) = lay_out(report)?;
    debug!(rows = report.rows.len(), pages = layout.pages, "laid out report");
    doc.save_to_bytes().map_err(pdf_error)
}

/// Page and header counts of a laid out report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    pages: usize,
    header_rows: usize,
}

fn lay_out(report: &Report) -> AgendaResult<(PdfDocumentReference, Layout)> {
    let (doc, page, layer) = PdfDocument::new(
        report.title.as_str(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        LAYER,
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

    let first = doc.get_page(page).get_layer(layer);
    first.use_text(
        report.title.as_str(),
        TITLE_SIZE,
        Mm(MARGIN_LEFT),
        from_top(TITLE_TOP),
        &bold,
    );

    let layout = if report.is_empty() {
        first.use_text(
            report.empty_message(),
            MESSAGE_SIZE,
            Mm(MARGIN_LEFT),
            from_top(MESSAGE_TOP),
            &regular,
        );
        Layout {
            pages: 1,
            header_rows: 0,
        }
    } else {
        let mut table = TableWriter {
            doc: &doc,
            layer: first,
            regular: &regular,
            bold: &bold,
            y: PAGE_HEIGHT - TABLE_TOP,
            layout: Layout {
                pages: 1,
                header_rows: 0,
            },
        };
        table.header(&report.header());
        for row in &report.rows {
            table.row(&row.cells());
        }
        table.layout
    };

    Ok((doc, layout))
}

struct TableWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    /// Baseline of the next row, in mm from the bottom edge
    y: f32,
    layout: Layout,
}

impl TableWriter<'_> {
    fn header(&mut self, cells: &[&str; 5]) {
        self.write_cells(cells, true);
        self.rule(self.y + ROW_HEIGHT - 1.5);
        self.layout.header_rows += 1;
    }

    fn row(&mut self, cells: &[&str; 5]) {
        if self.y < MARGIN_BOTTOM {
            self.new_page();
        }
        self.write_cells(cells, false);
    }

    fn write_cells(&mut self, cells: &[&str; 5], header: bool) {
        let font = if header { self.bold } else { self.regular };
        let mut x = MARGIN_LEFT;

        for (text, width) in cells.iter().zip(COLUMN_WIDTHS) {
            let text = fit_to_width(text, width - 2.0 * CELL_PADDING, TABLE_SIZE);
            self.layer
                .use_text(text, TABLE_SIZE, Mm(x + CELL_PADDING), Mm(self.y), font);
            x += width;
        }
        self.y -= ROW_HEIGHT;
    }

    fn rule(&self, y: f32) {
        let right = MARGIN_LEFT + COLUMN_WIDTHS.iter().sum::<f32>();
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN_LEFT), Mm(y)), false),
                (Point::new(Mm(right), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - TABLE_TOP;
        self.layout.pages += 1;
        self.header(&crate::report::REPORT_HEADER);
    }
}

fn from_top(mm: f32) -> Mm {
    Mm(PAGE_HEIGHT - mm)
}

/// Truncate `text` with an ellipsis so it fits in `width` mm at `size` pt.
fn fit_to_width(text: &str, width: f32, size: f32) -> String {
    let char_width = size * AVG_CHAR_EM * PT_TO_MM;
    let max_chars = (width / char_width).floor().max(1.0) as usize;

    // Line breaks would end the text run early
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    if flat.chars().count() <= max_chars {
        flat
    } else {
        let kept: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept.trim_end())
    }
}

fn pdf_error(e: printpdf::Error) -> AgendaError {
    AgendaError::Report(e.to_string())
}
