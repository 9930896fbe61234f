//! Paginated payment report.
//!
//! Layout happens first, as a page model in whole points measured from the
//! top-left corner. Rendering then maps that model onto `printpdf` pages.
//! Keeping the two apart lets pagination be tested without parsing PDFs.

use chrono::NaiveDate;
use leasebook_shared::types::CurrencyFormat;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Pt};
use rust_decimal::Decimal;

use super::error::ExportError;
use crate::lease::{PaymentLine, PaymentStatus};

/// US Letter width in points.
pub const PAGE_WIDTH: u16 = 612;
/// US Letter height in points.
pub const PAGE_HEIGHT: u16 = 792;
/// A line placed below this offset starts a new page.
pub const PAGE_BREAK_Y: u16 = 700;

const TITLE: &str = "Payment Report";
const TITLE_Y: u16 = 50;
const SUBTITLE_Y: u16 = 68;
const HEADER_Y: u16 = 95;
const FIRST_ROW_Y: u16 = 120;
const ROW_HEIGHT: u16 = 20;
const MARGIN_X: u16 = 50;
const COLUMN_X: [u16; 4] = [50, 220, 340, 460];
const COLUMN_HEADERS: [&str; 4] = ["Customer", "Due Date", "Amount", "Status"];
const TITLE_SIZE: u16 = 16;
const BODY_SIZE: u16 = 10;
const NAME_MAX_CHARS: usize = 30;

/// A run of text placed on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    /// The text.
    pub text: String,
    /// Left edge, points from the left.
    pub x: u16,
    /// Baseline, points from the top.
    pub y: u16,
    /// Font size in points.
    pub size: u16,
    /// Bold face.
    pub bold: bool,
}

impl TextItem {
    fn regular(text: impl Into<String>, x: u16, y: u16) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size: BODY_SIZE,
            bold: false,
        }
    }

    fn bold(text: impl Into<String>, x: u16, y: u16) -> Self {
        Self {
            bold: true,
            ..Self::regular(text, x, y)
        }
    }
}

/// One laid-out page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdfPage {
    /// Text in drawing order; the page header comes first.
    pub items: Vec<TextItem>,
}

/// Totals printed after the last payment row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentReportSummary {
    /// All payments.
    pub total_count: usize,
    /// Settled payments.
    pub paid_count: usize,
    /// Unpaid and past due.
    pub overdue_count: usize,
    /// Unpaid and not yet due.
    pub pending_count: usize,
    /// Sum of all amounts.
    pub total_amount: Decimal,
    /// Sum of settled amounts.
    pub paid_amount: Decimal,
    /// Total minus paid.
    pub remaining_amount: Decimal,
}

impl PaymentReportSummary {
    /// Tallies payment lines as of `today`.
    #[must_use]
    pub fn from_lines(lines: &[PaymentLine], today: NaiveDate) -> Self {
        let mut summary = Self::default();
        for line in lines {
            let payment = &line.payment;
            summary.total_count += 1;
            summary.total_amount += payment.amount;
            match payment.effective_status(today) {
                PaymentStatus::Paid => {
                    summary.paid_count += 1;
                    summary.paid_amount += payment.amount;
                }
                PaymentStatus::Overdue => summary.overdue_count += 1,
                PaymentStatus::Pending => summary.pending_count += 1,
            }
        }
        summary.remaining_amount = summary.total_amount - summary.paid_amount;
        summary
    }

    fn lines(&self, currency: &CurrencyFormat) -> Vec<String> {
        vec![
            format!("Total payments: {}", self.total_count),
            format!("Paid: {}", self.paid_count),
            format!("Overdue: {}", self.overdue_count),
            format!("Pending: {}", self.pending_count),
            format!("Total amount: {}", currency.format(self.total_amount)),
            format!("Paid amount: {}", currency.format(self.paid_amount)),
            format!("Remaining: {}", currency.format(self.remaining_amount)),
        ]
    }
}

/// The payment report, laid out into pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReportLayout {
    /// Pages in order; never empty.
    pub pages: Vec<PdfPage>,
    /// Number of leading items on every page that form the repeated header.
    pub header_len: usize,
    /// Totals printed at the end.
    pub summary: PaymentReportSummary,
}

impl PaymentReportLayout {
    /// Lays out payment lines, earliest due date first.
    #[must_use]
    pub fn build(lines: &[PaymentLine], today: NaiveDate, currency: &CurrencyFormat) -> Self {
        let header = page_header(today);
        let mut cursor = PageCursor::new(header.clone());

        let mut ordered: Vec<&PaymentLine> = lines.iter().collect();
        ordered.sort_by_key(|l| l.payment.due_date);

        for line in ordered {
            let payment = &line.payment;
            let y = cursor.next_line();
            let cells = [
                truncate(&line.customer_name, NAME_MAX_CHARS),
                payment.due_date.format("%Y-%m-%d").to_string(),
                currency.format(payment.amount),
                status_label(payment.effective_status(today)).to_string(),
            ];
            for (text, x) in cells.into_iter().zip(COLUMN_X) {
                cursor.push(TextItem::regular(text, x, y));
            }
        }

        let summary = PaymentReportSummary::from_lines(lines, today);
        cursor.skip_line();
        let y = cursor.next_line();
        cursor.push(TextItem::bold("Summary", MARGIN_X, y));
        for text in summary.lines(currency) {
            let y = cursor.next_line();
            cursor.push(TextItem::regular(text, MARGIN_X, y));
        }

        Self {
            pages: cursor.finish(),
            header_len: header.len(),
            summary,
        }
    }

    /// Renders the layout to PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Pdf` if a font cannot be registered or the
    /// document cannot be serialized.
    pub fn render(&self) -> Result<Vec<u8>, ExportError> {
        let width = Mm::from(Pt(f32::from(PAGE_WIDTH)));
        let height = Mm::from(Pt(f32::from(PAGE_HEIGHT)));

        let (doc, first_page, first_layer) = PdfDocument::new(TITLE, width, height, "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(format!("{e:?}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(format!("{e:?}")))?;

        let mut pages = self.pages.iter();
        if let Some(page) = pages.next() {
            let layer = doc.get_page(first_page).get_layer(first_layer);
            draw_page(&layer, page, &regular, &bold);
        }
        for page in pages {
            let (page_ref, layer_ref) = doc.add_page(width, height, "Layer 1");
            let layer = doc.get_page(page_ref).get_layer(layer_ref);
            draw_page(&layer, page, &regular, &bold);
        }

        doc.save_to_bytes()
            .map_err(|e| ExportError::Pdf(format!("{e:?}")))
    }
}

fn draw_page(layer: &PdfLayerReference, page: &PdfPage, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    for item in &page.items {
        let font = if item.bold { bold } else { regular };
        let x = Mm::from(Pt(f32::from(item.x)));
        let y = Mm::from(Pt(f32::from(PAGE_HEIGHT.saturating_sub(item.y))));
        layer.use_text(item.text.as_str(), f32::from(item.size), x, y, font);
    }
}

/// Tracks the vertical position and opens pages as lines overflow.
struct PageCursor {
    header: Vec<TextItem>,
    pages: Vec<PdfPage>,
    current: PdfPage,
    y: u16,
}

impl PageCursor {
    fn new(header: Vec<TextItem>) -> Self {
        Self {
            current: PdfPage {
                items: header.clone(),
            },
            header,
            pages: Vec::new(),
            y: FIRST_ROW_Y,
        }
    }

    /// Returns the baseline for the next line, breaking the page first when
    /// the cursor has passed the break offset.
    fn next_line(&mut self) -> u16 {
        if self.y > PAGE_BREAK_Y {
            let full = std::mem::replace(
                &mut self.current,
                PdfPage {
                    items: self.header.clone(),
                },
            );
            self.pages.push(full);
            self.y = FIRST_ROW_Y;
        }
        let y = self.y;
        self.y += ROW_HEIGHT;
        y
    }

    fn skip_line(&mut self) {
        self.y += ROW_HEIGHT;
    }

    fn push(&mut self, item: TextItem) {
        self.current.items.push(item);
    }

    fn finish(mut self) -> Vec<PdfPage> {
        self.pages.push(self.current);
        self.pages
    }
}

fn page_header(today: NaiveDate) -> Vec<TextItem> {
    let mut header = vec![
        TextItem {
            size: TITLE_SIZE,
            ..TextItem::bold(TITLE, MARGIN_X, TITLE_Y)
        },
        TextItem::regular(
            format!("Generated on {}", today.format("%Y-%m-%d")),
            MARGIN_X,
            SUBTITLE_Y,
        ),
    ];
    header.extend(
        COLUMN_HEADERS
            .into_iter()
            .zip(COLUMN_X)
            .map(|(text, x)| TextItem::bold(text, x, HEADER_Y)),
    );
    header
}

const fn status_label(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => "Paid",
        PaymentStatus::Overdue => "Overdue",
        PaymentStatus::Pending => "Pending",
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars - 3).collect();
        format!("{kept}...")
    }
}
