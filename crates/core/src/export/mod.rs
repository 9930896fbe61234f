//! Document export.
//!
//! - `spreadsheet` - customer workbook (`customers.xlsx`)
//! - `pdf` - paginated payment report (`payment_report.pdf`)
//!
//! Both exporters are synchronous and build the whole document in memory.

pub mod error;
pub mod pdf;
pub mod spreadsheet;

pub use error::ExportError;
pub use pdf::{PaymentReportLayout, PaymentReportSummary};
pub use spreadsheet::{CustomerSheet, CustomerSheetRow};

/// File name of the customer spreadsheet.
pub const CUSTOMERS_XLSX: &str = "customers.xlsx";

/// File name of the payment report.
pub const PAYMENT_REPORT_PDF: &str = "payment_report.pdf";

/// MIME type of `.xlsx` files.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// MIME type of PDF files.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
