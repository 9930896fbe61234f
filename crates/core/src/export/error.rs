//! Export error types.

use leasebook_shared::AppError;
use thiserror::Error;

/// Errors that can occur while rendering a document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The spreadsheet writer failed.
    #[error("Spreadsheet generation failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// The PDF writer failed.
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        Self::ExportFailure(err.to_string())
    }
}
