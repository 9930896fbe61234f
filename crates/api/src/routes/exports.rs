//! Document export routes.
//!
//! Documents are rendered on the blocking pool and sent as attachments. If
//! the client disconnects, the response future is dropped and the rendered
//! buffer with it.

use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use leasebook_core::export::{
    CUSTOMERS_XLSX, CustomerSheet, PAYMENT_REPORT_PDF, PDF_CONTENT_TYPE, PaymentReportLayout,
    XLSX_CONTENT_TYPE,
};
use leasebook_shared::AppError;
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the export routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/export/customers/excel", get(export_customers_excel))
        .route("/export/payments/pdf", get(export_payments_pdf))
}

/// GET /export/customers/excel
async fn export_customers_excel(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response, ApiError> {
    let ledgers = state.store.customers_with_payments().await?;
    let customers = ledgers.len();

    let bytes = tokio::task::spawn_blocking(move || CustomerSheet::build(&ledgers).render())
        .await
        .map_err(|e| AppError::Internal(format!("spreadsheet task failed: {e}")))??;

    info!(
        user = %user.fingerprint(),
        customers,
        bytes = bytes.len(),
        "Customer spreadsheet exported"
    );

    Ok(attachment(XLSX_CONTENT_TYPE, CUSTOMERS_XLSX, bytes))
}

/// GET /export/payments/pdf
async fn export_payments_pdf(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Response, ApiError> {
    let lines = state.store.payments_with_customers().await?;
    let today = state.today();
    let currency = state.currency();

    let (bytes, pages, payments) = tokio::task::spawn_blocking(move || {
        let layout = PaymentReportLayout::build(&lines, today, &currency);
        layout
            .render()
            .map(|bytes| (bytes, layout.pages.len(), layout.summary.total_count))
    })
    .await
    .map_err(|e| AppError::Internal(format!("pdf task failed: {e}")))??;

    info!(
        user = %user.fingerprint(),
        payments,
        pages,
        bytes = bytes.len(),
        "Payment report exported"
    );

    Ok(attachment(PDF_CONTENT_TYPE, PAYMENT_REPORT_PDF, bytes))
}

fn attachment(content_type: &str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
#[path = "exports_tests.rs"]
mod tests;
