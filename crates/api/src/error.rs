//! Error to HTTP response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use leasebook_core::export::ExportError;
use leasebook_core::reports::ReportError;
use leasebook_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// An [`AppError`] on its way out of a handler.
///
/// Server-side failures are logged with full detail and answered with a
/// generic message; client errors carry their message back.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if err.is_internal() {
            error!(error = %err, code = err.error_code(), "Request failed");
        } else {
            warn!(error = %err, code = err.error_code(), "Request rejected");
        }

        (
            status,
            Json(json!({
                "error": err.error_code(),
                "message": err.public_message(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        Self(err.into())
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self(err.into())
    }
}
