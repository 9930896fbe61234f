//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed credential.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// A filter parameter could not be understood.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Request body failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A data-store query failed while building a report.
    #[error("Query failed during {operation}: {message}")]
    QueryFailure {
        /// Report operation that was running.
        operation: String,
        /// Underlying store message.
        message: String,
    },

    /// Document generation or streaming failed.
    #[error("Export failed: {0}")]
    ExportFailure(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::InvalidFilter(_) | Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::QueryFailure { .. } | Self::ExportFailure(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidFilter(_) => "INVALID_FILTER",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::QueryFailure { .. } | Self::ExportFailure(_) | Self::Internal(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Returns true when the error is a server-side failure whose detail
    /// must stay out of the response body.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }

    /// Returns the message safe to show to a caller.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.is_internal() {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
