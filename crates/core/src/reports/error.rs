//! Report error types.

use leasebook_shared::AppError;
use leasebook_shared::types::CustomerId;
use thiserror::Error;

/// Errors that can occur while building a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A filter parameter was malformed or out of range.
    #[error("Invalid {field}: {reason}")]
    InvalidFilter {
        /// Parameter name as the client sent it.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The data store rejected or failed a query.
    #[error("Query failed during {operation}: {message}")]
    QueryFailure {
        /// Report operation that was running.
        operation: &'static str,
        /// Underlying store message.
        message: String,
    },

    /// Customer not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),
}

impl ReportError {
    /// Builds an `InvalidFilter` error.
    pub fn invalid_filter(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFilter {
            field,
            reason: reason.into(),
        }
    }

    /// Wraps a store error as a `QueryFailure` for `operation`.
    pub fn query(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::QueryFailure {
            operation,
            message: err.to_string(),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidFilter { .. } => Self::InvalidFilter(err.to_string()),
            ReportError::QueryFailure { operation, message } => Self::QueryFailure {
                operation: operation.to_string(),
                message,
            },
            ReportError::CustomerNotFound(_) => Self::NotFound(err.to_string()),
        }
    }
}
