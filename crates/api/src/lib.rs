//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - Report and export routes under `/api/v1`
//! - Bearer-credential middleware
//! - Error to JSON response mapping

pub mod error;
pub mod middleware;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::header::AUTHORIZATION;
use chrono::NaiveDate;
use leasebook_core::reports::ReportStore;
use leasebook_shared::ReportSettings;
use leasebook_shared::types::CurrencyFormat;
use tower_http::cors::{Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Report data source.
    pub store: Arc<dyn ReportStore>,
    /// Currency and calendar settings.
    pub settings: Arc<ReportSettings>,
    /// Upper bound on request handling time.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates state with the default 30 second request timeout.
    pub fn new(store: Arc<dyn ReportStore>, settings: ReportSettings) -> Self {
        Self {
            store,
            settings: Arc::new(settings),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Current date in the configured timezone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.settings.today()
    }

    /// Currency formatter for documents.
    #[must_use]
    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.settings.currency_symbol.clone())
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TimeoutLayer::new(state.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION]))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
