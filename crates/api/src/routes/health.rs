//! Liveness endpoint, reachable without a bearer token.

use axum::{Json, Router, extract::State, routing::get};
use chrono::NaiveDate;
use serde::Serialize;

use crate::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `healthy` when the process answers.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Zone whose calendar decides what is overdue.
    pub timezone: String,
    /// Current date in that zone.
    pub today: NaiveDate,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timezone: state.settings.timezone.clone(),
        today: state.today(),
    })
}

/// Public routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
