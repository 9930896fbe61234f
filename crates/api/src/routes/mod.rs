//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod exports;
pub mod health;
pub mod reports;

/// Creates the API router: public health check plus the protected report
/// and export routes.
pub fn api_routes() -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(reports::routes())
        .merge(exports::routes())
        .layer(middleware::from_fn(auth_middleware));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}
