//! Report routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::{get, post},
};
use leasebook_core::filter::{CustomerQuery, PaymentQuery};
use leasebook_core::reports::{
    CarBrandBucket, CustomerHistory, CustomerReportRow, DashboardStats, FilteredPayment,
    FinancialSummary, MonthlyBucket, ProfitOverride,
};
use leasebook_shared::AppError;
use leasebook_shared::types::CustomerId;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/monthly", get(get_monthly))
        .route("/customers", get(get_customers))
        .route("/car-brands", get(get_car_brands))
        .route("/filtered", get(get_filtered))
        .route("/customer/{customer_id}/history", get(get_customer_history))
        .route("/dashboard", get(get_dashboard))
        .route("/update-profit", post(update_profit))
}

// ============================================================================
// Request Types
// ============================================================================

/// Body of `POST /update-profit`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitUpdate {
    /// Profit figure computed by the client.
    pub total_profit: Decimal,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /summary
async fn get_summary(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<FinancialSummary>, ApiError> {
    Ok(Json(state.store.summary(state.today()).await?))
}

/// GET /monthly
async fn get_monthly(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<MonthlyBucket>>, ApiError> {
    Ok(Json(state.store.monthly(state.today()).await?))
}

/// GET /customers?status=&search=&car_brand=&startDate=&endDate=
async fn get_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
    _user: AuthUser,
) -> Result<Json<Vec<CustomerReportRow>>, ApiError> {
    let filter = query.into_filter()?;
    let rows = state.store.customers(&filter, state.today()).await?;
    debug!(rows = rows.len(), filtered = !filter.is_empty(), "Customer report built");
    Ok(Json(rows))
}

/// GET /car-brands
async fn get_car_brands(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<CarBrandBucket>>, ApiError> {
    Ok(Json(state.store.car_brands().await?))
}

/// GET /filtered?startDate=&endDate=&customerName=&carBrand=&paymentStatus=
async fn get_filtered(
    State(state): State<AppState>,
    Query(query): Query<PaymentQuery>,
    _user: AuthUser,
) -> Result<Json<Vec<FilteredPayment>>, ApiError> {
    let filter = query.into_filter()?;
    Ok(Json(state.store.filtered_payments(&filter, state.today()).await?))
}

/// GET /customer/{customer_id}/history
async fn get_customer_history(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    _user: AuthUser,
) -> Result<Json<CustomerHistory>, ApiError> {
    let customer_id: CustomerId = customer_id
        .parse()
        .map_err(|_| AppError::Validation(format!("invalid customer id: {customer_id}")))?;
    Ok(Json(state.store.customer_history(customer_id).await?))
}

/// GET /dashboard
async fn get_dashboard(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(state.store.dashboard(state.today()).await?))
}

/// POST /update-profit
///
/// Echoes the submitted figure. Nothing is stored and later reports ignore it.
async fn update_profit(
    user: AuthUser,
    payload: Result<Json<ProfitUpdate>, JsonRejection>,
) -> Result<Json<ProfitOverride>, ApiError> {
    let Json(update) = payload.map_err(|e| {
        AppError::Validation(format!("totalProfit must be a number: {}", e.body_text()))
    })?;

    info!(
        user = %user.fingerprint(),
        total_profit = %update.total_profit,
        "Profit override received (not persisted)"
    );

    Ok(Json(ProfitOverride::request_scoped(update.total_profit)))
}

#[cfg(test)]
#[path = "reports_tests.rs"]
mod tests;
