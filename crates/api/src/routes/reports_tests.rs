//! Route tests for the report endpoints.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION},
};
use leasebook_core::reports::SnapshotStore;
use rstest::rstest;
use rust_decimal_macros::dec;

use crate::test_support::{
    BrokenStore, app, app_with, body_json, fixture_book, get, money, post_json, send,
};

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_health_is_public() {
    let request = Request::builder()
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();

    let response = send(app(), request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["timezone"], "UTC");
}

#[rstest]
#[case::missing(None)]
#[case::wrong_scheme(Some("Basic dXNlcjpwYXNz"))]
#[case::empty_token(Some("Bearer "))]
#[case::no_scheme(Some("token-without-scheme"))]
#[tokio::test]
async fn test_reports_require_bearer_token(#[case] header: Option<&str>) {
    let mut builder = Request::builder().uri("/api/v1/summary");
    if let Some(value) = header {
        builder = builder.header(AUTHORIZATION, value);
    }

    let response = send(app(), builder.body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "UNAUTHORIZED");
}

// ============================================================================
// Aggregates
// ============================================================================

#[tokio::test]
async fn test_summary_totals() {
    let response = send(app(), get("/api/v1/summary")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total_customers"], 3);
    assert_eq!(money(&json["total_invested"]), dec!(20000));
    assert_eq!(money(&json["total_collected"]), dec!(1100));
    assert_eq!(money(&json["total_pending"]), dec!(1000));
    assert_eq!(json["overdue_customers"], 1);
    assert_eq!(json["completed_customers"], 2);
    assert_eq!(money(&json["total_profit"]), dec!(-18900));
}

#[tokio::test]
async fn test_dashboard_uses_lease_profit() {
    let response = send(app(), get("/api/v1/dashboard")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["totalCustomers"], 3);
    assert_eq!(json["activeCustomers"], 1);
    assert_eq!(json["fullyPaidCustomers"], 2);
    assert_eq!(json["overduePayments"], 1);
    assert_eq!(money(&json["totalMonthlyPayments"]), dec!(1000));
    assert_eq!(money(&json["totalProfit"]), dec!(4000));
}

#[tokio::test]
async fn test_car_brands_skip_missing_brand() {
    let response = send(app(), get("/api/v1/car-brands")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let buckets = json.as_array().unwrap();
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0]["car_brand"], "BMW");
    assert_eq!(buckets[1]["car_brand"], "Kia");
    assert_eq!(money(&buckets[1]["average_monthly_payment"]), dec!(300));
}

#[tokio::test]
async fn test_monthly_counts_every_payment() {
    let response = send(app(), get("/api/v1/monthly")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let total: i64 = json
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["total_payments"].as_i64().unwrap())
        .sum();
    assert_eq!(total, 5);
}

// ============================================================================
// Customer report
// ============================================================================

#[rstest]
#[case::all("/api/v1/customers", 3)]
#[case::all_keyword("/api/v1/customers?status=all", 3)]
#[case::overdue("/api/v1/customers?status=overdue", 1)]
#[case::completed("/api/v1/customers?status=completed", 2)]
#[case::search_name("/api/v1/customers?search=bob", 1)]
#[case::search_phone("/api/v1/customers?search=%2B99455", 3)]
#[case::brand("/api/v1/customers?car_brand=BMW", 1)]
#[case::brand_camel("/api/v1/customers?carBrand=Kia", 1)]
#[case::blank_search("/api/v1/customers?search=%20%20", 3)]
#[tokio::test]
async fn test_customer_filters(#[case] uri: &str, #[case] expected: usize) {
    let response = send(app(), get(uri)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), expected);
}

#[tokio::test]
async fn test_customer_row_fields() {
    let response = send(app(), get("/api/v1/customers?status=overdue")).await;
    let json = body_json(response).await;
    let row = &json[0];

    assert_eq!(row["full_name"], "Aysel Mammadova");
    assert_eq!(row["total_payments"], 3);
    assert_eq!(row["paid_payments"], 1);
    assert_eq!(money(&row["total_paid"]), dec!(500));
    assert_eq!(money(&row["remaining_amount"]), dec!(1000));
    assert_eq!(row["is_overdue"], true);
    assert_eq!(row["status"], "active");
}

#[rstest]
#[case::unknown_status("/api/v1/customers?status=late")]
#[case::bad_date("/api/v1/customers?startDate=2026-13-01")]
#[case::inverted_range("/api/v1/customers?startDate=2026-05-01&endDate=2026-04-01")]
#[case::bad_payment_status("/api/v1/filtered?paymentStatus=refunded")]
#[tokio::test]
async fn test_invalid_filters_are_rejected(#[case] uri: &str) {
    let response = send(app(), get(uri)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "INVALID_FILTER");
}

// ============================================================================
// Filtered payments
// ============================================================================

#[rstest]
#[case::all("/api/v1/filtered", 5)]
#[case::paid("/api/v1/filtered?paymentStatus=paid", 3)]
#[case::pending("/api/v1/filtered?paymentStatus=pending", 2)]
#[case::overdue("/api/v1/filtered?paymentStatus=overdue", 1)]
#[case::name("/api/v1/filtered?customerName=aysel", 3)]
#[case::brand("/api/v1/filtered?carBrand=Kia", 2)]
#[tokio::test]
async fn test_filtered_payments(#[case] uri: &str, #[case] expected: usize) {
    let response = send(app(), get(uri)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), expected);
}

#[tokio::test]
async fn test_filtered_overdue_reports_effective_status() {
    let response = send(app(), get("/api/v1/filtered?paymentStatus=overdue")).await;
    let json = body_json(response).await;

    assert_eq!(json[0]["status"], "overdue");
    assert_eq!(json[0]["customer_name"], "Aysel Mammadova");
}

// ============================================================================
// Customer history
// ============================================================================

#[tokio::test]
async fn test_customer_history() {
    let book = fixture_book();
    let aysel = book.customers[0].id;
    let app = app_with(Arc::new(SnapshotStore::new(book)));

    let response = send(app, get(&format!("/api/v1/customer/{aysel}/history"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["customerName"], "Aysel Mammadova");
    assert_eq!(json["payments"].as_array().unwrap().len(), 3);
    assert_eq!(money(&json["totalAmount"]), dec!(1500));
    assert_eq!(money(&json["paidAmount"]), dec!(500));
    assert_eq!(money(&json["remainingAmount"]), dec!(1000));
}

#[tokio::test]
async fn test_customer_history_unknown_customer() {
    let uri = "/api/v1/customer/0195f3c1-7a2b-7000-8000-000000000000/history";
    let response = send(app(), get(uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_customer_history_malformed_id() {
    let response = send(app(), get("/api/v1/customer/not-a-uuid/history")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "VALIDATION_ERROR");
}

// ============================================================================
// Profit override
// ============================================================================

#[tokio::test]
async fn test_update_profit_echoes_value() {
    let response = send(
        app(),
        post_json("/api/v1/update-profit", r#"{"totalProfit": 1500.25}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(money(&json["totalProfit"]), dec!(1500.25));
    assert_eq!(json["persisted"], false);
}

#[tokio::test]
async fn test_update_profit_does_not_change_reports() {
    let book = fixture_book();
    let app = app_with(Arc::new(SnapshotStore::new(book)));

    let response = send(
        app.clone(),
        post_json("/api/v1/update-profit", r#"{"totalProfit": 99999}"#),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(send(app, get("/api/v1/dashboard")).await).await;
    assert_eq!(money(&json["totalProfit"]), dec!(4000));
}

#[rstest]
#[case::string(r#"{"totalProfit": "lots"}"#)]
#[case::missing(r"{}")]
#[case::not_json("totalProfit=5")]
#[tokio::test]
async fn test_update_profit_rejects_non_numbers(#[case] body: &str) {
    let response = send(app(), post_json("/api/v1/update-profit", body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "VALIDATION_ERROR");
}

// ============================================================================
// Failures
// ============================================================================

#[rstest]
#[case("/api/v1/summary")]
#[case("/api/v1/monthly")]
#[case("/api/v1/customers")]
#[case("/api/v1/dashboard")]
#[tokio::test]
async fn test_store_failure_hides_detail(#[case] uri: &str) {
    let response = send(app_with(Arc::new(BrokenStore)), get(uri)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "INTERNAL_ERROR");
    assert!(!json["message"].as_str().unwrap().contains("connection refused"));
}
