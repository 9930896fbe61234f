//! Shared fixtures for route tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header::AUTHORIZATION},
};
use chrono::{DateTime, Days, NaiveDate};
use http_body_util::BodyExt;
use leasebook_core::filter::{CustomerFilter, PaymentFilter};
use leasebook_core::lease::{Customer, CustomerLedger, LeaseBook, Payment, PaymentLine, PaymentStatus};
use leasebook_core::reports::{
    CarBrandBucket, CustomerHistory, CustomerReportRow, DashboardStats, FilteredPayment,
    FinancialSummary, MonthlyBucket, ReportError, ReportStore, SnapshotStore,
};
use leasebook_shared::ReportSettings;
use leasebook_shared::types::{CustomerId, PaymentId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tower::ServiceExt;

use crate::{AppState, create_router};

pub const TOKEN: &str = "test-token-123";

pub fn settings() -> ReportSettings {
    ReportSettings::default()
}

pub fn today() -> NaiveDate {
    settings().today()
}

fn offset(days: i64) -> NaiveDate {
    if days >= 0 {
        today() + Days::new(days.unsigned_abs())
    } else {
        today() - Days::new(days.unsigned_abs())
    }
}

fn customer(
    n: i64,
    name: &str,
    brand: Option<&str>,
    leasing: Decimal,
    monthly: Decimal,
) -> Customer {
    Customer {
        id: CustomerId::new(),
        full_name: name.to_string(),
        phone: format!("+99455{n:07}"),
        car_brand: brand.map(String::from),
        car_model: brand.map(|_| "X".to_string()),
        car_year: Some(2024),
        purchase_cost: leasing,
        leasing_amount: leasing,
        monthly_payment: monthly,
        lease_duration: 24,
        start_date: offset(-90),
        created_at: DateTime::from_timestamp(1_750_000_000 + n * 3600, 0).unwrap(),
    }
}

fn payment(owner: &Customer, amount: Decimal, due_in_days: i64, status: PaymentStatus) -> Payment {
    let due_date = offset(due_in_days);
    Payment {
        id: PaymentId::new(),
        customer_id: owner.id,
        amount,
        due_date,
        payment_date: status.is_paid().then_some(due_date),
        status,
    }
}

/// Three customers:
/// - Aysel (BMW): one paid, one late, one upcoming payment
/// - Bob (Kia): fully paid
/// - Carol: no brand, no payments
pub fn fixture_book() -> LeaseBook {
    let aysel = customer(1, "Aysel Mammadova", Some("BMW"), dec!(10000), dec!(500));
    let bob = customer(2, "Bob Stone", Some("Kia"), dec!(6000), dec!(300));
    let carol = customer(3, "Carol White", None, dec!(4000), dec!(200));

    let payments = vec![
        payment(&aysel, dec!(500), -60, PaymentStatus::Paid),
        payment(&aysel, dec!(500), -10, PaymentStatus::Pending),
        payment(&aysel, dec!(500), 20, PaymentStatus::Pending),
        payment(&bob, dec!(300), -30, PaymentStatus::Paid),
        payment(&bob, dec!(300), -1, PaymentStatus::Paid),
    ];

    LeaseBook::new(vec![aysel, bob, carol], payments)
}

pub fn app_with(store: Arc<dyn ReportStore>) -> Router {
    create_router(AppState::new(store, settings()))
}

pub fn app() -> Router {
    app_with(Arc::new(SnapshotStore::new(fixture_book())))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {TOKEN}"))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Reads a JSON number back as an exact decimal.
pub fn money(value: &serde_json::Value) -> Decimal {
    serde_json::from_value(value.clone()).unwrap()
}

/// A store whose every query fails, for the error path.
pub struct BrokenStore;

fn broken<T>(operation: &'static str) -> Result<T, ReportError> {
    Err(ReportError::query(operation, "connection refused"))
}

#[async_trait]
impl ReportStore for BrokenStore {
    async fn summary(&self, _today: NaiveDate) -> Result<FinancialSummary, ReportError> {
        broken("summary")
    }

    async fn monthly(&self, _today: NaiveDate) -> Result<Vec<MonthlyBucket>, ReportError> {
        broken("monthly")
    }

    async fn car_brands(&self) -> Result<Vec<CarBrandBucket>, ReportError> {
        broken("car_brands")
    }

    async fn customers(
        &self,
        _filter: &CustomerFilter,
        _today: NaiveDate,
    ) -> Result<Vec<CustomerReportRow>, ReportError> {
        broken("customers")
    }

    async fn filtered_payments(
        &self,
        _filter: &PaymentFilter,
        _today: NaiveDate,
    ) -> Result<Vec<FilteredPayment>, ReportError> {
        broken("filtered_payments")
    }

    async fn customer_history(
        &self,
        _customer_id: CustomerId,
    ) -> Result<CustomerHistory, ReportError> {
        broken("customer_history")
    }

    async fn dashboard(&self, _today: NaiveDate) -> Result<DashboardStats, ReportError> {
        broken("dashboard")
    }

    async fn customers_with_payments(&self) -> Result<Vec<CustomerLedger>, ReportError> {
        broken("customers_with_payments")
    }

    async fn payments_with_customers(&self) -> Result<Vec<PaymentLine>, ReportError> {
        broken("payments_with_customers")
    }
}
