//! The report data-source seam.

use async_trait::async_trait;
use chrono::NaiveDate;
use leasebook_shared::types::CustomerId;

use super::error::ReportError;
use super::types::{
    CarBrandBucket, CustomerHistory, CustomerReportRow, DashboardStats, FilteredPayment,
    FinancialSummary, MonthlyBucket,
};
use crate::filter::{CustomerFilter, PaymentFilter};
use crate::lease::{CustomerLedger, PaymentLine};

/// Typed aggregate operations over the leasing dataset.
///
/// Implementations may run raw SQL or structured queries; callers only see
/// finished report rows. `today` is the caller's calendar date and drives
/// every overdue decision.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Portfolio-wide totals.
    async fn summary(&self, today: NaiveDate) -> Result<FinancialSummary, ReportError>;

    /// Payments bucketed by due month, newest month first.
    async fn monthly(&self, today: NaiveDate) -> Result<Vec<MonthlyBucket>, ReportError>;

    /// Customers bucketed by car brand, largest bucket first.
    async fn car_brands(&self) -> Result<Vec<CarBrandBucket>, ReportError>;

    /// Per-customer report, newest customer first.
    async fn customers(
        &self,
        filter: &CustomerFilter,
        today: NaiveDate,
    ) -> Result<Vec<CustomerReportRow>, ReportError>;

    /// Payments joined with customers, earliest due date first.
    async fn filtered_payments(
        &self,
        filter: &PaymentFilter,
        today: NaiveDate,
    ) -> Result<Vec<FilteredPayment>, ReportError>;

    /// One customer's payments and sums.
    async fn customer_history(&self, customer_id: CustomerId)
    -> Result<CustomerHistory, ReportError>;

    /// Dashboard headline numbers.
    async fn dashboard(&self, today: NaiveDate) -> Result<DashboardStats, ReportError>;

    /// Every customer with payments loaded, newest customer first.
    async fn customers_with_payments(&self) -> Result<Vec<CustomerLedger>, ReportError>;

    /// Every payment with its customer's name, earliest due date first.
    async fn payments_with_customers(&self) -> Result<Vec<PaymentLine>, ReportError>;
}
