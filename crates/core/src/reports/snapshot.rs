//! In-memory [`ReportStore`] over a fixed [`LeaseBook`].

use async_trait::async_trait;
use chrono::NaiveDate;
use leasebook_shared::types::CustomerId;

use super::error::ReportError;
use super::service::ReportService;
use super::store::ReportStore;
use super::types::{
    CarBrandBucket, CustomerHistory, CustomerReportRow, DashboardStats, FilteredPayment,
    FinancialSummary, MonthlyBucket,
};
use crate::filter::{CustomerFilter, PaymentFilter};
use crate::lease::{CustomerLedger, LeaseBook, PaymentLine};

/// A read-only store backed by a snapshot held in memory.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    book: LeaseBook,
}

impl SnapshotStore {
    /// Wraps a snapshot.
    #[must_use]
    pub const fn new(book: LeaseBook) -> Self {
        Self { book }
    }

    /// Returns the underlying snapshot.
    #[must_use]
    pub const fn book(&self) -> &LeaseBook {
        &self.book
    }
}

#[async_trait]
impl ReportStore for SnapshotStore {
    async fn summary(&self, today: NaiveDate) -> Result<FinancialSummary, ReportError> {
        Ok(ReportService::summary(&self.book, today))
    }

    async fn monthly(&self, today: NaiveDate) -> Result<Vec<MonthlyBucket>, ReportError> {
        Ok(ReportService::monthly(&self.book, today))
    }

    async fn car_brands(&self) -> Result<Vec<CarBrandBucket>, ReportError> {
        Ok(ReportService::car_brands(&self.book))
    }

    async fn customers(
        &self,
        filter: &CustomerFilter,
        today: NaiveDate,
    ) -> Result<Vec<CustomerReportRow>, ReportError> {
        Ok(ReportService::customers(&self.book, filter, today))
    }

    async fn filtered_payments(
        &self,
        filter: &PaymentFilter,
        today: NaiveDate,
    ) -> Result<Vec<FilteredPayment>, ReportError> {
        Ok(ReportService::filtered_payments(&self.book, filter, today))
    }

    async fn customer_history(
        &self,
        customer_id: CustomerId,
    ) -> Result<CustomerHistory, ReportError> {
        ReportService::history(&self.book, customer_id)
    }

    async fn dashboard(&self, today: NaiveDate) -> Result<DashboardStats, ReportError> {
        Ok(ReportService::dashboard(&self.book, today))
    }

    async fn customers_with_payments(&self) -> Result<Vec<CustomerLedger>, ReportError> {
        Ok(ReportService::ledgers(&self.book))
    }

    async fn payments_with_customers(&self) -> Result<Vec<PaymentLine>, ReportError> {
        Ok(ReportService::payment_lines(&self.book))
    }
}
