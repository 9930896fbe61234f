//! Report repository backed by Postgres.
//!
//! Aggregates run as raw SQL built by [`crate::query_builder`]; history and
//! export loads use entity queries.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use leasebook_core::filter::{CustomerFilter, PaymentFilter};
use leasebook_core::lease::{CustomerLedger, CustomerStatus, PaymentLine, lease_profit};
use leasebook_core::reports::{
    CarBrandBucket, CustomerHistory, CustomerReportRow, DashboardStats, DashboardTotals,
    FilteredPayment, FinancialSummary, MonthlyBucket, ReportError, ReportStore, SummaryTotals,
};
use leasebook_shared::types::{CustomerId, PaymentId};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{customers, payments, sea_orm_active_enums::PaymentStatus};
use crate::query_builder;

#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    total_customers: i64,
    total_invested: Decimal,
    total_collected: Decimal,
    total_pending: Decimal,
    overdue_customers: i64,
    completed_customers: i64,
}

#[derive(Debug, FromQueryResult)]
struct MonthlyRow {
    period: String,
    total_payments: i64,
    total_amount: Decimal,
    collected_amount: Decimal,
    pending_amount: Decimal,
    overdue_amount: Decimal,
    overdue_count: i64,
    completed_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct CarBrandRow {
    car_brand: String,
    customer_count: i64,
    total_leasing_amount: Decimal,
    average_monthly_payment: Decimal,
}

#[derive(Debug, FromQueryResult)]
struct CustomerReportSqlRow {
    id: Uuid,
    full_name: String,
    phone: String,
    car_brand: Option<String>,
    car_model: Option<String>,
    car_year: Option<i32>,
    leasing_amount: Decimal,
    monthly_payment: Decimal,
    lease_duration: i32,
    start_date: NaiveDate,
    created_at: DateTime<FixedOffset>,
    total_payments: i64,
    paid_payments: i64,
    total_paid: Decimal,
    remaining_amount: Decimal,
    last_payment_date: Option<NaiveDate>,
    next_due_date: Option<NaiveDate>,
    is_overdue: bool,
}

#[derive(Debug, FromQueryResult)]
struct FilteredPaymentRow {
    payment_id: Uuid,
    customer_id: Uuid,
    customer_name: String,
    phone: String,
    car_brand: Option<String>,
    car_model: Option<String>,
    amount: Decimal,
    due_date: NaiveDate,
    payment_date: Option<NaiveDate>,
    status: PaymentStatus,
}

#[derive(Debug, FromQueryResult)]
struct DashboardRow {
    total_customers: i64,
    active_customers: i64,
    fully_paid_customers: i64,
    total_monthly_payments: Decimal,
    total_invested: Decimal,
    total_collected: Decimal,
    total_pending: Decimal,
    overdue_payments: i64,
}

/// Report repository for financial report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportStore for ReportRepository {
    // ========================================================================
    // Aggregates
    // ========================================================================

    async fn summary(&self, today: NaiveDate) -> Result<FinancialSummary, ReportError> {
        let row = SummaryRow::find_by_statement(query_builder::summary_statement(today))
            .one(&self.db)
            .await
            .map_err(|e| ReportError::query("summary", e))?
            .ok_or_else(|| ReportError::query("summary", "aggregate returned no row"))?;

        Ok(FinancialSummary::from_totals(SummaryTotals {
            total_customers: row.total_customers,
            total_invested: row.total_invested,
            total_collected: row.total_collected,
            total_pending: row.total_pending,
            overdue_customers: row.overdue_customers,
            completed_customers: row.completed_customers,
        }))
    }

    async fn monthly(&self, today: NaiveDate) -> Result<Vec<MonthlyBucket>, ReportError> {
        let rows = MonthlyRow::find_by_statement(query_builder::monthly_statement(today))
            .all(&self.db)
            .await
            .map_err(|e| ReportError::query("monthly", e))?;

        debug!(operation = "monthly", rows = rows.len(), "report query finished");

        Ok(rows
            .into_iter()
            .map(|r| MonthlyBucket {
                period: r.period,
                total_payments: r.total_payments,
                total_amount: r.total_amount,
                collected_amount: r.collected_amount,
                pending_amount: r.pending_amount,
                overdue_amount: r.overdue_amount,
                overdue_count: r.overdue_count,
                completed_count: r.completed_count,
            })
            .collect())
    }

    async fn car_brands(&self) -> Result<Vec<CarBrandBucket>, ReportError> {
        let rows = CarBrandRow::find_by_statement(query_builder::car_brand_statement())
            .all(&self.db)
            .await
            .map_err(|e| ReportError::query("car_brands", e))?;

        Ok(rows
            .into_iter()
            .map(|r| CarBrandBucket {
                car_brand: r.car_brand,
                customer_count: r.customer_count,
                total_leasing_amount: r.total_leasing_amount,
                average_monthly_payment: r.average_monthly_payment,
            })
            .collect())
    }

    async fn customers(
        &self,
        filter: &CustomerFilter,
        today: NaiveDate,
    ) -> Result<Vec<CustomerReportRow>, ReportError> {
        let stmt = query_builder::customer_report_statement(filter, today);
        let rows = CustomerReportSqlRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| ReportError::query("customers", e))?;

        debug!(operation = "customers", rows = rows.len(), "report query finished");

        Ok(rows
            .into_iter()
            .map(|r| CustomerReportRow {
                id: CustomerId::from_uuid(r.id),
                full_name: r.full_name,
                phone: r.phone,
                car_brand: r.car_brand,
                car_model: r.car_model,
                car_year: r.car_year,
                leasing_amount: r.leasing_amount,
                monthly_payment: r.monthly_payment,
                lease_duration: r.lease_duration,
                start_date: r.start_date,
                created_at: r.created_at.with_timezone(&Utc),
                total_payments: r.total_payments,
                paid_payments: r.paid_payments,
                total_paid: r.total_paid,
                remaining_amount: r.remaining_amount,
                last_payment_date: r.last_payment_date,
                next_due_date: r.next_due_date,
                is_overdue: r.is_overdue,
                status: CustomerStatus::from_unpaid_count(r.total_payments - r.paid_payments),
            })
            .collect())
    }

    async fn filtered_payments(
        &self,
        filter: &PaymentFilter,
        today: NaiveDate,
    ) -> Result<Vec<FilteredPayment>, ReportError> {
        let stmt = query_builder::filtered_payments_statement(filter, today);
        let rows = FilteredPaymentRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| ReportError::query("filtered_payments", e))?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let payment = payments::Model {
                    id: r.payment_id,
                    customer_id: r.customer_id,
                    amount: r.amount,
                    due_date: r.due_date,
                    payment_date: r.payment_date,
                    status: r.status,
                }
                .into_domain();
                FilteredPayment {
                    payment_id: PaymentId::from_uuid(r.payment_id),
                    customer_id: CustomerId::from_uuid(r.customer_id),
                    customer_name: r.customer_name,
                    phone: r.phone,
                    car_brand: r.car_brand,
                    car_model: r.car_model,
                    amount: r.amount,
                    due_date: r.due_date,
                    payment_date: r.payment_date,
                    status: payment.effective_status(today),
                }
            })
            .collect())
    }

    // ========================================================================
    // Entity loads
    // ========================================================================

    async fn customer_history(
        &self,
        customer_id: CustomerId,
    ) -> Result<CustomerHistory, ReportError> {
        let customer = customers::Entity::find_by_id(customer_id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| ReportError::query("customer_history", e))?
            .ok_or(ReportError::CustomerNotFound(customer_id))?
            .into_domain();

        let payments = payments::Entity::find()
            .filter(payments::Column::CustomerId.eq(customer_id.into_inner()))
            .order_by_asc(payments::Column::DueDate)
            .all(&self.db)
            .await
            .map_err(|e| ReportError::query("customer_history", e))?
            .into_iter()
            .map(payments::Model::into_domain)
            .collect();

        Ok(CustomerHistory::from_payments(&customer, payments))
    }

    async fn dashboard(&self, today: NaiveDate) -> Result<DashboardStats, ReportError> {
        let row = DashboardRow::find_by_statement(query_builder::dashboard_statement(today))
            .one(&self.db)
            .await
            .map_err(|e| ReportError::query("dashboard", e))?
            .ok_or_else(|| ReportError::query("dashboard", "aggregate returned no row"))?;

        let terms: Vec<(Decimal, i32, Decimal)> = customers::Entity::find()
            .select_only()
            .column(customers::Column::MonthlyPayment)
            .column(customers::Column::LeaseDuration)
            .column(customers::Column::LeasingAmount)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ReportError::query("dashboard", e))?;

        let totals = DashboardTotals {
            total_customers: row.total_customers,
            active_customers: row.active_customers,
            fully_paid_customers: row.fully_paid_customers,
            total_monthly_payments: row.total_monthly_payments,
            total_invested: row.total_invested,
            total_collected: row.total_collected,
            total_pending: row.total_pending,
            overdue_payments: row.overdue_payments,
        };

        Ok(DashboardStats::from_totals(
            totals,
            terms
                .into_iter()
                .map(|(monthly, months, principal)| lease_profit(monthly, months, principal)),
        ))
    }

    async fn customers_with_payments(&self) -> Result<Vec<CustomerLedger>, ReportError> {
        let rows = customers::Entity::find()
            .order_by_desc(customers::Column::CreatedAt)
            .order_by_desc(customers::Column::Id)
            .find_with_related(payments::Entity)
            .all(&self.db)
            .await
            .map_err(|e| ReportError::query("customers_with_payments", e))?;

        debug!(operation = "customers_with_payments", rows = rows.len(), "export load finished");

        Ok(rows
            .into_iter()
            .map(|(customer, payments)| CustomerLedger {
                customer: customer.into_domain(),
                payments: payments.into_iter().map(payments::Model::into_domain).collect(),
            })
            .collect())
    }

    async fn payments_with_customers(&self) -> Result<Vec<PaymentLine>, ReportError> {
        let rows = payments::Entity::find()
            .find_also_related(customers::Entity)
            .order_by_asc(payments::Column::DueDate)
            .order_by_asc(payments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ReportError::query("payments_with_customers", e))?;

        debug!(operation = "payments_with_customers", rows = rows.len(), "export load finished");

        Ok(rows
            .into_iter()
            .filter_map(|(payment, customer)| {
                customer.map(|c| PaymentLine {
                    payment: payment.into_domain(),
                    customer_name: c.full_name,
                })
            })
            .collect())
    }
}
