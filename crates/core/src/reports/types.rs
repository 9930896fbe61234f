//! Report data types.
//!
//! Rows built from raw aggregate SQL serialize with snake_case keys; the
//! dashboard, history and profit echo use camelCase like the customer and
//! payment records they summarize.

use chrono::{DateTime, NaiveDate, Utc};
use leasebook_shared::types::{CustomerId, PaymentId};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::lease::{Customer, CustomerStatus, Payment, PaymentStatus, collection_profit};

/// Raw portfolio totals as read from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTotals {
    /// Distinct customers.
    pub total_customers: i64,
    /// Sum of leasing amounts.
    pub total_invested: Decimal,
    /// Sum of paid amounts.
    pub total_collected: Decimal,
    /// Sum of unpaid amounts.
    pub total_pending: Decimal,
    /// Customers with at least one overdue payment.
    pub overdue_customers: i64,
    /// Customers with no unpaid payments.
    pub completed_customers: i64,
}

/// Portfolio-wide financial summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Distinct customers.
    pub total_customers: i64,
    /// Sum of leasing amounts.
    pub total_invested: Decimal,
    /// Sum of paid amounts.
    pub total_collected: Decimal,
    /// Sum of unpaid amounts.
    pub total_pending: Decimal,
    /// Customers with at least one overdue payment.
    pub overdue_customers: i64,
    /// Customers with no unpaid payments.
    pub completed_customers: i64,
    /// Collected minus invested.
    pub total_profit: Decimal,
}

impl FinancialSummary {
    /// Derives the summary, including profit, from raw totals.
    #[must_use]
    pub fn from_totals(totals: SummaryTotals) -> Self {
        Self {
            total_profit: collection_profit(totals.total_collected, totals.total_invested),
            total_customers: totals.total_customers,
            total_invested: totals.total_invested,
            total_collected: totals.total_collected,
            total_pending: totals.total_pending,
            overdue_customers: totals.overdue_customers,
            completed_customers: totals.completed_customers,
        }
    }
}

/// Payments grouped by due-date month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// `YYYY-MM` of the due date.
    pub period: String,
    /// Payments due in the month.
    pub total_payments: i64,
    /// Sum of all amounts due in the month.
    pub total_amount: Decimal,
    /// Sum of paid amounts.
    pub collected_amount: Decimal,
    /// Sum of unpaid amounts.
    pub pending_amount: Decimal,
    /// Sum of unpaid amounts due on or before today.
    pub overdue_amount: Decimal,
    /// Unpaid payments due on or before today.
    pub overdue_count: i64,
    /// Paid payments.
    pub completed_count: i64,
}

impl MonthlyBucket {
    /// Formats the bucket key of a due date.
    #[must_use]
    pub fn period_of(date: NaiveDate) -> String {
        date.format("%Y-%m").to_string()
    }
}

/// Customers grouped by car brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarBrandBucket {
    /// Brand name.
    pub car_brand: String,
    /// Customers leasing this brand.
    pub customer_count: i64,
    /// Sum of leasing amounts.
    pub total_leasing_amount: Decimal,
    /// Mean monthly installment, two decimal places.
    pub average_monthly_payment: Decimal,
}

impl CarBrandBucket {
    /// Rounds an average the way the reports present it.
    #[must_use]
    pub fn round_average(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// One row of the per-customer report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerReportRow {
    /// Customer ID.
    pub id: CustomerId,
    /// Full name.
    pub full_name: String,
    /// Phone number.
    pub phone: String,
    /// Car brand.
    pub car_brand: Option<String>,
    /// Car model.
    pub car_model: Option<String>,
    /// Car year.
    pub car_year: Option<i32>,
    /// Principal financed.
    pub leasing_amount: Decimal,
    /// Monthly installment.
    pub monthly_payment: Decimal,
    /// Lease duration in months.
    pub lease_duration: i32,
    /// Lease start.
    pub start_date: NaiveDate,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
    /// All scheduled payments.
    pub total_payments: i64,
    /// Settled payments.
    pub paid_payments: i64,
    /// Sum of settled amounts.
    pub total_paid: Decimal,
    /// Sum of unpaid amounts.
    pub remaining_amount: Decimal,
    /// Latest payment date among settled payments.
    pub last_payment_date: Option<NaiveDate>,
    /// Earliest due date among unpaid payments.
    pub next_due_date: Option<NaiveDate>,
    /// Whether any unpaid payment is past due.
    pub is_overdue: bool,
    /// Active or completed.
    pub status: CustomerStatus,
}

/// A payment joined with its customer, as listed by the filtered report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredPayment {
    /// Payment ID.
    pub payment_id: PaymentId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Customer's full name.
    pub customer_name: String,
    /// Customer's phone.
    pub phone: String,
    /// Car brand.
    pub car_brand: Option<String>,
    /// Car model.
    pub car_model: Option<String>,
    /// Amount due.
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Date paid.
    pub payment_date: Option<NaiveDate>,
    /// Status derived from the calendar, not the stored value.
    pub status: PaymentStatus,
}

impl FilteredPayment {
    /// Joins a payment with its customer.
    #[must_use]
    pub fn new(payment: &Payment, customer: &Customer, today: NaiveDate) -> Self {
        Self {
            payment_id: payment.id,
            customer_id: customer.id,
            customer_name: customer.full_name.clone(),
            phone: customer.phone.clone(),
            car_brand: customer.car_brand.clone(),
            car_model: customer.car_model.clone(),
            amount: payment.amount,
            due_date: payment.due_date,
            payment_date: payment.payment_date,
            status: payment.effective_status(today),
        }
    }
}

/// Raw dashboard totals as read from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardTotals {
    /// All customers.
    pub total_customers: i64,
    /// Customers with at least one unpaid payment.
    pub active_customers: i64,
    /// Customers with no unpaid payments.
    pub fully_paid_customers: i64,
    /// Sum of monthly installments.
    pub total_monthly_payments: Decimal,
    /// Sum of leasing amounts.
    pub total_invested: Decimal,
    /// Sum of paid amounts.
    pub total_collected: Decimal,
    /// Sum of unpaid amounts.
    pub total_pending: Decimal,
    /// Unpaid payments due before today.
    pub overdue_payments: i64,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// All customers.
    pub total_customers: i64,
    /// Customers with at least one unpaid payment.
    pub active_customers: i64,
    /// Customers with no unpaid payments.
    pub fully_paid_customers: i64,
    /// Sum of monthly installments.
    pub total_monthly_payments: Decimal,
    /// Sum of leasing amounts.
    pub total_invested: Decimal,
    /// Sum of paid amounts.
    pub total_collected: Decimal,
    /// Sum of unpaid amounts.
    pub total_pending: Decimal,
    /// Unpaid payments due before today.
    pub overdue_payments: i64,
    /// Sum of per-lease scheduled profit.
    pub total_profit: Decimal,
}

impl DashboardStats {
    /// Combines raw totals with the per-lease profits.
    pub fn from_totals(totals: DashboardTotals, lease_profits: impl IntoIterator<Item = Decimal>) -> Self {
        Self {
            total_customers: totals.total_customers,
            active_customers: totals.active_customers,
            fully_paid_customers: totals.fully_paid_customers,
            total_monthly_payments: totals.total_monthly_payments,
            total_invested: totals.total_invested,
            total_collected: totals.total_collected,
            total_pending: totals.total_pending,
            overdue_payments: totals.overdue_payments,
            total_profit: lease_profits.into_iter().sum(),
        }
    }
}

/// One customer's payment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerHistory {
    /// Customer ID.
    pub customer_id: CustomerId,
    /// Customer's full name.
    pub customer_name: String,
    /// Payments by due date ascending.
    pub payments: Vec<Payment>,
    /// Sum of all amounts.
    pub total_amount: Decimal,
    /// Sum of settled amounts.
    pub paid_amount: Decimal,
    /// Sum of unpaid amounts.
    pub remaining_amount: Decimal,
}

impl CustomerHistory {
    /// Orders the payments and computes the sums.
    #[must_use]
    pub fn from_payments(customer: &Customer, mut payments: Vec<Payment>) -> Self {
        payments.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));

        let total_amount: Decimal = payments.iter().map(|p| p.amount).sum();
        let paid_amount: Decimal = payments.iter().filter(|p| p.is_paid()).map(|p| p.amount).sum();

        Self {
            customer_id: customer.id,
            customer_name: customer.full_name.clone(),
            payments,
            total_amount,
            paid_amount,
            remaining_amount: total_amount - paid_amount,
        }
    }
}

/// Client-supplied profit figure, echoed back and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitOverride {
    /// The submitted value.
    pub total_profit: Decimal,
    /// Always false.
    pub persisted: bool,
}

impl ProfitOverride {
    /// Wraps a request-scoped profit value.
    #[must_use]
    pub const fn request_scoped(total_profit: Decimal) -> Self {
        Self {
            total_profit,
            persisted: false,
        }
    }
}
