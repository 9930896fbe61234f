//! Leasing domain types.

use chrono::{DateTime, NaiveDate, Utc};
use leasebook_shared::types::{CustomerId, PaymentId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::profit::lease_profit;

/// Lifecycle status of a scheduled payment as stored.
///
/// `Overdue` may appear in stored data but is never trusted: reports derive
/// overdue from `unpaid && due_date < today` and treat every non-paid row as
/// pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting payment.
    Pending,
    /// Settled.
    Paid,
    /// Past due, awaiting payment.
    Overdue,
}

impl PaymentStatus {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }

    /// Returns true for a settled payment.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// Computed status of a customer's lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// At least one unpaid payment remains.
    Active,
    /// No unpaid payments (including customers with no payments at all).
    Completed,
}

impl CustomerStatus {
    /// Derives the status from the number of unpaid payments.
    #[must_use]
    pub const fn from_unpaid_count(unpaid: i64) -> Self {
        if unpaid > 0 { Self::Active } else { Self::Completed }
    }

    /// Returns a human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

/// A financed-vehicle account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
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
    /// Car model year.
    pub car_year: Option<i32>,
    /// What the vehicle cost to acquire.
    pub purchase_cost: Decimal,
    /// Principal financed.
    pub leasing_amount: Decimal,
    /// Monthly installment.
    pub monthly_payment: Decimal,
    /// Lease duration in months.
    pub lease_duration: i32,
    /// First day of the lease.
    pub start_date: NaiveDate,
    /// Record creation time.
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Scheduled profit of this lease.
    #[must_use]
    pub fn lease_profit(&self) -> Decimal {
        lease_profit(self.monthly_payment, self.lease_duration, self.leasing_amount)
    }

    /// Combined car description, `"<brand> <model> (<year>)"`.
    ///
    /// Missing parts render as empty strings so the shape never changes.
    #[must_use]
    pub fn car_description(&self) -> String {
        format!(
            "{} {} ({})",
            self.car_brand.as_deref().unwrap_or_default(),
            self.car_model.as_deref().unwrap_or_default(),
            self.car_year.map(|y| y.to_string()).unwrap_or_default()
        )
    }
}

/// One scheduled installment obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Payment ID.
    pub id: PaymentId,
    /// Owning customer.
    pub customer_id: CustomerId,
    /// Amount due.
    pub amount: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Date the payment was made, if any.
    pub payment_date: Option<NaiveDate>,
    /// Stored status.
    pub status: PaymentStatus,
}

impl Payment {
    /// Returns true for a settled payment.
    #[must_use]
    pub const fn is_paid(&self) -> bool {
        self.status.is_paid()
    }

    /// Returns true for any payment that is not settled.
    #[must_use]
    pub const fn is_unpaid(&self) -> bool {
        !self.status.is_paid()
    }

    /// Unpaid and due strictly before `today`.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_unpaid() && self.due_date < today
    }

    /// Unpaid and due on or before `today`; the monthly report's overdue test.
    #[must_use]
    pub fn is_due_by(&self, today: NaiveDate) -> bool {
        self.is_unpaid() && self.due_date <= today
    }

    /// Status derived from payment state and the calendar.
    #[must_use]
    pub fn effective_status(&self, today: NaiveDate) -> PaymentStatus {
        if self.is_paid() {
            PaymentStatus::Paid
        } else if self.is_overdue(today) {
            PaymentStatus::Overdue
        } else {
            PaymentStatus::Pending
        }
    }
}

/// A customer together with all of their payments.
#[derive(Debug, Clone)]
pub struct CustomerLedger {
    /// The customer.
    pub customer: Customer,
    /// Every payment owned by the customer.
    pub payments: Vec<Payment>,
}

impl CustomerLedger {
    /// Sum of settled payments.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.payments.iter().filter(|p| p.is_paid()).map(|p| p.amount).sum()
    }

    /// Active while any payment is unpaid.
    #[must_use]
    pub fn status(&self) -> CustomerStatus {
        let unpaid = self.payments.iter().filter(|p| p.is_unpaid()).count();
        CustomerStatus::from_unpaid_count(i64::try_from(unpaid).unwrap_or(i64::MAX))
    }
}

/// A payment with the name of the customer who owes it.
#[derive(Debug, Clone)]
pub struct PaymentLine {
    /// The payment.
    pub payment: Payment,
    /// Owning customer's full name.
    pub customer_name: String,
}

/// An in-memory snapshot of the leasing dataset.
#[derive(Debug, Clone, Default)]
pub struct LeaseBook {
    /// All customers.
    pub customers: Vec<Customer>,
    /// All payments.
    pub payments: Vec<Payment>,
}

impl LeaseBook {
    /// Creates a snapshot from customers and payments.
    #[must_use]
    pub const fn new(customers: Vec<Customer>, payments: Vec<Payment>) -> Self {
        Self {
            customers,
            payments,
        }
    }

    /// Payments owned by one customer.
    pub fn payments_of(&self, customer_id: CustomerId) -> impl Iterator<Item = &Payment> {
        self.payments
            .iter()
            .filter(move |p| p.customer_id == customer_id)
    }

    /// Looks up a customer.
    #[must_use]
    pub fn customer(&self, customer_id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }
}
