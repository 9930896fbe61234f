//! Report derivation over an in-memory dataset.
//!
//! These functions define the reports' semantics in plain Rust. The SQL in
//! the database layer computes the same numbers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use leasebook_shared::types::CustomerId;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{
    CarBrandBucket, CustomerHistory, CustomerReportRow, DashboardStats, DashboardTotals,
    FilteredPayment, FinancialSummary, MonthlyBucket, SummaryTotals,
};
use crate::filter::{CustomerFilter, CustomerStatusFilter, PaymentFilter, PaymentStatusFilter};
use crate::lease::{Customer, CustomerLedger, CustomerStatus, LeaseBook, Payment, PaymentLine};

/// Service for deriving reports from a [`LeaseBook`].
pub struct ReportService;

impl ReportService {
    /// Computes the financial summary.
    #[must_use]
    pub fn summary(book: &LeaseBook, today: NaiveDate) -> FinancialSummary {
        let ledgers = Self::ledgers(book);

        let totals = SummaryTotals {
            total_customers: count(ledgers.len()),
            total_invested: book.customers.iter().map(|c| c.leasing_amount).sum(),
            total_collected: paid_sum(&book.payments),
            total_pending: unpaid_sum(&book.payments),
            overdue_customers: count(
                ledgers
                    .iter()
                    .filter(|l| l.payments.iter().any(|p| p.is_overdue(today)))
                    .count(),
            ),
            completed_customers: count(
                ledgers
                    .iter()
                    .filter(|l| l.status() == CustomerStatus::Completed)
                    .count(),
            ),
        };

        FinancialSummary::from_totals(totals)
    }

    /// Buckets payments by due month, newest first.
    #[must_use]
    pub fn monthly(book: &LeaseBook, today: NaiveDate) -> Vec<MonthlyBucket> {
        let mut groups: BTreeMap<String, Vec<&Payment>> = BTreeMap::new();
        for payment in &book.payments {
            groups
                .entry(MonthlyBucket::period_of(payment.due_date))
                .or_default()
                .push(payment);
        }

        groups
            .into_iter()
            .rev()
            .map(|(period, payments)| {
                let due: Vec<&&Payment> = payments.iter().filter(|p| p.is_due_by(today)).collect();
                MonthlyBucket {
                    period,
                    total_payments: count(payments.len()),
                    total_amount: payments.iter().map(|p| p.amount).sum(),
                    collected_amount: payments
                        .iter()
                        .filter(|p| p.is_paid())
                        .map(|p| p.amount)
                        .sum(),
                    pending_amount: payments
                        .iter()
                        .filter(|p| p.is_unpaid())
                        .map(|p| p.amount)
                        .sum(),
                    overdue_amount: due.iter().map(|p| p.amount).sum(),
                    overdue_count: count(due.len()),
                    completed_count: count(payments.iter().filter(|p| p.is_paid()).count()),
                }
            })
            .collect()
    }

    /// Buckets customers by car brand, largest bucket first.
    ///
    /// Customers without a brand are left out.
    #[must_use]
    pub fn car_brands(book: &LeaseBook) -> Vec<CarBrandBucket> {
        let mut groups: BTreeMap<&str, Vec<&Customer>> = BTreeMap::new();
        for customer in &book.customers {
            if let Some(brand) = customer.car_brand.as_deref() {
                groups.entry(brand).or_default().push(customer);
            }
        }

        let mut buckets: Vec<CarBrandBucket> = groups
            .into_iter()
            .map(|(brand, customers)| {
                let n = Decimal::from(customers.len());
                let installments: Decimal = customers.iter().map(|c| c.monthly_payment).sum();
                CarBrandBucket {
                    car_brand: brand.to_string(),
                    customer_count: count(customers.len()),
                    total_leasing_amount: customers.iter().map(|c| c.leasing_amount).sum(),
                    average_monthly_payment: CarBrandBucket::round_average(installments / n),
                }
            })
            .collect();

        buckets.sort_by(|a, b| {
            b.customer_count
                .cmp(&a.customer_count)
                .then_with(|| a.car_brand.cmp(&b.car_brand))
        });
        buckets
    }

    /// Builds the per-customer report for customers matching `filter`.
    #[must_use]
    pub fn customers(
        book: &LeaseBook,
        filter: &CustomerFilter,
        today: NaiveDate,
    ) -> Vec<CustomerReportRow> {
        Self::ledgers(book)
            .into_iter()
            .filter(|l| customer_matches(filter, l, today))
            .map(|l| customer_row(&l, today))
            .collect()
    }

    /// Lists payments matching `filter`, earliest due date first.
    #[must_use]
    pub fn filtered_payments(
        book: &LeaseBook,
        filter: &PaymentFilter,
        today: NaiveDate,
    ) -> Vec<FilteredPayment> {
        let mut rows: Vec<FilteredPayment> = book
            .payments
            .iter()
            .filter_map(|p| book.customer(p.customer_id).map(|c| (p, c)))
            .filter(|(p, c)| payment_matches(filter, p, c, today))
            .map(|(p, c)| FilteredPayment::new(p, c, today))
            .collect();

        rows.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then_with(|| a.payment_id.cmp(&b.payment_id))
        });
        rows
    }

    /// Returns one customer's history.
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound` if the customer does not exist.
    pub fn history(book: &LeaseBook, customer_id: CustomerId) -> Result<CustomerHistory, ReportError> {
        let customer = book
            .customer(customer_id)
            .ok_or(ReportError::CustomerNotFound(customer_id))?;
        let payments = book.payments_of(customer_id).cloned().collect();
        Ok(CustomerHistory::from_payments(customer, payments))
    }

    /// Computes the dashboard.
    #[must_use]
    pub fn dashboard(book: &LeaseBook, today: NaiveDate) -> DashboardStats {
        let ledgers = Self::ledgers(book);
        let active = ledgers
            .iter()
            .filter(|l| l.status() == CustomerStatus::Active)
            .count();

        let totals = DashboardTotals {
            total_customers: count(ledgers.len()),
            active_customers: count(active),
            fully_paid_customers: count(ledgers.len() - active),
            total_monthly_payments: book.customers.iter().map(|c| c.monthly_payment).sum(),
            total_invested: book.customers.iter().map(|c| c.leasing_amount).sum(),
            total_collected: paid_sum(&book.payments),
            total_pending: unpaid_sum(&book.payments),
            overdue_payments: count(book.payments.iter().filter(|p| p.is_overdue(today)).count()),
        };

        DashboardStats::from_totals(totals, book.customers.iter().map(Customer::lease_profit))
    }

    /// Every customer with their payments, newest customer first.
    #[must_use]
    pub fn ledgers(book: &LeaseBook) -> Vec<CustomerLedger> {
        let mut customers: Vec<&Customer> = book.customers.iter().collect();
        customers.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        customers
            .into_iter()
            .map(|c| {
                let mut payments: Vec<Payment> = book.payments_of(c.id).cloned().collect();
                payments.sort_by_key(|p| p.due_date);
                CustomerLedger {
                    customer: c.clone(),
                    payments,
                }
            })
            .collect()
    }

    /// Every payment with its owner's name, earliest due date first.
    ///
    /// Payments whose customer is missing are skipped.
    #[must_use]
    pub fn payment_lines(book: &LeaseBook) -> Vec<PaymentLine> {
        let mut lines: Vec<PaymentLine> = book
            .payments
            .iter()
            .filter_map(|p| {
                book.customer(p.customer_id).map(|c| PaymentLine {
                    payment: p.clone(),
                    customer_name: c.full_name.clone(),
                })
            })
            .collect();
        lines.sort_by(|a, b| {
            a.payment
                .due_date
                .cmp(&b.payment.due_date)
                .then_with(|| a.payment.id.cmp(&b.payment.id))
        });
        lines
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn paid_sum(payments: &[Payment]) -> Decimal {
    payments.iter().filter(|p| p.is_paid()).map(|p| p.amount).sum()
}

fn unpaid_sum(payments: &[Payment]) -> Decimal {
    payments.iter().filter(|p| p.is_unpaid()).map(|p| p.amount).sum()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn customer_matches(filter: &CustomerFilter, ledger: &CustomerLedger, today: NaiveDate) -> bool {
    let customer = &ledger.customer;

    let status_ok = match filter.status {
        None => true,
        Some(CustomerStatusFilter::Overdue) => ledger.payments.iter().any(|p| p.is_overdue(today)),
        Some(CustomerStatusFilter::Completed) => ledger.status() == CustomerStatus::Completed,
    };
    let search_ok = filter.search.as_deref().is_none_or(|term| {
        contains_ci(&customer.full_name, term) || contains_ci(&customer.phone, term)
    });
    let brand_ok = filter
        .car_brand
        .as_deref()
        .is_none_or(|brand| customer.car_brand.as_deref() == Some(brand));
    let range_ok = filter.due_between.is_open()
        || ledger
            .payments
            .iter()
            .any(|p| filter.due_between.contains(p.due_date));

    status_ok && search_ok && brand_ok && range_ok
}

fn customer_row(ledger: &CustomerLedger, today: NaiveDate) -> CustomerReportRow {
    let c = &ledger.customer;
    let paid: Vec<&Payment> = ledger.payments.iter().filter(|p| p.is_paid()).collect();
    let unpaid: Vec<&Payment> = ledger.payments.iter().filter(|p| p.is_unpaid()).collect();

    CustomerReportRow {
        id: c.id,
        full_name: c.full_name.clone(),
        phone: c.phone.clone(),
        car_brand: c.car_brand.clone(),
        car_model: c.car_model.clone(),
        car_year: c.car_year,
        leasing_amount: c.leasing_amount,
        monthly_payment: c.monthly_payment,
        lease_duration: c.lease_duration,
        start_date: c.start_date,
        created_at: c.created_at,
        total_payments: count(ledger.payments.len()),
        paid_payments: count(paid.len()),
        total_paid: paid.iter().map(|p| p.amount).sum(),
        remaining_amount: unpaid.iter().map(|p| p.amount).sum(),
        last_payment_date: paid.iter().filter_map(|p| p.payment_date).max(),
        next_due_date: unpaid.iter().map(|p| p.due_date).min(),
        is_overdue: unpaid.iter().any(|p| p.is_overdue(today)),
        status: ledger.status(),
    }
}

fn payment_matches(
    filter: &PaymentFilter,
    payment: &Payment,
    customer: &Customer,
    today: NaiveDate,
) -> bool {
    let status_ok = match filter.status {
        None => true,
        Some(PaymentStatusFilter::Paid) => payment.is_paid(),
        Some(PaymentStatusFilter::Pending) => payment.is_unpaid(),
        Some(PaymentStatusFilter::Overdue) => payment.is_overdue(today),
    };
    let name_ok = filter
        .customer_name
        .as_deref()
        .is_none_or(|term| contains_ci(&customer.full_name, term));
    let brand_ok = filter
        .car_brand
        .as_deref()
        .is_none_or(|brand| customer.car_brand.as_deref() == Some(brand));

    status_ok && name_ok && brand_ok && filter.due_between.contains(payment.due_date)
}
