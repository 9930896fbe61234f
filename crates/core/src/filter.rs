//! Report filters and their parsing from request parameters.
//!
//! Raw query structs mirror what clients send; `into_filter` turns them into
//! typed filters or fails with `ReportError::InvalidFilter`. Absent and blank
//! parameters mean "match all".

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::lease::PaymentStatus;
use crate::reports::ReportError;

/// Customer-level status filter.
///
/// `Overdue` and `Completed` are not complements: a customer without any
/// payments is completed but not overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerStatusFilter {
    /// At least one unpaid payment due before today.
    Overdue,
    /// No unpaid payments.
    Completed,
}

/// Inclusive due-date range. Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// First due date included.
    pub start: Option<NaiveDate>,
    /// Last due date included.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Returns true when neither bound is set.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Returns true if `date` lies within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// Filter for the per-customer report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    /// Status predicate.
    pub status: Option<CustomerStatusFilter>,
    /// Case-insensitive substring matched against name and phone.
    pub search: Option<String>,
    /// Exact car brand.
    pub car_brand: Option<String>,
    /// Customer has at least one payment due inside this range.
    pub due_between: DateRange,
}

impl CustomerFilter {
    /// Returns true if the filter matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.search.is_none()
            && self.car_brand.is_none()
            && self.due_between.is_open()
    }
}

/// Payment status filter for the joined payment listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatusFilter {
    /// Any unpaid payment, overdue ones included.
    Pending,
    /// Settled payments.
    Paid,
    /// Unpaid and due before today.
    Overdue,
}

/// Filter for the joined payment listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    /// Payment due-date range.
    pub due_between: DateRange,
    /// Case-insensitive substring of the customer's name.
    pub customer_name: Option<String>,
    /// Exact car brand of the owning customer.
    pub car_brand: Option<String>,
    /// Payment status predicate.
    pub status: Option<PaymentStatusFilter>,
}

/// Raw query parameters of the customer report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerQuery {
    /// `overdue`, `completed`, `all` or empty.
    pub status: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    /// Car brand.
    #[serde(alias = "carBrand")]
    pub car_brand: Option<String>,
    /// Range start.
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    /// Range end.
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
}

impl CustomerQuery {
    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilter` for an unknown status, an unparseable date or
    /// a range whose start is after its end.
    pub fn into_filter(self) -> Result<CustomerFilter, ReportError> {
        let status = match non_blank(self.status).as_deref().map(str::to_lowercase) {
            None => None,
            Some(s) if s == "all" => None,
            Some(s) if s == "overdue" => Some(CustomerStatusFilter::Overdue),
            Some(s) if s == "completed" => Some(CustomerStatusFilter::Completed),
            Some(other) => {
                return Err(ReportError::invalid_filter(
                    "status",
                    format!("expected overdue or completed, got {other:?}"),
                ));
            }
        };

        Ok(CustomerFilter {
            status,
            search: non_blank(self.search),
            car_brand: non_blank(self.car_brand),
            due_between: parse_range(self.start_date, self.end_date)?,
        })
    }
}

/// Raw query parameters of the joined payment listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuery {
    /// Range start.
    #[serde(alias = "start_date")]
    pub start_date: Option<String>,
    /// Range end.
    #[serde(alias = "end_date")]
    pub end_date: Option<String>,
    /// Customer name search.
    #[serde(alias = "customer_name")]
    pub customer_name: Option<String>,
    /// Car brand.
    #[serde(alias = "car_brand")]
    pub car_brand: Option<String>,
    /// `pending`, `paid`, `overdue`, `all` or empty.
    #[serde(alias = "payment_status")]
    pub payment_status: Option<String>,
}

impl PaymentQuery {
    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilter` for an unknown payment status, an unparseable
    /// date or an inverted range.
    pub fn into_filter(self) -> Result<PaymentFilter, ReportError> {
        let status = match non_blank(self.payment_status) {
            None => None,
            Some(s) if s.eq_ignore_ascii_case("all") => None,
            Some(s) => Some(match s.parse::<PaymentStatus>() {
                Ok(PaymentStatus::Pending) => PaymentStatusFilter::Pending,
                Ok(PaymentStatus::Paid) => PaymentStatusFilter::Paid,
                Ok(PaymentStatus::Overdue) => PaymentStatusFilter::Overdue,
                Err(reason) => return Err(ReportError::invalid_filter("paymentStatus", reason)),
            }),
        };

        Ok(PaymentFilter {
            due_between: parse_range(self.start_date, self.end_date)?,
            customer_name: non_blank(self.customer_name),
            car_brand: non_blank(self.car_brand),
            status,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_range(start: Option<String>, end: Option<String>) -> Result<DateRange, ReportError> {
    let start = non_blank(start)
        .map(|v| parse_date("startDate", &v))
        .transpose()?;
    let end = non_blank(end)
        .map(|v| parse_date("endDate", &v))
        .transpose()?;

    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(ReportError::invalid_filter(
                "startDate",
                format!("{s} is after endDate {e}"),
            ));
        }
    }

    Ok(DateRange { start, end })
}

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp (its date part).
fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| ReportError::invalid_filter(field, format!("not a date: {value:?}")))
}
