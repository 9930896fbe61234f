//! Profit formulas.
//!
//! Two metrics share the name "profit" and are deliberately kept apart:
//!
//! - [`collection_profit`]: cash actually collected minus principal invested.
//!   Used by the financial summary.
//! - [`lease_profit`]: what a lease earns over its whole schedule
//!   (`installment × duration − principal`). Used per customer by the
//!   dashboard and the spreadsheet export.

use rust_decimal::Decimal;

/// Scheduled profit of a single lease.
#[must_use]
pub fn lease_profit(monthly_payment: Decimal, lease_duration: i32, leasing_amount: Decimal) -> Decimal {
    monthly_payment * Decimal::from(lease_duration) - leasing_amount
}

/// Realised profit across a portfolio: collected minus invested.
#[must_use]
pub fn collection_profit(total_collected: Decimal, total_invested: Decimal) -> Decimal {
    total_collected - total_invested
}
