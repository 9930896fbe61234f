//! Currency formatting for documents.
//!
//! Amounts stay `rust_decimal::Decimal` end to end; this type only decides
//! how they are printed.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Formats amounts with a currency symbol and two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Symbol placed before the digits (e.g. "$", "AZN ").
    pub symbol: String,
}

impl CurrencyFormat {
    /// Creates a formatter for the given symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Formats an amount, e.g. `$1234.50` or `-$12.00`.
    ///
    /// Rounds half away from zero to two decimal places.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}{:.2}", self.symbol, rounded.abs())
        } else {
            format!("{}{:.2}", self.symbol, rounded.abs())
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new("$")
    }
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
