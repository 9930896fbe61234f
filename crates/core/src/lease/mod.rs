//! Leasing domain: customers, their scheduled payments, and the two profit
//! formulas the reports rely on.

pub mod profit;
pub mod types;

pub use profit::{collection_profit, lease_profit};
pub use types::*;
