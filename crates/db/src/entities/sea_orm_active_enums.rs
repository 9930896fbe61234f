//! Enums stored as text columns.

use leasebook_core::lease;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting payment.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Settled.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Flagged overdue by whoever wrote the row.
    #[sea_orm(string_value = "overdue")]
    Overdue,
}

impl From<PaymentStatus> for lease::PaymentStatus {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Pending => Self::Pending,
            PaymentStatus::Paid => Self::Paid,
            PaymentStatus::Overdue => Self::Overdue,
        }
    }
}
