//! `SeaORM` Entity for payments table.

use leasebook_core::lease::Payment;
use leasebook_shared::types::{CustomerId, PaymentId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::PaymentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub amount: Decimal,
    pub due_date: Date,
    pub payment_date: Option<Date>,
    pub status: PaymentStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id",
        on_delete = "Cascade"
    )]
    Customers,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Converts the row into the domain type.
    #[must_use]
    pub fn into_domain(self) -> Payment {
        Payment {
            id: PaymentId::from_uuid(self.id),
            customer_id: CustomerId::from_uuid(self.customer_id),
            amount: self.amount,
            due_date: self.due_date,
            payment_date: self.payment_date,
            status: self.status.into(),
        }
    }
}
