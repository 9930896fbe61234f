//! `SeaORM` Entity for customers table.

use chrono::Utc;
use leasebook_core::lease::Customer;
use leasebook_shared::types::CustomerId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub car_brand: Option<String>,
    pub car_model: Option<String>,
    pub car_year: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub purchase_cost: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub leasing_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub monthly_payment: Decimal,
    pub lease_duration: i32,
    pub start_date: Date,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Converts the row into the domain type.
    #[must_use]
    pub fn into_domain(self) -> Customer {
        Customer {
            id: CustomerId::from_uuid(self.id),
            full_name: self.full_name,
            phone: self.phone,
            car_brand: self.car_brand,
            car_model: self.car_model,
            car_year: self.car_year,
            purchase_cost: self.purchase_cost,
            leasing_amount: self.leasing_amount,
            monthly_payment: self.monthly_payment,
            lease_duration: self.lease_duration,
            start_date: self.start_date,
            created_at: self.created_at.with_timezone(&Utc),
        }
    }
}
