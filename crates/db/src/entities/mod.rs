//! `SeaORM` entity definitions.

pub mod customers;
pub mod payments;
pub mod sea_orm_active_enums;

pub mod prelude {
    //! Entity re-exports.
    pub use super::customers::Entity as Customers;
    pub use super::payments::Entity as Payments;
}
