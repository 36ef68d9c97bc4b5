//! Order entity - A customer's order, taken by a staff user.
//!
//! `amount_total` mirrors the sum of the order's lines and is kept current by
//! [`crate::core::order`]. `amount_received` is whatever has been paid so far and may
//! be below or above the total.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer who placed the order
    pub customer_id: i64,
    pub date: Date,
    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub code: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount_received: Decimal,
    /// Staff user who took the order
    pub taken_by: i64,
}

impl Model {
    /// `"(id) code"`
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("({}) {}", self.id, self.code)
    }

    /// Amount still owed; negative when the customer overpaid.
    #[must_use]
    pub fn balance_due(&self) -> Decimal {
        self.amount_total - self.amount_received
    }
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_delete = "Restrict"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TakenBy",
        to = "super::user::Column::Id",
        on_delete = "Restrict"
    )]
    TakenBy,
    /// One order has many lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TakenBy.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
