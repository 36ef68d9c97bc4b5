//! User entity - A staff account that takes orders.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Staff user database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique across all users
    #[sea_orm(unique, column_type = "String(StringLen::N(150))")]
    pub username: String,
    #[sea_orm(column_type = "String(StringLen::N(150))")]
    pub first_name: String,
    #[sea_orm(column_type = "String(StringLen::N(150))")]
    pub last_name: String,
    pub is_active: bool,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Orders this user has taken
    #[sea_orm(has_many = "super::order::Entity")]
    OrdersTaken,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrdersTaken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
