//! Customer entity - A purchaser with contact and address details.
//!
//! Only `first_name` and `last_name` are required. Address fields are stored as
//! empty strings when left blank, and `country` is limited to the [`Country`] choices.

use sea_orm::{Iterable, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Countries a customer address may be in.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(250))")]
pub enum Country {
    /// Stored as `ph`
    #[default]
    #[sea_orm(string_value = "ph")]
    Philippines,
}

impl Country {
    /// Short code persisted in the `country` column.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Philippines => "ph",
        }
    }

    /// Human-readable label shown in forms and views.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Philippines => "Philippines",
        }
    }

    /// Parses a submitted form value. Blank input means "use the default";
    /// both the code and the label are accepted, case-insensitively.
    #[must_use]
    pub fn from_form_value(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Some(Self::default());
        }
        Self::iter().find(|c| {
            c.code().eq_ignore_ascii_case(value) || c.label().eq_ignore_ascii_case(value)
        })
    }
}

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "String(StringLen::N(250))")]
    pub first_name: String,
    #[sea_orm(column_type = "String(StringLen::N(250))")]
    pub last_name: String,
    #[sea_orm(column_type = "String(StringLen::N(250))")]
    pub street: String,
    #[sea_orm(column_type = "String(StringLen::N(250))")]
    pub city: String,
    #[sea_orm(column_type = "String(StringLen::N(250))")]
    pub state: String,
    #[sea_orm(column_type = "String(StringLen::N(250))")]
    pub zip_code: String,
    pub country: Country,
}

impl Model {
    /// `"Last, First"`, the way customers are listed.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// Defines relationships between Customer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
