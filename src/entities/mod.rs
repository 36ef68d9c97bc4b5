//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod customer;
pub mod item;
pub mod order;
pub mod order_item;
pub mod user;

// Re-export specific types to avoid conflicts
pub use customer::{
    Column as CustomerColumn, Country, Entity as Customer, Model as CustomerModel,
};
pub use item::{Column as ItemColumn, Entity as Item, Model as ItemModel};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_item::{
    Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
