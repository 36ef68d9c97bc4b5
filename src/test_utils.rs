//! Shared test utilities for the order desk.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        customer::{self, NewCustomer},
        item::{self, NewItem},
        order::{self, NewOrder, NewOrderLine},
        user::{self, NewUser},
    },
    entities,
    errors::Result,
};
use sea_orm::{DatabaseConnection, prelude::Decimal};
use tracing_subscriber::EnvFilter;

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A fixed order date so tests do not depend on the clock.
pub fn today() -> sea_orm::prelude::Date {
    chrono::NaiveDate::from_ymd_opt(2024, 6, 12).unwrap_or_default()
}

/// Creates a customer with only the required names set.
pub async fn create_test_customer(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
) -> Result<entities::customer::Model> {
    customer::create_customer(
        db,
        NewCustomer {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            ..Default::default()
        },
    )
    .await
}

/// Creates an available item; the code is derived from the name.
pub async fn create_test_item(
    db: &DatabaseConnection,
    name: &str,
    price: Decimal,
) -> Result<entities::item::Model> {
    item::create_item(
        db,
        NewItem {
            name: name.to_string(),
            description: format!("Test item {name}"),
            price,
            code: name.to_uppercase().replace(' ', "-"),
            is_available: true,
        },
    )
    .await
}

/// Creates a staff user with the given username.
pub async fn create_test_user(db: &DatabaseConnection, username: &str) -> Result<entities::user::Model> {
    user::create_user(
        db,
        NewUser {
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "Staff".to_string(),
        },
    )
    .await
}

/// Everything [`setup_with_order`] creates.
pub struct OrderFixture {
    pub db: DatabaseConnection,
    pub customer: entities::customer::Model,
    pub user: entities::user::Model,
    pub item: entities::item::Model,
    pub order: entities::order::Model,
}

/// Sets up a customer, a staff user, one item priced 65.00 and an order for one of it.
pub async fn setup_with_order() -> Result<OrderFixture> {
    let db = setup_test_db().await?;
    let customer = create_test_customer(&db, "Juan", "Dela Cruz").await?;
    let user = create_test_user(&db, "cashier").await?;
    let item = create_test_item(&db, "Rice", Decimal::new(6_500, 2)).await?;

    let created = order::create_order(
        &db,
        NewOrder {
            customer_id: customer.id,
            taken_by: user.id,
            date: today(),
            code: "ORD-1".to_string(),
            amount_received: Decimal::ZERO,
            lines: vec![NewOrderLine {
                item_id: item.id,
                quantity: 1,
            }],
        },
    )
    .await?;

    Ok(OrderFixture {
        db,
        customer,
        user,
        item,
        order: created.order,
    })
}
