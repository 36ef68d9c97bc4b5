//! Startup seeding of staff users and catalog items listed in config.toml.
//!
//! Seeding is idempotent: users are matched by username and items by code, and
//! existing records are left exactly as they are.

use crate::{
    config::settings::Settings,
    core::{
        item::{self, NewItem},
        user::{self, NewUser},
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument, warn};

/// How many records a seeding run created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users_created: usize,
    pub items_created: usize,
}

/// Creates every configured user and item that does not exist yet.
///
/// # Errors
/// Returns an error if a configured entry fails validation or the database fails.
#[instrument(skip(db, settings))]
pub async fn seed_from_settings(db: &DatabaseConnection, settings: &Settings) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for seed in &settings.users {
        if user::get_user_by_username(db, seed.username.trim()).await?.is_some() {
            warn!("User '{}' already exists. Skipping.", seed.username);
            continue;
        }
        user::create_user(
            db,
            NewUser {
                username: seed.username.clone(),
                first_name: seed.first_name.clone(),
                last_name: seed.last_name.clone(),
            },
        )
        .await?;
        summary.users_created += 1;
    }

    for seed in &settings.items {
        if item::get_item_by_code(db, seed.code.trim()).await?.is_some() {
            warn!("Item with code '{}' already exists. Skipping.", seed.code);
            continue;
        }
        item::create_item(
            db,
            NewItem {
                name: seed.name.clone(),
                description: seed.description.clone(),
                price: seed.price,
                code: seed.code.clone(),
                is_available: seed.is_available,
            },
        )
        .await?;
        summary.items_created += 1;
    }

    info!(
        "Seeding finished: {} user(s), {} item(s) created",
        summary.users_created, summary.items_created
    );
    Ok(summary)
}
