//! Staff user logic - The accounts recorded as `taken_by` on orders.

use crate::{
    entities::{Order, User, order, user},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

const MAX_USERNAME_LEN: usize = 150;

/// Input for [`create_user`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Retrieves all users ordered by username.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .order_by_asc(user::Column::Username)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a user by ID.
///
/// # Errors
/// Returns [`Error::UserNotFound`] if no user has this ID, or a database error.
pub async fn get_user<C>(db: &C, user_id: i64) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })
}

/// Finds a user by username.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates an active staff user.
///
/// # Errors
/// Returns [`Error::Validation`] if the username is blank, too long or already taken,
/// or a database error.
#[instrument(skip(db))]
pub async fn create_user(db: &DatabaseConnection, input: NewUser) -> Result<user::Model> {
    let username = input.username.trim().to_string();
    if username.is_empty() {
        return Err(Error::validation("Username is required"));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(Error::validation(format!(
            "Ensure username has at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if get_user_by_username(db, &username).await?.is_some() {
        return Err(Error::validation(format!(
            "A user with username '{username}' already exists"
        )));
    }

    let user = user::ActiveModel {
        username: Set(username),
        first_name: Set(input.first_name.trim().to_string()),
        last_name: Set(input.last_name.trim().to_string()),
        is_active: Set(true),
        ..Default::default()
    };
    let created = user.insert(db).await?;
    info!("Created user {} ({})", created.id, created.username);
    Ok(created)
}

/// Deletes a user who has not taken any orders.
///
/// # Errors
/// Returns [`Error::UserNotFound`] if the user does not exist,
/// [`Error::Protected`] while orders reference the user, or a database error.
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, user_id: i64) -> Result<()> {
    let user = get_user(db, user_id).await?;

    let orders = Order::find()
        .filter(order::Column::TakenBy.eq(user_id))
        .count(db)
        .await?;
    if orders > 0 {
        return Err(Error::Protected {
            entity: "user",
            id: user_id,
            dependents: orders,
            dependent_kind: "order(s)",
        });
    }

    user.delete(db).await?;
    info!("Deleted user {}", user_id);
    Ok(())
}
