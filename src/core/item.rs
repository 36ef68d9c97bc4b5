//! Item business logic - Handles the product catalog.
//!
//! Items carry the current price. Order lines copy that price when they are created,
//! so changing an item's price here never touches existing orders. An item cannot be
//! deleted while any order line points at it; mark it unavailable instead.

use crate::{
    core::check_money,
    entities::{Item, OrderItem, item, order_item},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, Unchanged, prelude::*};
use tracing::{info, instrument};

const MAX_NAME_LEN: usize = 250;
const MAX_CODE_LEN: usize = 50;

/// Input for [`create_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub code: String,
    pub is_available: bool,
}

/// Input for [`update_item`]. `None` leaves the stored value as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub code: Option<String>,
    pub is_available: Option<bool>,
}

fn check_text(field: &str, value: &str, max_len: usize) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("Item {field} cannot be empty")));
    }
    if value.chars().count() > max_len {
        return Err(Error::validation(format!(
            "Ensure item {field} has at most {max_len} characters"
        )));
    }
    Ok(value.to_string())
}

fn validate(input: NewItem) -> Result<NewItem> {
    Ok(NewItem {
        name: check_text("name", &input.name, MAX_NAME_LEN)?,
        code: check_text("code", &input.code, MAX_CODE_LEN)?,
        price: check_money(input.price)?,
        description: input.description,
        is_available: input.is_available,
    })
}

/// Retrieves all items ordered by name.
pub async fn list_items(db: &DatabaseConnection) -> Result<Vec<item::Model>> {
    Item::find()
        .order_by_asc(item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the items that can currently be ordered, ordered by name.
pub async fn list_available_items(db: &DatabaseConnection) -> Result<Vec<item::Model>> {
    Item::find()
        .filter(item::Column::IsAvailable.eq(true))
        .order_by_asc(item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves an item by ID.
///
/// # Errors
/// Returns [`Error::ItemNotFound`] if no item has this ID, or a database error.
pub async fn get_item<C>(db: &C, item_id: i64) -> Result<item::Model>
where
    C: ConnectionTrait,
{
    Item::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::ItemNotFound { id: item_id })
}

/// Finds an item by its catalog code.
pub async fn get_item_by_code(db: &DatabaseConnection, code: &str) -> Result<Option<item::Model>> {
    Item::find()
        .filter(item::Column::Code.eq(code))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Validates `input` and adds it to the catalog.
///
/// # Errors
/// Returns [`Error::Validation`] for a blank or over-long name or code,
/// [`Error::InvalidAmount`] for a negative price or one with more than two decimal
/// places, or a database error.
#[instrument(skip(db))]
pub async fn create_item(db: &DatabaseConnection, input: NewItem) -> Result<item::Model> {
    let valid = validate(input)?;

    let item = item::ActiveModel {
        name: Set(valid.name),
        description: Set(valid.description),
        price: Set(valid.price),
        code: Set(valid.code),
        is_available: Set(valid.is_available),
        ..Default::default()
    };
    let created = item.insert(db).await?;
    info!("Added item {}", created.display_name());
    Ok(created)
}

/// Applies `changes` to an existing item.
///
/// # Errors
/// Returns [`Error::ItemNotFound`] if the item does not exist, a validation error for
/// invalid merged values, or a database error.
#[instrument(skip(db))]
pub async fn update_item(
    db: &DatabaseConnection,
    item_id: i64,
    changes: ItemChanges,
) -> Result<item::Model> {
    let current = get_item(db, item_id).await?;
    let valid = validate(NewItem {
        name: changes.name.unwrap_or(current.name),
        description: changes.description.unwrap_or(current.description),
        price: changes.price.unwrap_or(current.price),
        code: changes.code.unwrap_or(current.code),
        is_available: changes.is_available.unwrap_or(current.is_available),
    })?;

    let item = item::ActiveModel {
        id: Unchanged(current.id),
        name: Set(valid.name),
        description: Set(valid.description),
        price: Set(valid.price),
        code: Set(valid.code),
        is_available: Set(valid.is_available),
    };
    item.update(db).await.map_err(Into::into)
}

/// Marks an item as available or unavailable for new orders.
pub async fn set_item_availability(
    db: &DatabaseConnection,
    item_id: i64,
    is_available: bool,
) -> Result<item::Model> {
    update_item(
        db,
        item_id,
        ItemChanges {
            is_available: Some(is_available),
            ..Default::default()
        },
    )
    .await
}

/// Deletes an item that no order line references.
///
/// # Errors
/// Returns [`Error::ItemNotFound`] if the item does not exist,
/// [`Error::Protected`] while order lines reference it, or a database error.
#[instrument(skip(db))]
pub async fn delete_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let item = get_item(db, item_id).await?;

    let lines = OrderItem::find()
        .filter(order_item::Column::ItemId.eq(item_id))
        .count(db)
        .await?;
    if lines > 0 {
        return Err(Error::Protected {
            entity: "item",
            id: item_id,
            dependents: lines,
            dependent_kind: "order item(s)",
        });
    }

    item.delete(db).await?;
    info!("Deleted item {}", item_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn rice() -> NewItem {
        NewItem {
            name: "Rice".to_string(),
            description: "Jasmine rice, 1kg".to_string(),
            price: Decimal::new(6_500, 2),
            code: "RICE-1KG".to_string(),
            is_available: true,
        }
    }

    #[tokio::test]
    async fn test_create_item_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_item(
            &db,
            NewItem {
                name: "  ".to_string(),
                ..rice()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let result = create_item(
            &db,
            NewItem {
                code: "C".repeat(MAX_CODE_LEN + 1),
                ..rice()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let result = create_item(
            &db,
            NewItem {
                price: Decimal::new(-100, 2),
                ..rice()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        let result = create_item(
            &db,
            NewItem {
                price: Decimal::new(1_005, 3),
                ..rice()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidAmount { amount: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_get_item() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_item(&db, rice()).await?;
        assert_eq!(created.name, "Rice");
        assert_eq!(created.price, Decimal::new(6_500, 2));
        assert!(created.is_available);
        assert_eq!(created.display_name(), format!("({}) Rice", created.id));

        let fetched = get_item(&db, created.id).await?;
        assert_eq!(fetched.code, "RICE-1KG");
        assert_eq!(fetched.price.round_dp(2), Decimal::new(6_500, 2));

        let by_code = get_item_by_code(&db, "RICE-1KG").await?;
        assert_eq!(by_code.map(|i| i.id), Some(created.id));

        assert!(matches!(
            get_item(&db, 999).await,
            Err(Error::ItemNotFound { id: 999 })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_and_availability() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_item(&db, rice()).await?;

        let updated = update_item(
            &db,
            created.id,
            ItemChanges {
                price: Some(Decimal::new(7_000, 2)),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.price, Decimal::new(7_000, 2));
        assert_eq!(updated.name, "Rice");
        assert_eq!(updated.description, "Jasmine rice, 1kg");

        let hidden = set_item_availability(&db, created.id, false).await?;
        assert!(!hidden.is_available);
        assert!(list_available_items(&db).await?.is_empty());
        assert_eq!(list_items(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_items_ordered_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_item(&db, "Vinegar", Decimal::new(3_000, 2)).await?;
        create_test_item(&db, "Adobo Mix", Decimal::new(2_500, 2)).await?;

        let names: Vec<String> = list_items(&db).await?.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Adobo Mix", "Vinegar"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unreferenced_item() -> Result<()> {
        let db = setup_test_db().await?;
        let item = create_item(&db, rice()).await?;

        delete_item(&db, item.id).await?;
        assert!(matches!(
            get_item(&db, item.id).await,
            Err(Error::ItemNotFound { id: _ })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_referenced_item_is_protected() -> Result<()> {
        let fixture = setup_with_order().await?;

        let result = delete_item(&fixture.db, fixture.item.id).await;
        assert!(matches!(
            result,
            Err(Error::Protected {
                entity: "item",
                dependents: 1,
                ..
            })
        ));
        get_item(&fixture.db, fixture.item.id).await?;

        Ok(())
    }
}
