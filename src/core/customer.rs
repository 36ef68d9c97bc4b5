//! Customer business logic - Create, read, update and delete customers.
//!
//! Creation and updates take typed inputs ([`NewCustomer`], [`CustomerChanges`])
//! that are validated before anything reaches the database. Both names are required;
//! address fields are free text; `country` must be one of the [`Country`] choices
//! and falls back to the default when left blank.

use crate::{
    entities::{Country, Customer, Order, customer, order},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, Unchanged, prelude::*};
use tracing::{debug, info, instrument};

/// Message returned when either name is missing.
pub const NAMES_REQUIRED: &str = "First Name and Last Name fields are required";

/// Longest value accepted for any customer text field.
pub const MAX_FIELD_LEN: usize = 250;

/// Input for [`create_customer`]. Blank address fields and a blank country are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Input for [`update_customer`]. `None` leaves the stored value as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

/// A customer whose fields have passed validation, ready to persist.
#[derive(Debug)]
struct ValidCustomer {
    first_name: String,
    last_name: String,
    street: String,
    city: String,
    state: String,
    zip_code: String,
    country: Country,
}

fn check_length(field: &str, value: &str) -> Result<()> {
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(Error::validation(format!(
            "Ensure {field} has at most {MAX_FIELD_LEN} characters"
        )));
    }
    Ok(())
}

fn validate(input: NewCustomer) -> Result<ValidCustomer> {
    let first_name = input.first_name.trim().to_string();
    let last_name = input.last_name.trim().to_string();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(Error::validation(NAMES_REQUIRED));
    }

    let country = Country::from_form_value(&input.country).ok_or_else(|| {
        Error::validation(format!(
            "Select a valid country, '{}' is not one of the choices",
            input.country.trim()
        ))
    })?;

    let valid = ValidCustomer {
        first_name,
        last_name,
        street: input.street.trim().to_string(),
        city: input.city.trim().to_string(),
        state: input.state.trim().to_string(),
        zip_code: input.zip_code.trim().to_string(),
        country,
    };

    for (field, value) in [
        ("first_name", &valid.first_name),
        ("last_name", &valid.last_name),
        ("street", &valid.street),
        ("city", &valid.city),
        ("state", &valid.state),
        ("zip_code", &valid.zip_code),
    ] {
        check_length(field, value)?;
    }

    Ok(valid)
}

impl CustomerChanges {
    /// Merges these changes over `current`, producing a full input to validate.
    fn apply_to(self, current: &customer::Model) -> NewCustomer {
        NewCustomer {
            first_name: self.first_name.unwrap_or_else(|| current.first_name.clone()),
            last_name: self.last_name.unwrap_or_else(|| current.last_name.clone()),
            street: self.street.unwrap_or_else(|| current.street.clone()),
            city: self.city.unwrap_or_else(|| current.city.clone()),
            state: self.state.unwrap_or_else(|| current.state.clone()),
            zip_code: self.zip_code.unwrap_or_else(|| current.zip_code.clone()),
            country: self
                .country
                .unwrap_or_else(|| current.country.code().to_string()),
        }
    }
}

/// Retrieves all customers in the order they were created.
pub async fn list_customers(db: &DatabaseConnection) -> Result<Vec<customer::Model>> {
    Customer::find()
        .order_by_asc(customer::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Number of stored customers.
pub async fn count_customers(db: &DatabaseConnection) -> Result<u64> {
    Customer::find().count(db).await.map_err(Into::into)
}

/// Retrieves a customer by ID.
///
/// # Errors
/// Returns [`Error::CustomerNotFound`] if no customer has this ID, or a database error.
pub async fn get_customer(db: &DatabaseConnection, customer_id: i64) -> Result<customer::Model> {
    Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or(Error::CustomerNotFound { id: customer_id })
}

/// Validates `input` and stores a new customer.
///
/// Nothing is written when validation fails.
///
/// # Errors
/// Returns [`Error::Validation`] with [`NAMES_REQUIRED`] if either name is blank,
/// [`Error::Validation`] for an unknown country or an over-long field, or a database
/// error if the insert fails.
#[instrument(skip(db))]
pub async fn create_customer(db: &DatabaseConnection, input: NewCustomer) -> Result<customer::Model> {
    let valid = validate(input)?;

    let customer = customer::ActiveModel {
        first_name: Set(valid.first_name),
        last_name: Set(valid.last_name),
        street: Set(valid.street),
        city: Set(valid.city),
        state: Set(valid.state),
        zip_code: Set(valid.zip_code),
        country: Set(valid.country),
        ..Default::default()
    };
    let created = customer.insert(db).await?;
    info!("Created customer {} ({})", created.id, created.display_name());
    Ok(created)
}

/// Applies `changes` to an existing customer and stores the result.
///
/// Fields left as `None` keep their stored values. The merged record is validated
/// with the same rules as [`create_customer`].
///
/// # Errors
/// Returns [`Error::CustomerNotFound`] if the customer does not exist,
/// [`Error::Validation`] if the merged record is invalid, or a database error.
#[instrument(skip(db))]
pub async fn update_customer(
    db: &DatabaseConnection,
    customer_id: i64,
    changes: CustomerChanges,
) -> Result<customer::Model> {
    let current = get_customer(db, customer_id).await?;
    apply_customer_changes(db, &current, changes).await
}

/// Applies `changes` over an already loaded customer and stores the result.
///
/// `current` is the snapshot the changes are merged into; fields left as `None`
/// keep the values it holds.
///
/// # Errors
/// Returns [`Error::Validation`] if the merged record is invalid, or a database error.
#[instrument(skip(db, current), fields(customer_id = current.id))]
pub async fn apply_customer_changes(
    db: &DatabaseConnection,
    current: &customer::Model,
    changes: CustomerChanges,
) -> Result<customer::Model> {
    let valid = validate(changes.apply_to(current))?;

    let customer = customer::ActiveModel {
        id: Unchanged(current.id),
        first_name: Set(valid.first_name),
        last_name: Set(valid.last_name),
        street: Set(valid.street),
        city: Set(valid.city),
        state: Set(valid.state),
        zip_code: Set(valid.zip_code),
        country: Set(valid.country),
    };
    let updated = customer.update(db).await?;
    debug!("Updated customer {}", updated.id);
    Ok(updated)
}

/// Deletes a customer that has no orders.
///
/// # Errors
/// Returns [`Error::CustomerNotFound`] if the customer does not exist,
/// [`Error::Protected`] while any order references it, or a database error.
#[instrument(skip(db))]
pub async fn delete_customer(db: &DatabaseConnection, customer_id: i64) -> Result<()> {
    let customer = get_customer(db, customer_id).await?;

    let orders = Order::find()
        .filter(order::Column::CustomerId.eq(customer_id))
        .count(db)
        .await?;
    if orders > 0 {
        return Err(Error::Protected {
            entity: "customer",
            id: customer_id,
            dependents: orders,
            dependent_kind: "order(s)",
        });
    }

    customer.delete(db).await?;
    info!("Deleted customer {}", customer_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn juan() -> NewCustomer {
        NewCustomer {
            first_name: "Juan".to_string(),
            last_name: "Dela Cruz".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_customer_validation() -> Result<()> {
        // No queries are queued, so any database access would fail the test
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let missing_first = NewCustomer {
            first_name: String::new(),
            ..juan()
        };
        let result = create_customer(&db, missing_first).await;
        assert!(matches!(result, Err(Error::Validation { ref message }) if message == NAMES_REQUIRED));

        let missing_last = NewCustomer {
            last_name: "   ".to_string(),
            ..juan()
        };
        let result = create_customer(&db, missing_last).await;
        assert!(matches!(result, Err(Error::Validation { ref message }) if message == NAMES_REQUIRED));

        let bad_country = NewCustomer {
            country: "Atlantis".to_string(),
            ..juan()
        };
        let result = create_customer(&db, bad_country).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        let long_city = NewCustomer {
            city: "x".repeat(MAX_FIELD_LEN + 1),
            ..juan()
        };
        let result = create_customer(&db, long_city).await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_customer_defaults_country() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_customer(
            &db,
            NewCustomer {
                country: String::new(),
                ..juan()
            },
        )
        .await?;

        assert_eq!(created.first_name, "Juan");
        assert_eq!(created.last_name, "Dela Cruz");
        assert_eq!(created.country, Country::Philippines);
        assert_eq!(created.street, "");
        assert_eq!(created.display_name(), "Dela Cruz, Juan");
        assert_eq!(count_customers(&db).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_customer_invalid_persists_nothing() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_customer(
            &db,
            NewCustomer {
                first_name: "Juan".to_string(),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));
        assert_eq!(count_customers(&db).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_customer_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = get_customer(&db, 42).await;
        assert!(matches!(result, Err(Error::CustomerNotFound { id: 42 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_customers_in_creation_order() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(list_customers(&db).await?.is_empty());

        let first = create_test_customer(&db, "Maria", "Santos").await?;
        let second = create_test_customer(&db, "Andres", "Bonifacio").await?;

        let customers = list_customers(&db).await?;
        assert_eq!(customers, vec![first, second]);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_customer_partial() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_customer(
            &db,
            NewCustomer {
                street: "Rizal Ave".to_string(),
                ..juan()
            },
        )
        .await?;

        let updated = update_customer(
            &db,
            created.id,
            CustomerChanges {
                city: Some("Manila".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.city, "Manila");
        assert_eq!(updated.first_name, created.first_name);
        assert_eq!(updated.last_name, created.last_name);
        assert_eq!(updated.street, "Rizal Ave");
        assert_eq!(updated.country, Country::Philippines);

        // Verify the update persisted
        let stored = get_customer(&db, created.id).await?;
        assert_eq!(stored, updated);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_customer_without_changes() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_customer(&db, juan()).await?;

        let updated = update_customer(&db, created.id, CustomerChanges::default()).await?;
        assert_eq!(updated, created);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_customer_rejects_blank_name() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_customer(&db, juan()).await?;

        let result = update_customer(
            &db,
            created.id,
            CustomerChanges {
                last_name: Some(String::new()),
                city: Some("Cebu".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { ref message }) if message == NAMES_REQUIRED));

        // Nothing was written
        let stored = get_customer(&db, created.id).await?;
        assert_eq!(stored, created);

        Ok(())
    }

    #[tokio::test]
    async fn test_apply_customer_changes_merges_into_snapshot() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_customer(&db, juan()).await?;

        let updated = apply_customer_changes(
            &db,
            &created,
            CustomerChanges {
                zip_code: Some("1000".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.zip_code, "1000");
        assert_eq!(updated.first_name, created.first_name);
        assert_eq!(get_customer(&db, created.id).await?, updated);

        let result = apply_customer_changes(
            &db,
            &created,
            CustomerChanges {
                first_name: Some(" ".to_string()),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { ref message }) if message == NAMES_REQUIRED));
        assert_eq!(get_customer(&db, created.id).await?, updated);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_customer_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_customer(&db, 7, CustomerChanges::default()).await;
        assert!(matches!(result, Err(Error::CustomerNotFound { id: 7 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_customer() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "Maria", "Santos").await?;

        delete_customer(&db, customer.id).await?;
        assert!(matches!(
            get_customer(&db, customer.id).await,
            Err(Error::CustomerNotFound { id: _ })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_customer_with_orders_is_protected() -> Result<()> {
        let fixture = setup_with_order().await?;

        let result = delete_customer(&fixture.db, fixture.customer.id).await;
        assert!(matches!(
            result,
            Err(Error::Protected {
                entity: "customer",
                dependents: 1,
                ..
            })
        ));

        // Customer is still there
        get_customer(&fixture.db, fixture.customer.id).await?;

        Ok(())
    }
}
