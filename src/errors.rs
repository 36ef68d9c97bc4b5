//! Unified error type for the order desk.
//!
//! Service functions in [`crate::core`] return [`Result`]; the web layer maps each
//! variant onto an HTTP outcome in [`crate::web::error`].

use sea_orm::{DbErr, prelude::Decimal};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Input failed a field rule; the message is safe to show to users.
    #[error("{message}")]
    Validation { message: String },

    #[error("Customer {id} not found")]
    CustomerNotFound { id: i64 },

    #[error("Item {id} not found")]
    ItemNotFound { id: i64 },

    #[error("Order {id} not found")]
    OrderNotFound { id: i64 },

    #[error("Order item {id} not found")]
    OrderItemNotFound { id: i64 },

    #[error("User {id} not found")]
    UserNotFound { id: i64 },

    /// Deletion rejected because other records still reference this one.
    #[error("Cannot delete {entity} {id}: still referenced by {dependents} {dependent_kind}")]
    Protected {
        entity: &'static str,
        id: i64,
        dependents: u64,
        dependent_kind: &'static str,
    },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: Decimal },

    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i32 },

    #[error("Item {id} is not available")]
    ItemUnavailable { id: i64 },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
