//! HTTP layer - axum router and handlers.
//!
//! Handlers are thin: they turn form input into typed service input, call into
//! [`crate::core`], and render a JSON view document or redirect.

/// Customer list, table, detail, create and update pages
pub mod customers;
/// Mapping from service errors to HTTP responses
pub mod error;
/// Landing page
pub mod home;

use axum::{Router, routing::get};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for all database operations
    pub database: Arc<DatabaseConnection>,
}

impl AppState {
    /// Creates a new `AppState` owning the given database connection.
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database: Arc::new(database),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/customers/", get(customers::customer_list))
        .route("/customers/t/", get(customers::customer_table))
        .route(
            "/customers/new/",
            get(customers::customer_create_form).post(customers::customer_create),
        )
        .route("/customers/{id}/", get(customers::customer_detail))
        .route(
            "/customers/{id}/edit",
            get(customers::customer_update_form).post(customers::customer_update),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
