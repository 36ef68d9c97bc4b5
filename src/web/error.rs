//! Error responses.
//!
//! Not-found errors become `404`, validation problems `422`, blocked deletions `409`.
//! Store and configuration failures are logged and reported as a generic `500`
//! without internal detail.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

/// Message shown to users when the store fails.
pub const GENERIC_FAILURE: &str = "Something went wrong while saving. Please try again.";

impl Error {
    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::CustomerNotFound { .. }
            | Self::ItemNotFound { .. }
            | Self::OrderNotFound { .. }
            | Self::OrderItemNotFound { .. }
            | Self::UserNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidQuantity { .. }
            | Self::ItemUnavailable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Protected { .. } => StatusCode::CONFLICT,
            Self::Database(_) | Self::Config { .. } | Self::Io(_) | Self::EnvVar(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message that is safe to show to users.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            GENERIC_FAILURE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
