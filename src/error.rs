use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error response type
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Failures of item operations
///
/// Client faults are detected before the store is touched; everything the
/// store itself reports ends up in `Database` with its message preserved.
#[derive(Debug, Error)]
pub enum ItemError {
    /// Path parameter is not a 24 hex character object id
    #[error("Invalid item id: expected a 24 character hex object id, got '{0}'")]
    InvalidId(String),
    /// Request body is malformed or breaks a field rule
    #[error("Invalid request body: {0}")]
    InvalidPayload(String),
    /// Update body carried no field with a value
    #[error("No fields to update")]
    NoFieldsToUpdate,
    /// No item with this id
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The service has no store connection
    #[error("Database not connected")]
    ServiceUnavailable,
    /// Database operation error
    #[error("Database error: {0:#}")]
    Database(anyhow::Error),
}

impl ItemError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ItemError::InvalidId(_) | ItemError::InvalidPayload(_) | ItemError::NoFieldsToUpdate => {
                StatusCode::BAD_REQUEST
            }
            ItemError::NotFound(_) => StatusCode::NOT_FOUND,
            ItemError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ItemError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ItemError {
    fn from(err: anyhow::Error) -> Self {
        ItemError::Database(err)
    }
}

impl From<JsonRejection> for ItemError {
    fn from(rejection: JsonRejection) -> Self {
        ItemError::InvalidPayload(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ItemError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ItemError::InvalidPayload(errors.to_string())
    }
}
