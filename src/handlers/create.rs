use crate::error::{ErrorResponse, ItemError};
use crate::models::{CreateItem, CreateItemResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};

/// POST /items handler - Create an item
#[utoipa::path(
    post,
    path = routes::ITEMS,
    request_body = CreateItem,
    responses(
        (status = 200, description = "Item created", body = CreateItemResponse),
        (status = 400, description = "Malformed body or empty required field", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Database not connected", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateItem>, JsonRejection>,
) -> Result<Json<CreateItemResponse>, ItemError> {
    let Json(input) = payload?;

    let id = state.items.create(input).await?;

    Ok(Json(CreateItemResponse {
        success: true,
        id,
        message: "Item created successfully".to_string(),
    }))
}
