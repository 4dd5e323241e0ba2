use crate::error::{ErrorResponse, ItemError};
use crate::models::MessageResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, Json};

/// DELETE /items/{id} handler - Delete an item
#[utoipa::path(
    delete,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "24 hex character object id")
    ),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 400, description = "Invalid id format", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Database not connected", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ItemError> {
    state.items.delete_by_id(&id).await?;

    Ok(Json(MessageResponse::ok("Item deleted successfully")))
}
