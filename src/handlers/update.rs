use crate::error::{ErrorResponse, ItemError};
use crate::models::{ItemPatch, MessageResponse};
use crate::routes;
use crate::service::UpdateStatus;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::Path, extract::State, Json};

/// PUT /items/{id} handler - Partially update an item
///
/// Only fields present with a non-null value are written. Resubmitting the
/// stored values succeeds with a "no changes" message.
#[utoipa::path(
    put,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "24 hex character object id")
    ),
    request_body = ItemPatch,
    responses(
        (status = 200, description = "Item updated or already up to date", body = MessageResponse),
        (status = 400, description = "Invalid id, malformed body or no fields to update", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Database not connected", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ItemPatch>, JsonRejection>,
) -> Result<Json<MessageResponse>, ItemError> {
    state.items.resolve_id(&id)?;
    let Json(patch) = payload?;

    let message = match state.items.update_by_id(&id, patch).await? {
        UpdateStatus::Updated => "Item updated successfully",
        UpdateStatus::NoChanges => "No changes made to item",
    };

    Ok(Json(MessageResponse::ok(message)))
}
