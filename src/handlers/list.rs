use crate::error::{ErrorResponse, ItemError};
use crate::models::ItemResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, Json};

/// GET /items handler - List every item
///
/// Items come back in the store's natural order; no sorting is applied.
#[utoipa::path(
    get,
    path = routes::ITEMS,
    responses(
        (status = 200, description = "All items", body = Vec<ItemResponse>),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Database not connected", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemResponse>>, ItemError> {
    let items = state.items.list_all().await?;

    tracing::info!("Listed {} items", items.len());
    Ok(Json(items))
}

/// GET /items/category/{name} handler - List items of one category
///
/// Exact, case-sensitive match on `categoryName`.
#[utoipa::path(
    get,
    path = routes::ITEMS_BY_CATEGORY,
    params(
        ("name" = String, Path, description = "Category name to match exactly")
    ),
    responses(
        (status = 200, description = "Items in the category", body = Vec<ItemResponse>),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Database not connected", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn list_by_category_handler(
    State(state): State<AppState>,
    Path(category_name): Path<String>,
) -> Result<Json<Vec<ItemResponse>>, ItemError> {
    let items = state.items.list_by_category(&category_name).await?;

    tracing::info!("Listed {} items in category '{}'", items.len(), category_name);
    Ok(Json(items))
}
