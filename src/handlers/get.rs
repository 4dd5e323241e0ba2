use crate::error::{ErrorResponse, ItemError};
use crate::models::ItemResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, Json};

/// GET /items/{id} handler - Retrieve one item
#[utoipa::path(
    get,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "24 hex character object id")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 400, description = "Invalid id format", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Database not connected", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ItemError> {
    let item = state.items.get_by_id(&id).await?;

    tracing::info!("Successfully retrieved item with id: {}", id);
    Ok(Json(item))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{create_item, empty_request, send, test_app, TestApp};
    use crate::models::ItemResponse;
    use axum::http::StatusCode;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_endpoint_success() {
        let TestApp { app, .. } = test_app();
        let id = create_item(
            &app,
            json!({ "categoryName": "Drinks", "name": "Cola", "imgUrl": "http://x/c.png" }),
        )
        .await;

        let (status, body) = send(app, empty_request("GET", &format!("/items/{}", id))).await;

        assert_eq!(status, StatusCode::OK);
        let item: ItemResponse = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(item.id, id);
        assert_eq!(
            body,
            json!({
                "id": id,
                "categoryName": "Drinks",
                "name": "Cola",
                "imgUrl": "http://x/c.png",
                "description": ""
            })
        );
    }

    #[tokio::test]
    async fn test_get_endpoint_not_found() {
        let TestApp { app, .. } = test_app();
        let unused = ObjectId::new().to_hex();

        let (status, body) = send(app, empty_request("GET", &format!("/items/{}", unused))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("Item not found"));
        assert!(error.contains(&unused));
    }

    #[tokio::test]
    async fn test_get_endpoint_invalid_id() {
        let TestApp { app, store } = test_app();
        store.set_unreachable(true);

        let (status, body) = send(app, empty_request("GET", "/items/not-an-id")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Invalid item id"));
    }
}
