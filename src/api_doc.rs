use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{
    CreateItem, CreateItemResponse, HealthResponse, ItemPatch, ItemResponse, MessageResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "food-items-api",
        version = "1.0.0",
        description = "CRUD API for menu items backed by MongoDB"
    ),
    paths(
        handlers::health::health_handler,
        handlers::create::create_handler,
        handlers::list::list_handler,
        handlers::list::list_by_category_handler,
        handlers::get::get_handler,
        handlers::update::update_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            CreateItem,
            ItemPatch,
            ItemResponse,
            CreateItemResponse,
            MessageResponse,
            HealthResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "items", description = "Item operations")
    )
)]
pub struct ApiDoc;
