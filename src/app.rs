use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers::{
    create_handler, delete_handler, get_handler, health_handler, list_by_category_handler,
    list_handler, update_handler,
};
use crate::routes;
use crate::state::AppState;

/// Build the application router with CORS, request tracing and API docs
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::HEALTH, get(health_handler))
        .route(routes::ITEMS, get(list_handler).post(create_handler))
        .route(
            routes::ITEM,
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route(routes::ITEMS_BY_CATEGORY, get(list_by_category_handler))
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
