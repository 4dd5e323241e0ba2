use crate::models::HealthResponse;
use crate::routes;
use crate::service::StoreHealth;
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET / handler - Health check endpoint
///
/// Pings the database (never the items collection) and reports the result.
/// Always answers 200 so the endpoint stays servable while the database is down.
///
/// The ping is capped at a couple of seconds, so a hung server reports
/// `disconnected` instead of stalling the response.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service and database status", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, database) = match state.items.health_check().await {
        StoreHealth::Connected => ("healthy", "connected"),
        StoreHealth::Disconnected => ("unhealthy", "disconnected"),
    };

    tracing::debug!("Health check: {} ({})", status, database);
    Json(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{disconnected_app, send, test_app, TestApp};
    use axum::{body::Body, http::{Request, StatusCode}};

    fn health_request() -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint_healthy() {
        let TestApp { app, .. } = test_app();

        let (status, body) = send(app, health_request()).await;

        assert_eq!(status, StatusCode::OK);
        let response: HealthResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.status, "healthy");
        assert_eq!(response.database, "connected");
    }

    #[tokio::test]
    async fn test_health_endpoint_unreachable_database() {
        let TestApp { app, store } = test_app();
        store.set_unreachable(true);

        let (status, body) = send(app, health_request()).await;

        assert_eq!(status, StatusCode::OK);
        let response: HealthResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.status, "unhealthy");
        assert_eq!(response.database, "disconnected");
    }

    #[tokio::test]
    async fn test_health_endpoint_without_connection() {
        let app = disconnected_app();

        let (status, body) = send(app, health_request()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["database"], "disconnected");
    }
}
