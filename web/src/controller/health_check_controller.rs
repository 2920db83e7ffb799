use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

/// GET liveness plus the current size of the connection registry
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API router is up and responding to requests"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn health_check(State(app_state): State<AppState>) -> impl IntoResponse {
    let registry = app_state.sse_manager_ref().registry();

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "connectedUsers": registry.user_count(),
            "openConnections": registry.connection_count()
        })),
    )
}
