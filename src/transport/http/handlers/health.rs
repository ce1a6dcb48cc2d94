use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (data file readable)", body = ApiResponse),
        (status = 503, description = "Service is unhealthy (data file unreadable)", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.actions.store().lock().await;

    match store.read_db().await {
        Ok(doc) => (
            StatusCode::OK,
            Json(ApiResponse::ok(serde_json::json!({
                "status": "ok",
                "products": doc.products.len(),
                "sessions": state.actions.sessions().count().await,
            }))),
        )
            .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse {
                success: false,
                data: Some(serde_json::json!({ "status": "unhealthy" })),
                error: Some(format!("Data file unreadable: {}", e)),
            }),
        )
            .into_response(),
    }
}
