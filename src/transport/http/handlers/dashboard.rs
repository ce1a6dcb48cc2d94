use crate::transport::http::handlers::common::{respond, session_token};
use crate::transport::http::types::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(("x-session-id" = String, Header, description = "Session token")),
    responses(
        (status = 200, description = "Inventory summary for artisans, featured products for buyers", body = ApiResponse),
        (status = 401, description = "Not logged in", body = ApiResponse)
    )
)]
pub async fn dashboard_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let token = match session_token(&headers) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    respond(state.actions.dashboard(&token).await)
}

#[utoipa::path(
    get,
    path = "/api/analytics",
    responses(
        (status = 200, description = "Inventory summary", body = ApiResponse),
        (status = 500, description = "Data file unreadable", body = ApiResponse)
    )
)]
pub async fn analytics_handler(State(state): State<AppState>) -> impl IntoResponse {
    respond(state.actions.inventory_summary().await)
}
