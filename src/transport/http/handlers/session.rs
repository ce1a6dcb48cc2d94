use crate::transport::http::handlers::common::{error_response, ok_response, session_token};
use crate::transport::http::types::{json_422, AppState, LoginRequest, SessionResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

async fn start_session(
    state: &AppState,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"role\": \"buyer\" | \"artisan\"}").into_response(),
    };
    let role = request.role.unwrap_or_default();
    let sessions = state.actions.sessions();
    let token = sessions.login(role).await;
    tracing::info!(role = ?role, "Session started");

    match sessions.get(&token).await {
        Some(session) => ok_response(SessionResponse { token, session }),
        None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "Session vanished"),
    }
}

#[utoipa::path(
    post,
    path = "/api/session/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token and flags", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    start_session(&state, request).await
}

#[utoipa::path(
    post,
    path = "/api/session/register",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token and flags", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn register_handler(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> impl IntoResponse {
    start_session(&state, request).await
}

#[utoipa::path(
    post,
    path = "/api/session/logout",
    params(("x-session-id" = String, Header, description = "Session token")),
    responses(
        (status = 200, description = "Login flags cleared; cart kept", body = ApiResponse),
        (status = 401, description = "Missing or unknown session", body = ApiResponse)
    )
)]
pub async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let token = match session_token(&headers) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    match state.actions.sessions().logout(&token).await {
        Some(session) => ok_response(session),
        None => error_response(StatusCode::UNAUTHORIZED, "Unknown or missing session."),
    }
}

#[utoipa::path(
    get,
    path = "/api/session",
    params(("x-session-id" = String, Header, description = "Session token")),
    responses(
        (status = 200, description = "Session flags and cart", body = ApiResponse),
        (status = 401, description = "Missing or unknown session", body = ApiResponse)
    )
)]
pub async fn get_session_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let token = match session_token(&headers) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    match state.actions.sessions().get(&token).await {
        Some(session) => ok_response(session),
        None => error_response(StatusCode::UNAUTHORIZED, "Unknown or missing session."),
    }
}
