use crate::app::ActionError;
use crate::transport::http::types::{ApiResponse, SESSION_HEADER};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Wraps a successful payload in the response envelope.
pub fn ok_response<T: Serialize>(data: T) -> Response {
    match serde_json::to_value(data) {
        Ok(v) => (StatusCode::OK, Json(ApiResponse::ok(v))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::err(format!("Failed to encode response: {}", e))),
        )
            .into_response(),
    }
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::err(message))).into_response()
}

pub fn action_error_response(err: ActionError) -> Response {
    let status = match &err {
        ActionError::Validation(_) | ActionError::Rejected(_) => StatusCode::BAD_REQUEST,
        ActionError::NotFound(_) => StatusCode::NOT_FOUND,
        ActionError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ActionError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ActionError::Generation(_) => StatusCode::BAD_GATEWAY,
    };
    let data = match &err {
        ActionError::Validation(errors) => Some(serde_json::json!({ "errors": errors })),
        _ => None,
    };
    (
        status,
        Json(ApiResponse {
            success: false,
            data,
            error: Some(err.to_string()),
        }),
    )
        .into_response()
}

pub fn respond<T: Serialize>(result: Result<T, ActionError>) -> Response {
    match result {
        Ok(v) => ok_response(v),
        Err(e) => action_error_response(e),
    }
}

/// Reads the session token header, or produces the 401 response.
pub fn session_token(headers: &HeaderMap) -> Result<String, Response> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            error_response(
                StatusCode::UNAUTHORIZED,
                format!("Missing {} header", SESSION_HEADER),
            )
        })
}
