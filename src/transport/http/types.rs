use crate::app::{ActionService, Role, Session};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

/// Header carrying the session token returned by login/register.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Clone)]
pub struct AppState {
    pub actions: Arc<ActionService>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct LoginRequest {
    /// Defaults to `buyer`.
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub session: Session,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct AddToCartRequest {
    /// Product name (products are identified by name).
    pub name: String,
}

#[derive(Deserialize, Debug, IntoParams)]
pub struct ProductsQuery {
    /// Optional status filter: `active`, `draft` or `archived` (case-insensitive).
    pub status: Option<String>,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::err(format!(
            "Invalid JSON body: {} (expected: {})",
            err, expected
        ))),
    )
}
