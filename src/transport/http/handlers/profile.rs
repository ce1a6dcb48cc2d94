use crate::domain::model::Profile;
use crate::transport::http::handlers::common::respond;
use crate::transport::http::types::{json_422, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "The artisan profile", body = ApiResponse),
        (status = 500, description = "Data file unreadable", body = ApiResponse)
    )
)]
pub async fn get_profile_handler(State(state): State<AppState>) -> impl IntoResponse {
    respond(state.actions.get_profile().await)
}

#[utoipa::path(
    put,
    path = "/api/profile",
    request_body = Profile,
    responses(
        (status = 200, description = "Profile replaced", body = ApiResponse),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Failed to save profile", body = ApiResponse)
    )
)]
pub async fn save_profile_handler(
    State(state): State<AppState>,
    request: Result<Json<Profile>, JsonRejection>,
) -> impl IntoResponse {
    let Json(profile) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"name\", \"location\", \"story\", \"heritage\"}").into_response()
        }
    };
    respond(state.actions.save_profile_action(profile).await)
}
