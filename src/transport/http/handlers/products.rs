use crate::app::actions::SaveProductRequest;
use crate::domain::model::ProductStatus;
use crate::transport::http::handlers::common::{error_response, respond};
use crate::transport::http::types::{json_422, AppState, ProductsQuery};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductsQuery),
    responses(
        (status = 200, description = "Products in stored order (newest first)", body = ApiResponse),
        (status = 400, description = "Unknown status filter", body = ApiResponse),
        (status = 500, description = "Data file unreadable", body = ApiResponse)
    )
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> impl IntoResponse {
    match query.status.as_deref().filter(|s| !s.trim().is_empty()) {
        None => respond(state.actions.get_products().await),
        Some(raw) => match ProductStatus::parse(raw) {
            Some(status) => respond(state.actions.get_products_by_status(status).await),
            None => error_response(
                StatusCode::BAD_REQUEST,
                format!("Unknown status '{}' (expected active, draft or archived)", raw),
            ),
        },
    }
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = SaveProductRequest,
    responses(
        (status = 200, description = "Product saved as Draft", body = ApiResponse),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Failed to save the product", body = ApiResponse)
    )
)]
pub async fn save_product_handler(
    State(state): State<AppState>,
    request: Result<Json<SaveProductRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"name\", \"description\", \"price\", \"stock\", \"image\", \"aiHint\"}")
                .into_response()
        }
    };
    respond(state.actions.save_product_action(request).await)
}

#[utoipa::path(
    get,
    path = "/api/products/explore",
    responses(
        (status = 200, description = "Active products", body = ApiResponse),
        (status = 500, description = "Data file unreadable", body = ApiResponse)
    )
)]
pub async fn explore_products_handler(State(state): State<AppState>) -> impl IntoResponse {
    respond(state.actions.explore_products().await)
}

#[utoipa::path(
    get,
    path = "/api/products/partition",
    responses(
        (status = 200, description = "Products grouped by status", body = ApiResponse),
        (status = 500, description = "Data file unreadable", body = ApiResponse)
    )
)]
pub async fn partition_products_handler(State(state): State<AppState>) -> impl IntoResponse {
    respond(state.actions.partition_products().await)
}
