use crate::domain::commerce::CheckoutForm;
use crate::transport::http::handlers::common::{respond, session_token};
use crate::transport::http::types::{json_422, AddToCartRequest, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/cart",
    params(("x-session-id" = String, Header, description = "Session token")),
    responses(
        (status = 200, description = "Cart items, count and subtotal", body = ApiResponse),
        (status = 401, description = "Missing or unknown session", body = ApiResponse)
    )
)]
pub async fn get_cart_handler(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let token = match session_token(&headers) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    respond(state.actions.cart(&token).await)
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    params(("x-session-id" = String, Header, description = "Session token")),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Updated cart", body = ApiResponse),
        (status = 401, description = "Missing or unknown session", body = ApiResponse),
        (status = 404, description = "No active product with that name", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn add_to_cart_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<AddToCartRequest>, JsonRejection>,
) -> impl IntoResponse {
    let token = match session_token(&headers) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"name\": \"...\"}").into_response(),
    };
    respond(state.actions.add_to_cart(&token, &request.name).await)
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{name}",
    params(
        ("name" = String, Path, description = "Product name; every cart item with this name is removed"),
        ("x-session-id" = String, Header, description = "Session token")
    ),
    responses(
        (status = 200, description = "Updated cart", body = ApiResponse),
        (status = 401, description = "Missing or unknown session", body = ApiResponse),
        (status = 404, description = "Item not in cart", body = ApiResponse)
    )
)]
pub async fn remove_from_cart_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let token = match session_token(&headers) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    respond(state.actions.remove_from_cart(&token, &name).await)
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    params(("x-session-id" = String, Header, description = "Session token")),
    request_body = CheckoutForm,
    responses(
        (status = 200, description = "Order confirmation (payment simulated)", body = ApiResponse),
        (status = 400, description = "Validation failed or cart empty", body = ApiResponse),
        (status = 401, description = "Missing or unknown session", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn checkout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<CheckoutForm>, JsonRejection>,
) -> impl IntoResponse {
    let token = match session_token(&headers) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let Json(form) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "CheckoutForm").into_response(),
    };
    respond(state.actions.checkout(&token, form).await)
}
