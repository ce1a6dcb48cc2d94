use crate::app::actions::VisualizeRequest;
use crate::flows::{ChatbotInput, MarketingContentInput, ProductDescriptionInput};
use crate::transport::http::handlers::common::respond;
use crate::transport::http::types::{json_422, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/ai/product-description",
    request_body = ProductDescriptionInput,
    responses(
        (status = 200, description = "Generated description", body = ApiResponse),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 502, description = "AI provider failed", body = ApiResponse)
    )
)]
pub async fn product_description_handler(
    State(state): State<AppState>,
    request: Result<Json<ProductDescriptionInput>, JsonRejection>,
) -> impl IntoResponse {
    let Json(input) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "ProductDescriptionInput").into_response(),
    };
    respond(state.actions.generate_product_description_action(input).await)
}

#[utoipa::path(
    post,
    path = "/api/ai/marketing-content",
    request_body = MarketingContentInput,
    responses(
        (status = 200, description = "Social media post and email campaign", body = ApiResponse),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 502, description = "AI provider failed", body = ApiResponse)
    )
)]
pub async fn marketing_content_handler(
    State(state): State<AppState>,
    request: Result<Json<MarketingContentInput>, JsonRejection>,
) -> impl IntoResponse {
    let Json(input) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "MarketingContentInput").into_response(),
    };
    respond(state.actions.create_marketing_content_action(input).await)
}

#[utoipa::path(
    post,
    path = "/api/ai/chatbot",
    request_body = ChatbotInput,
    responses(
        (status = 200, description = "Chatbot answer", body = ApiResponse),
        (status = 400, description = "Empty question", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 502, description = "AI provider failed", body = ApiResponse)
    )
)]
pub async fn chatbot_handler(
    State(state): State<AppState>,
    request: Result<Json<ChatbotInput>, JsonRejection>,
) -> impl IntoResponse {
    let Json(input) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"query\": \"...\"}").into_response(),
    };
    respond(state.actions.get_chatbot_assistance_action(input).await)
}

#[utoipa::path(
    post,
    path = "/api/ai/visualize",
    request_body = VisualizeRequest,
    responses(
        (status = 200, description = "Product composed into the room photo", body = ApiResponse),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 404, description = "No active product with that name", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 502, description = "AI provider failed", body = ApiResponse)
    )
)]
pub async fn visualize_handler(
    State(state): State<AppState>,
    request: Result<Json<VisualizeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(input) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"productName\", \"roomImageUri\"}").into_response(),
    };
    respond(state.actions.visualize_product_in_room_action(input).await)
}
