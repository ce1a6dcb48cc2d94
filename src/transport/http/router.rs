use crate::app::actions::{CartView, Dashboard, SaveProductRequest, VisualizeRequest};
use crate::app::{Role, Session};
use crate::domain::analytics::InventorySummary;
use crate::domain::commerce::{Cart, CheckoutForm, OrderConfirmation};
use crate::domain::model::{FieldError, NewProduct, Product, ProductStatus, Profile, StatusPartition};
use crate::flows::{
    ChatbotInput, ChatbotOutput, MarketingContentInput, MarketingContentOutput,
    ProductDescriptionInput, ProductDescriptionOutput, VisualizeRoomOutput,
};
use crate::transport::http::handlers::{ai, cart, dashboard, health, products, profile, session};
use crate::transport::http::types::{AddToCartRequest, ApiResponse, LoginRequest, SessionResponse};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        products::list_products_handler,
        products::save_product_handler,
        products::explore_products_handler,
        products::partition_products_handler,
        profile::get_profile_handler,
        profile::save_profile_handler,
        ai::product_description_handler,
        ai::marketing_content_handler,
        ai::chatbot_handler,
        ai::visualize_handler,
        session::login_handler,
        session::register_handler,
        session::logout_handler,
        session::get_session_handler,
        cart::get_cart_handler,
        cart::add_to_cart_handler,
        cart::remove_from_cart_handler,
        cart::checkout_handler,
        dashboard::dashboard_handler,
        dashboard::analytics_handler
    ),
    components(schemas(
        ApiResponse,
        Product,
        ProductStatus,
        NewProduct,
        SaveProductRequest,
        StatusPartition,
        Profile,
        FieldError,
        ProductDescriptionInput,
        ProductDescriptionOutput,
        MarketingContentInput,
        MarketingContentOutput,
        ChatbotInput,
        ChatbotOutput,
        VisualizeRequest,
        VisualizeRoomOutput,
        LoginRequest,
        SessionResponse,
        Session,
        Role,
        Cart,
        CartView,
        AddToCartRequest,
        CheckoutForm,
        OrderConfirmation,
        InventorySummary,
        Dashboard
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/products",
            get(products::list_products_handler).post(products::save_product_handler),
        )
        .route("/api/products/explore", get(products::explore_products_handler))
        .route("/api/products/partition", get(products::partition_products_handler))
        .route(
            "/api/profile",
            get(profile::get_profile_handler).put(profile::save_profile_handler),
        )
        .route("/api/ai/product-description", post(ai::product_description_handler))
        .route("/api/ai/marketing-content", post(ai::marketing_content_handler))
        .route("/api/ai/chatbot", post(ai::chatbot_handler))
        .route("/api/ai/visualize", post(ai::visualize_handler))
        .route("/api/session", get(session::get_session_handler))
        .route("/api/session/login", post(session::login_handler))
        .route("/api/session/register", post(session::register_handler))
        .route("/api/session/logout", post(session::logout_handler))
        .route("/api/cart", get(cart::get_cart_handler))
        .route("/api/cart/items", post(cart::add_to_cart_handler))
        .route("/api/cart/items/:name", delete(cart::remove_from_cart_handler))
        .route("/api/checkout", post(cart::checkout_handler))
        .route("/api/dashboard", get(dashboard::dashboard_handler))
        .route("/api/analytics", get(dashboard::analytics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
