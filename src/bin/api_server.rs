// src/bin/api_server.rs

use kalaconnect::infra::{config, telemetry};
use kalaconnect::transport;
use kalaconnect::{ActionService, GeminiClient, GenerativeModel, JsonStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    // --- Store Initialization ---
    let db_path = config::db_path();
    let store = JsonStore::new(&db_path);
    let doc = store.read_db().await?;
    info!(
        path = %db_path.display(),
        products = doc.products.len(),
        artisan = %doc.profile.name,
        "Data file ready"
    );

    // --- AI Client Initialization ---
    let model: Arc<dyn GenerativeModel> = Arc::new(GeminiClient::from_env()?);
    info!(
        text_model = %config::text_model(),
        image_model = %config::image_model(),
        "Generative AI client configured"
    );

    let app_state = transport::http::AppState {
        actions: Arc::new(ActionService::new(store, model)),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let bind_addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("API server listening on http://{}", listener.local_addr()?);
    info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
