//! services/api/src/bin/api.rs

use api_lib::{
    adapters::store::PgDocumentStore,
    config::Config,
    error::ApiError,
    web::{router, state::AppState, ApiDoc},
};
use mentorai_core::store::DocumentStore;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to the Document Store (lazily) ---
    // The pool never dials at startup; an unreachable store must not keep the
    // non-persistent endpoints from serving. Connection failures surface per
    // request instead.
    let store: Option<Arc<dyn DocumentStore>> = match &config.database_url {
        Some(url) => match PgPoolOptions::new().max_connections(5).connect_lazy(url) {
            Ok(pool) => {
                let adapter = PgDocumentStore::new(pool);
                if let Err(e) = adapter.ensure_schema().await {
                    warn!("Store schema bootstrap failed (store unreachable?): {}", e);
                } else {
                    info!("Document store schema ensured.");
                }
                Some(Arc::new(adapter))
            }
            Err(e) => {
                warn!("DATABASE_URL is not usable, running without a store: {}", e);
                None
            }
        },
        None => {
            warn!("DATABASE_URL not set, running without a store.");
            None
        }
    };

    // --- 3. Build the Shared AppState and Router ---
    let app_state = Arc::new(AppState {
        store,
        config: config.clone(),
    });

    let app = router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
