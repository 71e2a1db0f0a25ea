pub mod handlers;
pub mod types;

pub use handlers::AppState;

use crate::{
    Result,
    config::{Config, ServerConfig},
    llm,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Registers `/`, `/health`, `/analyze` and `/ask` on a fresh router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/analyze", post(handlers::analyze))
        .route("/ask", post(handlers::ask))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http());

    let app = if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    app.with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Initialize model client
    let model = llm::create_model_client(&config.llm)?;

    // Create router
    let app = router(AppState::new(model), &config.server);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
