//! HTTP server implementation using Axum.

use std::sync::Arc;

use axum::response::Html;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use saarthi_agent::GuidanceEngine;
use saarthi_core::config::GatewayConfig;
use saarthi_core::error::{Result, SaarthiError};

/// Shared state for the gateway server.
#[derive(Clone)]
pub struct AppState {
    /// The guidance engine — corpus, matcher, and provider behind one handle.
    pub engine: Arc<GuidanceEngine>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(engine: Arc<GuidanceEngine>) -> Self {
        Self { engine, start_time: std::time::Instant::now() }
    }
}

/// Serve the landing page.
async fn index_page() -> Html<&'static str> {
    Html(super::page::index_html())
}

/// Build the gateway router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(super::routes::health_check))
        .route("/api/info", get(super::routes::system_info))
        .route("/api/verses", get(super::routes::match_verses))
        .route("/api/guidance", post(super::routes::seek_guidance))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind and serve until the process is stopped.
pub async fn run_server(config: &GatewayConfig, engine: Arc<GuidanceEngine>) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let router = build_router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SaarthiError::Gateway(format!("failed to bind {addr}: {e}")))?;
    tracing::info!("saarthi gateway listening on http://{addr}");

    axum::serve(listener, router)
        .await
        .map_err(|e| SaarthiError::Gateway(format!("server error: {e}")))?;
    Ok(())
}
