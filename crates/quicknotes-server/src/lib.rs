//! HTTP API for QuickNotes.
//!
//! # Routes
//!
//! - `GET /`: greeting, registered provider names, default provider
//! - `GET /health`: liveness + number of registered providers
//! - `GET /providers`: model/type/base URL per registered provider
//! - `POST /summarize`: `{text, max_summary_sentences?, provider?}` → normalized summary
//!
//! CORS is open to all origins.

pub mod error;
pub mod handlers;
pub mod prompt;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use quicknotes_core::config::Config;
use quicknotes_providers::{ProviderError, ProviderRegistry};

pub use error::{ApiError, ApiResult, ErrorResponse};

/// Shared, read-only application state.
#[derive(Debug)]
pub struct AppState {
    pub registry: ProviderRegistry,
}

impl AppState {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Build the registry from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let registry =
            ProviderRegistry::from_config(&config.providers, config.server.request_timeout())?;
        Ok(Self::new(registry))
    }
}

/// Build the router with CORS and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/providers", get(handlers::list_providers))
        .route("/summarize", post(handlers::summarize))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, state: Arc<AppState>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
