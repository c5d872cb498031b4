//! Route handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use quicknotes_providers::{ProviderInfo, SummaryResult};

use crate::error::{ApiError, ApiResult};
use crate::prompt::build_prompt;
use crate::AppState;

// ─────────────────────────────────────────────
// Request / response bodies
// ─────────────────────────────────────────────

/// Body of `POST /summarize`.
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    /// Accepted for compatibility; the prompt fixes the summary length.
    #[serde(default = "default_summary_sentences")]
    pub max_summary_sentences: i64,
    /// Overrides the default provider.
    #[serde(default)]
    pub provider: Option<String>,
}

fn default_summary_sentences() -> i64 {
    3
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub available_providers: Vec<&'static str>,
    pub default_provider: String,
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub available_providers: BTreeMap<&'static str, ProviderInfo>,
    pub default_provider: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub providers: usize,
}

// ─────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────

/// GET /
pub async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "QuickNotes API is running",
        available_providers: state.registry.names(),
        default_provider: state.registry.default_provider().to_string(),
    })
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        providers: state.registry.len(),
    })
}

/// GET /providers
pub async fn list_providers(State(state): State<Arc<AppState>>) -> Json<ProvidersResponse> {
    let available_providers = state
        .registry
        .list_available()
        .into_iter()
        .map(|info| (info.name, info))
        .collect();

    Json(ProvidersResponse {
        available_providers,
        default_provider: state.registry.default_provider().to_string(),
    })
}

/// POST /summarize
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SummarizeRequest>,
) -> ApiResult<Json<SummaryResult>> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(ApiError::Validation("No text provided".to_string()));
    }

    info!(
        chars = text.chars().count(),
        provider = payload.provider.as_deref().unwrap_or("<default>"),
        "summarize request"
    );

    let prompt = build_prompt(text);
    let result = state
        .registry
        .generate_summary(&prompt, payload.provider.as_deref())
        .await?;

    Ok(Json(result))
}
