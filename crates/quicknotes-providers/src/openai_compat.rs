//! Provider for OpenAI-compatible `/chat/completions` APIs.
//!
//! Covers OpenAI itself and the OpenRouter gateway. Sends a system + user
//! message pair with bearer authentication and returns
//! `choices[0].message.content`.

use async_trait::async_trait;
use tracing::debug;

use quicknotes_core::config::ProviderConfig;
use quicknotes_core::types::{ChatCompletionRequest, ChatCompletionResponse, Message};

use crate::error::ProviderError;
use crate::http::send_json;
use crate::registry::{ProviderKind, ProviderSpec};
use crate::traits::{LlmProvider, LlmRequestConfig, SYSTEM_PROMPT};

// ─────────────────────────────────────────────
// OpenAiCompatProvider
// ─────────────────────────────────────────────

/// A provider that talks to any OpenAI-compatible chat completions endpoint.
pub struct OpenAiCompatProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://openrouter.ai/api/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    model: String,
    spec: &'static ProviderSpec,
}

impl std::fmt::Debug for OpenAiCompatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("provider", &self.spec.display_name)
            .finish()
    }
}

impl OpenAiCompatProvider {
    /// Create a provider from its config and static spec.
    ///
    /// API base: config override > spec default. Model: config override > spec default.
    pub fn new(
        config: &ProviderConfig,
        spec: &'static ProviderSpec,
        client: reqwest::Client,
    ) -> Self {
        OpenAiCompatProvider {
            client,
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| spec.default_api_base.to_string()),
            api_key: config.api_key.clone(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| spec.default_model.to_string()),
            spec,
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatProvider {
    async fn complete(
        &self,
        prompt: &str,
        config: &LlmRequestConfig,
    ) -> Result<String, ProviderError> {
        debug!(
            provider = self.spec.display_name,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Calling chat completions"
        );

        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::system(SYSTEM_PROMPT), Message::user(prompt)],
            max_tokens: Some(config.max_tokens),
            temperature: Some(config.temperature),
        };

        let request = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body);

        let response: ChatCompletionResponse =
            send_json(self.spec.display_name, request).await?;

        debug!(
            provider = self.spec.display_name,
            id = response.id.as_deref().unwrap_or("?"),
            total_tokens = response.usage.as_ref().map_or(0, |u| u.total_tokens),
            "Chat completion received"
        );

        response
            .first_content()
            .ok_or_else(|| ProviderError::InvalidResponse {
                provider: self.spec.display_name,
                message: "no message content in first choice".to_string(),
            })
    }

    fn kind(&self) -> ProviderKind {
        self.spec.kind
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
