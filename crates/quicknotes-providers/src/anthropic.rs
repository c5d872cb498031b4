//! Anthropic provider (`POST /messages`).
//!
//! Sends one user-role message; the reply is the first content block's text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use quicknotes_core::config::ProviderConfig;

use crate::error::ProviderError;
use crate::http::send_json;
use crate::registry::{ProviderKind, ProviderSpec};
use crate::traits::{LlmProvider, LlmRequestConfig};

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
    spec: &'static ProviderSpec,
}

impl std::fmt::Debug for AnthropicProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl AnthropicProvider {
    pub fn new(
        config: &ProviderConfig,
        spec: &'static ProviderSpec,
        client: reqwest::Client,
    ) -> Self {
        AnthropicProvider {
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

    fn messages_url(&self) -> String {
        format!("{}/messages", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn complete(
        &self,
        prompt: &str,
        config: &LlmRequestConfig,
    ) -> Result<String, ProviderError> {
        debug!(model = %self.model, prompt_chars = prompt.len(), "Calling Anthropic");

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            messages: vec![UserMessage {
                role: "user",
                content: prompt,
            }],
        };

        let request = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let response: MessagesResponse = send_json(self.spec.display_name, request).await?;

        match response.content.into_iter().next() {
            Some(ContentBlock::Text { text }) => Ok(text),
            Some(ContentBlock::Other) => Err(ProviderError::InvalidResponse {
                provider: self.spec.display_name,
                message: "first content block is not text".to_string(),
            }),
            None => Err(ProviderError::InvalidResponse {
                provider: self.spec.display_name,
                message: "no content blocks".to_string(),
            }),
        }
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
// Wire types
// ─────────────────────────────────────────────

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<UserMessage<'a>>,
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
