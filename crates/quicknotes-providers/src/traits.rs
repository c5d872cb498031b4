//! LLM Provider trait: the seam between dispatch and wire protocols.
//!
//! Every backend (OpenAI, Gemini, Anthropic, OpenRouter) implements this trait.
//! Implementations make exactly one HTTP call per `complete` and never retry.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::registry::ProviderKind;

/// System instruction sent by role-aware strategies.
pub const SYSTEM_PROMPT: &str = "You produce concise study notes and quiz questions.";

/// Generation parameters passed to each LLM call.
#[derive(Clone, Debug)]
pub struct LlmRequestConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for LlmRequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: 400,
            temperature: 0.2,
        }
    }
}

/// Trait that all LLM providers must implement.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send `prompt` and return the model's text output.
    ///
    /// Strategies whose wire format has no room for `config` ignore it.
    async fn complete(
        &self,
        prompt: &str,
        config: &LlmRequestConfig,
    ) -> Result<String, ProviderError>;

    /// Which provider this is.
    fn kind(&self) -> ProviderKind;

    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Endpoint base URL.
    fn api_base(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str {
        self.kind().spec().display_name
    }
}
