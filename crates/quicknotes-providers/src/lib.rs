//! LLM provider layer for QuickNotes.
//!
//! # Architecture
//!
//! - [`traits::LlmProvider`]: trait that every provider implements
//! - [`registry`]: static specs for the four supported providers
//! - [`openai_compat::OpenAiCompatProvider`]: `/chat/completions` (OpenAI, OpenRouter)
//! - [`gemini::GeminiProvider`]: `:generateContent`
//! - [`anthropic::AnthropicProvider`]: `/messages`
//! - [`dispatcher::ProviderRegistry`]: configured providers + `generate_summary`
//! - [`summary::SummaryResult`]: normalized result returned to callers

pub mod anthropic;
pub mod dispatcher;
pub mod error;
pub mod gemini;
mod http;
pub mod openai_compat;
pub mod registry;
pub mod summary;
pub mod traits;

// Re-export main types for convenience
pub use dispatcher::{create_provider, ProviderInfo, ProviderRegistry};
pub use error::{ProviderError, SummaryError};
pub use registry::{CallStrategy, ProviderKind, ProviderSpec, PROVIDERS};
pub use summary::{SummaryMetadata, SummaryResult};
pub use traits::{LlmProvider, LlmRequestConfig, SYSTEM_PROMPT};
