//! Provider registry: the configured providers and summary dispatch.
//!
//! Built once at startup from [`ProvidersConfig`] and shared read-only.
//! Providers without an API key are silently left out. The default provider
//! name is taken as-is; an unknown default only fails when it is used.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use quicknotes_core::config::{ProviderConfig, ProvidersConfig};
use quicknotes_core::utils::truncate_string;

use crate::anthropic::AnthropicProvider;
use crate::error::{ProviderError, SummaryError};
use crate::gemini::GeminiProvider;
use crate::openai_compat::OpenAiCompatProvider;
use crate::registry::{CallStrategy, ProviderKind, ProviderSpec, PROVIDERS};
use crate::summary::SummaryResult;
use crate::traits::{LlmProvider, LlmRequestConfig};

/// Public description of a registered provider. Never carries credentials.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProviderInfo {
    #[serde(skip)]
    pub name: &'static str,
    pub model: String,
    #[serde(rename = "type")]
    pub kind: ProviderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Build the provider implementation bound to `spec`'s call strategy.
pub fn create_provider(
    spec: &'static ProviderSpec,
    config: &ProviderConfig,
    client: reqwest::Client,
) -> Arc<dyn LlmProvider> {
    debug!(
        provider = spec.display_name,
        model = config.model.as_deref().unwrap_or(spec.default_model),
        api_base = config.api_base.as_deref().unwrap_or(spec.default_api_base),
        "Creating LLM provider"
    );

    match spec.strategy {
        CallStrategy::ChatCompletions => Arc::new(OpenAiCompatProvider::new(config, spec, client)),
        CallStrategy::GenerateContent => Arc::new(GeminiProvider::new(config, spec, client)),
        CallStrategy::Messages => Arc::new(AnthropicProvider::new(config, spec, client)),
    }
}

/// The set of usable providers plus the process-wide default.
pub struct ProviderRegistry {
    /// Registered providers, in registration order.
    providers: Vec<Arc<dyn LlmProvider>>,
    default_provider: String,
    request_config: LlmRequestConfig,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .field("default_provider", &self.default_provider)
            .finish()
    }
}

impl ProviderRegistry {
    /// Register every configured provider, sharing one HTTP client.
    ///
    /// Without `timeout` the client keeps reqwest's default (no deadline).
    pub fn from_config(
        config: &ProvidersConfig,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ProviderError::Client)?;

        let providers = PROVIDERS
            .iter()
            .filter_map(|spec| {
                let provider_config = config.get_by_name(spec.name)?;
                if !provider_config.is_configured() {
                    debug!(
                        provider = spec.display_name,
                        env = spec.env_key,
                        "No API key, skipping"
                    );
                    return None;
                }
                Some(create_provider(spec, provider_config, client.clone()))
            })
            .collect();

        let registry = Self::new(config.default_provider.clone(), providers);
        info!(
            providers = ?registry.names(),
            default_provider = %registry.default_provider,
            "provider registry ready"
        );
        Ok(registry)
    }

    /// Build a registry from already-constructed providers.
    pub fn new(default_provider: impl Into<String>, providers: Vec<Arc<dyn LlmProvider>>) -> Self {
        Self {
            providers,
            default_provider: default_provider.into(),
            request_config: LlmRequestConfig::default(),
        }
    }

    /// Default provider name, as configured (possibly unresolvable).
    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    /// Names of registered providers, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.kind().as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Model, kind, and (for gateways) base URL of each registered provider.
    pub fn list_available(&self) -> Vec<ProviderInfo> {
        self.providers
            .iter()
            .map(|p| {
                let spec = p.kind().spec();
                ProviderInfo {
                    name: spec.name,
                    model: p.model().to_string(),
                    kind: spec.kind,
                    base_url: spec.is_gateway.then(|| p.api_base().to_string()),
                }
            })
            .collect()
    }

    /// Whether `name` is a registered provider.
    pub fn is_available(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Look up a registered provider by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn LlmProvider>> {
        let kind = ProviderKind::from_name(name)?;
        self.providers.iter().find(|p| p.kind() == kind)
    }

    /// Send `text` to one provider and normalize its reply.
    ///
    /// `provider` falls back to the default when `None` or empty. Exactly one
    /// outbound call is made; failures are returned without retry.
    pub async fn generate_summary(
        &self,
        text: &str,
        provider: Option<&str>,
    ) -> Result<SummaryResult, SummaryError> {
        let requested = provider
            .filter(|name| !name.is_empty())
            .unwrap_or(self.default_provider.as_str());

        let Some(llm) = self.get(requested) else {
            warn!(requested, available = ?self.names(), "provider not configured");
            return Err(SummaryError::NotConfigured {
                requested: requested.to_string(),
                available: self.names().into_iter().map(String::from).collect(),
            });
        };

        let name = llm.kind().as_str();
        let reply = llm.complete(text, &self.request_config).await?;
        let result = SummaryResult::from_reply(reply, name, llm.model());

        if let SummaryResult::Raw { text, .. } = &result {
            warn!(
                provider = name,
                preview = %truncate_string(text, 80),
                "provider reply was not a JSON object"
            );
        } else {
            debug!(provider = name, "structured summary produced");
        }

        Ok(result)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Canned provider that counts calls.
    struct StubProvider {
        kind: ProviderKind,
        reply: Result<String, String>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn ok(kind: ProviderKind, reply: &str) -> Arc<Self> {
            Arc::new(Self {
                kind,
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(kind: ProviderKind, message: &str) -> Arc<Self> {
            Arc::new(Self {
                kind,
                reply: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        async fn complete(
            &self,
            _prompt: &str,
            _config: &LlmRequestConfig,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map_err(|message| ProviderError::InvalidResponse {
                provider: self.kind.spec().display_name,
                message,
            })
        }

        fn kind(&self) -> ProviderKind {
            self.kind
        }

        fn model(&self) -> &str {
            self.kind.spec().default_model
        }

        fn api_base(&self) -> &str {
            self.kind.spec().default_api_base
        }
    }

    fn dyns(stubs: &[&Arc<StubProvider>]) -> Vec<Arc<dyn LlmProvider>> {
        stubs
            .iter()
            .map(|s| (*s).clone() as Arc<dyn LlmProvider>)
            .collect()
    }

    fn configured(pairs: &[(&str, &str)]) -> ProvidersConfig {
        let mut config = ProvidersConfig::default();
        for (name, key) in pairs {
            config.get_by_name_mut(name).unwrap().api_key = key.to_string();
        }
        config
    }

    // ── Initialization ──

    #[test]
    fn test_from_config_skips_unconfigured() {
        let config = configured(&[("openrouter", "sk-or-1"), ("gemini", "g-1")]);
        let registry =
            ProviderRegistry::from_config(&config, Some(Duration::from_secs(5))).unwrap();

        assert_eq!(registry.names(), vec!["gemini", "openrouter"]);
        assert!(registry.is_available("gemini"));
        assert!(!registry.is_available("openai"));
    }

    #[test]
    fn test_from_config_empty() {
        let registry = ProviderRegistry::from_config(&ProvidersConfig::default(), None).unwrap();
        assert!(registry.is_empty());
        assert!(registry.list_available().is_empty());
        assert_eq!(registry.default_provider(), "openai");
    }

    #[test]
    fn test_list_available_hides_credentials() {
        let mut config =
            configured(&[("openrouter", "sk-or-secret"), ("anthropic", "sk-ant-secret")]);
        config.anthropic.model = Some("claude-3-opus".to_string());
        let registry =
            ProviderRegistry::from_config(&config, Some(Duration::from_secs(5))).unwrap();

        let list = registry.list_available();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "anthropic");
        assert_eq!(list[0].model, "claude-3-opus");
        assert!(list[0].base_url.is_none());
        assert_eq!(list[1].base_url.as_deref(), Some("https://openrouter.ai/api/v1"));

        let json = serde_json::to_string(&list).unwrap();
        assert!(!json.contains("secret"));
        assert_eq!(
            serde_json::to_value(&list[1]).unwrap(),
            json!({
                "model": "meta-llama/llama-3.1-8b-instruct:free",
                "type": "openrouter",
                "base_url": "https://openrouter.ai/api/v1"
            })
        );
    }

    // ── generate_summary ──

    #[tokio::test]
    async fn test_uses_default_provider() {
        let stub = StubProvider::ok(ProviderKind::Gemini, r#"{"summary": "s"}"#);
        let registry = ProviderRegistry::new("gemini", dyns(&[&stub]));

        let result = registry.generate_summary("text", None).await.unwrap();
        assert_eq!(result.metadata().provider, "gemini");
        assert_eq!(result.metadata().model, "gemini-1.5-flash");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_provider_name_uses_default() {
        let stub = StubProvider::ok(ProviderKind::OpenAi, r#"{"summary": "s"}"#);
        let registry = ProviderRegistry::new("openai", dyns(&[&stub]));

        let result = registry.generate_summary("text", Some("")).await.unwrap();
        assert_eq!(result.metadata().provider, "openai");
    }

    #[tokio::test]
    async fn test_explicit_provider_overrides_default() {
        let openai = StubProvider::ok(ProviderKind::OpenAi, "{}");
        let anthropic = StubProvider::ok(ProviderKind::Anthropic, "plain words");
        let registry = ProviderRegistry::new("openai", dyns(&[&openai, &anthropic]));

        let result = registry
            .generate_summary("text", Some("anthropic"))
            .await
            .unwrap();

        assert!(!result.is_structured());
        assert_eq!(openai.calls.load(Ordering::SeqCst), 0);
        assert_eq!(anthropic.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_lists_available() {
        let openrouter = StubProvider::ok(ProviderKind::OpenRouter, "{}");
        let registry = ProviderRegistry::new("openai", dyns(&[&openrouter]));

        let err = registry
            .generate_summary("text", Some("gemini"))
            .await
            .unwrap_err();

        match err {
            SummaryError::NotConfigured { requested, available } => {
                assert_eq!(requested, "gemini");
                assert_eq!(available, vec!["openrouter".to_string()]);
            }
            other => panic!("expected NotConfigured, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unresolvable_default_fails_lazily() {
        let registry = ProviderRegistry::new("mistral", vec![]);
        let err = registry.generate_summary("text", None).await.unwrap_err();
        assert!(matches!(
            err,
            SummaryError::NotConfigured { ref requested, .. } if requested == "mistral"
        ));
    }

    #[tokio::test]
    async fn test_call_failure_is_not_retried() {
        let stub = StubProvider::failing(ProviderKind::OpenAi, "boom");
        let fallback = StubProvider::ok(ProviderKind::OpenRouter, "{}");
        let registry = ProviderRegistry::new("openai", dyns(&[&stub, &fallback]));

        let err = registry.generate_summary("text", None).await.unwrap_err();
        assert!(matches!(err, SummaryError::Call(_)));
        assert!(err.to_string().contains("boom"));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_end_to_end_openrouter() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": { "content": "{\"summary\": \"s\", \"key_points\": [], \"quiz_questions\": []}" },
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut config = configured(&[("openrouter", "sk-or-1")]);
        config.default_provider = "openrouter".to_string();
        config.openrouter.api_base = Some(mock_server.uri());
        let registry =
            ProviderRegistry::from_config(&config, Some(Duration::from_secs(5))).unwrap();

        let result = registry.generate_summary("prompt", None).await.unwrap();
        assert_eq!(
            result.to_json(),
            json!({
                "summary": "s",
                "key_points": [],
                "quiz_questions": [],
                "_metadata": {
                    "provider": "openrouter",
                    "model": "meta-llama/llama-3.1-8b-instruct:free"
                }
            })
        );
    }
}
