//! Provider registry: static specs for the supported LLM providers.
//!
//! Each `ProviderSpec` describes how to connect to a provider: env var names,
//! default model, default API base, and which call strategy speaks its wire
//! protocol.

use serde::Serialize;

// ─────────────────────────────────────────────
// ProviderKind
// ─────────────────────────────────────────────

/// The closed set of supported providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    Anthropic,
    OpenRouter,
}

impl ProviderKind {
    /// All kinds, in registration order.
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Gemini,
        ProviderKind::Anthropic,
        ProviderKind::OpenRouter,
    ];

    /// Registry key (e.g. `"openrouter"`).
    pub fn as_str(&self) -> &'static str {
        self.spec().name
    }

    /// Static spec for this kind.
    pub fn spec(&self) -> &'static ProviderSpec {
        match self {
            ProviderKind::OpenAi => &PROVIDERS[0],
            ProviderKind::Gemini => &PROVIDERS[1],
            ProviderKind::Anthropic => &PROVIDERS[2],
            ProviderKind::OpenRouter => &PROVIDERS[3],
        }
    }

    /// Look up a kind by its exact registry key.
    pub fn from_name(name: &str) -> Option<Self> {
        find_by_name(name).map(|spec| spec.kind)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// ProviderSpec
// ─────────────────────────────────────────────

/// Wire protocol used to invoke a provider and extract its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallStrategy {
    /// OpenAI-style `POST /chat/completions`, bearer auth, system + user messages.
    ChatCompletions,
    /// Gemini `POST /models/{model}:generateContent`, prompt sent as-is.
    GenerateContent,
    /// Anthropic `POST /messages`, single user message.
    Messages,
}

/// Static specification describing one LLM provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    pub kind: ProviderKind,
    /// Registry key (e.g. `"openrouter"`).
    pub name: &'static str,
    /// Human-readable name for logs. E.g. `"OpenRouter"`.
    pub display_name: &'static str,
    /// Environment variable holding the API key.
    pub env_key: &'static str,
    /// Environment variable overriding the model.
    pub env_model: &'static str,
    /// Model used when `env_model` is unset.
    pub default_model: &'static str,
    /// API base used unless overridden in config.
    pub default_api_base: &'static str,
    pub strategy: CallStrategy,
    /// Gateways advertise their base URL in provider listings.
    pub is_gateway: bool,
}

/// Supported provider specifications, in registration order.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        kind: ProviderKind::OpenAi,
        name: "openai",
        display_name: "OpenAI",
        env_key: "OPENAI_API_KEY",
        env_model: "OPENAI_MODEL",
        default_model: "gpt-4o-mini",
        default_api_base: "https://api.openai.com/v1",
        strategy: CallStrategy::ChatCompletions,
        is_gateway: false,
    },
    ProviderSpec {
        kind: ProviderKind::Gemini,
        name: "gemini",
        display_name: "Gemini",
        env_key: "GEMINI_API_KEY",
        env_model: "GEMINI_MODEL",
        default_model: "gemini-1.5-flash",
        default_api_base: "https://generativelanguage.googleapis.com/v1beta",
        strategy: CallStrategy::GenerateContent,
        is_gateway: false,
    },
    ProviderSpec {
        kind: ProviderKind::Anthropic,
        name: "anthropic",
        display_name: "Anthropic",
        env_key: "ANTHROPIC_API_KEY",
        env_model: "ANTHROPIC_MODEL",
        default_model: "claude-3-haiku-20240307",
        default_api_base: "https://api.anthropic.com/v1",
        strategy: CallStrategy::Messages,
        is_gateway: false,
    },
    ProviderSpec {
        kind: ProviderKind::OpenRouter,
        name: "openrouter",
        display_name: "OpenRouter",
        env_key: "OPENROUTER_API_KEY",
        env_model: "OPENROUTER_MODEL",
        default_model: "meta-llama/llama-3.1-8b-instruct:free",
        default_api_base: "https://openrouter.ai/api/v1",
        strategy: CallStrategy::ChatCompletions,
        is_gateway: true,
    },
];

/// Find a provider spec by exact name. Matching is case-sensitive.
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|spec| spec.name == name)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_spec_roundtrip() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.spec().kind, kind);
            assert_eq!(ProviderKind::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_find_by_name() {
        let spec = find_by_name("anthropic").unwrap();
        assert_eq!(spec.display_name, "Anthropic");
        assert_eq!(spec.env_key, "ANTHROPIC_API_KEY");
        assert_eq!(spec.strategy, CallStrategy::Messages);
    }

    #[test]
    fn test_find_by_name_is_case_sensitive() {
        assert!(find_by_name("OpenAI").is_none());
        assert!(find_by_name("mistral").is_none());
    }

    #[test]
    fn test_only_openrouter_is_gateway() {
        let gateways: Vec<&str> = PROVIDERS
            .iter()
            .filter(|s| s.is_gateway)
            .map(|s| s.name)
            .collect();
        assert_eq!(gateways, vec!["openrouter"]);
    }

    #[test]
    fn test_default_models() {
        assert_eq!(ProviderKind::OpenAi.spec().default_model, "gpt-4o-mini");
        assert_eq!(ProviderKind::Gemini.spec().default_model, "gemini-1.5-flash");
        assert_eq!(
            ProviderKind::Anthropic.spec().default_model,
            "claude-3-haiku-20240307"
        );
        assert_eq!(
            ProviderKind::OpenRouter.spec().default_model,
            "meta-llama/llama-3.1-8b-instruct:free"
        );
    }

    #[test]
    fn test_kind_serializes_as_name() {
        let json = serde_json::to_value(ProviderKind::OpenRouter).unwrap();
        assert_eq!(json, "openrouter");
        assert_eq!(ProviderKind::OpenAi.to_string(), "openai");
    }

    #[test]
    fn test_all_providers_have_unique_names() {
        let mut names: Vec<&str> = PROVIDERS.iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), PROVIDERS.len(), "Duplicate provider names found");
    }
}
