//! Configuration schema: typed view of the process environment.
//!
//! Hierarchy: `Config` → `ServerConfig`, `ProvidersConfig` → one
//! `ProviderConfig` per supported backend.
//!
//! Credentials never leave this module in serialized form: `api_key` is
//! skipped by serde and redacted in `Debug`.

use std::time::Duration;

use serde::Serialize;

/// Provider used when neither the caller nor `AI_PROVIDER` names one.
pub const DEFAULT_PROVIDER: &str = "openai";

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration, built once at startup from env vars (and `.env`).
#[derive(Clone, Debug, Default, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
}

// ─────────────────────────────────────────────
// Server
// ─────────────────────────────────────────────

/// HTTP listener and outbound transport settings.
#[derive(Clone, Debug, Serialize)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Timeout applied by the shared HTTP client to each provider call.
    /// Unset leaves the transport default in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// Per-call timeout, if one was configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            request_timeout_secs: None,
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Credentials and overrides for a single LLM provider.
#[derive(Clone, Default, Serialize)]
pub struct ProviderConfig {
    /// API key for authentication. Empty means "not configured".
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Model override (`<KIND>_MODEL`); the provider spec supplies the default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Endpoint base URL override (`<KIND>_API_BASE`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl ProviderConfig {
    /// Whether this provider has a configured API key.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &if self.is_configured() { "<redacted>" } else { "" })
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// All provider configurations plus the process-wide default provider name.
#[derive(Clone, Debug, Serialize)]
pub struct ProvidersConfig {
    /// Name of the provider used when a request doesn't pick one.
    /// Not validated against the configured providers.
    pub default_provider: String,
    pub openai: ProviderConfig,
    pub gemini: ProviderConfig,
    pub anthropic: ProviderConfig,
    pub openrouter: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            default_provider: DEFAULT_PROVIDER.to_string(),
            openai: ProviderConfig::default(),
            gemini: ProviderConfig::default(),
            anthropic: ProviderConfig::default(),
            openrouter: ProviderConfig::default(),
        }
    }
}

impl ProvidersConfig {
    /// Get a provider config by name (e.g. `"anthropic"`).
    pub fn get_by_name(&self, name: &str) -> Option<&ProviderConfig> {
        match name {
            "openai" => Some(&self.openai),
            "gemini" => Some(&self.gemini),
            "anthropic" => Some(&self.anthropic),
            "openrouter" => Some(&self.openrouter),
            _ => None,
        }
    }

    /// Mutable access by name, used by the loader.
    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut ProviderConfig> {
        match name {
            "openai" => Some(&mut self.openai),
            "gemini" => Some(&mut self.gemini),
            "anthropic" => Some(&mut self.anthropic),
            "openrouter" => Some(&mut self.openrouter),
            _ => None,
        }
    }

    /// Names of the providers that have an API key.
    pub fn configured_names(&self) -> Vec<&'static str> {
        ["openai", "gemini", "anthropic", "openrouter"]
            .into_iter()
            .filter(|name| self.get_by_name(name).is_some_and(ProviderConfig::is_configured))
            .collect()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
