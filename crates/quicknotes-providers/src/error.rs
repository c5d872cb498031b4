//! Error types for provider calls and summary dispatch.

use thiserror::Error;

/// Failure of a single outbound provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network-level failure (connect, TLS, timeout, body read).
    #[error("request to {provider} failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-2xx status.
    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The provider answered 2xx but the envelope lacked the expected text.
    #[error("unexpected {provider} response: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },

    /// The shared HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Outcome of `ProviderRegistry::generate_summary` when no result is produced.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The requested (or default) provider has no credentials configured.
    #[error("Provider '{requested}' not available. Available: {available:?}")]
    NotConfigured {
        requested: String,
        available: Vec<String>,
    },

    /// The remote call itself failed.
    #[error(transparent)]
    Call(#[from] ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_lists_available() {
        let err = SummaryError::NotConfigured {
            requested: "gemini".to_string(),
            available: vec!["openai".to_string(), "openrouter".to_string()],
        };
        assert_eq!(
            err.to_string(),
            r#"Provider 'gemini' not available. Available: ["openai", "openrouter"]"#
        );
    }

    #[test]
    fn test_not_configured_empty_registry() {
        let err = SummaryError::NotConfigured {
            requested: "openai".to_string(),
            available: vec![],
        };
        assert!(err.to_string().ends_with("Available: []"));
    }

    #[test]
    fn test_call_error_is_transparent() {
        let err: SummaryError = ProviderError::InvalidResponse {
            provider: "Anthropic",
            message: "no content blocks".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "unexpected Anthropic response: no content blocks"
        );
    }
}
