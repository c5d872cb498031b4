//! Shared send-and-decode path for every provider.

use serde::de::DeserializeOwned;
use tracing::error;

use crate::error::ProviderError;

/// Send `request`, fail on non-2xx, and decode the JSON body as `T`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request.send().await.map_err(|source| {
        error!(provider, error = %source, "HTTP request failed");
        ProviderError::Transport { provider, source }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        error!(provider, status = %status, body = %body, "API error");
        return Err(ProviderError::Status {
            provider,
            status,
            body,
        });
    }

    response.json::<T>().await.map_err(|e| {
        error!(provider, error = %e, "Failed to parse provider response");
        ProviderError::InvalidResponse {
            provider,
            message: e.to_string(),
        }
    })
}
