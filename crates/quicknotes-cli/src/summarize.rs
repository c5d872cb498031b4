//! `quicknotes summarize`: one summary, printed as pretty JSON.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use quicknotes_core::config::load_config;
use quicknotes_providers::ProviderRegistry;
use quicknotes_server::prompt::build_prompt;

pub async fn run(
    text: Option<String>,
    file: Option<PathBuf>,
    provider: Option<String>,
) -> Result<()> {
    let text = read_input(text, file.as_deref())?;

    let config = load_config().context("failed to load configuration")?;
    let registry = ProviderRegistry::from_config(
        &config.providers,
        config.server.request_timeout(),
    )
        .context("failed to initialize providers")?;

    info!(chars = text.chars().count(), "summarizing");
    let result = registry
        .generate_summary(&build_prompt(&text), provider.as_deref())
        .await
        .context("summary failed")?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Resolve the input text from `--text` or `--file`, trimmed and non-empty.
fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    let raw = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => bail!("pass --text or --file"),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("No text provided");
    }
    Ok(trimmed.to_string())
}
