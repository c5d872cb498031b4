//! `quicknotes status`: show which providers are usable.

use anyhow::{Context, Result};
use colored::Colorize;

use quicknotes_core::config::{load_config, ProvidersConfig};
use quicknotes_core::utils::mask_secret;
use quicknotes_providers::PROVIDERS;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config().context("failed to load configuration")?;
    let providers = &config.providers;

    println!();
    println!("{}", "QuickNotes Status".cyan().bold());
    println!();

    let default_status = if default_resolvable(providers) {
        "✓".green().to_string()
    } else {
        "(not configured)".red().to_string()
    };
    println!(
        "  {:<18} {} {}",
        "Default provider:".bold(),
        providers.default_provider,
        default_status
    );
    println!(
        "  {:<18} {}:{}",
        "Bind address:".bold(),
        config.server.host,
        config.server.port
    );
    let timeout = match config.server.request_timeout_secs {
        Some(secs) => format!("{secs}s"),
        None => "transport default".dimmed().to_string(),
    };
    println!("  {:<18} {}", "Request timeout:".bold(), timeout);

    println!();
    println!("  {}", "Providers:".bold());

    for spec in PROVIDERS {
        let Some(provider) = providers.get_by_name(spec.name) else {
            continue;
        };
        let model = provider.model.as_deref().unwrap_or(spec.default_model);
        let status = if provider.is_configured() {
            format!(
                "{} key set ({})  {}",
                "✓".green(),
                mask_secret(&provider.api_key).dimmed(),
                model
            )
        } else {
            format!("· not configured (set {})", spec.env_key)
                .dimmed()
                .to_string()
        };
        println!("    {:<20} {}", spec.display_name, status);
    }

    println!();
    Ok(())
}

/// Whether the default provider name maps onto a configured provider.
fn default_resolvable(providers: &ProvidersConfig) -> bool {
    providers
        .get_by_name(&providers.default_provider)
        .is_some_and(|p| p.is_configured())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolvable() {
        let mut providers = ProvidersConfig::default();
        assert!(!default_resolvable(&providers));

        providers.openai.api_key = "sk-1".to_string();
        assert!(default_resolvable(&providers));

        providers.default_provider = "mistral".to_string();
        assert!(!default_resolvable(&providers));
    }
}
