//! Config loader: reads the process environment and an optional `.env` file.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. `.env` file values
//! 3. Process environment variables (override `.env`)
//!
//! Empty values are treated as unset.
//!
//! # Variables
//! - `AI_PROVIDER` → `providers.default_provider` (lower-cased)
//! - `<KIND>_API_KEY`, `<KIND>_MODEL`, `<KIND>_API_BASE` for
//!   `OPENAI`, `GEMINI`, `ANTHROPIC`, `OPENROUTER`
//! - `QUICKNOTES_HOST`, `QUICKNOTES_PORT`, `QUICKNOTES_REQUEST_TIMEOUT_SECS`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::schema::{Config, ProviderConfig};

/// Provider name → env var prefix.
const PROVIDER_ENV: &[(&str, &str)] = &[
    ("openai", "OPENAI"),
    ("gemini", "GEMINI"),
    ("anthropic", "ANTHROPIC"),
    ("openrouter", "OPENROUTER"),
];

/// Errors raised while assembling the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to read {}: {source}", path.display())]
    Dotenv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Load configuration from `./.env` + the process environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Some(Path::new(".env")))
}

/// Load configuration using a specific `.env` path (or none).
///
/// The file is read without mutating the process environment.
pub fn load_config_from(dotenv_path: Option<&Path>) -> Result<Config, ConfigError> {
    let file_vars = match dotenv_path {
        Some(path) => read_dotenv(path)?,
        None => HashMap::new(),
    };

    from_lookup(|key| std::env::var(key).ok().or_else(|| file_vars.get(key).cloned()))
}

/// Build a config from an arbitrary variable lookup.
///
/// `load_config_from` passes the process environment; tests pass a map.
pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let mut config = Config::default();

    if let Some(val) = get("AI_PROVIDER") {
        config.providers.default_provider = val.to_lowercase();
    }

    for (name, prefix) in PROVIDER_ENV {
        if let Some(provider) = config.providers.get_by_name_mut(name) {
            apply_provider_env(provider, prefix, &get);
        }
    }

    if let Some(val) = get("QUICKNOTES_HOST") {
        config.server.host = val;
    }
    if let Some(val) = get("QUICKNOTES_PORT") {
        config.server.port = parse_value("QUICKNOTES_PORT", val)?;
    }
    if let Some(val) = get("QUICKNOTES_REQUEST_TIMEOUT_SECS") {
        config.server.request_timeout_secs =
            Some(parse_value("QUICKNOTES_REQUEST_TIMEOUT_SECS", val)?);
    }

    info!(
        default_provider = %config.providers.default_provider,
        configured = ?config.providers.configured_names(),
        "configuration loaded"
    );

    Ok(config)
}

/// Apply `<PREFIX>_API_KEY`, `<PREFIX>_MODEL`, `<PREFIX>_API_BASE`.
fn apply_provider_env<G>(provider: &mut ProviderConfig, prefix: &str, get: &G)
where
    G: Fn(&str) -> Option<String>,
{
    if let Some(val) = get(&format!("{prefix}_API_KEY")) {
        provider.api_key = val;
    }
    if let Some(val) = get(&format!("{prefix}_MODEL")) {
        provider.model = Some(val);
    }
    if let Some(val) = get(&format!("{prefix}_API_BASE")) {
        provider.api_base = Some(val);
    }
}

fn parse_value<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key,
        reason: e.to_string(),
        value,
    })
}

/// Read `KEY=VALUE` pairs from a dotenv file. A missing file is not an error.
fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.exists() {
        debug!("No .env file at {}, using process environment only", path.display());
        return Ok(HashMap::new());
    }

    let to_err = |source| ConfigError::Dotenv {
        path: path.to_path_buf(),
        source,
    };

    let mut vars = HashMap::new();
    for item in dotenvy::from_path_iter(path).map_err(to_err)? {
        let (key, value) = item.map_err(to_err)?;
        vars.insert(key, value);
    }

    debug!(count = vars.len(), "Loaded .env from {}", path.display());
    Ok(vars)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
