//! Configuration system: schema and environment loading.
//!
//! # Usage
//! ```no_run
//! use quicknotes_core::config;
//!
//! let cfg = config::load_config().unwrap();
//! println!("Default provider: {}", cfg.providers.default_provider);
//! ```

pub mod loader;
pub mod schema;

// Re-export key types
pub use loader::{load_config, load_config_from, ConfigError};
pub use schema::{Config, ProviderConfig, ProvidersConfig, ServerConfig};
