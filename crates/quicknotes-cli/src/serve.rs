//! `quicknotes serve`: run the HTTP API until Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use quicknotes_core::config::load_config;
use quicknotes_server::AppState;

pub async fn run(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = load_config().context("failed to load configuration")?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let bind = (config.server.host.as_str(), config.server.port);
    let addr: SocketAddr = tokio::net::lookup_host(bind)
        .await
        .with_context(|| format!("failed to resolve {}:{}", bind.0, bind.1))?
        .next()
        .with_context(|| format!("no address for {}:{}", bind.0, bind.1))?;

    let state = AppState::from_config(&config).context("failed to initialize providers")?;

    println!();
    println!("{}", "QuickNotes API".cyan().bold());
    println!("  Listening: http://{addr}");
    println!("  Default:   {}", state.registry.default_provider());
    if state.registry.is_empty() {
        println!(
            "  {}",
            "No providers configured. Set an API key such as OPENAI_API_KEY.".yellow()
        );
    } else {
        println!("  Providers: {}", state.registry.names().join(", "));
    }
    println!("  Ctrl+C to stop");
    println!();

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down");
        }
    };

    quicknotes_server::serve(addr, Arc::new(state), shutdown)
        .await
        .with_context(|| format!("server on {addr} failed"))?;

    println!("  Goodbye!");
    Ok(())
}
