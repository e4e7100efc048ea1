//! Hourbook Server: volunteer-hour tracking.
//!
//! Main entry point that wires all crates together and starts the server.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use hourbook_core::config::AppConfig;
use hourbook_database::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_configuration()?;

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %format!("{e:#}"), "Server error");
        return Err(e);
    }
    Ok(())
}

/// Load configuration from file and environment.
///
/// `HOURBOOK_CONFIG` names an explicit file; otherwise `config/default.toml`
/// is layered with `config/{HOURBOOK_ENV}.toml`.
fn load_configuration() -> anyhow::Result<AppConfig> {
    let config = match std::env::var("HOURBOOK_CONFIG") {
        Ok(path) => AppConfig::load_file(&path)
            .with_context(|| format!("Failed to load configuration from '{path}'"))?,
        Err(_) => {
            let env =
                std::env::var("HOURBOOK_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
                .with_context(|| format!("Failed to load configuration for env '{env}'"))?
        }
    };
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Hourbook v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Open the store (migrations run here when enabled) ─
    tracing::info!(provider = %config.database.provider, "── Step 1: store ──");
    let store = Store::connect(&config.database)
        .await
        .context("Failed to open the store")?;

    // ── Step 2: Verify connectivity ──────────────────────────────
    tracing::info!("── Step 2: health check ──");
    if !store.health_check().await.context("Store health check failed")? {
        anyhow::bail!("Store is not reachable");
    }

    // ── Step 3: Wire services and serve HTTP ─────────────────────
    tracing::info!(address = %config.server.bind_address(), "── Step 3: HTTP server ──");
    hourbook_api::run_server(config, store)
        .await
        .context("HTTP server terminated with an error")?;

    Ok(())
}
