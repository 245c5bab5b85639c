//! HTTP server binary for the astrofacts endpoint.
//!
//! Reads `config.toml` (see [`ServiceConfig::default_config_path`]), falling
//! back to defaults when the file does not exist. `ASTROFACTS_BIND`
//! (`host:port`) overrides the configured listener. Logging goes to stderr,
//! filtered by `RUST_LOG` (default `info`).

use astrofacts::config::ServiceConfig;
use astrofacts::{FactService, FactsServer};

/// Environment variable overriding `server.host` and `server.port`.
const BIND_ENV: &str = "ASTROFACTS_BIND";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = ServiceConfig::default_config_path();
    let mut config = ServiceConfig::load_or_default(&path)
        .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "configuration loaded");

    if let Ok(bind) = std::env::var(BIND_ENV) {
        let (host, port) = bind
            .rsplit_once(':')
            .ok_or_else(|| anyhow::anyhow!("{BIND_ENV} must be host:port, got {bind:?}"))?;
        config.server.host = host.to_owned();
        config.server.port = port
            .parse()
            .map_err(|e| anyhow::anyhow!("{BIND_ENV} has an invalid port: {e}"))?;
    }

    let service = FactService::from_config(&config)?;
    let mut server = FactsServer::start(service, config.cors.clone(), &config.server).await?;

    tokio::select! {
        result = server.wait() => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("shutting down"),
    }
    server.shutdown();

    tracing::info!("astrofacts-server shut down cleanly");
    Ok(())
}
