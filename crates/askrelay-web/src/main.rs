use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use askrelay_runtime::{log_provider_status, FallbackOrchestrator, RelayConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod page;
mod server;

#[derive(Parser, Debug)]
#[command(
    name = "askrelay-web",
    version,
    about = "Web form that relays questions to the first LLM provider that answers"
)]
struct WebCli {
    /// Address to bind the HTTP server to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// YAML settings file with provider keys and overrides
    #[arg(long, env = "ASKRELAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = WebCli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => RelayConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => RelayConfig::from_env().context("failed to read configuration from environment")?,
    };

    let orchestrator = FallbackOrchestrator::from_config(&config);
    info!(providers = ?orchestrator.chain().names(), "Starting askrelay web front end");
    log_provider_status(&orchestrator, &config);

    server::run(server::AppState::new(orchestrator), SocketAddr::new(cli.host, cli.port)).await
}
