//! City Gateway binary.
//!
//! Startup order: CLI → config → logging → metrics → bind → serve.
//! Any startup error is fatal.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use city_gateway::config::{loader, GatewayConfig};
use city_gateway::lifecycle::{signals, Shutdown};
use city_gateway::observability::{logging, metrics};
use city_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "city-gateway")]
#[command(about = "CORS-avoiding proxy gateway for smart-city dashboards", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config: GatewayConfig = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => loader::default_config()?,
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        broker_url = %config.upstream.broker_url,
        tile_servers = config.upstream.tile_servers.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::listen_for_signals(&shutdown).await;
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
