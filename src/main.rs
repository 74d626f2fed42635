//! CJTP server binary.
//!
//! Loads configuration, binds the listener, and serves until Ctrl-C.

use std::path::PathBuf;

use clap::Parser;

use cjtp_server::config::{load_config, ServerConfig};
use cjtp_server::net::Listener;
use cjtp_server::observability;
use cjtp_server::{CjtpServer, Shutdown};

#[derive(Parser)]
#[command(name = "cjtp-server")]
#[command(about = "JSON-over-TCP category server", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    observability::logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        read_idle_ms = config.timeouts.read_idle_ms,
        "Configuration loaded"
    );

    let listener = Listener::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = CjtpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
