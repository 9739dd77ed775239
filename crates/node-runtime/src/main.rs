//! # Delta-Ledger Node
//!
//! Loads configuration (see [`NodeConfig::load`]), initialises logging,
//! and runs a node until Ctrl-C.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::{NodeConfig, NodeEnvironment, NodeRuntime};

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::load().context("Failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.node.log)
        .with_context(|| format!("Invalid log filter {:?}", config.node.log))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("===========================================");
    info!("  Delta-Ledger Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let runtime = NodeRuntime::new(config, &NodeEnvironment::standalone())
        .context("Failed to initialise node")?;
    runtime.start().context("Failed to start node")?;
    info!(node = %runtime.local_peer_id(), "Node running, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown requested");
    runtime.shutdown().await;
    Ok(())
}
