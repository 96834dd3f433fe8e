//! Storage node: durable content-addressed writes, reads, bucket
//! listing, and per-node health reporting (spec.md §4.1).

pub mod config;
pub mod handlers;
pub mod health;
pub mod ledger;
pub mod paths;
pub mod routes;
pub mod server;
pub mod state;

use tracing_subscriber::EnvFilter;

use config::NodeConfig;
use server::Server;
use state::NodeState;

/// Load configuration from the environment, start the HTTP listener,
/// and block until a shutdown signal arrives.
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = NodeConfig::from_env()?;
    let bind_addr = config.bind_addr;
    tracing::info!(root = ?config.root, addr = %bind_addr, "starting storage node");

    let state = NodeState::new(config);
    let (server, handle) = Server::new(bind_addr).run(state);

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    server.stop();
    let _ = handle.await;

    Ok(())
}
