//! Locator: stateless fleet discovery, per-request placement, aggregated
//! bucket views, and cluster health (spec.md §4.2).

pub mod config;
pub mod fleet;
pub mod handlers;
pub mod path;
pub mod routes;
pub mod server;
pub mod state;

use tracing_subscriber::EnvFilter;

use config::LocatorConfig;
use server::Server;
use state::LocatorState;

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = LocatorConfig::from_env()?;
    let bind_addr = config.bind_addr;
    tracing::info!(servers = ?config.servers, addr = %bind_addr, "starting locator");

    let state = LocatorState::new(config);
    let (server, handle) = Server::new(bind_addr).run(state);

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    server.stop();
    let _ = handle.await;

    Ok(())
}
