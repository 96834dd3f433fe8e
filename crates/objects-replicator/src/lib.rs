//! Replicator: under-replication detection, placement, and streaming
//! copy (spec.md §4.3), run as a one-shot CLI against a locator.

pub mod cli;
pub mod copy;
pub mod fleet;
pub mod run;
pub mod timeouts;

use clap::Parser;
use reqwest::Client;
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Parse CLI args, run one replication pass, and return the process
/// exit code (spec.md §6: 0 on success, 1 otherwise).
pub async fn run() -> anyhow::Result<i32> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let client = Client::builder()
        .build()
        .expect("reqwest client with default TLS config always builds");

    let locator = if args.locator.ends_with('/') {
        args.locator.clone()
    } else {
        format!("{}/", args.locator)
    };

    let ok = run::auto_replica(&client, &locator, &args.bucket, args.replicas, args.dry_run, args.concurrency).await?;

    if ok {
        tracing::info!(bucket = args.bucket, "replication pass complete, no warnings");
        Ok(0)
    } else {
        tracing::warn!(bucket = args.bucket, "replication pass complete with warnings");
        Ok(1)
    }
}
