//! Replicator entry point.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let code = objects_replicator::run().await?;
    std::process::exit(code);
}
