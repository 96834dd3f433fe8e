//! Locator entry point.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    objects_locator::run().await
}
