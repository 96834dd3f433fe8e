//! Storage node entry point.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    objects_node::run().await
}
