//! Locator queries the replicator depends on: the aggregated bucket
//! view and the fleet health map (spec.md §4.3 steps 1 and c).

use std::collections::HashMap;

use objects_core::{AggregatedBucketView, NodeHealth};
use reqwest::Client;
use serde::Deserialize;

use crate::timeouts::{HEALTH_TIMEOUT, LIST_TIMEOUT, PROBE_TIMEOUT};

#[derive(Deserialize)]
struct FleetHealthResponse {
    servers: HashMap<String, NodeHealth>,
}

/// `GET <locator><bucket>/` — the aggregated bucket view (spec.md §4.3
/// step 1).
pub async fn bucket_view(client: &Client, locator: &str, bucket: &str) -> anyhow::Result<AggregatedBucketView> {
    let url = format!("{locator}{bucket}/");
    let resp = client.get(&url).timeout(LIST_TIMEOUT).send().await?.error_for_status()?;
    Ok(resp.json().await?)
}

/// `GET <locator>health` — health of every configured node (spec.md
/// §4.3 step c).
pub async fn fleet_health(client: &Client, locator: &str) -> anyhow::Result<HashMap<String, NodeHealth>> {
    let url = format!("{locator}health");
    let resp = client.get(&url).timeout(HEALTH_TIMEOUT).send().await?.error_for_status()?;
    let parsed: FleetHealthResponse = resp.json().await?;
    Ok(parsed.servers)
}

/// Candidate destinations for an object of `size` bytes that isn't
/// already at any of `current` — the node must advertise capacity and
/// have the bucket directory (spec.md §4.3 step c).
pub async fn find_space(
    client: &Client,
    locator: &str,
    bucket: &str,
    size: u64,
    current: &[String],
    desired: usize,
) -> anyhow::Result<Vec<String>> {
    let health = fleet_health(client, locator).await?;

    let mut candidates: Vec<(String, NodeHealth)> = health
        .into_iter()
        .filter(|(server, _)| !current.contains(server))
        .filter(|(_, h)| h.has_capacity_for(size))
        .collect();

    let bucket_path = format!("{bucket}/");
    let checks = futures::future::join_all(candidates.iter().map(|(server, _)| {
        let url = format!("{server}{bucket_path}");
        let client = client.clone();
        async move {
            client
                .head(&url)
                .timeout(PROBE_TIMEOUT)
                .send()
                .await
                .map(|r| r.status().is_success())
                .unwrap_or(false)
        }
    }))
    .await;
    candidates = candidates
        .into_iter()
        .zip(checks)
        .filter(|(_, exists)| *exists)
        .map(|(c, _)| c)
        .collect();

    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    Ok(objects_core::placement::sample_without_replacement(&candidates, desired))
}
