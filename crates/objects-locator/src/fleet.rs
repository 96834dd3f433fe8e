//! Fan-out probes against the configured node set `S` (spec.md §4.2).
//! Every placement and listing decision consults live nodes; nothing is
//! cached, since the locator owns no authoritative state.

use std::collections::HashMap;

use futures::future::join_all;
use objects_core::NodeHealth;
use reqwest::{Client, StatusCode};

use crate::config::PROBE_TIMEOUT;

/// `GET <node>/health` against every node in parallel. A node that
/// errors or times out is treated as `{write:false, available:0,
/// percent:0}` (spec.md §4.2 step 2) rather than dropped from the map —
/// callers need to know it was configured even if currently dark.
pub async fn probe_all(client: &Client, servers: &[String]) -> HashMap<String, NodeHealth> {
    let probes = servers.iter().map(|server| probe_one(client, server));
    let results = join_all(probes).await;
    servers.iter().cloned().zip(results).collect()
}

async fn probe_one(client: &Client, server: &str) -> NodeHealth {
    let url = format!("{server}health");
    match client.get(&url).timeout(PROBE_TIMEOUT).send().await {
        Ok(resp) if resp.status().is_success() => {
            resp.json::<NodeHealth>().await.unwrap_or_else(|_| NodeHealth::unreachable())
        }
        _ => NodeHealth::unreachable(),
    }
}

/// Outcome of a single node's HEAD probe for an object path, used both
/// by the read path (first 2xx wins) and the write path's 404 scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Found,
    NotFound,
    /// Network error, timeout, or any non-404 non-2xx status.
    Errored,
}

/// `HEAD <server><path>` with the locator's standard short timeout.
pub async fn head(client: &Client, server: &str, path: &str) -> ProbeOutcome {
    let url = format!("{server}{path}");
    match client.head(&url).timeout(PROBE_TIMEOUT).send().await {
        Ok(resp) if resp.status().is_success() => ProbeOutcome::Found,
        Ok(resp) if resp.status() == StatusCode::NOT_FOUND => ProbeOutcome::NotFound,
        _ => ProbeOutcome::Errored,
    }
}
