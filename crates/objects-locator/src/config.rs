//! Locator configuration, loaded from the environment (spec.md §6):
//! `OBJECT_SERVERS`, bind port.

use std::net::SocketAddr;
use std::time::Duration;

use objects_core::env::{var_list, var_or};

/// Default bind port for a locator.
pub const DEFAULT_PORT: u16 = 46580;

/// Short timeout for existence/health probes (spec.md §5 "Cancellation
/// and timeouts": 1-10 s for outbound probes).
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Timeout for a per-node bucket listing fetch during aggregation
/// (spec.md §5); a listing body is larger than a bare health/HEAD probe,
/// so it gets more room, matching `async_replicate.py::get_bucket_contents`'s
/// `timeout=10`.
pub const AGGREGATE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// The configured node set `S` (spec.md §4.2), fixed for the
    /// process lifetime (spec.md §5 "Shared resource policy").
    pub servers: Vec<String>,
    pub bind_addr: SocketAddr,
}

impl LocatorConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let servers = var_list("OBJECT_SERVERS");
        if servers.is_empty() {
            anyhow::bail!("OBJECT_SERVERS must name at least one storage node URL");
        }
        let port: u16 = var_or("PORT", DEFAULT_PORT);
        let bind_addr: SocketAddr = format!("0.0.0.0:{port}")
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address for port {port}: {e}"))?;

        Ok(Self { servers, bind_addr })
    }
}
