//! Storage node configuration, loaded from the environment
//! (spec.md §6 "Configuration"): `OBJECT_DIRECTORY`, `PORT`.

use std::net::SocketAddr;
use std::path::PathBuf;

use objects_core::env::var_or;

/// Default bind port for a storage node (spec.md §6).
pub const DEFAULT_PORT: u16 = 46579;

/// Suggested streaming buffer size for the PUT write path (spec.md §4.1).
pub const DEFAULT_BUFFER_BYTES: usize = 64 * 1024 * 1024;

/// Resolved storage node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Root directory under which `<bucket>/<key>` objects and
    /// `<bucket>.sha256` ledgers live.
    pub root: PathBuf,
    /// Address to bind the HTTP server on.
    pub bind_addr: SocketAddr,
    /// Chunk size used when streaming a PUT body to disk.
    pub buffer_bytes: usize,
}

impl NodeConfig {
    /// Load configuration from the environment, with the defaults
    /// documented in spec.md §6.
    pub fn from_env() -> anyhow::Result<Self> {
        let root: PathBuf = std::env::var("OBJECT_DIRECTORY")
            .unwrap_or_else(|_| ".".to_string())
            .into();
        let port: u16 = var_or("PORT", DEFAULT_PORT);
        let bind_addr: SocketAddr = format!("0.0.0.0:{port}")
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address for port {port}: {e}"))?;
        let buffer_bytes: usize = var_or("BUFFER_SIZE_BYTES", DEFAULT_BUFFER_BYTES);

        std::fs::create_dir_all(&root)
            .map_err(|e| anyhow::anyhow!("cannot create OBJECT_DIRECTORY {root:?}: {e}"))?;

        Ok(Self {
            root,
            bind_addr,
            buffer_bytes,
        })
    }
}
