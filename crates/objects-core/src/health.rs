//! Node health record, shared by the storage node's `/health` response
//! and the locator/replicator's view of probed nodes.

use serde::{Deserialize, Serialize};

/// Observed health of a single storage node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeHealth {
    /// Whether the node root is mounted and readable.
    pub read: bool,
    /// Whether the node root is mounted and writable.
    pub write: bool,
    /// Free bytes available on the node's root filesystem.
    pub available: u64,
    /// Integer percent free (0-100), `free / total * 100`.
    pub percent: u8,
}

impl NodeHealth {
    /// The health record assigned to a node that errored or timed out
    /// on a probe (spec.md §4.2, step 2: "treated as
    /// `{write:false, available:0, percent:0}`").
    pub fn unreachable() -> Self {
        Self {
            read: false,
            write: false,
            available: 0,
            percent: 0,
        }
    }

    /// Whether this node is eligible as a write candidate for an object
    /// of the given size, per the capacity margin in spec.md §4.2 step 3
    /// and §4.3 step c (`available > size + 1 MiB`).
    pub fn has_capacity_for(&self, size: u64) -> bool {
        const MARGIN: u64 = 1024 * 1024;
        self.write && self.percent > 1 && self.available > size.saturating_add(MARGIN)
    }
}
