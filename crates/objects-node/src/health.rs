//! `/health` reporting: read/write/available/percent computed from the
//! real filesystem backing the node root (spec.md §4.1 refines the
//! baseline "always true" to reflect actual mount state).

use std::path::Path;

use objects_core::NodeHealth;

/// Probe the root directory's filesystem for free/total space and
/// derive a health record from it.
pub fn probe(root: &Path) -> NodeHealth {
    let available = fs2::available_space(root).unwrap_or(0);
    let total = fs2::total_space(root).unwrap_or(0);
    let percent = if total == 0 {
        0
    } else {
        ((available as f64 / total as f64) * 100.0) as u8
    };
    // The baseline contract (spec.md §4.1) is `read`/`write` are true
    // whenever the root is mounted; a failed statvfs is our signal that
    // it isn't.
    let mounted = fs2::total_space(root).is_ok();
    NodeHealth {
        read: mounted,
        write: mounted,
        available,
        percent,
    }
}
