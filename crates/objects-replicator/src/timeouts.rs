//! Outbound timeouts (spec.md §5: "All outbound probes carry short
//! timeouts … Transfer timeouts are generous (order of 2000 s)"),
//! ported from the specific values `async_replicate.py` uses for each
//! call shape rather than one blanket timeout.

use std::time::Duration;

/// `GET <locator>health` (`async_replicate.py::find_space`, `timeout=4`).
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(4);

/// `HEAD <node><bucket>/` existence probe (`async_replicate.py::find_space`,
/// `timeout=1`).
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// `GET <locator><bucket>/` aggregated listing (`async_replicate.py::
/// get_bucket_contents`, `timeout=10`).
pub const LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// `HEAD` an object to read its size/digest (`async_replicate.py::
/// get_object_size`, `timeout=2`).
pub const STAT_TIMEOUT: Duration = Duration::from_secs(2);

/// Streaming `GET`/`PUT` transfer of an object's body
/// (`async_replicate.py`'s `TIMEOUT=2048`).
pub const TRANSFER_TIMEOUT: Duration = Duration::from_secs(2048);
