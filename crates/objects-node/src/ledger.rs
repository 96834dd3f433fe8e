//! Append-only digest ledger I/O (spec.md §3 "Digest ledger", §5 "Shared
//! resource policy": append is O_APPEND and advisory).

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use objects_core::LedgerLine;

/// Append one ledger line. Failure here must not fail the PUT that
/// produced it (spec.md §4.1 state machine: `LEDGER` failure leaves the
/// file on disk) — callers log but do not propagate as a write failure.
pub fn append(path: &Path, digest_hex: &str, key: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(LedgerLine::format(digest_hex, key).as_bytes())
}

/// Look up a single key's checksum in a bucket's ledger, if present.
/// A missing ledger file is not an error: the object is still served,
/// just without a `Repr-Digest` header (spec.md §4.1).
pub fn lookup(path: &Path, key: &str) -> std::io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(LedgerLine::parse_all(&contents).remove(key)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Load a whole bucket's ledger as a key → digest map, used when
/// building a bucket listing. Missing ledger ⇒ empty map.
pub fn read_all(path: &Path) -> std::io::Result<std::collections::HashMap<String, String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(LedgerLine::parse_all(&contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Default::default()),
        Err(e) => Err(e),
    }
}
