//! Path helpers for the on-disk layout (spec.md §6 "On-disk layout"):
//! `<root>/<bucket>/<key>` and the sibling `<root>/<bucket>.sha256` ledger.

use std::path::{Path, PathBuf};

/// Path of an object's data file.
pub fn object_path(root: &Path, bucket: &str, key: &str) -> PathBuf {
    root.join(bucket).join(key)
}

/// Path of a bucket's directory.
pub fn bucket_path(root: &Path, bucket: &str) -> PathBuf {
    root.join(bucket)
}

/// Path of a bucket's digest ledger, a sibling of the bucket directory.
pub fn ledger_path(root: &Path, bucket: &str) -> PathBuf {
    root.join(format!("{bucket}.sha256"))
}
