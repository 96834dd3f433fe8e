//! Bucket listing response shapes (spec.md §4.1 `GET /{bucket}/` and
//! §4.2 aggregated `GET /{bucket}/`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single entry in a storage node's bucket listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectAttrs {
    pub directory: bool,
    pub size: u64,
    pub checksum: Option<String>,
}

/// A storage node's `GET /{bucket}/` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BucketView {
    pub bucket: String,
    pub objects: BTreeMap<String, ObjectAttrs>,
}

/// One key's aggregated view across the whole fleet, as assembled by the
/// locator. `size`/`directory`/`checksum` become `None` (and `error`
/// becomes `true`) the moment two nodes disagree about that field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LocatedObjectAttrs {
    pub directory: Option<bool>,
    pub size: Option<u64>,
    pub checksum: Option<String>,
    pub locations: Vec<String>,
    pub error: bool,
}

impl LocatedObjectAttrs {
    /// Start a fresh entry from the first node that reported this key.
    pub fn first_sighting(attrs: &ObjectAttrs, node: impl Into<String>) -> Self {
        Self {
            directory: Some(attrs.directory),
            size: Some(attrs.size),
            checksum: attrs.checksum.clone(),
            locations: vec![node.into()],
            error: false,
        }
    }

    /// Merge in another node's report of the same key, nulling any field
    /// that disagrees and marking the entry as errored (spec.md §4.2).
    pub fn merge(&mut self, attrs: &ObjectAttrs, node: impl Into<String>) {
        self.locations.push(node.into());
        if self.directory != Some(attrs.directory) {
            self.directory = None;
            self.error = true;
        }
        if self.size != Some(attrs.size) {
            self.size = None;
            self.error = true;
        }
        if self.checksum != attrs.checksum {
            self.checksum = None;
            self.error = true;
        }
    }
}

/// The locator's `GET /{bucket}/` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AggregatedBucketView {
    pub bucket: String,
    pub objects: BTreeMap<String, LocatedObjectAttrs>,
}
