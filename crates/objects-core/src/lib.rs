//! Shared types and wire formats for the object storage cluster: digests,
//! the `Repr-Digest`/`Content-Digest` header codec, the on-disk ledger
//! line format, node health records, and bucket listing shapes.
//!
//! This crate has no I/O of its own; the node, locator, and replicator
//! binaries each own their HTTP and filesystem surfaces and use these
//! types to agree on wire format.

pub mod digest;
pub mod env;
pub mod error;
pub mod header;
pub mod health;
pub mod ledger;
pub mod placement;
pub mod view;

pub use digest::{Digest, DigestHasher};
pub use error::CoreError;
pub use health::NodeHealth;
pub use ledger::LedgerLine;
pub use view::{AggregatedBucketView, BucketView, LocatedObjectAttrs, ObjectAttrs};
