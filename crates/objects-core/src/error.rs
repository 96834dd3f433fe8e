//! Shared error type for digest parsing and encoding.

/// Errors arising from digest parsing/encoding, shared by the node,
/// locator, and replicator so each can map them to the right HTTP status
/// or CLI diagnostic at its own edge.
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid base64 digest: {0}")]
    InvalidBase64(base64::DecodeError),

    #[error("digest value has unexpected length {0} bytes (want 32)")]
    BadDigestLength(usize),

    #[error("Repr-Digest and Content-Digest disagree on sha-256 value")]
    ConflictingDigests,
}
