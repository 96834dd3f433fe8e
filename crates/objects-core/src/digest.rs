//! SHA-256 content digests and their wire encodings.

use sha2::{Digest as _, Sha256};

use crate::error::CoreError;

/// A 32-byte SHA-256 digest.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Hash a complete byte slice in one shot.
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = DigestHasher::new();
        hasher.update(bytes);
        hasher.finalize()
    }

    /// Lowercase hex encoding, as stored in the on-disk ledger.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a lowercase (or mixed-case) hex digest.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s)?;
        Self::from_bytes(bytes)
    }

    /// Standard base64 encoding, as carried inside `Repr-Digest`/`Content-Digest`.
    pub fn to_base64(&self) -> String {
        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD.encode(self.0)
    }

    /// Parse a standard base64 digest.
    pub fn from_base64(s: &str) -> Result<Self, CoreError> {
        use base64::Engine as _;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(s)
            .map_err(CoreError::InvalidBase64)?;
        Self::from_bytes(bytes)
    }

    fn from_bytes(bytes: Vec<u8>) -> Result<Self, CoreError> {
        if bytes.len() != 32 {
            return Err(CoreError::BadDigestLength(bytes.len()));
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

/// Incremental SHA-256 hasher for streaming writes, so callers never need
/// to buffer a full object in memory just to compute its digest.
pub struct DigestHasher {
    inner: Sha256,
}

impl DigestHasher {
    /// Start a fresh hasher.
    pub fn new() -> Self {
        Self { inner: Sha256::new() }
    }

    /// Feed another chunk of bytes.
    pub fn update(&mut self, chunk: &[u8]) {
        self.inner.update(chunk);
    }

    /// Consume the hasher and return the final digest.
    pub fn finalize(self) -> Digest {
        let out = self.inner.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&out);
        Digest(bytes)
    }
}

impl Default for DigestHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_base64_round_trip() {
        let d = Digest::of(b"hello world");
        let hex = d.to_hex();
        let b64 = d.to_base64();
        assert_eq!(Digest::from_hex(&hex).unwrap(), d);
        assert_eq!(Digest::from_base64(&b64).unwrap(), d);
    }

    #[test]
    fn incremental_matches_one_shot() {
        let mut h = DigestHasher::new();
        h.update(b"hello ");
        h.update(b"world");
        assert_eq!(h.finalize(), Digest::of(b"hello world"));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(Digest::from_hex("abcd").is_err());
        assert!(Digest::from_base64("aGVsbG8=").is_err());
    }

    #[test]
    fn known_vector() {
        // SHA-256("") per FIPS 180-4 test vectors.
        let d = Digest::of(b"");
        assert_eq!(
            d.to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
