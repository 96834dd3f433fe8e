//! `Repr-Digest` / `Content-Digest` structured-field codec (RFC 9530, sha-256 only).
//!
//! Wire format: one or more comma-separated `algo=:base64:` entries. This
//! core only recognizes `sha-256`; other algorithms in the list are
//! ignored rather than rejected.

use std::collections::HashSet;

use crate::digest::Digest;
use crate::error::CoreError;

/// Render a digest as a `Repr-Digest`/`Content-Digest` header value.
pub fn format_header(digest: &Digest) -> String {
    format!("sha-256=:{}:", digest.to_base64())
}

/// Parse the sha-256 entry out of a single structured-field header value.
///
/// Splits on `,`; for each fragment, splits once on `=`; the first
/// fragment whose left side is `sha-256` wins. Returns `None` if no
/// sha-256 entry is present.
pub fn parse_one(value: &str) -> Result<Option<Digest>, CoreError> {
    for fragment in value.split(',') {
        let fragment = fragment.trim();
        let Some((algo, rest)) = fragment.split_once('=') else {
            continue;
        };
        if algo.trim() != "sha-256" {
            continue;
        }
        let b64 = rest.trim().trim_matches(':');
        return Digest::from_base64(b64).map(Some);
    }
    Ok(None)
}

/// Reconcile a possible `Repr-Digest` and a possible `Content-Digest` into
/// a single client-supplied digest.
///
/// Mirrors the original `parse_digest_headers`: both headers are parsed
/// independently, the resulting digests are deduplicated, and it is only
/// an error if they *disagree* — two headers naming the same sha-256
/// value is fine.
pub fn parse_any(
    repr_digest: Option<&str>,
    content_digest: Option<&str>,
) -> Result<Option<Digest>, CoreError> {
    let mut seen: HashSet<Digest> = HashSet::new();
    for header in [repr_digest, content_digest].into_iter().flatten() {
        if let Some(d) = parse_one(header)? {
            seen.insert(d);
        }
    }
    match seen.len() {
        0 => Ok(None),
        1 => Ok(seen.into_iter().next()),
        _ => Err(CoreError::ConflictingDigests),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_single_entry() {
        let d = Digest::of(b"payload");
        let header = format_header(&d);
        assert_eq!(parse_one(&header).unwrap(), Some(d));
    }

    #[test]
    fn ignores_other_algorithms() {
        let d = Digest::of(b"payload");
        let header = format!("md5=:deadbeef:, sha-256=:{}:", d.to_base64());
        assert_eq!(parse_one(&header).unwrap(), Some(d));
    }

    #[test]
    fn missing_sha256_is_none() {
        assert_eq!(parse_one("md5=:deadbeef:").unwrap(), None);
    }

    #[test]
    fn agreeing_headers_are_fine() {
        let d = Digest::of(b"payload");
        let header = format_header(&d);
        assert_eq!(parse_any(Some(&header), Some(&header)).unwrap(), Some(d));
    }

    #[test]
    fn conflicting_headers_are_rejected() {
        let a = format_header(&Digest::of(b"one"));
        let b = format_header(&Digest::of(b"two"));
        assert!(matches!(
            parse_any(Some(&a), Some(&b)),
            Err(CoreError::ConflictingDigests)
        ));
    }

    #[test]
    fn neither_header_is_none() {
        assert_eq!(parse_any(None, None).unwrap(), None);
    }
}
