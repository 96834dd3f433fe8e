//! Request handlers for the storage node's HTTP surface (spec.md §4.1,
//! §6 "Storage node HTTP surface"). Every handler returns a
//! `warp::reply::Response` directly so status codes and headers stay
//! under explicit, local control rather than threaded through warp's
//! rejection machinery.

use bytes::Buf;
use futures::StreamExt;
use hyper::Body;
use warp::http::{Method, Response, StatusCode};
use objects_core::{header, BucketView, Digest, DigestHasher, NodeHealth, ObjectAttrs};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{info, instrument, warn};
use warp::reply::Response as WarpResponse;

use crate::{health, ledger, paths};
use crate::state::NodeState;

/// The three request shapes this node answers, derived from the raw
/// request path (spec.md §4.1: `/health`, `/{bucket}/`, `/{bucket}/{key}`).
#[derive(Debug, PartialEq, Eq)]
pub enum PathKind {
    Health,
    BucketListing(String),
    Object(String, String),
    Invalid,
}

/// Parse a raw request path into a [`PathKind`]. Done manually (rather
/// than via warp's segment filters) because the same prefix — one path
/// segment followed by either nothing or a trailing slash — must
/// disambiguate "bucket listing" from "object key", which warp's
/// `path!` macro cannot express directly.
pub fn parse_path(path: &str) -> PathKind {
    let trimmed = path.trim_start_matches('/');
    if trimmed == "health" {
        return PathKind::Health;
    }
    let mut parts = trimmed.splitn(2, '/');
    let bucket = match parts.next() {
        Some(b) if !b.is_empty() => b.to_string(),
        _ => return PathKind::Invalid,
    };
    match parts.next() {
        None => PathKind::Invalid,
        Some("") => PathKind::BucketListing(bucket),
        Some(key) => PathKind::Object(bucket, key.to_string()),
    }
}

fn empty_response(status: StatusCode) -> WarpResponse {
    Response::builder()
        .status(status)
        .body(Body::empty())
        .expect("static response is well-formed")
}

fn json_response(status: StatusCode, body: &impl serde::Serialize) -> WarpResponse {
    let bytes = serde_json::to_vec(body).expect("response types are always serializable");
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(bytes))
        .expect("static response is well-formed")
}

/// `GET/HEAD /health` (spec.md §4.1).
#[instrument(skip(state))]
pub async fn health(method: Method, state: NodeState) -> WarpResponse {
    if method == Method::HEAD {
        return empty_response(StatusCode::OK);
    }
    let record: NodeHealth = health::probe(&state.config().root);
    json_response(StatusCode::OK, &record)
}

/// `GET/HEAD /{bucket}/{key}` (spec.md §4.1).
#[instrument(skip(state))]
pub async fn get_object(method: Method, bucket: String, key: String, state: NodeState) -> WarpResponse {
    let path = paths::object_path(&state.config().root, &bucket, &key);
    let meta = match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => meta,
        _ => return empty_response(StatusCode::NOT_FOUND),
    };

    let ledger_path = paths::ledger_path(&state.config().root, &bucket);
    let checksum = ledger::lookup(&ledger_path, &key).unwrap_or(None);

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("content-length", meta.len());
    if let Some(hex) = &checksum {
        if let Ok(digest) = Digest::from_hex(hex) {
            builder = builder.header("repr-digest", header::format_header(&digest));
        }
    }

    if method == Method::HEAD {
        return builder.body(Body::empty()).expect("static response is well-formed");
    }

    let file = match tokio::fs::File::open(&path).await {
        Ok(f) => f,
        Err(e) => {
            warn!(error = %e, "failed to open object after stat succeeded");
            return empty_response(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };
    let stream = ReaderStream::new(file);
    builder
        .body(Body::wrap_stream(stream))
        .expect("static response is well-formed")
}

/// `GET /{bucket}/` (spec.md §4.1).
#[instrument(skip(state))]
pub async fn list_bucket(bucket: String, state: NodeState) -> WarpResponse {
    let dir = paths::bucket_path(&state.config().root, &bucket);
    let mut read_dir = match tokio::fs::read_dir(&dir).await {
        Ok(rd) => rd,
        Err(_) => return empty_response(StatusCode::NOT_FOUND),
    };

    let ledger_path = paths::ledger_path(&state.config().root, &bucket);
    let checksums = ledger::read_all(&ledger_path).unwrap_or_default();

    let mut objects = std::collections::BTreeMap::new();
    loop {
        let entry = match read_dir.next_entry().await {
            Ok(Some(e)) => e,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "error walking bucket directory");
                break;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        let meta = match entry.metadata().await {
            Ok(m) => m,
            Err(_) => continue,
        };
        let attrs = if meta.is_dir() {
            ObjectAttrs {
                directory: true,
                size: 0,
                checksum: None,
            }
        } else {
            ObjectAttrs {
                directory: false,
                size: meta.len(),
                checksum: checksums.get(&name).cloned(),
            }
        };
        objects.insert(name, attrs);
    }

    json_response(StatusCode::OK, &BucketView { bucket, objects })
}

/// `PUT /{bucket}/{key}` (spec.md §4.1 write path, state machine
/// `RECV → HASH → LEDGER → ACK`).
#[instrument(skip(state, body))]
pub async fn put_object<S, B>(
    bucket: String,
    key: String,
    repr_digest: Option<String>,
    content_digest: Option<String>,
    content_length: Option<u64>,
    mut body: S,
    state: NodeState,
) -> WarpResponse
where
    S: futures::Stream<Item = Result<B, warp::Error>> + Unpin,
    B: Buf,
{
    let client_digest = match header::parse_any(repr_digest.as_deref(), content_digest.as_deref()) {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "rejecting PUT with conflicting digest headers");
            return empty_response(StatusCode::BAD_REQUEST);
        }
    };

    let path = paths::object_path(&state.config().root, &bucket, &key);
    let file = match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
    {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return empty_response(StatusCode::CONFLICT);
        }
        Err(e) => {
            warn!(error = %e, "I/O failure opening destination for write");
            return empty_response(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // RECV: stream the body to disk in whatever chunks the transport
    // hands us, hashing incrementally — the object is never buffered
    // whole (spec.md §9 "Streaming contract").
    let mut writer = tokio::io::BufWriter::with_capacity(state.config().buffer_bytes, file);
    let mut hasher = DigestHasher::new();
    let mut written: u64 = 0;
    let mut recv_failed = false;

    while let Some(next) = body.next().await {
        let mut chunk = match next {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "body stream error during PUT");
                recv_failed = true;
                break;
            }
        };
        while chunk.has_remaining() {
            let slice = chunk.chunk();
            if let Err(e) = writer.write_all(slice).await {
                warn!(error = %e, "disk write failure during PUT");
                recv_failed = true;
                break;
            }
            hasher.update(slice);
            written += slice.len() as u64;
            let n = slice.len();
            chunk.advance(n);
        }
        if recv_failed {
            break;
        }
    }

    if recv_failed || writer.flush().await.is_err() {
        drop(writer);
        let _ = tokio::fs::remove_file(&path).await;
        return empty_response(StatusCode::INTERNAL_SERVER_ERROR);
    }
    drop(writer);

    if let Some(expected) = content_length {
        if expected != written {
            warn!(expected, written, "Content-Length mismatch, fatal integrity fault");
            let _ = tokio::fs::remove_file(&path).await;
            return empty_response(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    // HASH
    let digest = hasher.finalize();
    if let Some(expected) = client_digest {
        if expected != digest {
            let _ = tokio::fs::remove_file(&path).await;
            return empty_response(StatusCode::BAD_REQUEST);
        }
    }

    // LEDGER: failure here does not fail the PUT (spec.md §4.1 state machine).
    let ledger_path = paths::ledger_path(&state.config().root, &bucket);
    if let Err(e) = ledger::append(&ledger_path, &digest.to_hex(), &key) {
        warn!(error = %e, "ledger append failed; object is on disk but unrecorded");
    }

    info!(bucket, key, bytes = written, "object written");

    // ACK
    Response::builder()
        .status(StatusCode::CREATED)
        .header("repr-digest", header::format_header(&digest))
        .body(Body::empty())
        .expect("static response is well-formed")
}

/// Top-level dispatch from `(method, path)` to the handler above. Kept
/// as one function so the bucket-vs-object path ambiguity is resolved
/// in exactly one place.
#[allow(clippy::too_many_arguments)]
pub async fn dispatch<S, B>(
    method: Method,
    raw_path: String,
    repr_digest: Option<String>,
    content_digest: Option<String>,
    content_length: Option<u64>,
    body: S,
    state: NodeState,
) -> Result<WarpResponse, std::convert::Infallible>
where
    S: futures::Stream<Item = Result<B, warp::Error>> + Unpin,
    B: Buf,
{
    let kind = parse_path(&raw_path);
    let response = match (method.clone(), kind) {
        (Method::GET, PathKind::Health) | (Method::HEAD, PathKind::Health) => {
            health(method, state).await
        }
        (Method::GET, PathKind::Object(bucket, key)) | (Method::HEAD, PathKind::Object(bucket, key)) => {
            get_object(method, bucket, key, state).await
        }
        (Method::GET, PathKind::BucketListing(bucket)) => list_bucket(bucket, state).await,
        (Method::PUT, PathKind::Object(bucket, key)) => {
            put_object(bucket, key, repr_digest, content_digest, content_length, body, state).await
        }
        _ => empty_response(StatusCode::NOT_FOUND),
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_health() {
        assert_eq!(parse_path("/health"), PathKind::Health);
    }

    #[test]
    fn parses_bucket_listing() {
        assert_eq!(
            parse_path("/mybucket/"),
            PathKind::BucketListing("mybucket".to_string())
        );
    }

    #[test]
    fn parses_object_key() {
        assert_eq!(
            parse_path("/mybucket/mykey"),
            PathKind::Object("mybucket".to_string(), "mykey".to_string())
        );
    }

    #[test]
    fn parses_nested_key() {
        assert_eq!(
            parse_path("/mybucket/a/b/c"),
            PathKind::Object("mybucket".to_string(), "a/b/c".to_string())
        );
    }

    #[test]
    fn bare_bucket_is_invalid() {
        assert_eq!(parse_path("/mybucket"), PathKind::Invalid);
    }
}
