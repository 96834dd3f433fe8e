//! Streaming node-to-node copy (spec.md §4.3.1). Ported directly from
//! `async_replicate.py`'s `replicate_object`/`get_object_size`, including
//! the `skip_404` tolerance used for the destination's pre-copy check.

use anyhow::{bail, Context};
use reqwest::Client;

use crate::timeouts::{STAT_TIMEOUT, TRANSFER_TIMEOUT};

struct ObjectStat {
    size: u64,
    digest: String,
}

/// `HEAD` an object to read its size and `Repr-Digest`. With
/// `skip_404`, a 404 response is not an error — it means "nothing
/// there yet", distinguishing an empty destination from a genuine
/// fetch failure (ported from `get_object_size(..., skip_404=True)`).
async fn head_object(client: &Client, url: &str, skip_404: bool) -> anyhow::Result<Option<ObjectStat>> {
    let resp = client
        .head(url)
        .timeout(STAT_TIMEOUT)
        .send()
        .await
        .with_context(|| format!("HEAD {url}"))?;
    if skip_404 && resp.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let resp = resp.error_for_status().with_context(|| format!("HEAD {url}"))?;
    let size: u64 = resp
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .context("missing or invalid Content-Length")?;
    let digest = resp
        .headers()
        .get("repr-digest")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .context("missing Repr-Digest")?;
    Ok(Some(ObjectStat { size, digest }))
}

/// Copy one object from `source` to `dest`, never buffering the whole
/// body (spec.md §9 "Streaming contract"). Returns the object's size on
/// success.
pub async fn streaming_copy(client: &Client, source: &str, dest: &str) -> anyhow::Result<u64> {
    let src = head_object(client, source, false)
        .await?
        .context("source object has no stat")?;
    if src.size == 0 {
        bail!("source object {source} reports zero size");
    }

    if head_object(client, dest, true).await?.is_some() {
        bail!("destination {dest} already has an object");
    }

    let get = client
        .get(source)
        .timeout(TRANSFER_TIMEOUT)
        .send()
        .await
        .with_context(|| format!("GET {source}"))?
        .error_for_status()?;
    let get_size: u64 = get
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .context("missing or invalid Content-Length on streamed GET")?;
    let get_digest = get
        .headers()
        .get("repr-digest")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .context("missing Repr-Digest on streamed GET")?;
    if get_size != src.size || get_digest != src.digest {
        bail!("streamed GET from {source} disagrees with its own HEAD");
    }

    let body = reqwest::Body::wrap_stream(get.bytes_stream());
    client
        .put(dest)
        .timeout(TRANSFER_TIMEOUT)
        .header("content-digest", src.digest.clone())
        .body(body)
        .send()
        .await
        .with_context(|| format!("PUT {dest}"))?
        .error_for_status()
        .with_context(|| format!("PUT {dest}"))?;

    let confirm = head_object(client, dest, false)
        .await?
        .context("destination has no stat after copy")?;
    if confirm.size != src.size || confirm.digest != src.digest {
        bail!("destination {dest} does not match source after copy; left as-is");
    }

    Ok(src.size)
}
