//! Orchestration for one replicator pass (spec.md §4.3 `auto_replica`):
//! fetch the aggregated view, diagnose each object's deficit, place and
//! copy. Distinct objects are processed concurrently, bounded by
//! `concurrency` — additive over the original synchronous Python
//! (spec.md §5 calls cross-object parallelism "desirable but not
//! required").

use futures::stream::{self, StreamExt};
use objects_core::LocatedObjectAttrs;
use rand::seq::SliceRandom;
use rand::thread_rng;
use reqwest::Client;
use tracing::{info, warn};

use crate::{copy, fleet};

/// Run one pass against `bucket` behind `locator`, bringing every
/// object up to `replicas` replicas where possible. Returns `true` iff
/// no warnings were emitted (spec.md §4.3 step 3 / §6 exit code).
pub async fn auto_replica(
    client: &Client,
    locator: &str,
    bucket: &str,
    replicas: usize,
    dry_run: bool,
    concurrency: usize,
) -> anyhow::Result<bool> {
    let view = fleet::bucket_view(client, locator, bucket).await?;

    let warnings = stream::iter(view.objects.into_iter())
        .map(|(key, obj)| {
            let client = client.clone();
            async move { process_object(&client, locator, bucket, replicas, dry_run, key, obj).await }
        })
        .buffer_unordered(concurrency.max(1))
        .collect::<Vec<bool>>()
        .await;

    Ok(!warnings.into_iter().any(|warned| warned))
}

/// Process a single object. Returns `true` if a warning was emitted.
async fn process_object(
    client: &Client,
    locator: &str,
    bucket: &str,
    replicas: usize,
    dry_run: bool,
    key: String,
    obj: LocatedObjectAttrs,
) -> bool {
    if obj.error || obj.checksum.is_none() {
        warn!(key, "object has an issue: aggregation disagreement or no checksum");
        return true;
    }
    let Some(size) = obj.size else {
        warn!(key, "object has an issue: no agreed size");
        return true;
    };

    let deficit = replicas as i64 - obj.locations.len() as i64;
    if deficit < 1 {
        return false;
    }
    let desired = deficit as usize;

    let spaces = match fleet::find_space(client, locator, bucket, size, &obj.locations, desired).await {
        Ok(s) => s,
        Err(e) => {
            warn!(key, error = %e, "failed to query candidate space");
            return true;
        }
    };
    if spaces.is_empty() {
        warn!(key, "no space to replicate object");
        return true;
    }

    let mut warned = false;
    if spaces.len() < desired {
        warn!(key, wanted = desired, got = spaces.len(), "not enough space, replicating what we can");
        warned = true;
    }

    for dest in spaces {
        let source = obj
            .locations
            .choose(&mut thread_rng())
            .expect("locations is non-empty whenever deficit >= 1")
            .clone();
        let src_url = format!("{source}{bucket}/{key}");
        let dst_url = format!("{dest}{bucket}/{key}");

        if dry_run {
            info!(key, src_url, dst_url, "dry run: would replicate");
            continue;
        }

        match copy::streaming_copy(client, &src_url, &dst_url).await {
            Ok(_) => info!(key, src_url, dst_url, "replicated"),
            Err(e) => {
                warn!(key, error = %e, "replication failed");
                warned = true;
            }
        }
    }

    warned
}
