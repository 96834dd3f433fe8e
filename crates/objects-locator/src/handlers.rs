//! Request handlers for the locator's HTTP surface (spec.md §4.2, §6
//! "Locator HTTP surface"). The locator is stateless: every handler
//! re-derives its answer from live probes of the configured node set.

use std::collections::{BTreeMap, HashMap};

use objects_core::{AggregatedBucketView, BucketView, LocatedObjectAttrs, NodeHealth};
use rand::seq::SliceRandom;
use rand::thread_rng;
use serde::Serialize;
use hyper::Body;
use warp::http::{Response, StatusCode};
use warp::reply::Response as WarpResponse;

use objects_core::placement;

use crate::config::AGGREGATE_TIMEOUT;
use crate::fleet::{self, ProbeOutcome};
use crate::path::PathKind;
use crate::state::LocatorState;

fn empty_response(status: StatusCode) -> WarpResponse {
    Response::builder().status(status).body(Body::empty()).unwrap()
}

fn json_response(status: StatusCode, body: &impl Serialize) -> WarpResponse {
    let bytes = serde_json::to_vec(body).expect("response types are always serializable");
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(bytes))
        .unwrap()
}

fn redirect_to(server: &str, bucket: &str, key: &str) -> WarpResponse {
    let location = format!("{server}{bucket}/{key}");
    Response::builder()
        .status(StatusCode::TEMPORARY_REDIRECT)
        .header("location", location)
        .body(Body::empty())
        .unwrap()
}

#[derive(Serialize)]
struct FleetHealth {
    servers: HashMap<String, NodeHealth>,
}

/// `GET /health` (spec.md §4.2).
pub async fn health(state: LocatorState) -> WarpResponse {
    let servers = fleet::probe_all(state.client(), &state.config().servers).await;
    json_response(StatusCode::OK, &FleetHealth { servers })
}

/// `GET/HEAD /{bucket}/{key}` (spec.md §4.2 read path).
pub async fn get_object(bucket: String, key: String, state: LocatorState) -> WarpResponse {
    let path = format!("{bucket}/{key}");
    let mut servers = state.config().servers.clone();
    servers.shuffle(&mut thread_rng());

    for server in &servers {
        if let ProbeOutcome::Found = fleet::head(state.client(), server, &path).await {
            return redirect_to(server, &bucket, &key);
        }
    }
    empty_response(StatusCode::NOT_FOUND)
}

/// `PUT /{bucket}/{key}` (spec.md §4.2 placement algorithm).
pub async fn put_object(
    bucket: String,
    key: String,
    content_length: Option<u64>,
    state: LocatorState,
) -> WarpResponse {
    let size = match content_length {
        Some(n) if n > 0 => n,
        _ => return empty_response(StatusCode::BAD_REQUEST),
    };

    let path = format!("{bucket}/{key}");
    let servers = &state.config().servers;

    // Step 2: probe health on every node in parallel.
    let health = fleet::probe_all(state.client(), servers).await;

    // Step 4: HEAD the object path on every node (not just capacity
    // candidates) to guard against creating a second primary. A node
    // that *errors* on this probe is excluded from candidacy below
    // rather than treated as a 404 (decided Open Question, spec.md §9).
    let existence_probes: Vec<(String, ProbeOutcome)> = {
        let futures = servers
            .iter()
            .map(|server| async { (server.clone(), fleet::head(state.client(), server, &path).await) });
        futures::future::join_all(futures).await
    };
    if existence_probes
        .iter()
        .any(|(_, outcome)| *outcome == ProbeOutcome::Found)
    {
        return empty_response(StatusCode::CONFLICT);
    }
    let errored: std::collections::HashSet<&str> = existence_probes
        .iter()
        .filter(|(_, outcome)| *outcome == ProbeOutcome::Errored)
        .map(|(server, _)| server.as_str())
        .collect();

    // Step 3 + errored-exclusion: capacity candidates that we could
    // positively confirm don't already hold the key.
    let mut candidates: Vec<(String, NodeHealth)> = servers
        .iter()
        .filter(|s| !errored.contains(s.as_str()))
        .filter_map(|s| health.get(s).map(|h| (s.clone(), *h)))
        .filter(|(_, h)| h.has_capacity_for(size))
        .collect();

    // Step 5: confirm the bucket directory exists on each surviving candidate.
    let bucket_path = format!("{bucket}/");
    let bucket_checks = futures::future::join_all(
        candidates
            .iter()
            .map(|(server, _)| fleet::head(state.client(), server, &bucket_path)),
    )
    .await;
    candidates = candidates
        .into_iter()
        .zip(bucket_checks)
        .filter(|(_, outcome)| *outcome == ProbeOutcome::Found)
        .map(|(c, _)| c)
        .collect();

    // Step 6
    if candidates.is_empty() {
        return empty_response(StatusCode::INSUFFICIENT_STORAGE);
    }

    // Step 7: weighted-random selection.
    match placement::sample_one(&candidates) {
        Some(server) => redirect_to(server, &bucket, &key),
        None => empty_response(StatusCode::INSUFFICIENT_STORAGE),
    }
}

/// `GET /{bucket}/` (spec.md §4.2 aggregated bucket view).
pub async fn list_bucket(bucket: String, state: LocatorState) -> WarpResponse {
    let servers = &state.config().servers;
    let path = format!("{bucket}/");

    let responses = futures::future::join_all(servers.iter().map(|server| {
        let url = format!("{server}{path}");
        let client = state.client().clone();
        async move { (server.clone(), client.get(&url).timeout(AGGREGATE_TIMEOUT).send().await) }
    }))
    .await;

    let mut objects: BTreeMap<String, LocatedObjectAttrs> = BTreeMap::new();
    for (server, result) in responses {
        let resp = match result {
            Ok(r) if r.status() == StatusCode::NOT_FOUND => continue,
            Ok(r) if r.status().is_success() => r,
            Ok(_) => return empty_response(StatusCode::SERVICE_UNAVAILABLE),
            Err(_) => return empty_response(StatusCode::SERVICE_UNAVAILABLE),
        };
        let view: BucketView = match resp.json().await {
            Ok(v) => v,
            Err(_) => return empty_response(StatusCode::SERVICE_UNAVAILABLE),
        };
        for (key, attrs) in view.objects {
            objects
                .entry(key)
                .and_modify(|entry| entry.merge(&attrs, server.clone()))
                .or_insert_with(|| LocatedObjectAttrs::first_sighting(&attrs, server.clone()));
        }
    }

    json_response(StatusCode::OK, &AggregatedBucketView { bucket, objects })
}

/// Top-level dispatch from `(method, path)` to the handler above.
pub async fn dispatch(
    method: warp::http::Method,
    raw_path: String,
    content_length: Option<u64>,
    state: LocatorState,
) -> Result<WarpResponse, std::convert::Infallible> {
    use warp::http::Method;

    let kind = crate::path::parse_path(&raw_path);
    let response = match (method, kind) {
        (Method::GET, PathKind::Health) => health(state).await,
        (Method::GET, PathKind::Object(bucket, key)) | (Method::HEAD, PathKind::Object(bucket, key)) => {
            get_object(bucket, key, state).await
        }
        (Method::GET, PathKind::BucketListing(bucket)) => list_bucket(bucket, state).await,
        (Method::PUT, PathKind::Object(bucket, key)) => put_object(bucket, key, content_length, state).await,
        _ => empty_response(StatusCode::NOT_FOUND),
    };
    Ok(response)
}
