//! Integration tests against the full filter stack (spec.md §8 scenarios,
//! storage-node slice). Exercises the routes the way an HTTP client would,
//! without a bound TCP listener.

use objects_node::config::NodeConfig;
use objects_node::routes::routes;
use objects_node::state::NodeState;
use warp::http::StatusCode;

fn test_config(root: &std::path::Path) -> NodeConfig {
    NodeConfig {
        root: root.to_path_buf(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        buffer_bytes: 4096,
    }
}

#[tokio::test]
async fn happy_write_then_read_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("b")).unwrap();
    let state = NodeState::new(test_config(dir.path()));
    let filter = routes(state);

    let body = vec![0u8; 1024];
    let put = warp::test::request()
        .method("PUT")
        .path("/b/k")
        .header("content-length", body.len().to_string())
        .body(body.clone())
        .reply(&filter)
        .await;
    assert_eq!(put.status(), StatusCode::CREATED);
    assert!(put.headers().get("repr-digest").is_some());

    let get = warp::test::request().method("GET").path("/b/k").reply(&filter).await;
    assert_eq!(get.status(), StatusCode::OK);
    assert_eq!(get.body().as_ref(), body.as_slice());
    assert!(get.headers().get("repr-digest").is_some());
}

#[tokio::test]
async fn digest_mismatch_is_rejected_and_leaves_no_trace() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("b")).unwrap();
    let state = NodeState::new(test_config(dir.path()));
    let filter = routes(state);

    let wrong = objects_core::header::format_header(&objects_core::Digest::of(b"world"));
    let put = warp::test::request()
        .method("PUT")
        .path("/b/k2")
        .header("repr-digest", wrong)
        .body("hello")
        .reply(&filter)
        .await;
    assert_eq!(put.status(), StatusCode::BAD_REQUEST);

    let get = warp::test::request().method("GET").path("/b/k2").reply(&filter).await;
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn second_put_to_same_key_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("b")).unwrap();
    let state = NodeState::new(test_config(dir.path()));
    let filter = routes(state);

    let first = warp::test::request()
        .method("PUT")
        .path("/b/k3")
        .body("one")
        .reply(&filter)
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = warp::test::request()
        .method("PUT")
        .path("/b/k3")
        .body("two")
        .reply(&filter)
        .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let get = warp::test::request().method("GET").path("/b/k3").reply(&filter).await;
    assert_eq!(get.body().as_ref(), b"one");
}

#[tokio::test]
async fn missing_object_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let state = NodeState::new(test_config(dir.path()));
    let filter = routes(state);

    let get = warp::test::request().method("GET").path("/b/nope").reply(&filter).await;
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bucket_listing_reports_size_and_checksum() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("b")).unwrap();
    let state = NodeState::new(test_config(dir.path()));
    let filter = routes(state);

    warp::test::request()
        .method("PUT")
        .path("/b/k")
        .body("abc")
        .reply(&filter)
        .await;

    let list = warp::test::request().method("GET").path("/b/").reply(&filter).await;
    assert_eq!(list.status(), StatusCode::OK);
    let view: objects_core::BucketView = serde_json::from_slice(list.body()).unwrap();
    assert_eq!(view.bucket, "b");
    let entry = view.objects.get("k").unwrap();
    assert_eq!(entry.size, 3);
    assert!(entry.checksum.is_some());
}

#[tokio::test]
async fn missing_bucket_listing_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let state = NodeState::new(test_config(dir.path()));
    let filter = routes(state);

    let list = warp::test::request().method("GET").path("/nope/").reply(&filter).await;
    assert_eq!(list.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_read_write_true_for_mounted_root() {
    let dir = tempfile::tempdir().unwrap();
    let state = NodeState::new(test_config(dir.path()));
    let filter = routes(state);

    let get = warp::test::request().method("GET").path("/health").reply(&filter).await;
    assert_eq!(get.status(), StatusCode::OK);
    let health: objects_core::NodeHealth = serde_json::from_slice(get.body()).unwrap();
    assert!(health.read);
    assert!(health.write);

    let head = warp::test::request().method("HEAD").path("/health").reply(&filter).await;
    assert_eq!(head.status(), StatusCode::OK);
    assert!(head.body().is_empty());
}
