//! Integration tests against the locator's filter stack, with storage
//! nodes stood in by `wiremock` servers (spec.md §8 scenarios, locator
//! slice: S1 happy write placement, S4 insufficient storage).

use objects_locator::config::LocatorConfig;
use objects_locator::routes::routes;
use objects_locator::state::LocatorState;
use serde_json::json;
use warp::http::StatusCode;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(servers: Vec<String>) -> LocatorConfig {
    LocatorConfig {
        servers,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
    }
}

async fn mock_health(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn put_redirects_to_the_only_candidate_with_capacity() {
    let roomy = MockServer::start().await;
    let tight = MockServer::start().await;

    mock_health(
        &roomy,
        json!({"read": true, "write": true, "available": 10u64 * 1024 * 1024 * 1024, "percent": 80}),
    )
    .await;
    mock_health(
        &tight,
        json!({"read": true, "write": true, "available": 1u64, "percent": 1}),
    )
    .await;

    for server in [&roomy, &tight] {
        Mock::given(method("HEAD"))
            .and(path("/b/k"))
            .respond_with(ResponseTemplate::new(404))
            .mount(server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/b/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;
    }

    let servers = vec![format!("{}/", roomy.uri()), format!("{}/", tight.uri())];
    let state = LocatorState::new(config(servers));
    let filter = routes(state);

    let put = warp::test::request()
        .method("PUT")
        .path("/b/k")
        .header("content-length", "1024")
        .reply(&filter)
        .await;
    assert_eq!(put.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = put.headers().get("location").unwrap().to_str().unwrap();
    assert!(location.starts_with(&roomy.uri()));
}

#[tokio::test]
async fn put_without_content_length_is_bad_request() {
    let state = LocatorState::new(config(vec!["http://127.0.0.1:1/".to_string()]));
    let filter = routes(state);

    let put = warp::test::request().method("PUT").path("/b/k").reply(&filter).await;
    assert_eq!(put.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_conflicts_when_object_already_exists_somewhere() {
    let node = MockServer::start().await;
    mock_health(
        &node,
        json!({"read": true, "write": true, "available": 10u64 * 1024 * 1024 * 1024, "percent": 80}),
    )
    .await;
    Mock::given(method("HEAD"))
        .and(path("/b/k"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&node)
        .await;

    let state = LocatorState::new(config(vec![format!("{}/", node.uri())]));
    let filter = routes(state);

    let put = warp::test::request()
        .method("PUT")
        .path("/b/k")
        .header("content-length", "10")
        .reply(&filter)
        .await;
    assert_eq!(put.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn put_with_no_capacity_anywhere_is_507() {
    let node = MockServer::start().await;
    mock_health(&node, json!({"read": true, "write": true, "available": 1u64, "percent": 1})).await;
    Mock::given(method("HEAD"))
        .and(path("/b/k"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&node)
        .await;

    let state = LocatorState::new(config(vec![format!("{}/", node.uri())]));
    let filter = routes(state);

    let put = warp::test::request()
        .method("PUT")
        .path("/b/k")
        .header("content-length", "10")
        .reply(&filter)
        .await;
    assert_eq!(put.status(), StatusCode::INSUFFICIENT_STORAGE);
}

#[tokio::test]
async fn get_redirects_to_the_node_holding_the_object() {
    let absent = MockServer::start().await;
    let holder = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/b/k"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&absent)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/b/k"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&holder)
        .await;

    let servers = vec![format!("{}/", absent.uri()), format!("{}/", holder.uri())];
    let state = LocatorState::new(config(servers));
    let filter = routes(state);

    let get = warp::test::request().method("GET").path("/b/k").reply(&filter).await;
    assert_eq!(get.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = get.headers().get("location").unwrap().to_str().unwrap();
    assert!(location.starts_with(&holder.uri()));
}

#[tokio::test]
async fn get_missing_everywhere_is_404() {
    let node = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/b/k"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&node)
        .await;

    let state = LocatorState::new(config(vec![format!("{}/", node.uri())]));
    let filter = routes(state);

    let get = warp::test::request().method("GET").path("/b/k").reply(&filter).await;
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn aggregated_listing_nulls_disagreeing_fields() {
    let n1 = MockServer::start().await;
    let n2 = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/b/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bucket": "b",
            "objects": {"k": {"directory": false, "size": 10, "checksum": "abc"}}
        })))
        .mount(&n1)
        .await;
    Mock::given(method("GET"))
        .and(path("/b/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bucket": "b",
            "objects": {"k": {"directory": false, "size": 11, "checksum": "abc"}}
        })))
        .mount(&n2)
        .await;

    let servers = vec![format!("{}/", n1.uri()), format!("{}/", n2.uri())];
    let state = LocatorState::new(config(servers));
    let filter = routes(state);

    let list = warp::test::request().method("GET").path("/b/").reply(&filter).await;
    assert_eq!(list.status(), StatusCode::OK);
    let view: objects_core::AggregatedBucketView = serde_json::from_slice(list.body()).unwrap();
    let entry = view.objects.get("k").unwrap();
    assert_eq!(entry.size, None);
    assert!(entry.error);
    assert_eq!(entry.checksum.as_deref(), Some("abc"));
}

#[tokio::test]
async fn fleet_health_reports_every_configured_server() {
    let node = MockServer::start().await;
    mock_health(&node, json!({"read": true, "write": true, "available": 1000u64, "percent": 50})).await;

    let state = LocatorState::new(config(vec![format!("{}/", node.uri())]));
    let filter = routes(state);

    let get = warp::test::request().method("GET").path("/health").reply(&filter).await;
    assert_eq!(get.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(get.body()).unwrap();
    assert!(body["servers"].as_object().unwrap().len() == 1);
}
