//! Integration tests for HTTP sources.
//!
//! The blocking HTTP client must not run on an async worker, so every load is
//! pushed onto `spawn_blocking` while the mock server runs on the test runtime.

#![cfg(feature = "remote")]

use cached_props::core::snapshot_payload;
use cached_props::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn load(
    cache_dir: PathBuf,
    spec: SourceSpec,
    mut props: HashMap<String, String>,
) -> (ApplyReport, HashMap<String, String>, Option<Vec<u8>>) {
    tokio::task::spawn_blocking(move || {
        let loader = PropertyLoader::builder()
            .with_cache_dir(cache_dir)
            .build()
            .unwrap();
        let report = loader.refresh_and_apply(&spec, &mut props).unwrap();
        let snapshot = loader.cache_path(spec.location()).read_stable().ok();
        (report, props, snapshot)
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_source_applied_and_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/config/app.properties"))
        .respond_with(ResponseTemplate::new(200).set_body_string("server.port=8080\nserver.host=0.0.0.0\n"))
        .expect(1)
        .mount(&server)
        .await;

    let cache = TempDir::new().unwrap();
    let location = format!("{}/config/app.properties", server.uri());
    let (report, props, snapshot) = load(
        cache.path().to_path_buf(),
        SourceSpec::new(location, false),
        HashMap::new(),
    )
    .await;

    assert!(report.refreshed);
    assert_eq!(report.applied, 2);
    assert_eq!(props.get("server.port").map(String::as_str), Some("8080"));
    assert_eq!(
        snapshot_payload(&snapshot.unwrap()).unwrap(),
        b"server.port=8080\nserver.host=0.0.0.0\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_failure_uses_previous_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app.properties"))
        .respond_with(ResponseTemplate::new(200).set_body_string("feature.enabled=true\n"))
        .mount(&server)
        .await;

    let cache = TempDir::new().unwrap();
    let location = format!("{}/app.properties", server.uri());
    load(
        cache.path().to_path_buf(),
        SourceSpec::new(location.clone(), false),
        HashMap::new(),
    )
    .await;

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/app.properties"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (report, props, _) = load(
        cache.path().to_path_buf(),
        SourceSpec::new(location, false),
        HashMap::new(),
    )
    .await;

    assert!(!report.refreshed);
    assert_eq!(report.applied, 1);
    assert_eq!(props.get("feature.enabled").map(String::as_str), Some("true"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_not_found_without_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let cache = TempDir::new().unwrap();
    let location = format!("{}/missing.properties", server.uri());
    let (report, props, snapshot) = load(
        cache.path().to_path_buf(),
        SourceSpec::new(location, true),
        HashMap::new(),
    )
    .await;

    assert!(!report.refreshed);
    assert_eq!(report.applied, 0);
    assert!(props.is_empty());
    assert!(snapshot.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_host_without_cache() {
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let cache = TempDir::new().unwrap();
    let (report, props, _) = load(
        cache.path().to_path_buf(),
        SourceSpec::new(format!("{uri}/app.properties"), false),
        HashMap::new(),
    )
    .await;

    assert!(!report.refreshed);
    assert_eq!(report.applied, 0);
    assert!(props.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_force_overwrites() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/override.properties"))
        .respond_with(ResponseTemplate::new(200).set_body_string("mode=remote\n"))
        .mount(&server)
        .await;

    let cache = TempDir::new().unwrap();
    let existing = HashMap::from([("mode".to_string(), "local".to_string())]);
    let location = format!("{}/override.properties", server.uri());

    let (_, props, _) = load(
        cache.path().to_path_buf(),
        SourceSpec::new(location.clone(), false),
        existing.clone(),
    )
    .await;
    assert_eq!(props.get("mode").map(String::as_str), Some("local"));

    let (_, props, _) = load(
        cache.path().to_path_buf(),
        SourceSpec::new(location, true),
        existing,
    )
    .await;
    assert_eq!(props.get("mode").map(String::as_str), Some("remote"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sub_second_timeout_still_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fast.properties"))
        .respond_with(ResponseTemplate::new(200).set_body_string("k=v\n"))
        .expect(1)
        .mount(&server)
        .await;

    let cache = TempDir::new().unwrap();
    let cache_dir = cache.path().to_path_buf();
    let location = format!("{}/fast.properties", server.uri());

    let (report, props) = tokio::task::spawn_blocking(move || {
        let loader = PropertyLoader::builder()
            .with_cache_dir(cache_dir)
            .with_http_timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        let mut props: HashMap<String, String> = HashMap::new();
        let report = loader
            .refresh_and_apply(&SourceSpec::new(location, false), &mut props)
            .unwrap();
        (report, props)
    })
    .await
    .unwrap();

    assert!(report.refreshed);
    assert_eq!(report.applied, 1);
    assert_eq!(props.get("k").map(String::as_str), Some("v"));
}
