//! End-to-end counter flows through the axum router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use tally_server::{app_state::AppState, config, router};

async fn app_with_snapshot(path: &Path) -> Router {
    let mut cfg = config::ServiceConfig::default();
    cfg.storage.snapshot_path = path.to_path_buf();
    router::build_router(AppState::new(cfg).await)
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> Value {
    let (status, body) = call(app, Method::GET, uri).await;
    assert_eq!(status, StatusCode::OK, "{uri}");
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn hit_get_restart_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counters.json");

    let app = app_with_snapshot(&path).await;
    assert_eq!(get_json(&app, "/api/visitas/hit").await, json!({"value": 1}));
    assert_eq!(get_json(&app, "/api/visitas/hit").await, json!({"value": 2}));
    assert_eq!(get_json(&app, "/api/descargas/get").await, json!({"value": 0}));
    drop(app);

    let on_disk: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(on_disk, json!({"visitas": 2}));

    let app = app_with_snapshot(&path).await;
    assert_eq!(get_json(&app, "/api/visitas/get").await, json!({"value": 2}));
    assert_eq!(get_json(&app, "/api/descargas/hit").await, json!({"value": 1}));
}

#[tokio::test]
async fn corrupt_snapshot_starts_from_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counters.json");
    std::fs::write(&path, "visitas=3").unwrap();

    let app = app_with_snapshot(&path).await;
    assert_eq!(get_json(&app, "/api/visitas/get").await, json!({"value": 0}));
    assert_eq!(get_json(&app, "/api/visitas/hit").await, json!({"value": 1}));
}

#[tokio::test]
async fn unwritable_snapshot_still_answers_200() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"").unwrap();

    let app = app_with_snapshot(&blocker.join("counters.json")).await;
    assert_eq!(get_json(&app, "/api/descargas/hit").await, json!({"value": 1}));
    assert_eq!(get_json(&app, "/api/descargas/hit").await, json!({"value": 2}));

    let (_, body) = call(&app, Method::GET, "/metrics").await;
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("tally_snapshot_save_failures_total 2"), "{text}");
    assert!(text.contains("tally_hits_total{counter=\"descargas\"} 2"), "{text}");
}

#[tokio::test]
async fn root_and_listing() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_snapshot(&dir.path().join("counters.json")).await;

    assert_eq!(
        get_json(&app, "/").await,
        json!({"status": "ok", "message": "Mirth Compare Counter API"})
    );

    get_json(&app, "/api/visitas/hit").await;
    assert_eq!(
        get_json(&app, "/api/counters").await,
        json!({"counters": {"descargas": 0, "visitas": 1}})
    );
}

#[tokio::test]
async fn unknown_routes_and_methods_use_http_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_with_snapshot(&dir.path().join("counters.json")).await;

    let (status, _) = call(&app, Method::GET, "/api/otros/hit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::POST, "/api/visitas/hit").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    // a rejected request must not count
    assert_eq!(get_json(&app, "/api/visitas/get").await, json!({"value": 0}));
}

#[tokio::test]
async fn ops_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config::ServiceConfig::default();
    cfg.storage.snapshot_path = dir.path().join("counters.json");
    let state = AppState::new(cfg).await;
    let app = router::build_router(state.clone());

    let (status, body) = call(&app, Method::GET, "/healthz").await;
    assert_eq!((status, body.as_slice()), (StatusCode::OK, &b"ok"[..]));

    let (status, _) = call(&app, Method::GET, "/readyz").await;
    assert_eq!(status, StatusCode::OK);

    state.set_draining();
    let (status, body) = call(&app, Method::GET, "/readyz").await;
    assert_eq!((status, body.as_slice()), (StatusCode::SERVICE_UNAVAILABLE, &b"draining"[..]));
}

#[tokio::test]
async fn configured_names_replace_default_routes() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config::load_from_str(&format!(
        "version: 1\nstorage:\n  snapshot_path: {:?}\ncounters:\n  names: [\"installs\"]\n",
        dir.path().join("c.json").display().to_string()
    ))
    .unwrap();
    let app = router::build_router(AppState::new(cfg).await);

    assert_eq!(get_json(&app, "/api/installs/hit").await, json!({"value": 1}));
    let (status, _) = call(&app, Method::GET, "/api/visitas/hit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
