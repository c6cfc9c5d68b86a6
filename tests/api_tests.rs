//! HTTP API routes exercised without binding a socket.

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use common::{start_fake_source, FakeServer};
use song_resolver::web::server::{api_router, AppState};
use song_resolver::CatalogStore;

async fn loaded_app(server: &FakeServer, dir: &tempfile::TempDir) -> (Router, Arc<AppState>) {
    let store = CatalogStore::new(dir.path(), server.config.clone());
    assert!(!store.load(false).await.is_failure());
    let state = Arc::new(AppState { store });
    (api_router(Arc::clone(&state)), state)
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_search_returns_top_ties() {
    let server = start_fake_source().await;
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = loaded_app(&server, &dir).await;

    let (status, body) = send(app, Method::GET, "/api/search?q=Titl").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keyword"], "titl");
    assert_eq!(body["threshold"], 60);
    assert_eq!(body["catalog_size"], 3);
    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["score"], 90);
    assert_eq!(matches[0]["tier"], "title_substring");
    assert_eq!(matches[0]["song"]["id"], 1);
    assert_eq!(matches[1]["song"]["id"], 2);
}

#[tokio::test]
async fn test_search_by_alias_and_identifier() {
    let server = start_fake_source().await;
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = loaded_app(&server, &dir).await;

    let (_, body) = send(app.clone(), Method::GET, "/api/search?q=ta-chan").await;
    assert_eq!(body["matches"][0]["score"], 95);
    assert_eq!(body["matches"][0]["song"]["title"], "Title A");

    let (_, body) = send(app, Method::GET, "/api/search?q=c2").await;
    assert_eq!(body["matches"][0]["tier"], "identifier");
    assert_eq!(body["matches"][0]["song"]["title"], "Title B");
}

#[tokio::test]
async fn test_search_rejects_bad_input() {
    let server = start_fake_source().await;
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = loaded_app(&server, &dir).await;

    let long = "a".repeat(300);
    let (status, body) = send(app.clone(), Method::GET, &format!("/api/search?q={long}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "invalid_input");

    let (status, _) = send(app, Method::GET, "/api/search?q=title&threshold=101").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_without_keyword_is_empty() {
    let server = start_fake_source().await;
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = loaded_app(&server, &dir).await;

    let (status, body) = send(app, Method::GET, "/api/search").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["matches"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_debug_lists_scores() {
    let server = start_fake_source().await;
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = loaded_app(&server, &dir).await;

    let (status, body) = send(app, Method::GET, "/api/debug?q=title%20a").await;

    assert_eq!(status, StatusCode::OK);
    let scores = body["scores"].as_array().unwrap();
    assert_eq!(scores[0]["score"], 100);
    assert_eq!(scores[0]["song"]["id"], 1);
    // The runner-up is kept, unlike the tie-only search
    assert_eq!(scores.len(), 2);
    assert!(scores[1]["score"].as_u64().unwrap() < 100);
}

#[tokio::test]
async fn test_catalog_reports_state_and_versions() {
    let server = start_fake_source().await;
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = loaded_app(&server, &dir).await;

    let (status, body) = send(app, Method::GET, "/api/catalog").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "ready");
    assert_eq!(body["song_count"], 3);
    let versions = body["versions"].as_array().unwrap();
    assert_eq!(versions.len(), 3);
    assert_eq!(versions[0]["version"], 0);
    assert_eq!(versions[0]["title"], "unknown");
}

#[tokio::test]
async fn test_refresh_success_and_failure() {
    let server = start_fake_source().await;
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = loaded_app(&server, &dir).await;

    let (status, body) = send(app.clone(), Method::POST, "/api/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["song_count"], 3);
    assert_eq!(body["report"]["aliases"]["status"], "attached");
    assert_eq!(body["report"]["persisted"]["status"], "written");
    assert_eq!(server.source.song_requests(), 2);

    server.source.set_songs_status(500);
    let (status, body) = send(app.clone(), Method::POST, "/api/refresh").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error_type"], "refresh_failed");
    assert_eq!(state.store.song_count(), 0);

    let (_, body) = send(app, Method::GET, "/api/catalog").await;
    assert_eq!(body["state"], "empty");
}

#[tokio::test]
async fn test_refresh_reports_alias_outage() {
    let server = start_fake_source().await;
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = loaded_app(&server, &dir).await;

    server.source.set_aliases_status(503);
    let (status, body) = send(app, Method::POST, "/api/refresh").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["song_count"], 3);
    assert_eq!(body["report"]["aliases"]["status"], "unavailable");
    assert_eq!(body["report"]["aliases"]["http_status"], 503);
}

#[tokio::test]
async fn test_refresh_requires_post() {
    let server = start_fake_source().await;
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = loaded_app(&server, &dir).await;

    let request = Request::builder()
        .uri("/api/refresh")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(server.source.song_requests(), 1);
}
