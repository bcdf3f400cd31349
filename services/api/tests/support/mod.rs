//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use api::{AppState, config::ServerConfig, routes};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, header},
};
use ::common::storage::{BinaryStore, FileSystemStore};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_HOST: &str = "host";
const BOUNDARY: &str = "video-service-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(storage_dir: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_host: None,
        public_port: None,
        storage_dir: storage_dir.to_string(),
        max_upload_bytes: 16 * 1024 * 1024,
    }
}

/// Build the application router backed by a filesystem store in a fresh
/// temporary directory. The directory lives as long as the returned guard.
pub async fn build_test_app() -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = FileSystemStore::new(dir.path())
        .await
        .expect("Failed to create store");
    let config = test_config(&dir.path().display().to_string());

    (build_app_with_store(config, Arc::new(store)), dir)
}

/// Build the application router over an arbitrary store.
pub fn build_app_with_store(config: ServerConfig, store: Arc<dyn BinaryStore>) -> Router {
    routes::create_router(AppState::new(config, store))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("Router failed to respond")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::HOST, TEST_HOST)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_json_with_host(app, uri, TEST_HOST, body).await
}

pub async fn post_json_with_host(
    app: &Router,
    uri: &str,
    host: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::HOST, host)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a multipart form with a single file field.
pub async fn post_multipart(
    app: &Router,
    uri: &str,
    field: &str,
    content_type: &str,
    data: &[u8],
) -> Response<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"video.bin\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::HOST, TEST_HOST)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body is not valid JSON")
}
