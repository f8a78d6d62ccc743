#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use quill_server::store::{DocumentStore, MemoryDocumentStore};
use quill_server::{create_router, AppState, Config};
use serde_json::Value;
use tower::ServiceExt;

pub fn app() -> Router {
    app_with_store(Arc::new(MemoryDocumentStore::new()))
}

pub fn app_with_store(store: Arc<dyn DocumentStore>) -> Router {
    app_with(store, Config::default())
}

pub fn app_with(store: Arc<dyn DocumentStore>, config: Config) -> Router {
    create_router(AppState::new(store, &config).unwrap())
}

/// Send a request with an optional JSON body and decode the JSON reply.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let raw = body.map(|json| json.to_string());
    send_raw(app, method, uri, raw.as_deref()).await
}

pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(text.to_string())
        }
        None => Body::empty(),
    };

    dispatch(app, builder.body(body).unwrap()).await
}

/// Send an arbitrary body with an explicit content type.
pub async fn send_bytes(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: Vec<u8>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();

    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
