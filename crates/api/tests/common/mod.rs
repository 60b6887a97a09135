#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use meilgate_api::config::{AppConfig, SearchConfig, ServerConfig};
use meilgate_api::router::build_app_router;
use meilgate_api::state::AppState;
use meilgate_core::optimization::OptimizationConfig;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tower::ServiceExt;
use wiremock::MockServer;

/// Index every test app targets.
pub const INDEX: &str = "movies";

/// Build a test `AppConfig` pointing at the given mock engine.
pub fn test_config(server: &MockServer) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            address: server.uri(),
            api_key: Some("test-key".to_string()),
            local_port: 0,
            host: "127.0.0.1".to_string(),
            timeout_secs: 5,
            engine_timeout_secs: Some(1),
        },
        search: SearchConfig {
            index_uid: INDEX.to_string(),
            max_limit: None,
            optimization: OptimizationConfig::default(),
        },
    }
}

/// Build the full application router, with every middleware layer, from
/// an explicit config.
pub fn build_app_with(config: AppConfig) -> Router {
    let state = AppState::new(config).expect("engine client should build");
    build_app_router(state)
}

/// Build the full application router against the given mock engine.
pub fn build_test_app(server: &MockServer) -> Router {
    build_app_with(test_config(server))
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    put_raw(app, uri, body.to_string()).await
}

pub async fn put_raw(app: Router, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Percent-encode a query-string value.
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}
