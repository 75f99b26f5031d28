#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chat_relay::config::Config;
use chat_relay::routes::create_router;
use chat_relay::state::AppState;
use serde_json::{Value, json};
use tower::util::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "sk-test";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub fn test_config(server: &MockServer, api_key: Option<&str>) -> Config {
    Config {
        api_key: api_key.map(str::to_string),
        api_url: format!("{}{}", server.uri(), COMPLETIONS_PATH),
        upstream_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

pub fn app(config: &Config) -> Router {
    let state = Arc::new(AppState::new(config).unwrap());
    create_router().with_state(state)
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "cmpl-test-1",
        "object": "chat.completion",
        "model": "mistralai/Mixtral-8x7B-Instruct-v0.1",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

/// Mounts a provider reply and asserts on drop that it was hit `expected` times.
pub async fn mount_completion(server: &MockServer, status: u16, body: Value, expected: u64) {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(expected)
        .mount(server)
        .await;
}

pub fn chat_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&body_bytes).unwrap();
    (status, body)
}
