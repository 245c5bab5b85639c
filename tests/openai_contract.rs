//! OpenAI client contract tests.
//!
//! These verify the exact HTTP request the client sends and how each kind of
//! upstream answer is mapped:
//! - Request body carries model, a single user message, max_tokens, temperature
//! - Authorization is a bearer token
//! - HTTP 200 with JSON → `Some(json)`
//! - Any other status, an undecodable body or a dead endpoint → `None`
//! - Exactly one attempt per call, never a retry

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use astrofacts::config::OpenAiConfig;
use astrofacts::openai::OpenAiClient;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiClient {
    let config = OpenAiConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    OpenAiClient::new(config).unwrap()
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn request_body_matches_contract() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [{"role": "user", "content": "Facts about \"M31\""}],
            "max_tokens": 300,
            "temperature": 0.7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("[]")))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .complete("Facts about \"M31\"", "sk-test")
        .await;
    assert!(result.is_some());
}

#[tokio::test]
async fn request_uses_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-secret"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client_for(&server).complete("hi", "sk-secret").await.is_some());
}

#[tokio::test]
async fn configured_model_and_sampling_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 512,
            "temperature": 0.2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let config = OpenAiConfig {
        base_url: server.uri(),
        model: "gpt-4o-mini".to_owned(),
        max_tokens: 512,
        temperature: 0.2,
        ..Default::default()
    };
    let client = OpenAiClient::new(config).unwrap();
    assert!(client.complete("hi", "sk-test").await.is_some());
}

#[tokio::test]
async fn ok_response_is_returned_as_json() {
    let server = MockServer::start().await;
    let body = completion(r#"["Fact one here.", "Fact two here."]"#);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let result = client_for(&server).complete("hi", "sk-test").await;
    assert_eq!(result, Some(body));
}

#[tokio::test]
async fn server_error_is_none_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client_for(&server).complete("hi", "sk-test").await.is_none());
}

#[tokio::test]
async fn unauthorized_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client_for(&server).complete("hi", "sk-bad").await.is_none());
}

#[tokio::test]
async fn non_200_success_status_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202).set_body_json(completion("late")))
        .mount(&server)
        .await;

    assert!(client_for(&server).complete("hi", "sk-test").await.is_none());
}

#[tokio::test]
async fn undecodable_body_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    assert!(client_for(&server).complete("hi", "sk-test").await.is_none());
}

#[tokio::test]
async fn connection_refused_is_none() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let config = OpenAiConfig {
        base_url: uri,
        timeout_secs: 2,
        ..Default::default()
    };
    let client = OpenAiClient::new(config).unwrap();
    assert!(client.complete("hi", "sk-test").await.is_none());
}
