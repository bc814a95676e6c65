//! HTTP contract tests for the generate client.
//!
//! A `wiremock` server stands in for Ollama so the wire body and the error
//! mapping can be checked without a model.

use serde_json::json;
use trackfit_llm::{LlmClient, LlmError, LlmRequest};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn sends_model_prompt_and_zero_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "qwen2.5:7b",
            "prompt": "classify me",
            "stream": false,
            "options": { "temperature": 0.0 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "qwen2.5:7b",
            "response": "  TIME\n",
            "done": true,
            "eval_count": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = LlmClient::new(server.uri(), "qwen2.5:7b");
    let resp = client
        .generate(&LlmRequest::deterministic("classify me"))
        .await
        .expect("generate");

    assert_eq!(resp.text, "  TIME\n");
    assert_eq!(resp.tokens_generated, 3);
    assert_eq!(resp.model, "qwen2.5:7b");
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .mount(&server)
        .await;

    let client = LlmClient::new(server.uri(), "missing");
    let err = client
        .generate(&LlmRequest::deterministic("x"))
        .await
        .expect_err("404");

    match err {
        LlmError::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "model not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn body_without_response_field_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
        .mount(&server)
        .await;

    let client = LlmClient::new(server.uri(), "qwen2.5:7b");
    let err = client
        .generate(&LlmRequest::deterministic("x"))
        .await
        .expect_err("no response field");
    assert!(matches!(err, LlmError::ParseError(_)));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "TIME" }))
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = LlmClient::new(server.uri(), "qwen2.5:7b");
    let err = client
        .generate(&LlmRequest::deterministic("x").with_timeout(50))
        .await
        .expect_err("timeout");
    assert!(matches!(err, LlmError::Timeout(50)));
}

#[tokio::test]
async fn unreachable_server_is_an_error() {
    // Bind then drop a server so the port is closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let client = LlmClient::new(uri, "qwen2.5:7b");
    let result = client
        .generate(&LlmRequest::deterministic("x").with_timeout(2_000))
        .await;
    assert!(result.is_err());
}
