mod common;

use lumina_llm::gemini::GeminiClient;
use lumina_llm::traits::{LlmClient, MediaPart};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-1.5-flash";

fn canned_candidate(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "totalTokenCount": 42 }
    })
}

#[tokio::test]
async fn generate_returns_candidate_text() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{}:generateContent", MODEL)))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(canned_candidate("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key".into(), MODEL.into())
        .expect("client should build")
        .with_base_url(server.uri());

    let resp = client
        .generate("Say hello", None, None, Some(16), Some(0.2))
        .await
        .expect("generate should succeed");

    assert_eq!(resp.text, "hello");
    assert_eq!(resp.model.as_deref(), Some(MODEL));
    assert_eq!(resp.tokens_used, Some(42));
}

#[tokio::test]
async fn generate_attaches_inline_media() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{}:generateContent", MODEL)))
        .and(body_string_contains("image/png"))
        .and(body_string_contains("aGVsbG8="))
        .respond_with(ResponseTemplate::new(200).set_body_json(canned_candidate("described")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key".into(), MODEL.into())
        .expect("client should build")
        .with_base_url(server.uri());

    let media = MediaPart {
        mime_type: "image/png".into(),
        base64_data: "aGVsbG8=".into(),
    };

    let resp = client
        .generate("What is in this image?", None, Some(&media), None, None)
        .await
        .expect("generate should succeed");
    assert_eq!(resp.text, "described");
}

#[tokio::test]
async fn generate_surfaces_api_errors() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/{}:generateContent", MODEL)))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key".into(), MODEL.into())
        .expect("client should build")
        .with_base_url(server.uri());

    let err = client
        .generate("Say hello", None, None, None, None)
        .await
        .expect_err("429 should surface as an error");
    assert!(err.to_string().contains("Rate limit"));
}

#[tokio::test]
async fn generate_rejects_safety_blocked_candidates() {
    common::init_test_tracing();
    let server = MockServer::start().await;

    let blocked = json!({
        "candidates": [{
            "content": { "parts": [{ "text": "" }] },
            "finishReason": "SAFETY"
        }]
    });

    Mock::given(method("POST"))
        .and(path(format!("/models/{}:generateContent", MODEL)))
        .respond_with(ResponseTemplate::new(200).set_body_json(blocked))
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key".into(), MODEL.into())
        .expect("client should build")
        .with_base_url(server.uri());

    let err = client
        .generate("Say hello", None, None, None, None)
        .await
        .expect_err("safety block should surface as an error");
    assert!(err.to_string().contains("safety"));
}
