//! Remote responder tests against a mocked chat-completion endpoint
//!
//! These tests use wiremock to stand in for the endpoint and validate:
//! - The request body and bearer credential
//! - Extraction of `choices[0].message.content`, returned exactly
//! - Error statuses, malformed bodies and timeouts ending in the apology

use quantumleap::chat::responder::{RemoteResponder, RemoteSettings, Responder};
use quantumleap::chat::{ChatSession, WidgetSettings, WidgetState};
use quantumleap::types::{AppError, Sender};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============= Helper Functions =============

const APOLOGY: &str = "Sorry, the quantum core is unreachable.";

fn settings_for(server: &MockServer) -> RemoteSettings {
    RemoteSettings {
        endpoint: format!("{}/v1/chat/completions", server.uri()),
        api_key: "sk-test-key".to_string(),
        model: "test-model".to_string(),
        temperature: 0.7,
        max_tokens: 128,
        timeout: Duration::from_secs(5),
        system_prompt: "You are QuantumAI.".to_string(),
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn session_for(responder: RemoteResponder) -> ChatSession {
    ChatSession::mount_open(
        WidgetSettings {
            greeting: "Hello! I'm QuantumAI.".to_string(),
            apology: APOLOGY.to_string(),
        },
        Arc::new(responder),
    )
}

// ============= Request Shape =============

#[tokio::test]
async fn test_request_carries_model_messages_and_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "max_tokens": 128,
            "messages": [
                { "role": "system", "content": "You are QuantumAI." },
                { "role": "assistant", "content": "Hello! I'm QuantumAI." },
                { "role": "user", "content": "What is a qubit?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("A quantum bit.")))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(RemoteResponder::new(settings_for(&server)).unwrap());
    session.submit_text("What is a qubit?").unwrap();
    assert_eq!(session.settled().await, WidgetState::Idle);

    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].sender, Sender::Assistant);
    assert_eq!(messages[2].text, "A quantum bit.");
}

#[tokio::test]
async fn test_reply_content_is_returned_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion("  Spaced\nreply  ")),
        )
        .mount(&server)
        .await;

    let responder = RemoteResponder::new(settings_for(&server)).unwrap();
    let reply = responder.reply(&[], "hi").await.unwrap();
    assert_eq!(reply, "  Spaced\nreply  ");
}

#[tokio::test]
async fn test_blank_content_is_returned_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "content": "   " } }]
        })))
        .mount(&server)
        .await;

    let responder = RemoteResponder::new(settings_for(&server)).unwrap();
    assert_eq!(responder.reply(&[], "hi").await.unwrap(), "   ");

    let session = session_for(responder);
    session.submit_text("hi").unwrap();
    assert_eq!(session.settled().await, WidgetState::Idle);
    assert_eq!(session.messages()[2].text, "   ");
}

#[tokio::test]
async fn test_empty_string_content_is_a_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("")))
        .mount(&server)
        .await;

    let responder = RemoteResponder::new(settings_for(&server)).unwrap();
    assert_eq!(responder.reply(&[], "hi").await.unwrap(), "");
}

// ============= Failure Handling =============

#[tokio::test]
async fn test_server_error_yields_apology() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let responder = RemoteResponder::new(settings_for(&server)).unwrap();
    let err = responder.reply(&[], "hi").await.unwrap_err();
    assert!(matches!(err, AppError::LLM(ref msg) if msg.contains("500")));

    let session = session_for(responder);
    session.submit_text("hi").unwrap();
    assert_eq!(session.settled().await, WidgetState::Idle);
    assert_eq!(session.messages()[2].text, APOLOGY);
}

#[tokio::test]
async fn test_unauthorized_yields_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Invalid API key" }
        })))
        .mount(&server)
        .await;

    let responder = RemoteResponder::new(settings_for(&server)).unwrap();
    assert!(responder.reply(&[], "hi").await.is_err());
}

#[tokio::test]
async fn test_missing_choices_yields_apology() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "x" })))
        .mount(&server)
        .await;

    let session = session_for(RemoteResponder::new(settings_for(&server)).unwrap());
    session.submit_text("hi").unwrap();
    assert_eq!(session.settled().await, WidgetState::Idle);

    let messages = session.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].text, APOLOGY);
}

#[tokio::test]
async fn test_empty_choices_and_null_content_are_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        })))
        .mount(&server)
        .await;

    let responder = RemoteResponder::new(settings_for(&server)).unwrap();
    assert!(matches!(
        responder.reply(&[], "hi").await,
        Err(AppError::LLM(_))
    ));
    assert!(matches!(
        responder.reply(&[], "hi").await,
        Err(AppError::LLM(_))
    ));
}

#[tokio::test]
async fn test_malformed_body_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let responder = RemoteResponder::new(settings_for(&server)).unwrap();
    assert!(responder.reply(&[], "hi").await.is_err());
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("too slow"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut settings = settings_for(&server);
    settings.timeout = Duration::from_millis(100);
    let responder = RemoteResponder::new(settings).unwrap();

    let err = responder.reply(&[], "hi").await.unwrap_err();
    assert!(matches!(err, AppError::Timeout(_)));

    let session = session_for(responder);
    session.submit_text("hi").unwrap();
    assert_eq!(session.settled().await, WidgetState::Idle);
    assert_eq!(session.messages()[2].text, APOLOGY);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_error() {
    let settings = RemoteSettings {
        endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
        api_key: "sk-test-key".to_string(),
        model: "test-model".to_string(),
        temperature: 0.7,
        max_tokens: 16,
        timeout: Duration::from_secs(2),
        system_prompt: String::new(),
    };

    let responder = RemoteResponder::new(settings).unwrap();
    assert!(responder.reply(&[], "hi").await.is_err());
}
