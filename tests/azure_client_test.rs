use std::time::Duration;

use agent_api::llm::{
    AzureOpenAiClient, AzureOpenAiSettings, FinishReason, GenerateRequest, GenerationConfig,
    LlmError, LlmProvider, Message,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/openai/deployments/gpt-4o/chat/completions";

fn client_for(server: &MockServer) -> AzureOpenAiClient {
    AzureOpenAiClient::new(AzureOpenAiSettings::new(server.uri(), "azure-test-key"))
        .expect("client should build")
}

fn request() -> GenerateRequest {
    GenerateRequest::new(
        vec![
            Message::user("What is 2+2?"),
            Message::assistant("4"),
            Message::user("And 3+3?"),
        ],
        GenerationConfig::new(64),
    )
    .with_system(Some("Answer with digits only.".to_string()))
}

#[tokio::test]
async fn test_successful_completion() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(query_param("api-version", "2024-02-15-preview"))
        .and(header("api-key", "azure-test-key"))
        .and(body_partial_json(json!({
            "max_tokens": 64,
            "messages": [
                {"role": "system", "content": "Answer with digits only."},
                {"role": "user", "content": "What is 2+2?"},
                {"role": "assistant", "content": "4"},
                {"role": "user", "content": "And 3+3?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-123",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "6"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 31, "completion_tokens": 1, "total_tokens": 32}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).generate(request()).await.unwrap();

    assert_eq!(response.text, "6");
    assert_eq!(response.finish_reason, FinishReason::Stop);
    let usage = response.usage.expect("usage should be reported");
    assert_eq!(usage.input_tokens, 31);
    assert_eq!(usage.output_tokens, 1);
    assert_eq!(usage.total_tokens, 32);
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "7")
                .set_body_json(json!({
                    "error": {"code": "429", "message": "Rate limit is exceeded."}
                })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).generate(request()).await.unwrap_err();

    assert!(matches!(
        err,
        LlmError::RateLimitExceeded { retry_after: Some(d) } if d == Duration::from_secs(7)
    ));
}

#[tokio::test]
async fn test_bad_key_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "code": "401",
                "message": "Access denied due to invalid subscription key."
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).generate(request()).await.unwrap_err();

    match err {
        LlmError::AuthenticationError(message) => {
            assert!(message.contains("invalid subscription key"))
        }
        other => panic!("expected AuthenticationError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_envelope_is_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": "DeploymentNotFound",
                "message": "The API deployment for this resource does not exist."
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).generate(request()).await.unwrap_err();

    match err {
        LlmError::ProviderError { code, message } => {
            assert_eq!(code, "DeploymentNotFound");
            assert!(message.contains("does not exist"));
        }
        other => panic!("expected ProviderError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_failure_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).generate(request()).await.unwrap_err();

    match err {
        LlmError::HttpError { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("expected HttpError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_null_content_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-456",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": null},
                "finish_reason": "content_filter"
            }]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).generate(request()).await.unwrap_err();

    assert!(matches!(err, LlmError::EmptyResponse));
}
