use std::time::Duration;

use lineref::ai::{OllamaClient, Summarizer};
use lineref::core::models::SummaryRequest;
use lineref::errors::LineRefError;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(endpoint: &str) -> SummaryRequest {
    SummaryRequest {
        text: "fn add(a: i32, b: i32) -> i32 { a + b }".to_string(),
        model: "deepseek-r1:8b".to_string(),
        endpoint: endpoint.to_string(),
        timeout_ms: 5_000,
        system_prompt: String::new(),
    }
}

async fn mock_generate(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_summary_is_cleaned() {
    let server = MockServer::start().await;
    mock_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "model": "deepseek-r1:8b",
            "response": "<think>reasoning\nabout it</think>\nAdds two\nintegers.\n",
            "done": true
        })),
    )
    .await;

    let summary = OllamaClient::new()
        .generate_summary(&request(&server.uri()))
        .await
        .unwrap();
    assert_eq!(summary, "Adds two integers.");
}

#[tokio::test]
async fn test_request_body_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "deepseek-r1:8b",
            "stream": false,
            "options": { "temperature": 0.3, "top_p": 0.9 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut req = request(&format!("{}/", server.uri()));
    req.system_prompt = "Be terse.".to_string();
    let summary = OllamaClient::new().summarize(&req).await.unwrap();
    assert_eq!(summary, "ok");

    let received = server.received_requests().await.unwrap();
    let body: Value = received[0].body_json().unwrap();
    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.starts_with("Be terse.\n\nPlease provide a brief"));
    assert!(prompt.ends_with("fn add(a: i32, b: i32) -> i32 { a + b }"));
}

#[tokio::test]
async fn test_missing_response_field_is_model_error() {
    let server = MockServer::start().await;
    mock_generate(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;

    let result = OllamaClient::new().generate_summary(&request(&server.uri())).await;
    match result {
        Err(LineRefError::Model(msg)) => assert!(msg.contains("no response")),
        other => panic!("expected Model error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_response_field_is_model_error() {
    let server = MockServer::start().await;
    mock_generate(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "response": "" })),
    )
    .await;

    let result = OllamaClient::new().generate_summary(&request(&server.uri())).await;
    assert!(matches!(result, Err(LineRefError::Model(_))));
}

#[tokio::test]
async fn test_malformed_body_is_model_error() {
    let server = MockServer::start().await;
    mock_generate(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

    let result = OllamaClient::new().generate_summary(&request(&server.uri())).await;
    assert!(matches!(result, Err(LineRefError::Model(_))));
}

#[tokio::test]
async fn test_non_success_status_carries_code_and_body() {
    let server = MockServer::start().await;
    mock_generate(
        &server,
        ResponseTemplate::new(404)
            .set_body_string(r#"{"error":"model 'deepseek-r1:8b' not found"}"#),
    )
    .await;

    let err = OllamaClient::new()
        .generate_summary(&request(&server.uri()))
        .await
        .unwrap_err();
    match &err {
        LineRefError::Status { status, body } => {
            assert_eq!(*status, 404);
            assert!(body.contains("not found"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
    assert!(err.is_model_not_found());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    mock_generate(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "response": "late" }))
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let mut req = request(&server.uri());
    req.timeout_ms = 200;
    let result = OllamaClient::new().generate_summary(&req).await;
    assert!(matches!(result, Err(LineRefError::Timeout(200))), "got {result:?}");
}

#[tokio::test]
async fn test_refused_connection_is_connection_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let result = OllamaClient::new()
        .generate_summary(&request(&format!("http://127.0.0.1:{port}")))
        .await;
    assert!(matches!(result, Err(LineRefError::Connection(_))), "got {result:?}");
}

#[tokio::test]
async fn test_invalid_endpoint_is_config_error() {
    let result = OllamaClient::new()
        .generate_summary(&request("localhost:11434"))
        .await;
    assert!(matches!(result, Err(LineRefError::InvalidConfig { .. })));
}

#[tokio::test]
async fn test_list_models_returns_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                { "name": "deepseek-r1:8b", "size": 1 },
                { "name": "llama3.2:latest", "size": 2 }
            ]
        })))
        .mount(&server)
        .await;

    let models = OllamaClient::new().list_models(&server.uri(), 1_000).await;
    assert_eq!(models, vec!["deepseek-r1:8b", "llama3.2:latest"]);
}

#[tokio::test]
async fn test_list_models_swallows_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let models = OllamaClient::new().list_models(&server.uri(), 1_000).await;
    assert!(models.is_empty());
}

#[tokio::test]
async fn test_list_models_without_models_key_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    assert!(OllamaClient::new().list_models(&server.uri(), 1_000).await.is_empty());
}

#[tokio::test]
async fn test_list_models_unreachable_is_empty() {
    let models = OllamaClient::new()
        .list_models("http://127.0.0.1:9", 500)
        .await;
    assert!(models.is_empty());
}
