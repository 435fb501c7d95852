//! 翻译客户端测试

use langbridge::domain::model::{ErrorKind, TranslateRequest};
use langbridge::domain::traits::Translator;
use langbridge::infrastructure::config::TranslateConfig;
use langbridge::infrastructure::network::client::MyMemoryClient;
use langbridge::infrastructure::network::rate_limit::RateLimiter;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with_endpoint(endpoint: String) -> MyMemoryClient {
    client_with_limiter(endpoint, Arc::new(RateLimiter::from_millis(0)))
}

fn client_with_limiter(endpoint: String, limiter: Arc<RateLimiter>) -> MyMemoryClient {
    let config = TranslateConfig {
        endpoint,
        ..TranslateConfig::default()
    };
    MyMemoryClient::new(reqwest::Client::new(), &config, limiter)
}

async fn mount_ok(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": 200,
            "responseData": { "translatedText": "नमस्ते", "match": 1.0 }
        })))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> MyMemoryClient {
    client_with_endpoint(format!("{}/get", server.uri()))
}

fn hello() -> TranslateRequest {
    TranslateRequest::new("hello", "en", "hi")
}

#[tokio::test]
async fn test_successful_translation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("q", "hello"))
        .and(query_param("langpair", "en|hi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": 200,
            "responseData": { "translatedText": "नमस्ते", "match": 1.0 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).translate(&hello()).await;

    assert!(result.success);
    assert!(result.error.is_none());
    let data = result.data.unwrap();
    assert_eq!(data.translated_text, "नमस्ते");
    assert_eq!(data.detected_language, "en");
    assert_eq!(data.confidence, Some(1.0));
}

#[tokio::test]
async fn test_source_language_is_sent_and_echoed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("q", "bonjour le monde"))
        .and(query_param("langpair", "fr|de"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": 200,
            "responseData": { "translatedText": "Hallo Welt", "match": 0.85 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = TranslateRequest::new("bonjour le monde", "fr", "de");
    let data = client_for(&server)
        .translate(&request)
        .await
        .into_result()
        .unwrap();

    assert_eq!(data.translated_text, "Hallo Welt");
    assert_eq!(data.detected_language, "fr");
    assert_eq!(data.confidence, Some(0.85));
}

#[tokio::test]
async fn test_blank_input_skips_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    for text in ["", "   ", "\n\t "] {
        let request = TranslateRequest::new(text, "en", "hi");
        let result = client.translate(&request).await;

        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data.translated_text, "");
        assert_eq!(data.detected_language, "en");
        assert!(data.confidence.is_none());
    }
}

#[tokio::test]
async fn test_http_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let result = client_for(&server).translate(&hello()).await;

    assert!(!result.success);
    assert!(result.data.is_none());
    let error = result.error.unwrap();
    assert_eq!(error.kind, ErrorKind::Http);
    assert!(error.message.contains("500"));
}

#[tokio::test]
async fn test_api_level_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": 403,
            "responseDetails": "Rate limit exceeded"
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).translate(&hello()).await;

    assert!(!result.success);
    let error = result.error.unwrap();
    assert_eq!(error.kind, ErrorKind::Api);
    assert_eq!(error.message, "Rate limit exceeded");
}

#[tokio::test]
async fn test_api_error_without_details_uses_default_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": 429,
            "responseDetails": ""
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).translate(&hello()).await;

    let error = result.error.unwrap();
    assert_eq!(error.kind, ErrorKind::Api);
    assert_eq!(error.message, "Translation failed");
}

#[tokio::test]
async fn test_string_status_is_accepted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": "200",
            "responseData": { "translatedText": "Hola", "match": 1 }
        })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .translate(&TranslateRequest::new("hello", "en", "es"))
        .await;

    assert!(result.success);
    assert_eq!(result.data.unwrap().translated_text, "Hola");
}

#[tokio::test]
async fn test_missing_translated_text_is_data_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": 200,
            "responseData": { "match": 0.5 }
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).translate(&hello()).await;

    assert_eq!(result.error_kind(), Some(ErrorKind::Data));
    assert!(result.error.unwrap().message.contains("translatedText"));
}

#[tokio::test]
async fn test_missing_response_data_is_data_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": 200
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).translate(&hello()).await;

    assert_eq!(result.error_kind(), Some(ErrorKind::Data));
}

#[tokio::test]
async fn test_non_json_body_is_data_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).translate(&hello()).await;

    assert!(!result.success);
    assert_eq!(result.error_kind(), Some(ErrorKind::Data));
}

#[tokio::test]
async fn test_network_errors() {
    // 端口 1 上没有服务，连接会被拒绝
    let client = client_with_endpoint("http://127.0.0.1:1/get".to_string());

    let result = client.translate(&hello()).await;

    assert!(!result.success);
    let error = result.error.unwrap();
    assert_eq!(error.kind, ErrorKind::Network);
    assert!(!error.message.is_empty());
}

#[tokio::test]
async fn test_network_error_keeps_cause_and_hides_text() {
    let client = client_with_endpoint("http://127.0.0.1:1/get".to_string());

    let request = TranslateRequest::new("hello secret", "en", "hi");
    let error = client.translate(&request).await.error.unwrap();

    assert_eq!(error.kind, ErrorKind::Network);
    // 消息里不能带上查询参数
    assert!(!error.message.contains("secret"), "{}", error.message);
    assert!(!error.message.contains("q="), "{}", error.message);
    assert!(
        error.message.to_lowercase().contains("refused"),
        "{}",
        error.message
    );
}

#[tokio::test]
async fn test_shared_limiter_spaces_requests() {
    let server = MockServer::start().await;
    mount_ok(&server).await;

    let limiter = Arc::new(RateLimiter::from_millis(300));
    let client = client_with_limiter(format!("{}/get", server.uri()), limiter.clone());

    let start = std::time::Instant::now();
    assert!(client.translate(&hello()).await.success);
    assert!(client.translate(&hello()).await.success);

    assert!(start.elapsed() >= Duration::from_millis(300));
    assert!(limiter.last_call().await.is_some());
}

#[tokio::test]
async fn test_limiter_shared_between_clients() {
    let server = MockServer::start().await;
    mount_ok(&server).await;

    let limiter = Arc::new(RateLimiter::from_millis(300));
    let first = client_with_limiter(format!("{}/get", server.uri()), limiter.clone());
    let second = client_with_limiter(format!("{}/get", server.uri()), limiter);

    let start = std::time::Instant::now();
    assert!(first.translate(&hello()).await.success);
    assert!(second.translate(&hello()).await.success);

    assert!(start.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_blank_input_does_not_touch_limiter() {
    let server = MockServer::start().await;
    mount_ok(&server).await;

    let limiter = Arc::new(RateLimiter::from_millis(300));
    let client = client_with_limiter(format!("{}/get", server.uri()), limiter.clone());

    let blank = client
        .translate(&TranslateRequest::new("  ", "en", "hi"))
        .await;
    assert!(blank.success);
    assert!(limiter.last_call().await.is_none());

    // 空白输入之后的第一次请求不需要等待
    let start = std::time::Instant::now();
    assert!(client.translate(&hello()).await.success);
    assert!(start.elapsed() < Duration::from_millis(300));
    assert!(limiter.last_call().await.is_some());
}

#[tokio::test]
async fn test_unbuildable_request_is_unknown_error() {
    let client = client_with_endpoint("not a url".to_string());

    let result = client.translate(&hello()).await;

    assert_eq!(result.error_kind(), Some(ErrorKind::Unknown));
}

#[tokio::test]
async fn test_result_json_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseStatus": 403,
            "responseDetails": "Rate limit exceeded"
        })))
        .mount(&server)
        .await;

    let failed = client_for(&server).translate(&hello()).await;
    let value = serde_json::to_value(&failed).unwrap();
    assert_eq!(
        value,
        json!({
            "success": false,
            "error": { "type": "api", "message": "Rate limit exceeded" }
        })
    );

    let blank = client_for(&server)
        .translate(&TranslateRequest::new(" ", "en", "hi"))
        .await;
    let value = serde_json::to_value(&blank).unwrap();
    assert_eq!(
        value,
        json!({
            "success": true,
            "data": { "translatedText": "", "detectedLanguage": "en" }
        })
    );
}
