use crate::domain::model::{ErrorKind, TranslateRequest, Translation, TranslationResult};
use crate::domain::traits::Translator;
use crate::infrastructure::config::TranslateConfig;
use crate::infrastructure::network::rate_limit::RateLimiter;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

const DEFAULT_API_MESSAGE: &str = "Translation failed";
const DEFAULT_NETWORK_MESSAGE: &str = "Network error";

// MyMemory API response envelope
#[derive(Deserialize, Debug)]
struct MyMemoryResponse {
    #[serde(rename = "responseStatus")]
    response_status: Option<Value>,
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
    #[serde(rename = "responseDetails")]
    response_details: Option<Value>,
}

#[derive(Deserialize, Debug)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    #[serde(rename = "match")]
    match_score: Option<f64>,
}

impl MyMemoryResponse {
    // responseStatus shows up as 200 or "200" depending on the endpoint
    fn status(&self) -> Option<i64> {
        match self.response_status.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn details(&self) -> Option<&str> {
        self.response_details
            .as_ref()
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Client for the MyMemory translation API
pub struct MyMemoryClient {
    client: Client,
    endpoint: String,
    limiter: Arc<RateLimiter>,
}

impl MyMemoryClient {
    pub fn new(client: Client, config: &TranslateConfig, limiter: Arc<RateLimiter>) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            limiter,
        }
    }
}

#[async_trait]
impl Translator for MyMemoryClient {
    async fn translate(&self, request: &TranslateRequest) -> TranslationResult {
        translate_impl(&self.client, &self.endpoint, &self.limiter, request).await
    }
}

async fn translate_impl(
    client: &Client,
    endpoint: &str,
    limiter: &RateLimiter,
    request: &TranslateRequest,
) -> TranslationResult {
    if request.text.trim().is_empty() {
        return TranslationResult::ok(Translation {
            translated_text: String::new(),
            detected_language: request.source_lang.clone(),
            confidence: None,
        });
    }

    limiter.acquire().await;

    let langpair = request.langpair();
    debug!(%langpair, chars = request.text.chars().count(), "sending translation request");

    let response = match client
        .get(endpoint)
        .query(&[("q", request.text.as_str()), ("langpair", langpair.as_str())])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => return transport_failure(e),
    };

    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "translation request rejected");
        return TranslationResult::fail(
            ErrorKind::Http,
            format!("HTTP Error: {}", status.as_u16()),
        );
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => return transport_failure(e),
    };

    parse_envelope(&body, request)
}

fn parse_envelope(body: &[u8], request: &TranslateRequest) -> TranslationResult {
    let envelope: MyMemoryResponse = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, "malformed translation response");
            return TranslationResult::fail(
                ErrorKind::Data,
                format!("Malformed response body: {}", e),
            );
        }
    };

    if envelope.status() != Some(200) {
        let message = envelope.details().unwrap_or(DEFAULT_API_MESSAGE).to_string();
        warn!(status = ?envelope.status(), %message, "translation provider reported failure");
        return TranslationResult::fail(ErrorKind::Api, message);
    }

    let Some(data) = envelope.response_data else {
        return TranslationResult::fail(ErrorKind::Data, "Response is missing responseData");
    };
    let Some(translated_text) = data.translated_text else {
        return TranslationResult::fail(
            ErrorKind::Data,
            "Response is missing responseData.translatedText",
        );
    };

    TranslationResult::ok(Translation {
        translated_text,
        detected_language: request.source_lang.clone(),
        confidence: data.match_score,
    })
}

// The URL carries the user's text in `q`, so it is stripped before the
// message is logged or returned. The source chain keeps the actual cause.
fn transport_failure(err: reqwest::Error) -> TranslationResult {
    let kind = classify(&err);
    let err = err.without_url();

    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    let message = if message.is_empty() {
        DEFAULT_NETWORK_MESSAGE.to_string()
    } else {
        message
    };
    warn!(kind = %kind, %message, "translation request failed");
    TranslationResult::fail(kind, message)
}

fn classify(err: &reqwest::Error) -> ErrorKind {
    if err.is_decode() {
        ErrorKind::Data
    } else if err.is_connect()
        || err.is_timeout()
        || err.is_request()
        || err.is_body()
        || err.is_redirect()
    {
        ErrorKind::Network
    } else {
        ErrorKind::Unknown
    }
}

