//! Ollama API client module
//!
//! One-shot, non-streaming calls against a local Ollama server: code snippet
//! summaries through `/api/generate` and the installed model list through
//! `/api/tags`.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use super::prompt_builder::build_prompt;
use crate::core::models::SummaryRequest;
use crate::errors::{LineRefError, Result};

const GENERATE_PATH: &str = "api/generate";
const TAGS_PATH: &str = "api/tags";
const TEMPERATURE: f64 = 0.3;
const TOP_P: f64 = 0.9;

static THINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<think>.*?</think>")
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

static NEWLINES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\r?\n)+").unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

/// Anything that can turn a snippet into a one-line summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Default, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Joins `path` onto the configured base URL. A trailing `/` on the base is ignored.
///
/// # Errors
///
/// Returns `InvalidConfig` unless the base is an absolute `http` or `https` URL.
pub fn endpoint_url(endpoint: &str, path: &str) -> Result<Url> {
    let invalid = || LineRefError::InvalidConfig {
        key: crate::core::config::OLLAMA_ENDPOINT.to_string(),
        value: endpoint.to_string(),
    };

    let base = Url::parse(endpoint.trim()).map_err(|_| invalid())?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid());
    }

    let joined = format!("{}/{}", base.as_str().trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|_| invalid())
}

/// Drops `<think>` blocks, folds line breaks into spaces and trims.
#[must_use]
pub fn clean_response(raw: &str) -> String {
    let without_thinking = THINK_RE.replace_all(raw.trim(), "");
    NEWLINES_RE
        .replace_all(&without_thinking, " ")
        .trim()
        .to_string()
}

/// Client for a local Ollama server.
#[derive(Debug, Clone, Default)]
pub struct OllamaClient {
    http: Client,
}

impl OllamaClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    #[must_use]
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// Names of the models the server has installed. Never fails: any problem is
    /// logged and yields an empty list.
    pub async fn list_models(&self, endpoint: &str, timeout_ms: u64) -> Vec<String> {
        match self.fetch_models(endpoint, timeout_ms).await {
            Ok(models) => models,
            Err(e) => {
                warn!("Failed to get Ollama models: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_models(&self, endpoint: &str, timeout_ms: u64) -> Result<Vec<String>> {
        let url = endpoint_url(endpoint, TAGS_PATH)?;
        let response = self
            .http
            .get(url)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|e| LineRefError::from_transport(&e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LineRefError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| LineRefError::Model(format!("Failed to parse model list: {e}")))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// # Errors
    ///
    /// `Connection` or `Timeout` for transport failures, `Status` for a non-2xx
    /// reply and `Model` when the body carries no usable `response`.
    pub async fn generate_summary(&self, request: &SummaryRequest) -> Result<String> {
        let url = endpoint_url(&request.endpoint, GENERATE_PATH)?;
        let prompt = build_prompt(&request.text, &request.system_prompt);

        #[cfg(feature = "debug-logs")]
        info!("Using Ollama prompt:\n{}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            "Requesting summary from model {} ({} prompt chars)",
            request.model,
            prompt.chars().count()
        );

        let body = GenerateRequest {
            model: &request.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };

        let response = self
            .http
            .post(url)
            .timeout(Duration::from_millis(request.timeout_ms))
            .json(&body)
            .send()
            .await
            .map_err(|e| LineRefError::from_transport(&e, request.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(LineRefError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| LineRefError::from_transport(&e, request.timeout_ms))?;
        let response_json: Value = serde_json::from_str(&text)
            .map_err(|e| LineRefError::Model(format!("Failed to parse Ollama response: {e}")))?;

        let raw = response_json
            .get("response")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LineRefError::Model("no response from service".to_string()))?;

        let summary = clean_response(raw);
        debug!(chars = summary.chars().count(), "summary received");
        Ok(summary)
    }
}

#[async_trait]
impl Summarizer for OllamaClient {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String> {
        self.generate_summary(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_response_strips_thinking_and_newlines() {
        let raw = "<think>reasoning\nmore reasoning</think>Actual\n\nsummary.";
        assert_eq!(clean_response(raw), "Actual summary.");
    }

    #[test]
    fn test_clean_response_is_case_insensitive_and_non_greedy() {
        let raw = "<THINK>a</Think>First. <think>b</think>Second.";
        assert_eq!(clean_response(raw), "First. Second.");
    }

    #[test]
    fn test_clean_response_handles_crlf() {
        assert_eq!(clean_response("  one\r\ntwo\r\n\r\nthree  "), "one two three");
    }

    #[test]
    fn test_endpoint_url_ignores_trailing_slash() {
        let url = endpoint_url("http://localhost:11434/", GENERATE_PATH).unwrap();
        assert_eq!(url.as_str(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn test_endpoint_url_rejects_non_http() {
        assert!(matches!(
            endpoint_url("ftp://localhost", TAGS_PATH),
            Err(LineRefError::InvalidConfig { .. })
        ));
        assert!(endpoint_url("not a url", TAGS_PATH).is_err());
    }

    #[test]
    fn test_generate_request_shape() {
        let body = GenerateRequest {
            model: "llama3",
            prompt: "p".to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "llama3");
        assert_eq!(value["stream"], false);
        assert!((value["options"]["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert!((value["options"]["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }
}
