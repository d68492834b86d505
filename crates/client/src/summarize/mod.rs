//! Summaries via a local Ollama server.
//!
//! Only the non-streaming `/api/generate` endpoint is used: one prompt in,
//! one completed response out.

use std::sync::Arc;
use std::time::{Duration, Instant};

use medi_core::{AppConfig, Error};
use serde::{Deserialize, Serialize};

/// Ollama client configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Server base URL (default: http://localhost:11434).
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Request timeout. Generation is slow, so this is not the fetch timeout.
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

impl From<&AppConfig> for OllamaConfig {
    fn from(config: &AppConfig) -> Self {
        Self { base_url: config.ollama_url.clone(), model: config.model_name.clone(), ..Default::default() }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Minimal Ollama HTTP client.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    config: Arc<OllamaConfig>,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::SummarizeFailed(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config: Arc::new(config) })
    }

    /// Run a single prompt to completion.
    pub async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let start = Instant::now();
        let url = format!("{}/api/generate", self.config.base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest { model: &self.config.model, prompt, stream: false })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() { Error::FetchTimeout(e.to_string()) } else { Error::SummarizeFailed(e.to_string()) }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("status {}", status.as_u16())));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::SummarizeFailed(format!("invalid response: {e}")))?;

        tracing::debug!(model = %self.config.model, "generation took {:?}", start.elapsed());
        Ok(body.response)
    }

    /// Summarize `text` in plain language suitable for an email body.
    pub async fn summarize(&self, text: &str) -> Result<String, Error> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput("text cannot be empty".into()));
        }
        self.generate(&summary_prompt(text)).await
    }
}

fn summary_prompt(text: &str) -> String {
    format!("Summarize the following information in simple terms suitable for an email:\n{text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt() {
        let prompt = summary_prompt("Dr. A is a cardiologist.");
        assert!(prompt.starts_with("Summarize the following information"));
        assert!(prompt.ends_with("\nDr. A is a cardiologist."));
    }

    #[test]
    fn test_config_from_app_config() {
        let app = AppConfig { model_name: "mistral".into(), ollama_url: "http://gpu:11434".into(), ..Default::default() };
        let config = OllamaConfig::from(&app);
        assert_eq!(config.model, "mistral");
        assert_eq!(config.base_url, "http://gpu:11434");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateRequest { model: "llama3", prompt: "hi", stream: false }).unwrap();
        assert_eq!(body, serde_json::json!({"model": "llama3", "prompt": "hi", "stream": false}));
    }

    #[tokio::test]
    async fn test_summarize_empty_text() {
        let client = OllamaClient::new(OllamaConfig::default()).unwrap();
        let result = client.summarize("   ").await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let config =
            OllamaConfig { base_url: "http://127.0.0.1:9".into(), timeout: Duration::from_millis(500), ..Default::default() };
        let client = OllamaClient::new(config).unwrap();
        assert!(client.summarize("something").await.is_err());
    }
}
