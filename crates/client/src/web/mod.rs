//! Web search collaborator.
//!
//! Submits the query to an HTML search form (DuckDuckGo Lite by default) and
//! flattens the result anchors into a plain-text blob suitable for caching
//! and summarization.

pub mod extract;

pub use extract::extract_result_links;

use std::sync::Arc;
use std::time::{Duration, Instant};

use medi_core::AppConfig;
use reqwest::header;

use crate::error::SearchError;

/// Anything that can turn a query into a raw text blob of results.
#[async_trait::async_trait]
pub trait WebSearcher: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, SearchError>;
}

#[async_trait::async_trait]
impl<S: WebSearcher + ?Sized> WebSearcher for Arc<S> {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        (**self).search(query).await
    }
}

/// DuckDuckGo Lite client configuration.
#[derive(Debug, Clone)]
pub struct DuckDuckGoConfig {
    /// Search form endpoint.
    pub search_url: String,
    /// User-agent string.
    pub user_agent: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Stop once more than this many lines are collected.
    pub max_lines: usize,
}

impl Default for DuckDuckGoConfig {
    fn default() -> Self {
        Self {
            search_url: "https://lite.duckduckgo.com/lite/".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            timeout: Duration::from_secs(10),
            max_lines: 10,
        }
    }
}

impl From<&AppConfig> for DuckDuckGoConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            search_url: config.web_search_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            max_lines: config.web_max_lines,
        }
    }
}

/// HTML search form client.
#[derive(Debug, Clone)]
pub struct DuckDuckGoClient {
    http: reqwest::Client,
    config: DuckDuckGoConfig,
}

impl DuckDuckGoClient {
    pub fn new(config: DuckDuckGoConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| SearchError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &DuckDuckGoConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl WebSearcher for DuckDuckGoClient {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        let start = Instant::now();
        tracing::debug!("searching web: query={}", query);

        let response = self
            .http
            .post(&self.config.search_url)
            .header(header::USER_AGENT, &self.config.user_agent)
            .form(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(SearchError::HttpError { status: status.as_u16() });
        }

        let html = response.text().await?;
        let text = extract_result_links(&html, self.config.max_lines);

        tracing::debug!("web search completed in {:?}, {} bytes of results", start.elapsed(), text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_app_config() {
        let app = AppConfig { web_max_lines: 4, timeout_ms: 2500, ..Default::default() };
        let config = DuckDuckGoConfig::from(&app);
        assert_eq!(config.max_lines, 4);
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.search_url, "https://lite.duckduckgo.com/lite/");
    }

    #[test]
    fn test_client_new() {
        let client = DuckDuckGoClient::new(DuckDuckGoConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_error() {
        let config = DuckDuckGoConfig {
            search_url: "http://127.0.0.1:9/lite/".to_string(),
            timeout: Duration::from_millis(500),
            ..Default::default()
        };
        let client = DuckDuckGoClient::new(config).unwrap();
        assert!(client.search("anything").await.is_err());
    }
}
