//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MEDI_*)
//! 2. TOML config file (if MEDI_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cache::{CachePolicy, Memoizer, ResultCache};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MEDI_*)
/// 2. TOML config file (if MEDI_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding cached web search results.
    ///
    /// Set via MEDI_WEB_CACHE_DIR environment variable.
    #[serde(default = "default_web_cache_dir")]
    pub web_cache_dir: PathBuf,

    /// Directory holding cached doctor directory results.
    ///
    /// Set via MEDI_DOCTOR_CACHE_DIR environment variable.
    #[serde(default = "default_doctor_cache_dir")]
    pub doctor_cache_dir: PathBuf,

    /// Whether "not found" sentinel results are cached.
    ///
    /// Set via MEDI_CACHE_NEGATIVE_RESULTS environment variable.
    #[serde(default = "default_true")]
    pub cache_negative_results: bool,

    /// Whether fallback results from a failed search are cached.
    ///
    /// Set via MEDI_CACHE_FAILED_SEARCHES environment variable.
    #[serde(default)]
    pub cache_failed_searches: bool,

    /// Collapse concurrent misses for the same key into one search.
    ///
    /// Set via MEDI_SINGLE_FLIGHT environment variable.
    #[serde(default = "default_true")]
    pub single_flight: bool,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via MEDI_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via MEDI_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Endpoint of the HTML web search form.
    #[serde(default = "default_web_search_url")]
    pub web_search_url: String,

    /// Stop collecting web results once more than this many lines are gathered.
    #[serde(default = "default_web_max_lines")]
    pub web_max_lines: usize,

    /// Base URL of the doctor directory search page.
    #[serde(default = "default_directory_search_url")]
    pub directory_search_url: String,

    /// Maximum doctor records extracted per search.
    #[serde(default = "default_max_doctor_results")]
    pub max_doctor_results: usize,

    /// Whether rendered mode (headless browser) is enabled.
    ///
    /// Set via MEDI_RENDER_ENABLED environment variable.
    #[serde(default = "default_true")]
    pub render_enabled: bool,

    /// Settle time after navigation before reading the page, in milliseconds.
    #[serde(default = "default_render_wait_ms")]
    pub render_wait_ms: u64,

    /// Upper bound on a single page render, in milliseconds.
    #[serde(default = "default_render_timeout_ms")]
    pub render_timeout_ms: u64,

    /// Base URL of the Ollama server used for summaries.
    ///
    /// Set via MEDI_OLLAMA_URL environment variable.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Model name passed to Ollama.
    ///
    /// Set via MEDI_MODEL_NAME environment variable.
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// SMTP relay host used for outgoing email (STARTTLS).
    ///
    /// Set via MEDI_SMTP_SERVER environment variable.
    #[serde(default = "default_smtp_server")]
    pub smtp_server: String,

    /// SMTP submission port.
    ///
    /// Set via MEDI_SMTP_PORT environment variable.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Sender address, also the SMTP login. Empty disables sending.
    ///
    /// Set via MEDI_EMAIL_SENDER environment variable.
    #[serde(default)]
    pub email_sender: String,

    /// SMTP password for `email_sender`.
    ///
    /// Set via MEDI_EMAIL_PASSWORD environment variable.
    #[serde(default, skip_serializing)]
    pub email_password: String,
}

fn default_web_cache_dir() -> PathBuf {
    PathBuf::from("cache_web")
}

fn default_doctor_cache_dir() -> PathBuf {
    PathBuf::from("cache_doctor")
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; medi-assist/0.1)".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_web_search_url() -> String {
    "https://lite.duckduckgo.com/lite/".into()
}

fn default_web_max_lines() -> usize {
    10
}

fn default_directory_search_url() -> String {
    "https://www.practo.com/search".into()
}

fn default_max_doctor_results() -> usize {
    5
}

fn default_render_wait_ms() -> u64 {
    5_000
}

fn default_render_timeout_ms() -> u64 {
    30_000
}

fn default_ollama_url() -> String {
    "http://localhost:11434".into()
}

fn default_model_name() -> String {
    "llama3".into()
}

fn default_smtp_server() -> String {
    "smtp.gmail.com".into()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            web_cache_dir: default_web_cache_dir(),
            doctor_cache_dir: default_doctor_cache_dir(),
            cache_negative_results: true,
            cache_failed_searches: false,
            single_flight: true,
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            web_search_url: default_web_search_url(),
            web_max_lines: default_web_max_lines(),
            directory_search_url: default_directory_search_url(),
            max_doctor_results: default_max_doctor_results(),
            render_enabled: true,
            render_wait_ms: default_render_wait_ms(),
            render_timeout_ms: default_render_timeout_ms(),
            ollama_url: default_ollama_url(),
            model_name: default_model_name(),
            smtp_server: default_smtp_server(),
            smtp_port: default_smtp_port(),
            email_sender: String::new(),
            email_password: String::new(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Storage policy derived from the caching flags.
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            cache_negative_results: self.cache_negative_results,
            cache_failed_searches: self.cache_failed_searches,
        }
    }

    /// Memoizer over the web search cache directory.
    pub fn web_memoizer(&self) -> Memoizer {
        self.memoizer(&self.web_cache_dir)
    }

    /// Memoizer over the doctor search cache directory.
    pub fn doctor_memoizer(&self) -> Memoizer {
        self.memoizer(&self.doctor_cache_dir)
    }

    fn memoizer(&self, dir: &std::path::Path) -> Memoizer {
        let memo = Memoizer::new(ResultCache::new(dir), self.cache_policy());
        if self.single_flight { memo } else { memo.without_single_flight() }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MEDI_`
    /// 2. TOML file from `MEDI_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MEDI_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("MEDI_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
