//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `web_max_lines` is 0
    /// - `max_doctor_results` is 0 or exceeds 20
    /// - a cache directory is empty
    /// - `web_search_url`, `directory_search_url` or `ollama_url` is not an absolute http(s) URL
    /// - `smtp_server` is empty or `smtp_port` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.web_max_lines == 0 {
            return Err(ConfigError::Invalid { field: "web_max_lines".into(), reason: "must be greater than 0".into() });
        }

        if self.max_doctor_results == 0 || self.max_doctor_results > 20 {
            return Err(ConfigError::Invalid {
                field: "max_doctor_results".into(),
                reason: "must be between 1 and 20".into(),
            });
        }

        for (field, dir) in [("web_cache_dir", &self.web_cache_dir), ("doctor_cache_dir", &self.doctor_cache_dir)] {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid { field: field.into(), reason: "must not be empty".into() });
            }
        }

        for (field, url) in [
            ("web_search_url", &self.web_search_url),
            ("directory_search_url", &self.directory_search_url),
            ("ollama_url", &self.ollama_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid { field: field.into(), reason: "must be an http(s) URL".into() });
            }
        }

        if self.smtp_server.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "smtp_server".into(), reason: "must not be empty".into() });
        }
        if self.smtp_port == 0 {
            return Err(ConfigError::Invalid { field: "smtp_port".into(), reason: "must be greater than 0".into() });
        }

        if self.web_cache_dir == self.doctor_cache_dir {
            tracing::warn!(
                dir = %self.web_cache_dir.display(),
                "web and doctor caches share a directory; entries stay distinct by extension"
            );
        }

        Ok(())
    }
}
