//! Unified error types for medi-assist.
//!
//! Every variant renders with a stable code prefix so tool callers can
//! match on it without parsing free text.

use std::path::PathBuf;

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the medi-assist agents and server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// No cache entry found for the given key.
    #[error("CACHE_MISS: {0}")]
    CacheMiss(String),

    /// Cache entry could not be written.
    #[error("CACHE_ERROR: failed to write {}: {source}", .path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Payload could not be encoded for storage.
    #[error("CACHE_ERROR: failed to encode payload: {0}")]
    Serialize(String),

    /// Upstream search collaborator failed.
    #[error("SEARCH_FAILED: {0}")]
    SearchFailed(String),

    /// HTTP error response.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Render mode is disabled.
    #[error("RENDER_DISABLED")]
    RenderDisabled,

    /// Render failed.
    #[error("RENDER_FAILED: {0}")]
    RenderFailed(String),

    /// Language model summarization failed.
    #[error("SUMMARIZE_FAILED: {0}")]
    SummarizeFailed(String),

    /// Email could not be built or delivered.
    #[error("EMAIL_FAILED: {0}")]
    EmailFailed(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::CacheMiss(msg) => (-32001, msg.clone()),
            Error::CacheWrite { .. } | Error::Serialize(_) => (-32002, err.to_string()),
            Error::SearchFailed(msg) => (-32003, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
            Error::RenderDisabled => (-32011, "Render mode is disabled".to_string()),
            Error::RenderFailed(msg) => (-32012, msg.clone()),
            Error::SummarizeFailed(msg) => (-32013, msg.clone()),
            Error::EmailFailed(msg) => (-32014, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CacheMiss("abc123".to_string());
        assert!(err.to_string().contains("CACHE_MISS"));
        assert!(err.to_string().contains("abc123"));
    }

    #[test]
    fn test_cache_write_display() {
        let err = Error::CacheWrite {
            path: PathBuf::from("cache_web/abc.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = err.to_string();
        assert!(text.starts_with("CACHE_ERROR"));
        assert!(text.contains("cache_web/abc.txt"));
        assert!(text.contains("denied"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::CacheMiss("abc123".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32001);

        let mcp_err: McpError = Error::InvalidInput("empty".into()).into();
        assert_eq!(mcp_err.code.0, -32602);

        let mcp_err: McpError = Error::EmailFailed("relay refused".into()).into();
        assert_eq!(mcp_err.code.0, -32014);
        assert_eq!(mcp_err.message, "relay refused");
    }
}
