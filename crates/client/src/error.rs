//! Search collaborator error types.

use std::sync::Arc;

use medi_core::Error;

use crate::render::RenderError;

/// Errors from the web search and doctor directory collaborators.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Search URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Page could not be rendered.
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { SearchError::Timeout } else { SearchError::Network(Arc::new(err)) }
    }
}

impl From<SearchError> for Error {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Timeout => Error::FetchTimeout(err.to_string()),
            SearchError::HttpError { status } => Error::HttpError(format!("HTTP {status}")),
            SearchError::Render(RenderError::Disabled) => Error::RenderDisabled,
            SearchError::Render(e) => Error::RenderFailed(e.to_string()),
            SearchError::Network(_) | SearchError::InvalidUrl(_) => Error::SearchFailed(err.to_string()),
        }
    }
}
