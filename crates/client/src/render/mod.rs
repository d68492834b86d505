//! Headless browser rendering for JS-heavy pages.
//!
//! This module provides the renderer trait the doctor directory depends on
//! and, behind the `render` feature, an implementation using chromiumoxide
//! for headless Chrome/Chromium browser control.

use thiserror::Error;
use url::Url;

#[cfg(feature = "render")]
mod headless;

#[cfg(feature = "render")]
pub use headless::{HeadlessRenderer, LazyRenderer};

/// Errors that can occur during page rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Rendering is switched off by configuration.
    #[error("render mode is disabled")]
    Disabled,

    /// Failed to launch or connect to browser.
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// Failed to navigate to URL.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Failed to get page content.
    #[error("content retrieval failed: {0}")]
    ContentRetrieval(String),

    /// Timeout waiting for page to load.
    #[error("render timeout after {0}ms")]
    Timeout(u64),
}

/// Options for rendering a page.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Timeout in milliseconds (default: 30000).
    pub timeout_ms: u64,

    /// Upper bound on the settle time after navigation (default: 5000).
    pub wait_ms: u64,

    /// CSS selector that ends the settle wait early once it appears.
    ///
    /// Pages without a match are still returned after `wait_ms`.
    pub wait_for: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { timeout_ms: 30000, wait_ms: 5000, wait_for: None }
    }
}

/// Result of rendering a page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Rendered HTML content.
    pub html: String,

    /// Final URL after redirects.
    pub final_url: Url,

    /// Time taken to render in milliseconds.
    pub render_time_ms: u64,
}

/// Renderer trait for headless browser page rendering.
#[async_trait::async_trait]
pub trait Renderer: Send + Sync {
    /// Render a URL to HTML via headless browser.
    async fn render(&self, url: &Url, opts: &RenderOptions) -> Result<RenderedPage, RenderError>;
}

#[async_trait::async_trait]
impl<R: Renderer + ?Sized> Renderer for std::sync::Arc<R> {
    async fn render(&self, url: &Url, opts: &RenderOptions) -> Result<RenderedPage, RenderError> {
        (**self).render(url, opts).await
    }
}
