//! chromiumoxide-backed renderer and its lazily launched wrapper.

use std::time::{Duration, Instant};

use tokio::sync::OnceCell;
use url::Url;

use super::{RenderError, RenderOptions, RenderedPage, Renderer};

/// Headless Chrome/Chromium renderer using chromiumoxide.
pub struct HeadlessRenderer {
    browser: chromiumoxide::Browser,
}

impl HeadlessRenderer {
    /// Create a new headless renderer by launching a browser instance.
    ///
    /// The browser runs in headless mode and uses a background task
    /// to handle Chrome DevTools Protocol events.
    pub async fn new() -> Result<Self, RenderError> {
        use chromiumoxide::browser::{Browser, BrowserConfig};
        use futures_util::StreamExt;

        let config = BrowserConfig::builder().build().map_err(RenderError::BrowserLaunch)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::BrowserLaunch(e.to_string()))?;

        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {e}");
                    break;
                }
            }
        });

        tracing::info!("headless browser launched");
        Ok(Self { browser })
    }
}

#[async_trait::async_trait]
impl Renderer for HeadlessRenderer {
    async fn render(&self, url: &Url, opts: &RenderOptions) -> Result<RenderedPage, RenderError> {
        let start = Instant::now();
        let timeout = Duration::from_millis(opts.timeout_ms);

        let page = tokio::time::timeout(timeout, self.browser.new_page(url.as_str()))
            .await
            .map_err(|_| RenderError::Timeout(opts.timeout_ms))?
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        let settle = Duration::from_millis(opts.wait_ms).min(timeout);
        match &opts.wait_for {
            Some(selector) => {
                let appeared = tokio::time::timeout(settle, async {
                    while page.find_element(selector).await.is_err() {
                        tokio::time::sleep(Duration::from_millis(250)).await;
                    }
                })
                .await;
                if appeared.is_err() {
                    tracing::debug!("{} did not appear within {}ms, reading page as is", selector, opts.wait_ms);
                }
            }
            None => tokio::time::sleep(settle).await,
        }

        let html = page
            .content()
            .await
            .map_err(|e| RenderError::ContentRetrieval(e.to_string()))?;

        let page_url = page
            .url()
            .await
            .map_err(|e| RenderError::ContentRetrieval(e.to_string()))?;

        let final_url = Url::parse(page_url.as_deref().unwrap_or(url.as_str()))
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        let render_time_ms = start.elapsed().as_millis() as u64;
        tracing::debug!("rendered {} in {}ms ({} bytes)", final_url, render_time_ms, html.len());

        page.close().await.ok();
        Ok(RenderedPage { html, final_url, render_time_ms })
    }
}

/// Renderer that launches its browser on first use and reuses it afterwards.
///
/// Construct one per process and share it by reference or `Arc`; the launch
/// happens at most once even under concurrent first calls.
pub struct LazyRenderer {
    enabled: bool,
    browser: OnceCell<HeadlessRenderer>,
}

impl LazyRenderer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, browser: OnceCell::new() }
    }

    /// The launched browser, launching it if needed.
    pub async fn get(&self) -> Result<&HeadlessRenderer, RenderError> {
        if !self.enabled {
            return Err(RenderError::Disabled);
        }
        self.browser.get_or_try_init(HeadlessRenderer::new).await
    }

    pub fn is_launched(&self) -> bool {
        self.browser.initialized()
    }
}

#[async_trait::async_trait]
impl Renderer for LazyRenderer {
    async fn render(&self, url: &Url, opts: &RenderOptions) -> Result<RenderedPage, RenderError> {
        self.get().await?.render(url, opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_lazy_renderer_never_launches() {
        let renderer = LazyRenderer::new(false);
        let url = Url::parse("https://example.com").unwrap();

        let result = renderer.render(&url, &RenderOptions::default()).await;
        assert!(matches!(result, Err(RenderError::Disabled)));
        assert!(!renderer.is_launched());
    }

    #[tokio::test]
    #[ignore = "requires Chrome/Chromium installation"]
    async fn test_headless_renderer_new() {
        let renderer = HeadlessRenderer::new().await;
        assert!(renderer.is_ok());
    }

    #[tokio::test]
    #[ignore = "requires network and Chrome/Chromium"]
    async fn test_lazy_renderer_launches_once() {
        let renderer = LazyRenderer::new(true);
        let url = Url::parse("https://example.com").unwrap();
        let opts = RenderOptions { wait_ms: 500, ..Default::default() };

        let page = renderer.render(&url, &opts).await.unwrap();
        assert!(page.html.contains("<html"));
        assert!(renderer.is_launched());

        let first = renderer.get().await.unwrap() as *const HeadlessRenderer;
        let second = renderer.get().await.unwrap() as *const HeadlessRenderer;
        assert_eq!(first, second);
    }
}
