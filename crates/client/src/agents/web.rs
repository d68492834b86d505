//! Web search agent.

use medi_core::{CacheKey, Error, Memoized, Memoizer, Outcome};
use serde::{Deserialize, Serialize};

use crate::web::WebSearcher;

/// Shown instead of an empty result blob.
pub const NO_RESULTS_MESSAGE: &str = "No relevant results found.";

/// Answer returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAnswer {
    pub text: String,
    pub cache_hit: bool,
}

/// Web search memoized by normalized query text.
pub struct WebSearchAgent<S> {
    memo: Memoizer,
    searcher: S,
}

impl<S: WebSearcher> WebSearchAgent<S> {
    pub fn new(memo: Memoizer, searcher: S) -> Self {
        Self { memo, searcher }
    }

    pub fn memoizer(&self) -> &Memoizer {
        &self.memo
    }

    /// Answer `query` from the cache, searching on a miss.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the query is blank.
    pub async fn search(&self, query: &str) -> Result<WebAnswer, Error> {
        let key = Self::key(query)?;
        let searcher = &self.searcher;
        let result = self.memo.get_or_compute(&key, move || run_search(searcher, query)).await;
        Ok(Self::answer(result))
    }

    /// Search again and overwrite the cached entry.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the query is blank.
    pub async fn refresh(&self, query: &str) -> Result<WebAnswer, Error> {
        let key = Self::key(query)?;
        let searcher = &self.searcher;
        let result = self.memo.refresh(&key, move || run_search(searcher, query)).await;
        Ok(Self::answer(result))
    }

    fn key(query: &str) -> Result<CacheKey, Error> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("query cannot be empty".into()));
        }
        Ok(CacheKey::single(query))
    }

    fn answer(result: Memoized<String>) -> WebAnswer {
        if result.cache_hit {
            tracing::info!("loaded web result from cache");
        }
        let text = if result.value.trim().is_empty() { NO_RESULTS_MESSAGE.to_string() } else { result.value };
        WebAnswer { text, cache_hit: result.cache_hit }
    }
}

async fn run_search<S: WebSearcher>(searcher: &S, query: &str) -> (String, Outcome) {
    tracing::info!("performing new web search");
    match searcher.search(query.trim()).await {
        Ok(text) if text.trim().is_empty() => (text, Outcome::NotFound),
        Ok(text) => (text, Outcome::Found),
        Err(e) => {
            tracing::warn!("web search failed: {e}");
            (format!("❌ Web search failed: {e}"), Outcome::Failed)
        }
    }
}
