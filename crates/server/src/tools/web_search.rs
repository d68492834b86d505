//! web_search tool implementation.
//!
//! Performs cached web searches through the web search agent.

use medi_client::{WebSearchAgent, WebSearcher};
use medi_core::Error;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for web_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchParams {
    /// Search query (required).
    pub query: String,

    /// Force a refresh, bypassing the cache.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Output structure for web_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WebSearchOutput {
    /// Result text: one "title - link" entry per result.
    pub text: String,
    /// Whether the text was served from the cache.
    pub cache_hit: bool,
}

/// Implementation of the web_search tool.
pub async fn search_impl<S: WebSearcher>(
    agent: &WebSearchAgent<S>, params: WebSearchParams,
) -> Result<CallToolResult, McpError> {
    let answer = if params.force_refresh {
        agent.refresh(&params.query).await?
    } else {
        agent.search(&params.query).await?
    };

    let output = WebSearchOutput { text: answer.text, cache_hit: answer.cache_hit };
    let json = serde_json::to_string_pretty(&output).map_err(|e| Error::Serialize(e.to_string()))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
