//! cache_get tool implementation.
//!
//! Reads a stored entry by its key fields without triggering a search.

use medi_core::{CacheKey, Error, ResultCache};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which cache directory to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CacheDomain {
    /// Web search results, keyed by (query).
    Web,
    /// Doctor search results, keyed by (specialty, city).
    Doctor,
}

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// Cache domain to read from.
    pub domain: CacheDomain,

    /// Key fields; normalized (trimmed, lower-cased) before lookup.
    pub key: Vec<String>,
}

/// Stored payload in its native shape.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CachedPayload {
    Text(String),
    Lines(Vec<String>),
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    /// Digest addressing the entry.
    pub digest: String,
    /// File holding the entry.
    pub path: String,
    /// The cached payload.
    pub payload: CachedPayload,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(
    web: &ResultCache, doctor: &ResultCache, params: CacheGetParams,
) -> Result<CallToolResult, McpError> {
    if params.key.is_empty() {
        return Err(Error::InvalidInput("key must have at least one field".to_string()).into());
    }

    let key = CacheKey::new(&params.key);
    let (path, payload) = match params.domain {
        CacheDomain::Web => (
            web.path_for::<String>(&key),
            web.lookup_async::<String>(&key).await.map(CachedPayload::Text),
        ),
        CacheDomain::Doctor => (
            doctor.path_for::<Vec<String>>(&key),
            doctor.lookup_async::<Vec<String>>(&key).await.map(CachedPayload::Lines),
        ),
    };
    let payload = payload.ok_or_else(|| Error::CacheMiss(key.to_string()))?;

    let output = CacheGetOutput { digest: key.digest(), path: path.display().to_string(), payload };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize entry: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
