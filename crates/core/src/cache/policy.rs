//! Which computed results are worth remembering.
//!
//! A search that found nothing and a search that broke look the same to the
//! cache: both produce a fallback payload. The policy keeps them apart so a
//! transient upstream failure is not memoized as a verified absence unless
//! explicitly configured.

use serde::{Deserialize, Serialize};

/// Classification of a freshly computed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The collaborator returned usable records.
    Found,
    /// The collaborator completed but returned no records.
    NotFound,
    /// The collaborator failed; the payload is a fallback message.
    Failed,
}

/// Storage policy for computed results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    /// Store sentinel "not found" payloads.
    pub cache_negative_results: bool,
    /// Store fallback payloads produced by a failed collaborator.
    pub cache_failed_searches: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self { cache_negative_results: true, cache_failed_searches: false }
    }
}

impl CachePolicy {
    pub fn should_store(&self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Found => true,
            Outcome::NotFound => self.cache_negative_results,
            Outcome::Failed => self.cache_failed_searches,
        }
    }
}
