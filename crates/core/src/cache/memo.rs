//! Lookup-or-compute over a [`ResultCache`].
//!
//! This is the piece both search agents share: check the cache, on a miss
//! optionally take the single-flight lease, re-check, compute, and store the
//! result if the [`CachePolicy`] says so. Storage failures are logged and
//! swallowed; the caller always gets the computed value.

use std::future::Future;

use super::flight::FlightGroup;
use super::key::CacheKey;
use super::payload::Payload;
use super::policy::{CachePolicy, Outcome};
use super::store::ResultCache;

/// Result of a memoized lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memoized<P> {
    pub value: P,
    /// True when `value` came from disk and no computation ran.
    pub cache_hit: bool,
    /// Classification of a fresh computation; `None` on a hit.
    pub outcome: Option<Outcome>,
}

/// A cache domain plus the rules for filling it.
#[derive(Clone, Debug)]
pub struct Memoizer {
    cache: ResultCache,
    policy: CachePolicy,
    flights: Option<FlightGroup>,
}

impl Memoizer {
    pub fn new(cache: ResultCache, policy: CachePolicy) -> Self {
        Self { cache, policy, flights: Some(FlightGroup::new()) }
    }

    /// Disable single-flight; concurrent misses each compute independently.
    pub fn without_single_flight(mut self) -> Self {
        self.flights = None;
        self
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub async fn get_or_compute<P, F, Fut>(&self, key: &CacheKey, compute: F) -> Memoized<P>
    where
        P: Payload + Clone + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = (P, Outcome)>,
    {
        if let Some(value) = self.cache.lookup_async::<P>(key).await {
            return Memoized { value, cache_hit: true, outcome: None };
        }

        let lease = match &self.flights {
            Some(flights) => Some(flights.acquire(key).await),
            None => None,
        };

        // Another caller may have filled the entry while we waited.
        if lease.is_some()
            && let Some(value) = self.cache.lookup_async::<P>(key).await
        {
            return Memoized { value, cache_hit: true, outcome: None };
        }

        self.compute_and_store(key, compute).await
    }

    /// Recompute the value for `key` regardless of what is cached.
    pub async fn refresh<P, F, Fut>(&self, key: &CacheKey, compute: F) -> Memoized<P>
    where
        P: Payload + Clone + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = (P, Outcome)>,
    {
        let _lease = match &self.flights {
            Some(flights) => Some(flights.acquire(key).await),
            None => None,
        };
        self.compute_and_store(key, compute).await
    }

    async fn compute_and_store<P, F, Fut>(&self, key: &CacheKey, compute: F) -> Memoized<P>
    where
        P: Payload + Clone + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = (P, Outcome)>,
    {
        let (value, outcome) = compute().await;

        if self.policy.should_store(outcome) {
            if let Err(e) = self.cache.store_async(key, value.clone()).await {
                tracing::warn!(%key, "failed to cache result: {e}");
            }
        } else {
            tracing::debug!(%key, ?outcome, "result not cached by policy");
        }

        Memoized { value, cache_hit: false, outcome: Some(outcome) }
    }
}
