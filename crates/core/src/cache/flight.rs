//! Single-flight leases for concurrent cache misses.
//!
//! Callers that miss on the same digest take turns: the first computes and
//! stores, the rest wake up afterwards and find the entry on disk. Leases are
//! held through weak references, so a digest with no waiters costs nothing
//! once its last lease is dropped.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use super::key::CacheKey;

/// Per-digest exclusion for in-process computations.
#[derive(Clone, Debug, Default)]
pub struct FlightGroup {
    leases: Arc<Mutex<HashMap<String, Weak<AsyncMutex<()>>>>>,
}

/// Exclusive right to compute the entry for one digest. Released on drop.
#[derive(Debug)]
pub struct FlightLease {
    _guard: OwnedMutexGuard<()>,
}

impl FlightGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and take the lease for `key`.
    pub async fn acquire(&self, key: &CacheKey) -> FlightLease {
        let lock = {
            let mut leases = self.leases.lock().unwrap_or_else(PoisonError::into_inner);
            leases.retain(|_, lease| lease.strong_count() > 0);

            let digest = key.digest();
            match leases.get(&digest).and_then(Weak::upgrade) {
                Some(lock) => lock,
                None => {
                    let lock = Arc::new(AsyncMutex::new(()));
                    leases.insert(digest, Arc::downgrade(&lock));
                    lock
                }
            }
        };

        FlightLease { _guard: lock.lock_owned().await }
    }

    /// Number of digests with a live lease or waiter.
    pub fn in_flight(&self) -> usize {
        let leases = self.leases.lock().unwrap_or_else(PoisonError::into_inner);
        leases.values().filter(|lease| lease.strong_count() > 0).count()
    }
}
