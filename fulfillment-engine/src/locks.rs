//! Keyed async lock registry
//!
//! Stock mutation for a food item and the get→check→save sequence on an
//! order are both read-modify-writes; concurrent operations on the same key
//! must not interleave them. Each key maps to one async mutex. Multi-key
//! acquisition sorts and dedups first, so two operations over an overlapping
//! key set cannot deadlock.
//!
//! Two registries are in play: one keyed by item id (placement, cancellation
//! refunds, replenishment) and one keyed by order id (status transitions,
//! cancellation). Paths that need both take the order lock first.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Default)]
pub struct KeyedLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock a single key; the guard keeps the critical section open until
    /// dropped.
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let mutex = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        mutex.lock_owned().await
    }

    /// Lock every key in the set, deduplicated, in sorted order.
    pub async fn lock_many(&self, keys: &[&str]) -> Vec<OwnedMutexGuard<()>> {
        let mut unique: Vec<&str> = keys.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let mut guards = Vec::with_capacity(unique.len());
        for key in unique {
            guards.push(self.lock(key).await);
        }
        guards
    }
}
