//! Per-pair in-flight locks.
//!
//! Serializes the read-decide-write sequence for one currency pair inside a
//! process. Different pairs never wait on each other.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use rates_types::CurrencyPair;

#[derive(Default)]
pub(crate) struct PairLocks {
    locks: DashMap<CurrencyPair, Arc<Mutex<()>>>,
}

/// Held for the duration of one resolve or upsert.
pub(crate) struct PairLockGuard<'a> {
    locks: &'a DashMap<CurrencyPair, Arc<Mutex<()>>>,
    pair: CurrencyPair,
    held: Option<OwnedMutexGuard<()>>,
}

impl PairLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Waits until no other caller holds the lock for `pair`.
    pub(crate) async fn acquire(&self, pair: &CurrencyPair) -> PairLockGuard<'_> {
        // Clone out of the map before awaiting so no shard lock is held.
        let mutex = self.locks.entry(pair.clone()).or_default().clone();
        let held = mutex.lock_owned().await;

        PairLockGuard {
            locks: &self.locks,
            pair: pair.clone(),
            held: Some(held),
        }
    }

    /// Number of pairs with a live lock entry.
    pub(crate) fn len(&self) -> usize {
        self.locks.len()
    }
}

impl Drop for PairLockGuard<'_> {
    fn drop(&mut self) {
        self.held.take();
        // Only the map's own reference left: nobody holds or waits on it.
        self.locks
            .remove_if(&self.pair, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
