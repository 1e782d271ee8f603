//! Time-bounded in-memory cache of normalized category grids.
//!
//! Entries are replaced wholesale once they age past the TTL; nothing is
//! persisted. Concurrent misses for the same category are not coalesced, so
//! the worst case is a redundant fetch whose result overwrites an identical
//! entry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;

use crate::models::{Category, NormalizedGrid};

/// A cached grid and the moment it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Arc<NormalizedGrid>,
    pub fetched_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Category-keyed grid cache with a fixed time-to-live.
#[derive(Debug)]
pub struct GridCache {
    ttl: Duration,
    entries: Mutex<HashMap<Category, CacheEntry>>,
}

impl GridCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // The map is never left half-written, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<Category, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the grid for `category` if it was stored within the TTL.
    pub fn get(&self, category: Category) -> Option<Arc<NormalizedGrid>> {
        self.lock()
            .get(&category)
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| Arc::clone(&entry.data))
    }

    /// Store a freshly fetched grid, replacing any previous entry.
    pub fn insert(&self, category: Category, data: NormalizedGrid) -> Arc<NormalizedGrid> {
        let data = Arc::new(data);
        self.lock().insert(
            category,
            CacheEntry {
                data: Arc::clone(&data),
                fetched_at: Instant::now(),
            },
        );
        data
    }

    /// Categories with an entry, fresh or not, in sorted order.
    pub fn categories(&self) -> Vec<Category> {
        let mut keys: Vec<Category> = self.lock().keys().copied().collect();
        keys.sort();
        keys
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }
}
