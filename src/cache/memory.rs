//! Bounded in-memory cache with LRU eviction

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{CacheStats, FeeCache};
use crate::fees::SlimBlock;

/// Entry in the memory cache with access metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached fee data
    block: Arc<SlimBlock>,
    /// Sequence number of the last access, for deterministic LRU ordering
    access_seq: u64,
}

/// Internal state for the memory cache
#[derive(Debug, Default)]
struct MemoryCacheState {
    /// The cache entries, keyed by block number
    entries: HashMap<u64, CacheEntry>,
    /// Cache statistics
    stats: CacheStats,
    /// Monotonic access counter driving LRU ordering
    next_seq: u64,
}

/// Bounded in-memory cache mapping block number to fee data.
///
/// When the capacity is reached, the least recently used entry is evicted to
/// make room. A capacity of zero disables the bound.
///
/// # Examples
///
/// ```rust
/// use feescan::MemoryCache;
///
/// let cache = MemoryCache::new(1024);
/// ```
///
/// # Performance
///
/// - Get: O(1) average case (HashMap lookup)
/// - Insert: O(1) without eviction, O(n) with eviction (finds LRU)
#[derive(Debug)]
pub struct MemoryCache {
    max_entries: usize,
    state: Mutex<MemoryCacheState>,
}

impl MemoryCache {
    /// Creates a memory cache bounded to `max_entries` blocks.
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            state: Mutex::new(MemoryCacheState::default()),
        }
    }

    /// Evicts the least recently used entry from the cache
    fn evict_lru(state: &mut MemoryCacheState) {
        let lru_key = state
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.access_seq)
            .map(|(key, _)| *key);

        if let Some(key) = lru_key {
            debug!(block_number = key, "Evicting LRU cache entry");
            state.entries.remove(&key);
            state.stats.evictions += 1;
        }
    }
}

#[async_trait]
impl FeeCache for MemoryCache {
    async fn get(&self, block_number: u64) -> Option<Arc<SlimBlock>> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        match state.entries.get_mut(&block_number) {
            Some(entry) => {
                entry.access_seq = state.next_seq;
                state.next_seq += 1;
                state.stats.hits += 1;
                debug!(block_number, "Cache hit (memory)");
                Some(Arc::clone(&entry.block))
            }
            None => {
                state.stats.misses += 1;
                debug!(block_number, "Cache miss (memory)");
                None
            }
        }
    }

    async fn insert(&self, block_number: u64, block: Arc<SlimBlock>) {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        if self.max_entries > 0 {
            while state.entries.len() >= self.max_entries {
                Self::evict_lru(state);
            }
        }

        debug!(block_number, "Inserting block into memory cache");
        let access_seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert(block_number, CacheEntry { block, access_seq });
        state.stats.entries = state.entries.len();
    }

    async fn clear(&self) {
        let mut state = self.state.lock().await;
        debug!(entries = state.entries.len(), "Clearing memory cache");
        state.entries.clear();
        state.stats.entries = 0;
    }

    async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        state.stats.clone()
    }

    fn name(&self) -> &'static str {
        "MemoryCache"
    }
}
