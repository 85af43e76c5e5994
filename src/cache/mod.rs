//! Cache backends for per-block fee data.
//!
//! The oracle stores one [`SlimBlock`] per block number so that repeated
//! fee-history calls over overlapping ranges only process each block once:
//!
//! - [`MemoryCache`]: bounded in-memory cache with LRU eviction (default)
//! - [`NoOpCache`]: disables caching entirely (for testing or one-shot use)
//!
//! Slim blocks are immutable and keyed by an immutable identifier, so two
//! concurrent requests racing to insert the same block number is harmless:
//! both values are semantically identical and the last write wins.
//!
//! # Examples
//!
//! ```rust,ignore
//! use feescan::{MemoryCache, NoOpCache, Oracle, OracleConfig};
//! use std::sync::Arc;
//!
//! // Bounded memory cache
//! let cache = Arc::new(MemoryCache::new(1024));
//! let oracle = Oracle::with_cache(backend, cache, OracleConfig::default());
//!
//! // No cache (always refetch)
//! let oracle = Oracle::with_cache(backend, Arc::new(NoOpCache), OracleConfig::default());
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::fees::SlimBlock;

mod memory;
mod noop;

pub use memory::MemoryCache;
pub use noop::NoOpCache;

/// Statistics about cache performance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cache hits (successful retrievals)
    pub hits: u64,
    /// Number of cache misses (key not found)
    pub misses: u64,
    /// Number of entries evicted due to size limits
    pub evictions: u64,
    /// Current number of entries in the cache
    pub entries: usize,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, evictions={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.evictions,
            self.entries,
            self.hit_rate()
        )
    }
}

/// Trait for fee-data cache backends.
///
/// Implementations must be safe for concurrent get/insert from arbitrarily
/// many simultaneous callers and fetch workers, with no external locking
/// required; the cache's internal synchronization is the sole consistency
/// guarantee. Values are shared as `Arc<SlimBlock>` so readers never copy
/// block data.
#[async_trait]
pub trait FeeCache: Send + Sync {
    /// Retrieves the cached fee data for a block number, if present.
    async fn get(&self, block_number: u64) -> Option<Arc<SlimBlock>>;

    /// Inserts fee data for a block number.
    ///
    /// If the cache is bounded and full, this may evict older entries.
    /// Re-inserting an existing key replaces the value; slim blocks for the
    /// same number are semantically identical, so the race is benign.
    async fn insert(&self, block_number: u64, block: Arc<SlimBlock>);

    /// Clears all entries from the cache.
    async fn clear(&self);

    /// Returns current cache statistics.
    async fn stats(&self) -> CacheStats;

    /// Returns a human-readable name for this cache backend.
    fn name(&self) -> &'static str;
}
