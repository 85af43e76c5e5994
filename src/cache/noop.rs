//! No-op cache implementation that disables caching

use std::sync::Arc;

use async_trait::async_trait;

use super::{CacheStats, FeeCache};
use crate::fees::SlimBlock;

/// Cache backend that stores nothing.
///
/// Every lookup is a miss, so each fee-history call refetches and reprocesses
/// every block in its range. Useful for tests and one-shot queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCache;

#[async_trait]
impl FeeCache for NoOpCache {
    async fn get(&self, _block_number: u64) -> Option<Arc<SlimBlock>> {
        None
    }

    async fn insert(&self, _block_number: u64, _block: Arc<SlimBlock>) {}

    async fn clear(&self) {}

    async fn stats(&self) -> CacheStats {
        CacheStats::default()
    }

    fn name(&self) -> &'static str {
        "NoOpCache"
    }
}
