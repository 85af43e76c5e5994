//! Public entry point for fee-history queries.

use std::sync::Arc;

use alloy_primitives::U256;
use serde::Serialize;
use tracing::{warn, Instrument};

use crate::backend::FeeHistoryBackend;
use crate::cache::{CacheStats, FeeCache, MemoryCache};
use crate::config::OracleConfig;
use crate::errors::FeeHistoryError;
use crate::pipeline::FetchPipeline;
use crate::range::{resolve_block_range, BlockSelector};
use crate::spans;

/// Fee-history statistics for a processed block range, shaped for
/// `eth_feeHistory`-style consumers.
///
/// The first block of the actually processed range is included to avoid
/// ambiguity when parts of the requested range were unavailable or the head
/// changed during processing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeHistory {
    /// First block of the processed range.
    pub oldest_block: u64,
    /// Requested percentiles of effective priority fees per gas of the
    /// transactions in each block, ascending and weighted by gas used.
    /// `None` when no percentiles were requested, as opposed to requested
    /// but empty; omitted from JSON in that case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<Vec<Vec<U256>>>,
    /// Base fee per gas of each block in the range.
    pub base_fee_per_gas: Vec<U256>,
    /// gasUsed / gasLimit of each block in the range.
    pub gas_used_ratio: Vec<f64>,
}

/// Fee-history oracle over a chain backend.
///
/// Validates requests, resolves them against the chain head and configured
/// history limits, and fans out block retrieval through a shared fee-data
/// cache. Cheap to share behind an `Arc`; all methods take `&self`.
///
/// # Examples
///
/// ```rust,ignore
/// use feescan::{BlockSelector, Oracle, OracleConfig};
/// use std::sync::Arc;
///
/// let oracle = Oracle::new(backend, OracleConfig::default());
/// let history = oracle
///     .fee_history(10, BlockSelector::Latest, &[25.0, 50.0, 75.0])
///     .await?;
/// ```
pub struct Oracle<B> {
    backend: Arc<B>,
    cache: Arc<dyn FeeCache>,
    config: OracleConfig,
}

impl<B: FeeHistoryBackend + 'static> Oracle<B> {
    /// Creates an oracle with a bounded in-memory cache sized from the
    /// configuration.
    pub fn new(backend: Arc<B>, config: OracleConfig) -> Self {
        let cache = Arc::new(MemoryCache::new(config.cache_capacity));
        Self::with_cache(backend, cache, config)
    }

    /// Creates an oracle with a caller-supplied cache backend.
    pub fn with_cache(backend: Arc<B>, cache: Arc<dyn FeeCache>, config: OracleConfig) -> Self {
        Self {
            backend,
            cache,
            config,
        }
    }

    /// Returns current statistics of the shared fee-data cache.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Returns fee-history data for the requested range of blocks.
    ///
    /// The range ends at `last_block` and spans `block_count` heights; it
    /// may be clamped against genesis, the accepted head, and the configured
    /// history window, so callers should read the processed range from the
    /// returned [`FeeHistory::oldest_block`]. A request for zero blocks, or
    /// one whose entire range turns out to be unavailable, yields an empty
    /// result with no error.
    pub async fn fee_history(
        &self,
        block_count: usize,
        last_block: BlockSelector,
        reward_percentiles: &[f64],
    ) -> Result<FeeHistory, FeeHistoryError> {
        let span = spans::fee_history(block_count, reward_percentiles.len());
        self.fee_history_inner(block_count, last_block, reward_percentiles)
            .instrument(span)
            .await
    }

    async fn fee_history_inner(
        &self,
        mut block_count: usize,
        last_block: BlockSelector,
        reward_percentiles: &[f64],
    ) -> Result<FeeHistory, FeeHistoryError> {
        if block_count < 1 {
            // No data and no error means there are no retrievable blocks.
            return Ok(FeeHistory::default());
        }
        if block_count > self.config.max_call_block_history {
            warn!(
                requested = block_count,
                truncated = self.config.max_call_block_history,
                "Sanitizing fee history length"
            );
            block_count = self.config.max_call_block_history;
        }
        validate_percentiles(reward_percentiles)?;

        let (last, blocks) =
            resolve_block_range(self.backend.as_ref(), &self.config, last_block, block_count)
                .await?;
        if blocks == 0 {
            return Ok(FeeHistory::default());
        }
        let oldest_block = last + 1 - blocks as u64;

        let pipeline = FetchPipeline::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.cache),
            self.config.max_fetchers,
        );
        let entries = pipeline
            .fetch(oldest_block, last, Arc::from(reward_percentiles))
            .await?;
        if entries.is_empty() {
            return Ok(FeeHistory::default());
        }

        let mut base_fee_per_gas = Vec::with_capacity(entries.len());
        let mut gas_used_ratio = Vec::with_capacity(entries.len());
        let mut reward =
            (!reward_percentiles.is_empty()).then(|| Vec::with_capacity(entries.len()));
        for fees in entries {
            base_fee_per_gas.push(fees.base_fee);
            gas_used_ratio.push(fees.gas_used_ratio);
            if let Some(reward) = reward.as_mut() {
                reward.push(fees.reward);
            }
        }

        Ok(FeeHistory {
            oldest_block,
            reward,
            base_fee_per_gas,
            gas_used_ratio,
        })
    }
}

/// Checks that every percentile lies in `[0, 100]` and that the sequence is
/// non-decreasing. Runs before any backend call.
fn validate_percentiles(percentiles: &[f64]) -> Result<(), FeeHistoryError> {
    for (index, &value) in percentiles.iter().enumerate() {
        if !(0.0..=100.0).contains(&value) {
            return Err(FeeHistoryError::PercentileOutOfRange { value });
        }
        if index > 0 && value < percentiles[index - 1] {
            return Err(FeeHistoryError::PercentilesNotAscending {
                prev_index: index - 1,
                prev: percentiles[index - 1],
                index,
                value,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ascending_percentiles_within_range() {
        assert!(validate_percentiles(&[]).is_ok());
        assert!(validate_percentiles(&[0.0, 50.0, 50.0, 100.0]).is_ok());
    }

    #[test]
    fn rejects_percentiles_outside_range() {
        assert!(matches!(
            validate_percentiles(&[-0.5]),
            Err(FeeHistoryError::PercentileOutOfRange { .. })
        ));
        assert!(matches!(
            validate_percentiles(&[50.0, 100.5]),
            Err(FeeHistoryError::PercentileOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_descending_percentiles_naming_the_pair() {
        match validate_percentiles(&[10.0, 70.0, 30.0]) {
            Err(FeeHistoryError::PercentilesNotAscending {
                prev_index,
                prev,
                index,
                value,
            }) => {
                assert_eq!((prev_index, index), (1, 2));
                assert_eq!((prev, value), (70.0, 30.0));
            }
            other => panic!("expected PercentilesNotAscending, got {other:?}"),
        }
    }

    #[test]
    fn empty_history_serializes_without_reward() {
        let json = serde_json::to_value(FeeHistory::default()).unwrap();
        assert!(json.get("reward").is_none());
        assert_eq!(json["oldestBlock"], 0);
    }
}
