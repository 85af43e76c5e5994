//! Bounded-concurrency block retrieval with ordered result reassembly.
//!
//! A fee-history call fans out over its resolved range with a fixed number
//! of worker tasks sharing one atomically incremented claim cursor. Workers
//! push per-block results into a channel buffered to the full range size, so
//! a worker never blocks on the send regardless of consumer pace, and the
//! caller reassembles results by block number, making the output order
//! deterministic regardless of completion order.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, Instrument};

use crate::backend::FeeHistoryBackend;
use crate::cache::FeeCache;
use crate::errors::FeeHistoryError;
use crate::fees::{ProcessedFees, SlimBlock};
use crate::spans;

/// Result of a single worker claim.
///
/// `Ok(None)` means the chain has no block at this height and no error
/// occurred, which happens when the head moves back during processing.
struct FetchJob {
    block_number: u64,
    result: Result<Option<ProcessedFees>, FeeHistoryError>,
}

/// Per-call orchestrator for bounded-concurrency block retrieval.
///
/// The cache is injected so tests can substitute a deterministic or empty
/// one; workers consult it before touching the backend.
pub(crate) struct FetchPipeline<B> {
    backend: Arc<B>,
    cache: Arc<dyn FeeCache>,
    max_fetchers: usize,
}

impl<B: FeeHistoryBackend + 'static> FetchPipeline<B> {
    pub(crate) fn new(backend: Arc<B>, cache: Arc<dyn FeeCache>, max_fetchers: usize) -> Self {
        Self {
            backend,
            cache,
            max_fetchers,
        }
    }

    /// Fetches and processes `[oldest_block, last_block]`, returning per-block
    /// fee data in ascending block order.
    ///
    /// The result is truncated at the first height the chain has not
    /// produced; an empty result is a valid outcome, not an error. The first
    /// worker error aborts the call and discards all already-computed
    /// results.
    pub(crate) async fn fetch(
        &self,
        oldest_block: u64,
        last_block: u64,
        percentiles: Arc<[f64]>,
    ) -> Result<Vec<ProcessedFees>, FeeHistoryError> {
        let span = spans::fetch_block_range(oldest_block, last_block);
        self.fetch_inner(oldest_block, last_block, percentiles)
            .instrument(span)
            .await
    }

    async fn fetch_inner(
        &self,
        oldest_block: u64,
        last_block: u64,
        percentiles: Arc<[f64]>,
    ) -> Result<Vec<ProcessedFees>, FeeHistoryError> {
        let blocks = (last_block - oldest_block + 1) as usize;
        let next = Arc::new(AtomicU64::new(oldest_block));
        let stop = Arc::new(AtomicBool::new(false));
        // Fully buffered: every job fits without a worker ever waiting on
        // the consumer.
        let (tx, mut rx) = mpsc::channel::<FetchJob>(blocks);

        for worker in 0..self.max_fetchers.min(blocks) {
            let backend = Arc::clone(&self.backend);
            let cache = Arc::clone(&self.cache);
            let percentiles = Arc::clone(&percentiles);
            let next = Arc::clone(&next);
            let stop = Arc::clone(&stop);
            let tx = tx.clone();
            tokio::spawn(
                async move {
                    loop {
                        // The stop flag is set when the consumer aborts on an
                        // error, so workers stand down at their next claim
                        // instead of fetching the rest of the range.
                        if stop.load(Ordering::Relaxed) {
                            return;
                        }
                        let block_number = next.fetch_add(1, Ordering::Relaxed);
                        if block_number > last_block {
                            return;
                        }

                        let result = process_block_fees(
                            backend.as_ref(),
                            cache.as_ref(),
                            block_number,
                            &percentiles,
                        )
                        .await;
                        let failed = result.is_err();
                        if tx.send(FetchJob {
                            block_number,
                            result,
                        })
                        .await
                        .is_err()
                        {
                            return;
                        }
                        if failed {
                            return;
                        }
                    }
                }
                .instrument(spans::fetch_worker(worker)),
            );
        }
        drop(tx);

        let mut entries: Vec<Option<ProcessedFees>> = vec![None; blocks];
        let mut first_missing = blocks;
        for _ in 0..blocks {
            let Some(job) = rx.recv().await else { break };
            let index = (job.block_number - oldest_block) as usize;
            match job.result {
                Ok(Some(fees)) => entries[index] = Some(fees),
                Ok(None) => first_missing = first_missing.min(index),
                Err(err) => {
                    stop.store(true, Ordering::Relaxed);
                    return Err(err);
                }
            }
        }

        // Every slot below first_missing was filled, so flattening drops
        // nothing from the truncated range.
        entries.truncate(first_missing);
        Ok(entries.into_iter().flatten().collect())
    }
}

/// Produces the fee data for one block, consulting the cache first.
async fn process_block_fees<B: FeeHistoryBackend>(
    backend: &B,
    cache: &dyn FeeCache,
    block_number: u64,
    percentiles: &[f64],
) -> Result<Option<ProcessedFees>, FeeHistoryError> {
    if let Some(slim) = cache.get(block_number).await {
        return Ok(Some(slim.process_percentiles(percentiles)));
    }

    let Some(block) = backend.block_by_number(block_number).await? else {
        debug!(block_number, "Block not yet produced, truncating response");
        return Ok(None);
    };
    let receipts = backend.receipts_for_block(block.header.hash).await?;
    let slim = Arc::new(SlimBlock::from_block_and_receipts(&block, &receipts));
    let fees = slim.process_percentiles(percentiles);
    cache.insert(block_number, slim).await;
    Ok(Some(fees))
}
