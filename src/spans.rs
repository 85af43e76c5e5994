//! Tracing span creation helpers for fee-history operations.
//!
//! Telemetry is kept orthogonal to business logic: instead of `#[instrument]`
//! attributes on the functions themselves, each instrumented operation has a
//! span helper here, attached with `tracing::Instrument` so the futures stay
//! `Send`.

use tracing::{Level, Span};

/// Create span for a fee-history request.
///
/// Parent: None (root span for this operation)
/// Children: fetch_block_range span
#[inline]
pub(crate) fn fee_history(block_count: usize, percentile_count: usize) -> Span {
    tracing::span!(
        Level::INFO,
        "feescan.fee_history",
        block_count,
        percentile_count,
    )
}

/// Create span for fetching a resolved block range.
///
/// Parent: fee_history span
/// Children: fetch_worker spans (one per worker task)
#[inline]
pub(crate) fn fetch_block_range(oldest_block: u64, last_block: u64) -> Span {
    tracing::debug_span!("feescan.fetch_block_range", oldest_block, last_block)
}

/// Create span for a single block-fetching worker task.
///
/// Parent: fetch_block_range span
/// Children: backend calls for block and receipt retrieval
#[inline]
pub(crate) fn fetch_worker(worker: usize) -> Span {
    tracing::debug_span!("feescan.fetch_worker", worker)
}
