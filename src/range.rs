//! Block-range resolution against the chain head and history limits.

use tracing::debug;

use crate::backend::FeeHistoryBackend;
use crate::config::OracleConfig;
use crate::errors::FeeHistoryError;

/// Selector for the newest block of a requested fee-history range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSelector {
    /// An absolute block number.
    Number(u64),
    /// The most recent block. The backend exposes no unaccepted state, so
    /// this resolves to the last accepted block.
    Latest,
    /// The pending block. Pending data is unsupported; the window shifts
    /// back one block and ends at the last accepted block instead.
    Pending,
    /// The most recently accepted block.
    Accepted,
}

/// Resolves a caller-supplied `(last_block, blocks)` request to an absolute,
/// clamped interval ending at `last_block` and spanning `blocks` heights.
///
/// Returns `(0, 0)` with no error when there are no retrievable blocks in
/// the requested range. Any error return carries no partial range. The
/// returned count is always fetchable: the interval never precedes genesis
/// and never reaches further back than the configured history window allows.
pub(crate) async fn resolve_block_range<B: FeeHistoryBackend>(
    backend: &B,
    config: &OracleConfig,
    mut last_block: BlockSelector,
    mut blocks: usize,
) -> Result<(u64, usize), FeeHistoryError> {
    if last_block == BlockSelector::Pending {
        // Pending block not supported by the backend; process until the
        // latest block and shrink the window accordingly.
        last_block = BlockSelector::Latest;
        blocks = blocks.saturating_sub(1);
    }
    if blocks == 0 {
        return Ok((0, 0));
    }

    let head = backend.last_accepted_block_number().await?;
    let max_query_depth = config.max_block_history.saturating_sub(1) as u64;
    let last = match last_block {
        BlockSelector::Latest | BlockSelector::Pending | BlockSelector::Accepted => head,
        BlockSelector::Number(requested) => {
            if head > max_query_depth && head - max_query_depth > requested {
                // The requested last block reaches further back than the
                // history window past the accepted head. Some blocks past
                // this point may still be fetched, since fetching starts at
                // the oldest block of the clamped range.
                return Err(FeeHistoryError::BeyondHistoricalLimit { requested, head });
            }
            if requested > head {
                return Err(FeeHistoryError::RequestBeyondHead { requested, head });
            }
            requested
        }
    };

    // Ensure we are not trying to retrieve before genesis.
    if blocks as u64 > last + 1 {
        blocks = (last + 1) as usize;
    }
    // Truncate the range if it extends past the history window from head.
    let oldest = last + 1 - blocks as u64;
    let query_depth = head - oldest;
    if query_depth > max_query_depth {
        blocks -= (query_depth - max_query_depth) as usize;
    }
    // blocks cannot reach zero here: the requested last block passed the
    // historical-limit check above, so it is itself fetchable.
    debug!(last, blocks, head, "Resolved block range");
    Ok((last, blocks))
}
