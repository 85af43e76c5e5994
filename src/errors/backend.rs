//! Error types for chain backend operations.
//!
//! These capture failures of the block and receipt retrieval interface the
//! oracle consumes. They carry the failed operation's context and the
//! underlying cause so RPC-layer callers can log or retry on a different
//! node.

use alloy_primitives::B256;

/// Errors that can occur while retrieving blocks or receipts from the chain
/// backend.
///
/// The oracle passes these through verbatim; retrying is a policy decision
/// left to the caller.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Failed to determine the last accepted block number.
    #[error("Failed to get last accepted block number")]
    HeadUnavailable {
        /// The underlying backend error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to fetch a block by number.
    ///
    /// This is different from a block that does not exist - it indicates the
    /// retrieval itself failed, not that the chain has not produced the
    /// height.
    #[error("Failed to fetch block {block_number}")]
    GetBlockFailed {
        /// The block number we tried to fetch
        block_number: u64,
        /// The underlying backend error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to fetch the receipts of a block.
    #[error("Failed to fetch receipts for block {block_hash}")]
    GetReceiptsFailed {
        /// Hash of the block whose receipts we tried to fetch
        block_hash: B256,
        /// The underlying backend error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The backend returned no receipts for a block it previously served.
    #[error("Receipts not available for block {block_hash}")]
    ReceiptsUnavailable {
        /// Hash of the block whose receipts were not available
        block_hash: B256,
    },
}

impl BackendError {
    /// Helper to create a `HeadUnavailable` error from any error type.
    pub fn head_unavailable(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        BackendError::HeadUnavailable {
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBlockFailed` error from any error type.
    pub fn get_block_failed(
        block_number: u64,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        BackendError::GetBlockFailed {
            block_number,
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetReceiptsFailed` error from any error type.
    pub fn get_receipts_failed(
        block_hash: B256,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        BackendError::GetReceiptsFailed {
            block_hash,
            source: Box::new(source),
        }
    }

    /// Helper to create a `ReceiptsUnavailable` error.
    pub fn receipts_unavailable(block_hash: B256) -> Self {
        BackendError::ReceiptsUnavailable { block_hash }
    }
}
