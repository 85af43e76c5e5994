//! Chain backend interface consumed by the fee-history oracle.
//!
//! The oracle is generic over [`FeeHistoryBackend`] so it can run against a
//! node's internal chain state or, via [`ProviderBackend`], against any
//! JSON-RPC endpoint reachable through an alloy provider.

use alloy_eips::BlockId;
use alloy_primitives::B256;
use alloy_provider::Provider;
use alloy_rpc_types::{Block, TransactionReceipt};
use async_trait::async_trait;

use crate::errors::BackendError;

/// Read-only view of the chain the oracle computes statistics over.
///
/// Implementations must be safe for concurrent invocation from multiple
/// fetch workers.
#[async_trait]
pub trait FeeHistoryBackend: Send + Sync {
    /// Number of the most recently accepted block.
    async fn last_accepted_block_number(&self) -> Result<u64, BackendError>;

    /// Full block at the given height, or `None` if the chain has not
    /// produced it (e.g. the head moved back during a reorg).
    async fn block_by_number(&self, block_number: u64) -> Result<Option<Block>, BackendError>;

    /// Receipts for every transaction in the block, in transaction order.
    async fn receipts_for_block(
        &self,
        block_hash: B256,
    ) -> Result<Vec<TransactionReceipt>, BackendError>;
}

/// [`FeeHistoryBackend`] over any alloy provider.
///
/// Treats the provider's latest block as the accepted head.
///
/// # Examples
///
/// ```rust,ignore
/// use feescan::ProviderBackend;
/// use alloy_provider::ProviderBuilder;
///
/// let provider = ProviderBuilder::new().connect_http(rpc_url.parse()?);
/// let backend = ProviderBackend::new(provider);
/// ```
#[derive(Debug, Clone)]
pub struct ProviderBackend<P> {
    provider: P,
}

impl<P> ProviderBackend<P> {
    /// Wraps a provider as a fee-history backend.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P: Provider> FeeHistoryBackend for ProviderBackend<P> {
    async fn last_accepted_block_number(&self) -> Result<u64, BackendError> {
        self.provider
            .get_block_number()
            .await
            .map_err(BackendError::head_unavailable)
    }

    async fn block_by_number(&self, block_number: u64) -> Result<Option<Block>, BackendError> {
        self.provider
            .get_block_by_number(block_number.into())
            .full()
            .await
            .map_err(|e| BackendError::get_block_failed(block_number, e))
    }

    async fn receipts_for_block(
        &self,
        block_hash: B256,
    ) -> Result<Vec<TransactionReceipt>, BackendError> {
        self.provider
            .get_block_receipts(BlockId::Hash(block_hash.into()))
            .await
            .map_err(|e| BackendError::get_receipts_failed(block_hash, e))?
            .ok_or_else(|| BackendError::receipts_unavailable(block_hash))
    }
}
