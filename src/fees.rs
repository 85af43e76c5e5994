//! Per-block fee-data extraction and percentile aggregation.
//!
//! A retrieved block plus its receipts is reduced to a [`SlimBlock`], the
//! minimal projection needed for fee statistics. Slim blocks are immutable
//! once built and are what the cache stores, so a block is processed at most
//! once regardless of how many fee-history calls touch it. Percentile
//! aggregation runs per call on top of the cached projection, because the
//! requested percentiles vary per request.

use alloy_primitives::U256;
use alloy_rpc_types::{Block, TransactionReceipt, TransactionTrait};

/// A transaction's gas consumption paired with its effective priority fee
/// per gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxGasAndReward {
    /// Gas used by the transaction, from its receipt
    pub gas_used: u64,
    /// Effective priority fee per gas against the block's base fee
    pub reward: U256,
}

/// Minimal fee-relevant projection of a block and its receipts.
///
/// Immutable after construction and safe to share across concurrent readers
/// without copying; the cache hands it out as `Arc<SlimBlock>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlimBlock {
    /// Total gas used by the block
    pub gas_used: u64,
    /// Gas limit of the block
    pub gas_limit: u64,
    /// Base fee per gas; zero for blocks that predate base fees
    pub base_fee: U256,
    /// Transactions sorted ascending by reward
    pub txs: Vec<TxGasAndReward>,
}

/// Fee statistics of a single processed block.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedFees {
    /// Base fee per gas of the block
    pub base_fee: U256,
    /// gasUsed / gasLimit of the block
    pub gas_used_ratio: f64,
    /// One reward value per requested percentile; empty when none were
    /// requested
    pub reward: Vec<U256>,
}

impl SlimBlock {
    /// Reduces a block and its receipts to a [`SlimBlock`].
    ///
    /// Receipts must parallel the block's transactions (same order, same
    /// length); that is the backend's contract and is not re-validated here.
    /// Transactions whose fee cap is below the base fee contribute a zero
    /// reward.
    pub fn from_block_and_receipts(block: &Block, receipts: &[TransactionReceipt]) -> Self {
        let base_fee_per_gas = block.header.base_fee_per_gas.unwrap_or_default();
        let mut txs: Vec<TxGasAndReward> = block
            .transactions
            .txns()
            .zip(receipts)
            .map(|(tx, receipt)| TxGasAndReward {
                gas_used: receipt.gas_used,
                reward: U256::from(
                    tx.effective_tip_per_gas(base_fee_per_gas).unwrap_or_default(),
                ),
            })
            .collect();
        txs.sort_unstable_by_key(|tx| tx.reward);
        Self {
            gas_used: block.header.gas_used,
            gas_limit: block.header.gas_limit,
            base_fee: U256::from(base_fee_per_gas),
            txs,
        }
    }

    /// Computes the block's fee statistics for the given percentiles.
    ///
    /// `percentiles` must be sorted ascending; the oracle validates this
    /// before any block is processed. The reward-sorted transaction list is
    /// walked once: a cursor advances while the cumulative gas used stays
    /// below each percentile's share of the block's gas, so the whole
    /// computation is O(transactions + percentiles).
    pub fn process_percentiles(&self, percentiles: &[f64]) -> ProcessedFees {
        let mut results = ProcessedFees {
            base_fee: self.base_fee,
            gas_used_ratio: self.gas_used as f64 / self.gas_limit as f64,
            reward: Vec::new(),
        };
        if percentiles.is_empty() {
            // rewards were not requested
            return results;
        }

        if self.txs.is_empty() {
            // an all-zero row if there are no transactions to gather data from
            results.reward = vec![U256::ZERO; percentiles.len()];
            return results;
        }

        results.reward.reserve(percentiles.len());
        let mut tx_index = 0;
        let mut sum_gas_used = self.txs[0].gas_used;
        for &percentile in percentiles {
            let threshold_gas_used = (self.gas_used as f64 * percentile / 100.0) as u64;
            while sum_gas_used < threshold_gas_used && tx_index < self.txs.len() - 1 {
                tx_index += 1;
                sum_gas_used += self.txs[tx_index].gas_used;
            }
            results.reward.push(self.txs[tx_index].reward);
        }
        results
    }
}
