//! Test helpers for feescan integration tests
//!
//! Provides a mock chain backend and alloy block/receipt fixtures to enable
//! testing without real blockchain connections.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use alloy_consensus::transaction::Recovered;
use alloy_consensus::{Receipt, ReceiptEnvelope, ReceiptWithBloom, Signed, TxEip1559, TxEnvelope};
use alloy_primitives::{Address, Signature, B256, U256};
use alloy_rpc_types::{Block, BlockTransactions, Header, Transaction, TransactionReceipt};
use async_trait::async_trait;
use feescan::{BackendError, FeeHistoryBackend};

/// Gas used by the first (higher-tip) transaction of every mock block.
pub const TX0_GAS: u64 = 50_000;
/// Gas used by the second (lower-tip) transaction of every mock block.
pub const TX1_GAS: u64 = 25_000;
/// Gas limit of every mock block.
pub const BLOCK_GAS_LIMIT: u64 = 100_000;

/// Chain backend over a fixed set of in-memory blocks.
///
/// Block `n` carries two EIP-1559 transactions with effective tips
/// `50 * (n + 1)` and `10 * (n + 1)` (inserted in that order, i.e. unsorted
/// by tip), receipt gas of [`TX0_GAS`] and [`TX1_GAS`], and a base fee of
/// `100 + n`. Call counters let tests assert how often each backend
/// operation was invoked.
pub struct MockBackend {
    blocks: HashMap<u64, (Block, Vec<TransactionReceipt>)>,
    head: u64,
    missing: Vec<u64>,
    failing: Vec<u64>,
    pub head_calls: AtomicUsize,
    pub block_calls: AtomicUsize,
    pub receipt_calls: AtomicUsize,
}

impl MockBackend {
    /// Creates a backend holding blocks `0..count`, with the head at
    /// `count - 1`.
    pub fn with_blocks(count: u64) -> Self {
        let blocks = (0..count).map(|n| (n, mock_block(n))).collect();
        Self {
            blocks,
            head: count.saturating_sub(1),
            missing: Vec::new(),
            failing: Vec::new(),
            head_calls: AtomicUsize::new(0),
            block_calls: AtomicUsize::new(0),
            receipt_calls: AtomicUsize::new(0),
        }
    }

    /// Reports the given height as not found, as if a reorg removed it,
    /// while leaving the head untouched.
    #[allow(dead_code)]
    pub fn mark_missing(mut self, block_number: u64) -> Self {
        self.missing.push(block_number);
        self
    }

    /// Makes block retrieval fail for the given height.
    #[allow(dead_code)]
    pub fn fail_block(mut self, block_number: u64) -> Self {
        self.failing.push(block_number);
        self
    }

    /// Total number of backend invocations across all operations.
    #[allow(dead_code)]
    pub fn total_calls(&self) -> usize {
        self.head_calls.load(Ordering::Relaxed)
            + self.block_calls.load(Ordering::Relaxed)
            + self.receipt_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl FeeHistoryBackend for MockBackend {
    async fn last_accepted_block_number(&self) -> Result<u64, BackendError> {
        self.head_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.head)
    }

    async fn block_by_number(&self, block_number: u64) -> Result<Option<Block>, BackendError> {
        self.block_calls.fetch_add(1, Ordering::Relaxed);
        if self.missing.contains(&block_number) {
            return Ok(None);
        }
        if self.failing.contains(&block_number) {
            return Err(BackendError::get_block_failed(
                block_number,
                std::io::Error::other("injected failure"),
            ));
        }
        Ok(self
            .blocks
            .get(&block_number)
            .map(|(block, _)| block.clone()))
    }

    async fn receipts_for_block(
        &self,
        block_hash: B256,
    ) -> Result<Vec<TransactionReceipt>, BackendError> {
        self.receipt_calls.fetch_add(1, Ordering::Relaxed);
        self.blocks
            .values()
            .find(|(block, _)| block.header.hash == block_hash)
            .map(|(_, receipts)| receipts.clone())
            .ok_or_else(|| BackendError::receipts_unavailable(block_hash))
    }
}

/// Deterministic hash for a mock block number.
pub fn block_hash(block_number: u64) -> B256 {
    B256::from(U256::from(block_number + 1))
}

/// Base fee of mock block `n`.
#[allow(dead_code)]
pub fn base_fee(block_number: u64) -> U256 {
    U256::from(100 + block_number)
}

/// Expected reward row of mock block `n` for percentiles `[0, 50, 100]`.
///
/// The lower tip covers the 0th percentile; the higher tip's transaction
/// holds the rest of the block's gas.
#[allow(dead_code)]
pub fn reward_row(block_number: u64) -> Vec<U256> {
    let scale = block_number + 1;
    vec![
        U256::from(10 * scale),
        U256::from(50 * scale),
        U256::from(50 * scale),
    ]
}

/// An EIP-1559 transaction with the given effective tip (the fee cap is far
/// above any mock base fee).
pub fn test_tx(max_priority_fee_per_gas: u128) -> Transaction {
    let tx = TxEip1559 {
        chain_id: 1,
        gas_limit: BLOCK_GAS_LIMIT,
        max_fee_per_gas: 1_000_000,
        max_priority_fee_per_gas,
        ..Default::default()
    };
    let signature = Signature::new(U256::from(1u64), U256::from(1u64), false);
    let signed = Signed::new_unchecked(tx, signature, B256::ZERO);
    Transaction {
        inner: Recovered::new_unchecked(TxEnvelope::Eip1559(signed), Address::ZERO),
        block_hash: None,
        block_number: None,
        transaction_index: None,
        effective_gas_price: None,
    }
}

/// A receipt reporting the given gas usage.
pub fn test_receipt(gas_used: u64) -> TransactionReceipt {
    let inner = ReceiptEnvelope::Eip1559(ReceiptWithBloom {
        receipt: Receipt {
            status: true.into(),
            cumulative_gas_used: gas_used,
            logs: vec![],
        },
        logs_bloom: Default::default(),
    });
    TransactionReceipt {
        inner,
        transaction_hash: B256::ZERO,
        transaction_index: Some(0),
        block_hash: None,
        block_number: None,
        gas_used,
        effective_gas_price: 0,
        blob_gas_used: None,
        blob_gas_price: None,
        from: Address::ZERO,
        to: None,
        contract_address: None,
    }
}

fn mock_block(block_number: u64) -> (Block, Vec<TransactionReceipt>) {
    let scale = (block_number + 1) as u128;
    let header = alloy_consensus::Header {
        number: block_number,
        gas_used: TX0_GAS + TX1_GAS,
        gas_limit: BLOCK_GAS_LIMIT,
        base_fee_per_gas: Some(100 + block_number),
        ..Default::default()
    };
    let block = Block {
        header: Header {
            hash: block_hash(block_number),
            inner: header,
            total_difficulty: None,
            size: None,
        },
        uncles: vec![],
        transactions: BlockTransactions::Full(vec![test_tx(50 * scale), test_tx(10 * scale)]),
        withdrawals: None,
    };
    let receipts = vec![test_receipt(TX0_GAS), test_receipt(TX1_GAS)];
    (block, receipts)
}
