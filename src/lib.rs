//! Fee-history statistics for EVM chains.
//!
//! Given a range of recent blocks, the [`Oracle`] computes per block the base
//! fee, the gas-used ratio, and requested percentiles of the effective
//! priority fee paid by transactions, weighted by gas consumption. RPC
//! fee-estimation endpoints and wallets use this data to recommend
//! transaction fees.
//!
//! Blocks are retrieved through the [`FeeHistoryBackend`] trait with bounded
//! parallelism, reduced to a minimal fee-relevant projection ([`SlimBlock`]),
//! and cached so repeated queries over overlapping ranges stay cheap.
//!
//! # Examples
//!
//! ```rust,ignore
//! use feescan::{BlockSelector, Oracle, OracleConfig, ProviderBackend};
//! use alloy_provider::ProviderBuilder;
//! use std::sync::Arc;
//!
//! let provider = ProviderBuilder::new().connect_http(rpc_url.parse()?);
//! let backend = Arc::new(ProviderBackend::new(provider));
//! let oracle = Oracle::new(backend, OracleConfig::default());
//!
//! let history = oracle
//!     .fee_history(10, BlockSelector::Latest, &[25.0, 50.0, 75.0])
//!     .await?;
//! println!("oldest block: {}", history.oldest_block);
//! ```

mod backend;
mod cache;
mod config;
mod errors;
mod fees;
mod oracle;
mod pipeline;
mod range;
pub(crate) mod spans;

pub use backend::*;
pub use cache::*;
pub use config::*;
pub use errors::*;
pub use fees::*;
pub use oracle::*;
pub use range::*;
