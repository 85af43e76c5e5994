//! Error types for the feescan library.
//!
//! Each failure mode of a fee-history request maps to a distinct variant so
//! that RPC-layer callers can surface or retry selectively:
//!
//! - [`FeeHistoryError`] - Errors from fee-history requests (invalid
//!   percentiles, range violations, backend failures)
//! - [`BackendError`] - Errors from block and receipt retrieval, passed
//!   through verbatim
//!
//! "No data but also no error" outcomes (empty ranges, reorg-induced missing
//! blocks) are never represented as errors; they produce empty results.
//!
//! # Examples
//!
//! ```rust,ignore
//! use feescan::{BlockSelector, FeeHistoryError};
//!
//! match oracle.fee_history(10, BlockSelector::Latest, &[50.0]).await {
//!     Ok(history) => println!("oldest block: {}", history.oldest_block),
//!     Err(FeeHistoryError::RequestBeyondHead { requested, head }) => {
//!         eprintln!("requested {requested} but head is {head}");
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

mod backend;
mod history;

pub use backend::BackendError;
pub use history::FeeHistoryError;
