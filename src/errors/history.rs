//! Error types for fee-history requests.

use super::BackendError;

/// Errors that can occur while serving a fee-history request.
///
/// Percentile violations are caller mistakes and are reported synchronously,
/// before any backend call is made. Range violations depend on the current
/// chain head and the configured history window. Backend failures are passed
/// through verbatim.
#[derive(Debug, thiserror::Error)]
pub enum FeeHistoryError {
    /// A requested reward percentile lies outside `[0, 100]`.
    #[error("Invalid reward percentile: {value}")]
    PercentileOutOfRange {
        /// The offending percentile value
        value: f64,
    },

    /// The requested reward percentiles are not in ascending order.
    #[error("Invalid reward percentile order: #{prev_index}:{prev} > #{index}:{value}")]
    PercentilesNotAscending {
        /// Index of the larger, earlier percentile
        prev_index: usize,
        /// The larger, earlier percentile value
        prev: f64,
        /// Index of the smaller, later percentile
        index: usize,
        /// The smaller, later percentile value
        value: f64,
    },

    /// The requested last block has not been produced yet.
    #[error("Request beyond head block: requested {requested}, head {head}")]
    RequestBeyondHead {
        /// The requested last block number
        requested: u64,
        /// The last accepted block number
        head: u64,
    },

    /// The requested last block is older than the configured history window.
    #[error("Request beyond historical limit: requested {requested}, head {head}")]
    BeyondHistoricalLimit {
        /// The requested last block number
        requested: u64,
        /// The last accepted block number
        head: u64,
    },

    /// Block or receipt retrieval failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}
