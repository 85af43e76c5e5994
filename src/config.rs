//! Oracle configuration and defaults.

/// Default maximum number of blocks a single fee-history call may request.
pub const DEFAULT_MAX_CALL_BLOCK_HISTORY: usize = 2048;

/// Default number of blocks behind the accepted head that remain queryable.
pub const DEFAULT_MAX_BLOCK_HISTORY: usize = 2048;

/// Default maximum number of worker tasks spun up to pull blocks for a
/// single fee-history calculation.
pub const DEFAULT_MAX_FETCHERS: usize = 4;

/// Default capacity of the in-memory fee-data cache, in blocks.
pub const DEFAULT_CACHE_CAPACITY: usize = 2048;

/// Configuration for the fee-history [`Oracle`](crate::Oracle).
///
/// # Examples
///
/// ```rust
/// use feescan::OracleConfig;
///
/// let config = OracleConfig::default()
///     .with_max_block_history(1024)
///     .with_max_fetchers(8);
/// assert_eq!(config.max_block_history, 1024);
/// ```
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Hard cap on the number of blocks a single call may request; larger
    /// requests are clamped, not rejected.
    pub max_call_block_history: usize,
    /// Width of the history window: requests reaching further back than this
    /// many blocks behind the accepted head fail.
    pub max_block_history: usize,
    /// Maximum number of concurrent block-fetching workers per call.
    pub max_fetchers: usize,
    /// Capacity of the in-memory fee-data cache, in blocks.
    pub cache_capacity: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            max_call_block_history: DEFAULT_MAX_CALL_BLOCK_HISTORY,
            max_block_history: DEFAULT_MAX_BLOCK_HISTORY,
            max_fetchers: DEFAULT_MAX_FETCHERS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl OracleConfig {
    /// Sets the hard cap on blocks per call.
    pub fn with_max_call_block_history(mut self, max_call_block_history: usize) -> Self {
        self.max_call_block_history = max_call_block_history;
        self
    }

    /// Sets the queryable history window, in blocks behind the head.
    pub fn with_max_block_history(mut self, max_block_history: usize) -> Self {
        self.max_block_history = max_block_history;
        self
    }

    /// Sets the per-call concurrency cap for block fetching.
    pub fn with_max_fetchers(mut self, max_fetchers: usize) -> Self {
        self.max_fetchers = max_fetchers;
        self
    }

    /// Sets the fee-data cache capacity, in blocks.
    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }
}
