//! Error type shared by every fallible entry point of the crate.
//!
//! Errors fall into three groups:
//! - invalid input (alphabet definition, symbols outside the alphabet),
//! - resource exhaustion (tabulation matrix too large to allocate),
//! - configuration (thread pool, metric mismatches).
//!
//! All input validation happens before any parallel work starts, so an
//! error never leaves a partially filled table behind.

use thiserror::Error;

use crate::metric::Metric;
use crate::sequence::Side;

/// Errors returned by the alignment engine.
#[derive(Debug, Error)]
pub enum DpError {
    /// The alphabet declaration contains no symbols.
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    /// The alphabet declaration lists the same symbol twice.
    #[error("alphabet declares symbol {symbol:?} more than once")]
    DuplicateSymbol {
        /// The repeated symbol, rendered as a char when printable.
        symbol: char,
    },

    /// A sequence contains a symbol the alphabet does not declare.
    #[error("sequence {side} has symbol {symbol:?} at position {position}, which is not in the alphabet")]
    UnknownSymbol {
        /// Which input sequence the symbol came from.
        side: Side,
        /// 0-based offset of the symbol in that sequence.
        position: usize,
        /// The offending symbol.
        symbol: char,
    },

    /// The (n+1)×(m+1) table exceeds the configured cell limit, its size
    /// does not fit in `usize`, or n + m does not fit in a `u32` cell.
    #[error("tabulation matrix of {rows}x{cols} cells exceeds the limit of {limit} cells")]
    TableTooLarge {
        /// Requested row count (n + 1).
        rows: usize,
        /// Requested column count (m + 1).
        cols: usize,
        /// Configured maximum number of cells.
        limit: usize,
    },

    /// The |Σ|×(m+1) nearest-match index exceeds the configured cell limit.
    #[error("nearest-match index of {symbols}x{cols} cells exceeds the limit of {limit} cells")]
    IndexTooLarge {
        /// Alphabet size (index rows).
        symbols: usize,
        /// Index column count (m + 1).
        cols: usize,
        /// Configured maximum number of cells.
        limit: usize,
    },

    /// The allocator refused the matrix or index buffer.
    #[error("failed to allocate {cells} cells: {source}")]
    AllocationFailed {
        /// Number of `u32` cells that were requested.
        cells: usize,
        #[source]
        source: std::collections::TryReserveError,
    },

    /// A thread count of zero was requested.
    #[error("thread count must be at least 1")]
    InvalidThreadCount,

    /// The worker pool could not be created.
    #[cfg(feature = "parallel")]
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// An operation that needs one metric's table was handed another.
    #[error("operation requires a {expected} table, found {found}")]
    MetricMismatch {
        /// Metric the operation works on.
        expected: Metric,
        /// Metric the table was computed for.
        found: Metric,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DpError>;
