//! Error types shared by the algorithm families.

use thiserror::Error;

/// Errors produced by the strict entry points of the library.
///
/// The default compression paths are total and never construct one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The supplied data was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A codec parameter is outside its supported range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Decoding stopped before the expected amount of output was produced.
    #[error("Truncated input: expected {expected} bytes, decoded {produced}")]
    TruncatedInput {
        /// Number of bytes the caller expected.
        expected: usize,
        /// Number of bytes actually decoded.
        produced: usize,
    },
}

/// Result type used across the library.
pub type Result<T> = std::result::Result<T, Error>;
