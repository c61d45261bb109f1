//! Compression algorithms implementation.
//!
//! This module provides lossless byte-stream compressors:
//! - Hash-predicting PPM (Prediction by Partial Matching) with a bit-packed
//!   hit/miss control stream
//!
//! # Examples
//!
//! ```rust
//! use hashppm::cs::compression::ppm::{compress, decompress};
//!
//! let input = b"abcabcabcabc";
//! let compressed = compress(input);
//! assert!(compressed.len() < input.len());
//! assert_eq!(decompress(&compressed), input);
//! ```

use crate::cs::error::Error;

/// Result type for compression operations
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for compression algorithms
pub trait Compression {
    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the compressed data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Trait for streaming compression algorithms
pub trait StreamingCompression {
    /// Process a chunk of input data
    fn process(&mut self, chunk: &[u8]) -> Result<Vec<u8>>;

    /// Finish processing and return any remaining data
    fn finish(&mut self) -> Result<Vec<u8>>;
}

pub mod ppm;
pub use ppm::{HashPredictor, PpmDecoder, PpmEncoder, PpmParams};
