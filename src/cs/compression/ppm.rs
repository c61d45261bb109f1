//! Prediction by Partial Matching (PPM) compression with a hashed predictor.
//!
//! For every input byte the compressor hashes the preceding `order` bytes,
//! looks up a single predicted byte in a fixed-size table and records whether
//! the prediction was right. Correct predictions cost one bit; wrong ones cost
//! one bit plus the literal byte, and the table slot is overwritten with the
//! actual byte. The decoder replays the same table updates, so nothing but the
//! flags and the literals has to be stored.
//!
//! There is no entropy coding stage and no header: random data grows by about
//! one byte in eight, and a stream can only be decoded with the parameters
//! that produced it.
//!
//! # Stream layout
//!
//! ```text
//! [ctrl][literal]*  [ctrl][literal]*  ...
//! ```
//!
//! Each control byte holds eight hit/miss flags, most significant bit first,
//! and is followed by one literal per clear flag. The final control byte is
//! always present, so empty input compresses to a single `0x00`. Unused
//! trailing flags are clear, which the decoder cannot tell apart from misses:
//! it stops when the input runs out.
//!
//! # Examples
//!
//! ```
//! use hashppm::cs::compression::ppm::{compress, decompress};
//!
//! let compressed = compress(&[0x41; 9]);
//! assert_eq!(compressed, [0x0f, 0x41, 0x41, 0x41, 0x41, 0x80]);
//! assert_eq!(decompress(&compressed), [0x41; 9]);
//! ```

mod context;
mod control;
pub mod decoder;
pub mod encoder;

pub use decoder::PpmDecoder;
pub use encoder::{max_compressed_len, PpmEncoder};

use crate::cs::compression::{Compression, Result};
use crate::cs::error::Error;

/// Number of preceding bytes forming the context.
pub const ORDER: u32 = 3;

/// Width of the predictor table index; the table has `1 << NUM_BITS` slots.
pub const NUM_BITS: u32 = 12;

/// Odd multiplier spreading context bits before the index is taken.
pub const MIXER: u64 = 0xff51afd7ed558ccd;

/// Parameters shared by an encoder and the decoder that reads its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpmParams {
    /// Context length in bytes, `1..=8`.
    pub order: u32,
    /// Predictor table index width, `1..=24`.
    pub num_bits: u32,
    /// Odd hash multiplier.
    pub mixer: u64,
}

impl Default for PpmParams {
    fn default() -> Self {
        PpmParams {
            order: ORDER,
            num_bits: NUM_BITS,
            mixer: MIXER,
        }
    }
}

impl PpmParams {
    /// Checks that the parameters describe a usable model.
    pub fn validate(&self) -> Result<()> {
        if !(1..=8).contains(&self.order) {
            return Err(Error::InvalidParameter(format!(
                "order must be in 1..=8, got {}",
                self.order
            )));
        }
        if !(1..=24).contains(&self.num_bits) {
            return Err(Error::InvalidParameter(format!(
                "num_bits must be in 1..=24, got {}",
                self.num_bits
            )));
        }
        if self.mixer % 2 == 0 {
            return Err(Error::InvalidParameter(format!(
                "mixer must be odd, got {:#x}",
                self.mixer
            )));
        }
        Ok(())
    }
}

/// A builder for [`HashPredictor`], starting from the reference parameters.
#[derive(Debug, Clone, Default)]
pub struct HashPredictorBuilder {
    params: PpmParams,
}

impl HashPredictorBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the context length in bytes.
    pub fn order(mut self, order: u32) -> Self {
        self.params.order = order;
        self
    }

    /// Sets the predictor table index width.
    pub fn num_bits(mut self, num_bits: u32) -> Self {
        self.params.num_bits = num_bits;
        self
    }

    /// Sets the hash multiplier.
    pub fn mixer(mut self, mixer: u64) -> Self {
        self.params.mixer = mixer;
        self
    }

    /// Validates the parameters and builds the codec.
    pub fn build(self) -> Result<HashPredictor> {
        self.params.validate()?;
        Ok(HashPredictor {
            params: self.params,
        })
    }
}

/// Hash-predicting PPM codec with fixed parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashPredictor {
    params: PpmParams,
}

impl HashPredictor {
    /// Codec using the reference parameters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> HashPredictorBuilder {
        HashPredictorBuilder::new()
    }

    pub fn params(&self) -> &PpmParams {
        &self.params
    }

    /// Fresh incremental encoder for these parameters.
    pub fn encoder(&self) -> PpmEncoder {
        PpmEncoder::from_validated(&self.params)
    }

    /// Fresh incremental decoder for these parameters.
    pub fn decoder(&self) -> PpmDecoder {
        PpmDecoder::from_validated(&self.params)
    }

    /// Compresses `input` in one pass. Never fails.
    pub fn compress_bytes(&self, input: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(max_compressed_len(input.len()));
        let mut encoder = self.encoder();
        encoder.encode_into(input, &mut out);
        encoder.finish_into(&mut out);
        log::debug!("ppm: compressed {} bytes into {}", input.len(), out.len());
        out
    }

    /// Decompresses `input`, returning whatever could be decoded.
    ///
    /// Malformed or cut-short input yields a shorter or wrong result rather
    /// than an error.
    pub fn decompress_bytes(&self, input: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(input.len() * 2);
        self.decoder().decode_into(input, &mut out);
        log::debug!("ppm: decompressed {} bytes into {}", input.len(), out.len());
        out
    }

    /// Decompresses `input` and checks the result against a length known out
    /// of band.
    pub fn decompress_exact(&self, input: &[u8], expected_len: usize) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(expected_len);
        let mut decoder = self.decoder();
        decoder.decode_into(input, &mut out);

        if out.len() < expected_len || decoder.is_truncated() {
            log::debug!(
                "ppm: truncated stream, expected {} bytes, decoded {}",
                expected_len,
                out.len()
            );
            return Err(Error::TruncatedInput {
                expected: expected_len,
                produced: out.len(),
            });
        }
        if out.len() > expected_len {
            return Err(Error::InvalidInput(format!(
                "stream decodes to {} bytes, expected {}",
                out.len(),
                expected_len
            )));
        }
        Ok(out)
    }
}

impl Compression for HashPredictor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.compress_bytes(data))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(self.decompress_bytes(data))
    }
}

/// Compresses `input` with the reference parameters.
///
/// Never fails; the output may be larger than the input, by at most one
/// control byte per eight input bytes plus one.
pub fn compress(input: &[u8]) -> Vec<u8> {
    HashPredictor::new().compress_bytes(input)
}

/// Decompresses output of [`compress`].
///
/// Never fails. Decoding stops as soon as the input runs out, so truncated or
/// foreign data produces a partial result instead of an error.
pub fn decompress(input: &[u8]) -> Vec<u8> {
    HashPredictor::new().decompress_bytes(input)
}
