//! Encoding direction of the hash-predicting compressor.

use super::context::ContextModel;
use super::control::ControlFlags;
use super::PpmParams;
use crate::cs::compression::{Result, StreamingCompression};

/// Incremental encoder.
///
/// Bytes are emitted one group at a time: a control byte followed by the
/// literals of the misses in that group. The group under construction keeps a
/// reserved control slot at index 0 that is patched once the group closes.
#[derive(Debug, Clone)]
pub struct PpmEncoder {
    model: ContextModel,
    flags: ControlFlags,
    group: Vec<u8>,
}

impl PpmEncoder {
    /// Creates an encoder, rejecting parameters that fail
    /// [`PpmParams::validate`].
    pub fn new(params: &PpmParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::from_validated(params))
    }

    pub(crate) fn from_validated(params: &PpmParams) -> Self {
        let mut group = Vec::with_capacity(1 + super::control::GROUP_SIZE);
        group.push(0);
        PpmEncoder {
            model: ContextModel::new(params),
            flags: ControlFlags::new(),
            group,
        }
    }

    /// Encodes `input`, appending every completed group to `out`.
    pub fn encode_into(&mut self, input: &[u8], out: &mut Vec<u8>) {
        for &byte in input {
            let key = self.model.key();
            if self.model.predict(key) == byte {
                self.flags.push(true);
            } else {
                self.model.update(key, byte);
                self.flags.push(false);
                self.group.push(byte);
            }

            if self.flags.is_full() {
                self.flush_group(out);
            }

            self.model.advance(byte);
        }
    }

    /// Appends the pending group, even if it holds no decisions, and resets
    /// the encoder.
    pub fn finish_into(&mut self, out: &mut Vec<u8>) {
        self.flush_group(out);
        self.model.reset();
    }

    fn flush_group(&mut self, out: &mut Vec<u8>) {
        self.group[0] = self.flags.to_byte();
        log::trace!(
            "ppm: control {:#04x} with {} literal(s)",
            self.group[0],
            self.group.len() - 1
        );
        out.extend_from_slice(&self.group);
        self.group.truncate(1);
        self.group[0] = 0;
        self.flags = ControlFlags::new();
    }
}

impl StreamingCompression for PpmEncoder {
    fn process(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(max_compressed_len(chunk.len()));
        self.encode_into(chunk, &mut out);
        Ok(out)
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.group.len());
        self.finish_into(&mut out);
        Ok(out)
    }
}

/// Upper bound on the compressed size of `len` input bytes.
pub fn max_compressed_len(len: usize) -> usize {
    len + len / 8 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(input: &[u8]) -> Vec<u8> {
        let mut encoder = PpmEncoder::new(&PpmParams::default()).unwrap();
        let mut out = Vec::new();
        encoder.encode_into(input, &mut out);
        encoder.finish_into(&mut out);
        out
    }

    #[test]
    fn test_empty_input_emits_reserved_control_byte() {
        assert_eq!(encode(b""), vec![0x00]);
    }

    #[test]
    fn test_single_byte() {
        assert_eq!(encode(b"x"), vec![0x00, b'x']);
    }

    #[test]
    fn test_zero_bytes_hit_zeroed_table() {
        assert_eq!(encode(&[0, 0, 0, 0]), vec![0xf0]);
    }

    #[test]
    fn test_full_group_reserves_next_slot() {
        assert_eq!(encode(&[0x41; 8]), vec![0x0f, 0x41, 0x41, 0x41, 0x41, 0x00]);
        assert_eq!(encode(&[0x41; 9]), vec![0x0f, 0x41, 0x41, 0x41, 0x41, 0x80]);
    }

    #[test]
    fn test_groups_only_emitted_when_complete() {
        let mut encoder = PpmEncoder::new(&PpmParams::default()).unwrap();
        let mut out = Vec::new();
        encoder.encode_into(b"abcdefg", &mut out);
        assert!(out.is_empty());
        encoder.encode_into(b"h", &mut out);
        assert_eq!(out.len(), 9);
        assert_eq!(out[0], 0x00);
        assert_eq!(&out[1..], b"abcdefgh");
    }

    #[test]
    fn test_finish_resets_state() {
        let mut encoder = PpmEncoder::new(&PpmParams::default()).unwrap();
        let first = encoder.process(b"abcabcabcabc").unwrap();
        let first_tail = encoder.finish().unwrap();
        let second = encoder.process(b"abcabcabcabc").unwrap();
        let second_tail = encoder.finish().unwrap();
        assert_eq!(first, second);
        assert_eq!(first_tail, second_tail);
    }

    #[test]
    fn test_new_rejects_invalid_params() {
        use crate::cs::error::Error;

        let defaults = PpmParams::default();
        for params in [
            PpmParams { order: 0, ..defaults },
            PpmParams { order: 9, ..defaults },
            PpmParams { num_bits: 0, ..defaults },
            PpmParams { num_bits: 64, ..defaults },
            PpmParams { mixer: 2, ..defaults },
        ] {
            assert!(matches!(
                PpmEncoder::new(&params),
                Err(Error::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_max_compressed_len() {
        assert_eq!(max_compressed_len(0), 1);
        assert_eq!(max_compressed_len(8), 10);
        let distinct: Vec<u8> = (1..=64).collect();
        assert!(encode(&distinct).len() <= max_compressed_len(distinct.len()));
        assert_eq!(encode(&distinct).len(), max_compressed_len(distinct.len()));
    }
}
