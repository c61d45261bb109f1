//! Decoding direction of the hash-predicting compressor.

use super::context::ContextModel;
use super::control::ControlFlags;
use super::PpmParams;
use crate::cs::compression::{Result, StreamingCompression};

/// Incremental decoder.
///
/// The stream carries no length, so decoding simply stops when a literal is
/// needed and the input is exhausted. Fed in chunks, the decoder suspends at
/// that point and resumes when more input arrives.
#[derive(Debug, Clone)]
pub struct PpmDecoder {
    model: ContextModel,
    flags: Option<ControlFlags>,
}

impl PpmDecoder {
    /// Creates a decoder, rejecting parameters that fail
    /// [`PpmParams::validate`].
    pub fn new(params: &PpmParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::from_validated(params))
    }

    pub(crate) fn from_validated(params: &PpmParams) -> Self {
        PpmDecoder {
            model: ContextModel::new(params),
            flags: None,
        }
    }

    /// Decodes as much of `input` as possible, appending to `out`.
    pub fn decode_into(&mut self, input: &[u8], out: &mut Vec<u8>) {
        let mut input = input.iter().copied();

        loop {
            let mut flags = match self.flags.take() {
                Some(flags) => flags,
                None => match input.next() {
                    Some(ctrl) => ControlFlags::from_byte(ctrl),
                    None => return,
                },
            };

            while let Some(hit) = flags.peek() {
                let key = self.model.key();
                let byte = if hit {
                    self.model.predict(key)
                } else {
                    match input.next() {
                        Some(literal) => {
                            self.model.update(key, literal);
                            literal
                        }
                        // Suspend on this flag until the literal arrives.
                        None => {
                            self.flags = Some(flags);
                            return;
                        }
                    }
                };
                flags.step();
                self.model.advance(byte);
                out.push(byte);
            }
        }
    }

    /// Whether decoding stopped where no encoder output can end.
    ///
    /// A well-formed stream runs out of input either between groups or on a
    /// clear flag with only clear flags after it.
    pub fn is_truncated(&self) -> bool {
        self.flags
            .as_ref()
            .is_some_and(ControlFlags::has_pending_hits)
    }

    /// Returns the decoder to its initial state.
    pub fn reset(&mut self) {
        self.model.reset();
        self.flags = None;
    }
}

impl StreamingCompression for PpmDecoder {
    fn process(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(chunk.len() * 2);
        self.decode_into(chunk, &mut out);
        Ok(out)
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        if self.is_truncated() {
            log::debug!("ppm: decoder finished with predicted bytes outstanding");
        }
        self.reset();
        Ok(Vec::new())
    }
}
