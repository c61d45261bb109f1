//! Bit-packed hit/miss flags.
//!
//! Each control byte carries the outcome of up to eight consecutive bytes,
//! most significant bit first. A set bit means the predictor was right and no
//! literal follows; a clear bit means the literal was written to the stream.

use bitvec::prelude::*;

/// Number of decisions packed into one control byte.
pub const GROUP_SIZE: usize = 8;

type FlagBits = BitArray<[u8; 1], Msb0>;

/// Cursor over the eight flags of one control byte.
#[derive(Debug, Clone, Copy)]
pub struct ControlFlags {
    bits: FlagBits,
    pos: usize,
}

impl Default for ControlFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlFlags {
    /// An empty group, all flags clear.
    pub fn new() -> Self {
        ControlFlags {
            bits: FlagBits::ZERO,
            pos: 0,
        }
    }

    /// Wraps a control byte read from a compressed stream.
    pub fn from_byte(byte: u8) -> Self {
        ControlFlags {
            bits: FlagBits::new([byte]),
            pos: 0,
        }
    }

    /// Records the next decision.
    pub fn push(&mut self, hit: bool) {
        debug_assert!(!self.is_full());
        self.bits.set(self.pos, hit);
        self.pos += 1;
    }

    /// Flag for the next unconsumed position, `None` once all eight are used.
    pub fn peek(&self) -> Option<bool> {
        (self.pos < GROUP_SIZE).then(|| self.bits[self.pos])
    }

    /// Moves past the flag returned by [`peek`](Self::peek).
    pub fn step(&mut self) {
        self.pos = (self.pos + 1).min(GROUP_SIZE);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pos
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    pub fn is_full(&self) -> bool {
        self.pos == GROUP_SIZE
    }

    /// Whether any set flag remains at or after the cursor.
    ///
    /// Encoders leave unused trailing positions clear, so a decoder that runs
    /// out of input while this holds was fed a cut-short stream.
    pub fn has_pending_hits(&self) -> bool {
        self.bits[self.pos..].any()
    }

    /// The packed control byte.
    pub fn to_byte(&self) -> u8 {
        self.bits.into_inner()[0]
    }
}
