//! Context tracking and the hashed predictor table.
//!
//! The context is a rolling window of the most recent `order` bytes held in a
//! 64-bit register. It is multiplied by an odd mixing constant and the top
//! `num_bits` bits of the product select a slot in a table of single-byte
//! predictions. Collisions silently overwrite the slot.
//!
//! Encoder and decoder must call [`ContextModel::key`], [`ContextModel::update`]
//! and [`ContextModel::advance`] in the same order with the same bytes, otherwise
//! their tables diverge and decoding produces garbage.

use super::PpmParams;

/// Computes the table index for `context`.
///
/// The result is always in `0..(1 << num_bits)`.
#[inline]
pub fn hash_context(context: u64, mixer: u64, num_bits: u32) -> usize {
    (context.wrapping_mul(mixer) >> (64 - num_bits)) as usize
}

/// Shifts `byte` into `context`, dropping the oldest byte beyond `mask`.
#[inline]
pub fn advance_context(context: u64, byte: u8, mask: u64) -> u64 {
    ((context << 8) + u64::from(byte)) & mask
}

/// Mask keeping the low `order` bytes of a context register.
#[inline]
pub fn context_mask(order: u32) -> u64 {
    u64::MAX >> (64 - order * 8)
}

/// Rolling context plus the predictor table it indexes.
#[derive(Debug, Clone)]
pub struct ContextModel {
    context: u64,
    mask: u64,
    mixer: u64,
    num_bits: u32,
    table: Box<[u8]>,
}

impl ContextModel {
    /// Creates a model with an empty context and a zeroed table.
    pub fn new(params: &PpmParams) -> Self {
        ContextModel {
            context: 0,
            mask: context_mask(params.order),
            mixer: params.mixer,
            num_bits: params.num_bits,
            table: vec![0u8; 1 << params.num_bits].into_boxed_slice(),
        }
    }

    /// Current context value.
    #[cfg(test)]
    pub fn context(&self) -> u64 {
        self.context
    }

    /// Table index for the current context.
    #[inline]
    pub fn key(&self) -> usize {
        hash_context(self.context, self.mixer, self.num_bits)
    }

    /// Byte stored at `key`.
    #[inline]
    pub fn predict(&self, key: usize) -> u8 {
        self.table[key]
    }

    /// Overwrites the prediction at `key`.
    #[inline]
    pub fn update(&mut self, key: usize, byte: u8) {
        self.table[key] = byte;
    }

    /// Pushes the actual byte into the context.
    #[inline]
    pub fn advance(&mut self, byte: u8) {
        self.context = advance_context(self.context, byte, self.mask);
    }

    #[cfg(test)]
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Returns the model to its initial state.
    pub fn reset(&mut self) {
        self.context = 0;
        self.table.fill(0);
    }
}
