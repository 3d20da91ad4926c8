//! Deterministic workload generator.
//!
//! A `Workload` is a length plus a pure value function `f(i) -> u8`.
//! Strategies pull values from it while writing, and the runner asks it for
//! the checksum a correct write must produce. Re-running with the same length
//! and function always yields the same bytes and the same checksum.

use crate::checksum::Checksum;

/// Value function for position `i`.
pub type ValueFn = fn(u64) -> u8;

/// `f(i) = i mod 256`
fn sequential_value(i: u64) -> u8 {
    i as u8
}

/// Deterministic byte sequence of a fixed length.
#[derive(Clone, Copy)]
pub struct Workload {
    len: u64,
    value: ValueFn,
}

impl Workload {
    /// Workload of `len` bytes produced by `value`.
    pub fn new(len: u64, value: ValueFn) -> Self {
        Workload { len, value }
    }

    /// The I/O workload: byte `i` is `i mod 256`.
    pub fn sequential(len: u64) -> Self {
        Workload::new(len, sequential_value)
    }

    /// Number of values in the sequence.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value at absolute position `i`.
    #[inline(always)]
    pub fn value_at(&self, i: u64) -> u8 {
        (self.value)(i)
    }

    /// Fill `buf` with the values starting at absolute position `offset`.
    #[inline]
    pub fn fill(&self, offset: u64, buf: &mut [u8]) {
        for (k, slot) in buf.iter_mut().enumerate() {
            *slot = (self.value)(offset + k as u64);
        }
    }

    /// All values in index order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.len).map(move |i| (self.value)(i))
    }

    /// Checksum a correct write of the whole sequence must produce.
    pub fn expected_checksum(&self) -> Checksum {
        let mut sum = Checksum::ZERO;
        for b in self.iter() {
            sum.add_byte(b);
        }
        sum
    }
}

impl std::fmt::Debug for Workload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workload").field("len", &self.len).finish()
    }
}
