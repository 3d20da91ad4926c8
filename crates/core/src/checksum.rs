//! Running checksum accumulated over every byte or word an experiment touches.
//!
//! Addition wraps at 64 bits. Overflow is part of the definition, not an
//! error, so the same inputs always produce the same value regardless of
//! how large the backing resource is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wrapping sum over the values touched by a phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checksum(u64);

impl Checksum {
    /// The empty sum.
    pub const ZERO: Checksum = Checksum(0);

    /// Wrap a raw value.
    pub const fn new(value: u64) -> Self {
        Checksum(value)
    }

    /// Raw accumulated value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Fold a single byte into the sum.
    #[inline(always)]
    pub fn add_byte(&mut self, byte: u8) {
        self.0 = self.0.wrapping_add(byte as u64);
    }

    /// Fold every byte of `bytes` into the sum.
    #[inline]
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        // Summing into a local lets the compiler vectorise the loop.
        let mut sum = 0u64;
        for &b in bytes {
            sum = sum.wrapping_add(b as u64);
        }
        self.0 = self.0.wrapping_add(sum);
    }

    /// Fold a machine word into the sum.
    #[inline(always)]
    pub fn add_word(&mut self, word: u64) {
        self.0 = self.0.wrapping_add(word);
    }

    /// Checksum of `bytes` on its own.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut sum = Checksum::ZERO;
        sum.add_bytes(bytes);
        sum
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Checksum {
    fn from(value: u64) -> Self {
        Checksum(value)
    }
}
