//! Word region lifecycle.

use std::io;
use sympathy_core::{Checksum, Error, Result};
use tracing::info;

use crate::WORD_SIZE;

/// Fixed-size array of machine words, filled with one constant.
///
/// Owned by whoever allocated it; walks only borrow it.
pub struct WordRegion {
    words: Vec<u64>,
    fill: u64,
}

impl WordRegion {
    /// Allocate `words` words set to `fill`.
    ///
    /// Failure to reserve the memory is a [`Error::ResourceAllocation`]
    /// rather than an abort, so a too-large configuration halts the
    /// experiment cleanly.
    pub fn allocate(words: usize, fill: u64) -> Result<Self> {
        if words == 0 {
            return Err(Error::invalid_config("word region must not be empty"));
        }

        let mut storage: Vec<u64> = Vec::new();
        storage
            .try_reserve_exact(words)
            .map_err(|e| Error::ResourceAllocation {
                resource: format!("word region of {} bytes", words as u128 * WORD_SIZE as u128),
                source: io::Error::new(io::ErrorKind::OutOfMemory, e.to_string()),
            })?;
        storage.resize(words, fill);

        info!(
            target: "sympathy::memory",
            words,
            bytes = words * WORD_SIZE,
            fill,
            "Allocated word region"
        );

        Ok(WordRegion {
            words: storage,
            fill,
        })
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false: empty regions are rejected at allocation.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Size in bytes.
    pub fn byte_len(&self) -> u64 {
        (self.words.len() * WORD_SIZE) as u64
    }

    /// Value every word was filled with.
    pub fn fill(&self) -> u64 {
        self.fill
    }

    /// Word at `index`.
    #[inline(always)]
    pub fn word(&self, index: usize) -> u64 {
        self.words[index]
    }

    /// Overwrite one word. Used to simulate corruption.
    pub fn set_word(&mut self, index: usize, value: u64) {
        self.words[index] = value;
    }

    /// Checksum any full traversal must produce: every word once.
    pub fn expected_checksum(&self) -> Checksum {
        Checksum::new(self.fill.wrapping_mul(self.words.len() as u64))
    }
}

impl std::fmt::Debug for WordRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordRegion")
            .field("words", &self.words.len())
            .field("fill", &self.fill)
            .finish()
    }
}
