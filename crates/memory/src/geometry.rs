//! Region shape: total words, words per page, stride increment.

use crate::settings::MemorySettings;
use crate::WORD_SIZE;
use sympathy_core::{Error, ExperimentConfig, Result};

/// Shape of a traversal over `array_words` words in pages of `page_words`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    array_words: usize,
    page_words: usize,
    increment: usize,
}

impl Geometry {
    /// Validate and build a geometry.
    ///
    /// The region must be a whole number of non-empty pages. Whether the
    /// increment suits a particular walk is checked by the walk.
    pub fn new(array_words: usize, page_words: usize, increment: usize) -> Result<Self> {
        if array_words == 0 || page_words == 0 {
            return Err(Error::invalid_config("region and page must hold at least one word"));
        }
        if array_words % page_words != 0 {
            return Err(Error::invalid_config(format!(
                "region of {} words is not a whole number of {}-word pages",
                array_words, page_words
            )));
        }
        if increment == 0 {
            return Err(Error::invalid_config("stride increment must be positive"));
        }
        Ok(Geometry {
            array_words,
            page_words,
            increment,
        })
    }

    /// Derive the geometry from byte sizes in `config`.
    pub fn from_config(config: &ExperimentConfig, settings: &MemorySettings) -> Result<Self> {
        if config.chunk_size() % WORD_SIZE != 0 {
            return Err(Error::invalid_config(format!(
                "page size {} is not a multiple of the {}-byte word",
                config.chunk_size(),
                WORD_SIZE
            )));
        }
        let array_words = usize::try_from(config.resource_size() / WORD_SIZE as u64)
            .map_err(|_| Error::invalid_config("region does not fit in the address space"))?;
        Self::new(array_words, config.chunk_size() / WORD_SIZE, settings.increment)
    }

    /// Words in the whole region (`S`).
    pub fn array_words(&self) -> usize {
        self.array_words
    }

    /// Words per page.
    pub fn page_words(&self) -> usize {
        self.page_words
    }

    /// Number of pages.
    pub fn pages(&self) -> usize {
        self.array_words / self.page_words
    }

    /// Stride increment (`K`).
    pub fn increment(&self) -> usize {
        self.increment
    }

    /// Bytes covered by one full traversal.
    pub fn byte_len(&self) -> u64 {
        (self.array_words * WORD_SIZE) as u64
    }
}

/// Greatest common divisor.
pub(crate) fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
