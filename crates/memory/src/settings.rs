//! Memory family settings.

/// Stride and fill used by the traversal experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySettings {
    /// Stride `K` of the random walks (default: 514229, a prime).
    pub increment: usize,

    /// Value stored in every word before traversal (default: 777).
    pub fill: u64,
}

impl Default for MemorySettings {
    fn default() -> Self {
        MemorySettings {
            increment: 514_229,
            fill: 777,
        }
    }
}

impl MemorySettings {
    /// Settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set stride increment (builder pattern).
    pub fn with_increment(mut self, increment: usize) -> Self {
        self.increment = increment;
        self
    }

    /// Set fill value (builder pattern).
    pub fn with_fill(mut self, fill: u64) -> Self {
        self.fill = fill;
        self
    }
}
