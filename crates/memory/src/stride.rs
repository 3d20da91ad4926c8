//! Step functions choosing the next position of a walk.

use crate::geometry::{gcd, Geometry};
use std::fmt;
use std::str::FromStr;
use sympathy_core::{Error, Result};

/// `next(geometry, page_offset, word_offset, previous) -> next`
pub type StepFn = fn(&Geometry, usize, usize, usize) -> usize;

fn linear(g: &Geometry, _page_offset: usize, _word_offset: usize, prev: usize) -> usize {
    (prev + 1) % g.array_words()
}

/// `(prev + increment) mod span` without overflowing for any increment.
#[inline]
fn advance(prev: usize, increment: usize, span: usize) -> usize {
    (prev % span + increment % span) % span
}

fn random_page(g: &Geometry, page_offset: usize, _word_offset: usize, prev: usize) -> usize {
    page_offset + advance(prev, g.increment(), g.page_words())
}

fn random_heap(g: &Geometry, _page_offset: usize, _word_offset: usize, prev: usize) -> usize {
    advance(prev, g.increment(), g.array_words())
}

/// Traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stride {
    /// Every word in increasing order
    Linear,
    /// Stride `K` within the current page, then on to the next page
    RandomPage,
    /// Stride `K` across the whole region
    RandomHeap,
}

impl Stride {
    /// Every stride, in canonical run order.
    pub const ALL: [Stride; 3] = [Stride::Linear, Stride::RandomPage, Stride::RandomHeap];

    /// Short identifier accepted in configuration.
    pub fn id(self) -> &'static str {
        match self {
            Stride::Linear => "linear",
            Stride::RandomPage => "random-page",
            Stride::RandomHeap => "random-heap",
        }
    }

    /// Display name of the walk.
    pub fn name(self) -> &'static str {
        match self {
            Stride::Linear => "LinearWalk",
            Stride::RandomPage => "RandomPageWalk",
            Stride::RandomHeap => "RandomHeapWalk",
        }
    }

    /// The step function for this stride.
    pub fn step(self) -> StepFn {
        match self {
            Stride::Linear => linear,
            Stride::RandomPage => random_page,
            Stride::RandomHeap => random_heap,
        }
    }

    /// Check that this stride visits every position of `geometry` exactly
    /// once: the increment must be coprime with the span it cycles over.
    pub fn validate(self, geometry: &Geometry) -> Result<()> {
        let span = match self {
            Stride::Linear => return Ok(()),
            Stride::RandomPage => geometry.page_words(),
            Stride::RandomHeap => geometry.array_words(),
        };
        if gcd(geometry.increment() % span, span) != 1 {
            return Err(Error::invalid_config(format!(
                "{} increment {} shares a factor with {} and would revisit positions",
                self.name(),
                geometry.increment(),
                span
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Stride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Stride {
    type Err = Error;

    /// Accepts the short id or the display name, ignoring case, `-` and `_`.
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Stride::ALL
            .into_iter()
            .find(|stride| {
                wanted == stride.id().replace('-', "") || wanted == stride.name().to_lowercase()
            })
            .ok_or_else(|| {
                Error::invalid_config(format!(
                    "unknown traversal '{}' (expected one of: linear, random-page, random-heap)",
                    s
                ))
            })
    }
}
