//! Memory traversal strategies for Sympathy
//!
//! A flat region of `u64` words is split into fixed-size pages and walked
//! with a fixed loop nest: outer over pages, inner over the words of a page.
//! The walks differ only in the step function that picks the next position,
//! so any throughput difference comes from locality alone:
//!
//! - `LinearWalk`: `(prev + 1) mod S`
//! - `RandomPageWalk`: `page + ((prev + K) mod words_per_page)`
//! - `RandomHeapWalk`: `(prev + K) mod S`
//!
//! With `K` coprime to the page and region word counts every walk is a
//! permutation of `[0, S)`, so all three produce the same checksum.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod geometry;
pub mod region;
pub mod settings;
pub mod stride;
pub mod walk;

pub use geometry::Geometry;
pub use region::WordRegion;
pub use settings::MemorySettings;
pub use stride::Stride;
pub use walk::{resolve, Traversal, Walk};

/// Bytes per word in the traversed region.
pub const WORD_SIZE: usize = std::mem::size_of::<u64>();
