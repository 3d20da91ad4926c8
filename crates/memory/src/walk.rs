//! Walks over a word region.

use crate::geometry::Geometry;
use crate::region::WordRegion;
use crate::stride::Stride;
use std::hint::black_box;
use sympathy_core::{Checksum, Error, Result};

/// One traversal order over a word region.
pub trait Traversal {
    /// Display name used in reports and errors.
    fn name(&self) -> &str;

    /// Bytes one traversal touches.
    fn bytes(&self) -> u64;

    /// Visit every word of `region` once and return the sum of values read.
    fn traverse(&self, region: &WordRegion) -> Result<Checksum>;
}

/// The fixed page/word loop nest driven by one stride.
#[derive(Debug, Clone, Copy)]
pub struct Walk {
    stride: Stride,
    geometry: Geometry,
}

impl Walk {
    /// Build a walk, rejecting geometries the stride cannot cover.
    pub fn new(stride: Stride, geometry: Geometry) -> Result<Self> {
        stride.validate(&geometry)?;
        Ok(Walk { stride, geometry })
    }

    /// The stride driving this walk.
    pub fn stride(&self) -> Stride {
        self.stride
    }

    /// The geometry walked.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Call `visit` with every position, in walk order.
    ///
    /// The previous position starts at `S - 1`, the position just before
    /// zero, so the first step of each stride lands where a walk from
    /// "before the start" would.
    #[inline]
    pub fn for_each_position(&self, mut visit: impl FnMut(usize)) {
        let g = &self.geometry;
        let step = self.stride.step();
        let mut pos = g.array_words() - 1;

        let mut page_offset = 0;
        while page_offset < g.array_words() {
            let limit = page_offset + g.page_words();
            let mut word_offset = page_offset;
            while word_offset < limit {
                pos = step(g, page_offset, word_offset, pos);
                visit(pos);
                word_offset += 1;
            }
            page_offset += g.page_words();
        }
    }

    /// Every position, in walk order.
    pub fn positions(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.geometry.array_words());
        self.for_each_position(|p| out.push(p));
        out
    }
}

impl Traversal for Walk {
    fn name(&self) -> &str {
        self.stride.name()
    }

    fn bytes(&self) -> u64 {
        self.geometry.byte_len()
    }

    fn traverse(&self, region: &WordRegion) -> Result<Checksum> {
        if region.len() != self.geometry.array_words() {
            return Err(Error::invalid_config(format!(
                "{} expects {} words, region holds {}",
                self.name(),
                self.geometry.array_words(),
                region.len()
            )));
        }

        let mut sum = Checksum::ZERO;
        self.for_each_position(|p| sum.add_word(region.word(p)));
        Ok(black_box(sum))
    }
}

/// Resolve configured identifiers into walks over `geometry`, preserving order.
pub fn resolve(names: &[String], geometry: Geometry) -> Result<Vec<Box<dyn Traversal>>> {
    names
        .iter()
        .map(|name| {
            let stride: Stride = name.parse()?;
            Ok(Box::new(Walk::new(stride, geometry)?) as Box<dyn Traversal>)
        })
        .collect()
}
