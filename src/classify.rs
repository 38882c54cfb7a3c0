//! Pixel classification against a fixed palette.

use crate::palette::Palette;
use crate::raster::RawImage;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One palette index per pixel, row-major, same size as the source image.
///
/// Created by [`classify`] and rewritten in place when small regions are
/// merged into their neighbors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexMap {
    pub width: usize,
    pub height: usize,
    pub indices: Vec<usize>,
}

impl IndexMap {
    pub fn new(width: usize, height: usize, indices: Vec<usize>) -> Self {
        debug_assert_eq!(indices.len(), width * height);
        Self { width, height, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> usize {
        self.indices[y * self.width + x]
    }

    /// 4-connected neighbors of a row-major pixel index, in the order
    /// left, right, up, down.
    #[inline]
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> {
        let (w, h) = (self.width, self.height);
        let x = idx % w;
        let y = idx / w;
        let left = (x > 0).then(|| idx - 1);
        let right = (x + 1 < w).then(|| idx + 1);
        let up = (y > 0).then(|| idx - w);
        let down = (y + 1 < h).then(|| idx + w);
        [left, right, up, down].into_iter().flatten()
    }
}

/// Map every pixel to its nearest palette entry.
pub fn classify(image: &RawImage, palette: &Palette) -> IndexMap {
    #[cfg(feature = "parallel")]
    let indices: Vec<usize> = image
        .as_bytes()
        .par_chunks_exact(3)
        .map(|c| palette.find_nearest(crate::color::Rgb::new(c[0], c[1], c[2])))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let indices: Vec<usize> = image.pixels().map(|p| palette.find_nearest(p)).collect();

    IndexMap::new(image.width(), image.height(), indices)
}
