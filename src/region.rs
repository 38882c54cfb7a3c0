//! Connected-component segmentation of the palette index map.
//!
//! Regions are maximal 4-connected runs of one palette index. They live in
//! an arena indexed by id; merging empties a region by clearing its pixel
//! list and zeroing its area, never by removing it from the arena.

use crate::classify::IndexMap;

/// A region in the arena
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// Discovery-order id, also the region's slot in the arena
    pub id: usize,
    /// Palette index shared by every pixel of the region
    pub palette_index: usize,
    /// Row-major pixel indices owned by the region
    pub pixels: Vec<usize>,
    /// Number of pixels; zero once absorbed by a neighbor
    pub area: usize,
    /// Rounded mean pixel position, filled by [`compute_centroids`]
    pub centroid: (usize, usize),
}

impl Region {
    fn new(id: usize, palette_index: usize) -> Self {
        Self {
            id,
            palette_index,
            pixels: Vec::new(),
            area: 0,
            centroid: (0, 0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.area == 0
    }
}

/// Flood-fill the index map into regions, ids assigned in row-major
/// discovery order.
///
/// Uses an explicit stack, so arbitrarily large images never grow the
/// call stack.
pub fn segment(map: &IndexMap) -> Vec<Region> {
    let num_pixels = map.len();
    let mut visited = vec![false; num_pixels];
    let mut regions: Vec<Region> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for seed in 0..num_pixels {
        if visited[seed] {
            continue;
        }
        let palette_index = map.indices[seed];
        let mut region = Region::new(regions.len(), palette_index);

        visited[seed] = true;
        stack.push(seed);
        while let Some(idx) = stack.pop() {
            region.pixels.push(idx);
            for n in map.neighbors(idx) {
                if !visited[n] && map.indices[n] == palette_index {
                    visited[n] = true;
                    stack.push(n);
                }
            }
        }

        region.area = region.pixels.len();
        regions.push(region);
    }

    log::debug!("segmented {} pixels into {} regions", num_pixels, regions.len());
    regions
}

/// Set each non-empty region's centroid to its rounded mean pixel position.
///
/// The centroid of a non-convex region may fall outside it; it is only used
/// to anchor labels.
pub fn compute_centroids(regions: &mut [Region], width: usize) {
    for region in regions.iter_mut().filter(|r| !r.is_empty()) {
        let (sx, sy) = region.pixels.iter().fold((0u64, 0u64), |acc, &idx| {
            (acc.0 + (idx % width) as u64, acc.1 + (idx / width) as u64)
        });
        let n = region.area as u64;
        let round = |sum: u64| ((2 * sum + n) / (2 * n)) as usize;
        region.centroid = (round(sx), round(sy));
    }
}
