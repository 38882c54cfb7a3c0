//! Folding of undersized regions into their most-bordering neighbor.
//!
//! A single smallest-first pass: each region is considered once, in
//! ascending order of its initial area. A region that is still below the
//! threshold when its turn comes is absorbed by the neighbor it shares the
//! most border with (lowest id on ties). A region that has already grown
//! past the threshold, or that was itself absorbed, is skipped. There is no
//! second pass, so a survivor can remain below the threshold when its only
//! neighbors were small as well.

use crate::classify::IndexMap;
use crate::region::Region;
use std::collections::BTreeMap;

/// Counts from one merge pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Regions absorbed into a neighbor
    pub merged: usize,
    /// Undersized regions left standing because nothing borders them
    pub isolated: usize,
}

/// Merge regions smaller than `min_size` into their neighbors, rewriting
/// `map` for every moved pixel. Returns the surviving (non-empty) regions in
/// id order.
pub fn merge_small_regions(
    map: &mut IndexMap,
    mut regions: Vec<Region>,
    min_size: usize,
) -> (Vec<Region>, MergeStats) {
    let mut stats = MergeStats::default();

    let mut owner = vec![0usize; map.len()];
    for region in &regions {
        for &idx in &region.pixels {
            owner[idx] = region.id;
        }
    }

    let mut order: Vec<usize> = (0..regions.len()).collect();
    order.sort_by_key(|&id| regions[id].area);

    for small_id in order {
        let area = regions[small_id].area;
        if area == 0 || area >= min_size {
            continue;
        }

        let Some(target_id) = most_bordering_neighbor(map, &owner, &regions[small_id]) else {
            stats.isolated += 1;
            continue;
        };

        let target_index = regions[target_id].palette_index;
        let pixels = std::mem::take(&mut regions[small_id].pixels);
        regions[small_id].area = 0;
        for &idx in &pixels {
            map.indices[idx] = target_index;
            owner[idx] = target_id;
        }
        log::trace!(
            "region {} (area {}) merged into region {} (area {})",
            small_id,
            area,
            target_id,
            regions[target_id].area
        );
        let target = &mut regions[target_id];
        target.pixels.extend(pixels);
        target.area += area;
        stats.merged += 1;
    }

    let survivors: Vec<Region> = regions.into_iter().filter(|r| !r.is_empty()).collect();
    log::debug!(
        "merged {} regions below {} pixels, {} isolated, {} survive",
        stats.merged,
        min_size,
        stats.isolated,
        survivors.len()
    );
    (survivors, stats)
}

/// Neighbor region sharing the most border pixels with `region`.
///
/// Every (pixel, neighbor pixel) pair across the boundary counts once.
/// Ties go to the lowest region id.
fn most_bordering_neighbor(map: &IndexMap, owner: &[usize], region: &Region) -> Option<usize> {
    let mut tally: BTreeMap<usize, usize> = BTreeMap::new();
    for &idx in &region.pixels {
        for n in map.neighbors(idx) {
            let other = owner[n];
            if other != region.id {
                *tally.entry(other).or_insert(0) += 1;
            }
        }
    }

    let mut best: Option<(usize, usize)> = None;
    for (&id, &count) in &tally {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((id, count));
        }
    }
    best.map(|(id, _)| id)
}
