//! Palette extraction using Median Cut in RGB space.
//!
//! The cut always splits the bucket/channel pair with the widest value
//! range, at the positional midpoint of the stably sorted bucket, and each
//! final bucket contributes its count-weighted mean color. Given the same
//! sampled input order the palette is fully deterministic.

use crate::color::Rgb;
use crate::sample::ColorCount;

/// Ordered list of representative colors. Index `i` is shown as label `i + 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<Rgb> {
        self.colors.get(idx).copied()
    }

    /// Index of the closest palette color by squared RGB distance.
    ///
    /// Ties keep the lowest index: a later entry must be strictly closer to win.
    #[inline(always)]
    pub fn find_nearest(&self, target: Rgb) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, &p) in self.colors.iter().enumerate() {
            let dist = target.distance_squared(p);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
                if dist == 0 {
                    break;
                }
            }
        }
        best_idx
    }

    /// Flat `[r, g, b, r, g, b, ...]` bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.to_array()).collect()
    }
}

/// Reduce sampled colors to at most `target` representatives.
///
/// When the samples already hold `target` or fewer distinct colors they are
/// returned verbatim, in sample order.
pub fn extract_palette(samples: &[ColorCount], target: usize) -> Palette {
    if samples.len() <= target {
        return Palette::new(samples.iter().map(|s| s.color).collect());
    }
    let colors = median_cut(samples, target);
    log::debug!(
        "median cut reduced {} sampled colors to {} (target {})",
        samples.len(),
        colors.len(),
        target
    );
    Palette::new(colors)
}

fn median_cut(samples: &[ColorCount], target: usize) -> Vec<Rgb> {
    if samples.is_empty() || target == 0 {
        return vec![];
    }
    let mut buckets: Vec<Vec<ColorCount>> = vec![samples.to_vec()];

    while buckets.len() < target {
        let Some((i, axis, range)) = widest_split(&buckets) else { break };
        if range == 0 {
            break;
        }

        let mut bucket = std::mem::take(&mut buckets[i]);
        // `sort_by_key` is stable, so equal channel values keep sample order.
        bucket.sort_by_key(|c| c.color.channel(axis));
        let right = bucket.split_off(bucket.len() / 2);
        buckets[i] = bucket;
        buckets.insert(i + 1, right);
    }

    buckets.iter().map(|b| weighted_mean(b)).collect()
}

/// Bucket index, channel and range of the widest splittable bucket.
///
/// Ties resolve to the earliest bucket, then to channel order R, G, B.
fn widest_split(buckets: &[Vec<ColorCount>]) -> Option<(usize, usize, u8)> {
    let mut best: Option<(usize, usize, u8)> = None;
    for (i, bucket) in buckets.iter().enumerate() {
        if bucket.len() < 2 {
            continue;
        }
        for axis in 0..3 {
            let (min, max) = bucket.iter().fold((u8::MAX, u8::MIN), |(mi, ma), c| {
                let v = c.color.channel(axis);
                (mi.min(v), ma.max(v))
            });
            let range = max - min;
            if best.map_or(true, |(_, _, r)| range > r) {
                best = Some((i, axis, range));
            }
        }
    }
    best
}

/// Count-weighted mean color, each channel rounded half up.
fn weighted_mean(bucket: &[ColorCount]) -> Rgb {
    let (r, g, b, total) = bucket.iter().fold((0u64, 0u64, 0u64, 0u64), |acc, c| {
        let w = c.count as u64;
        (
            acc.0 + c.color.r as u64 * w,
            acc.1 + c.color.g as u64 * w,
            acc.2 + c.color.b as u64 * w,
            acc.3 + w,
        )
    });
    if total == 0 {
        return Rgb::default();
    }
    let round = |sum: u64| ((2 * sum + total) / (2 * total)) as u8;
    Rgb::new(round(r), round(g), round(b))
}
