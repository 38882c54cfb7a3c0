//! Color sampling: a bounded, deterministic histogram of the input.
//!
//! Pixels are visited with a fixed stride so that at most roughly
//! `budget` of them are inspected, and each color is snapped to the nearest
//! multiple of [`SNAP_STEP`] per channel before counting. Near-duplicate
//! shades collapse into one entry while hue is preserved.

use crate::color::Rgb;
use crate::raster::RawImage;
use std::collections::HashMap;

/// Channel precision used when bucketing sampled colors.
pub const SNAP_STEP: u8 = 4;

/// A sampled color and how many sampled pixels mapped onto it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorCount {
    pub color: Rgb,
    pub count: usize,
}

/// Stride that keeps the number of visited pixels near `budget`.
#[inline]
pub fn sample_stride(pixel_count: usize, budget: usize) -> usize {
    (pixel_count / budget.max(1)).max(1)
}

/// Sample `image` into (color, count) pairs ordered by first occurrence.
///
/// Never fails; a 1x1 image yields a single entry.
pub fn sample_colors(image: &RawImage, budget: usize) -> Vec<ColorCount> {
    let pixel_count = image.pixel_count();
    let stride = sample_stride(pixel_count, budget);

    let mut slots: HashMap<Rgb, usize> = HashMap::new();
    let mut samples: Vec<ColorCount> = Vec::new();

    for idx in (0..pixel_count).step_by(stride) {
        let color = image.pixel(idx).snap(SNAP_STEP);
        match slots.get(&color) {
            Some(&slot) => samples[slot].count += 1,
            None => {
                slots.insert(color, samples.len());
                samples.push(ColorCount { color, count: 1 });
            }
        }
    }

    log::debug!(
        "sampled {} distinct colors from {} pixels (stride {})",
        samples.len(),
        pixel_count,
        stride
    );
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_from(width: usize, height: usize, colors: &[Rgb]) -> RawImage {
        let data = colors.iter().flat_map(|c| c.to_array()).collect();
        RawImage::new(width, height, data).unwrap()
    }

    #[test]
    fn test_stride() {
        assert_eq!(sample_stride(10, 50_000), 1);
        assert_eq!(sample_stride(100_000, 50_000), 2);
        assert_eq!(sample_stride(149_999, 50_000), 2);
        assert_eq!(sample_stride(5, 0), 5);
    }

    #[test]
    fn test_single_pixel() {
        let img = image_from(1, 1, &[Rgb::new(10, 20, 30)]);
        let samples = sample_colors(&img, 50_000);
        assert_eq!(samples, vec![ColorCount { color: Rgb::new(12, 20, 32), count: 1 }]);
    }

    #[test]
    fn test_first_occurrence_order_and_counts() {
        let a = Rgb::new(200, 0, 0);
        let b = Rgb::new(0, 0, 200);
        // 201 snaps onto the same bucket as 200
        let a2 = Rgb::new(201, 1, 1);
        let img = image_from(4, 1, &[b, a, a2, b]);
        let samples = sample_colors(&img, 50_000);
        assert_eq!(
            samples,
            vec![
                ColorCount { color: b, count: 2 },
                ColorCount { color: a, count: 2 },
            ]
        );
    }

    #[test]
    fn test_budget_limits_visits() {
        let colors: Vec<Rgb> = (0..100).map(|i| Rgb::new(i as u8 * 2, 0, 0)).collect();
        let img = image_from(100, 1, &colors);
        let samples = sample_colors(&img, 10);
        let visited: usize = samples.iter().map(|s| s.count).sum();
        assert_eq!(visited, 10);
    }
}
