//! Synthetic images shared by the integration tests.

#![allow(dead_code)]

use paint_by_numbers::prelude::*;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> Rgb) -> RawImage {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&f(x, y).to_array());
        }
    }
    RawImage::new(width, height, data).unwrap()
}

pub fn solid(width: usize, height: usize, color: Rgb) -> RawImage {
    from_fn(width, height, |_, _| color)
}

/// Black at (0, 0), alternating with white.
pub fn checkerboard(width: usize, height: usize) -> RawImage {
    from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    })
}

/// Vertical bands of `band` columns cycling through `colors`.
pub fn stripes(width: usize, height: usize, band: usize, colors: &[Rgb]) -> RawImage {
    from_fn(width, height, |x, _| colors[(x / band) % colors.len()])
}

pub fn gradient(width: usize, height: usize) -> RawImage {
    from_fn(width, height, |x, y| {
        Rgb::new(
            ((x * 255) / width.max(1)) as u8,
            ((y * 255) / height.max(1)) as u8,
            (((x + y) * 128) / (width + height)) as u8,
        )
    })
}

/// Gradient with deterministic speckle noise, to produce many tiny regions.
pub fn noisy(width: usize, height: usize) -> RawImage {
    from_fn(width, height, |x, y| {
        let h = (x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663)) % 97;
        let base = ((x * 200) / width.max(1)) as u8;
        if h < 10 {
            Rgb::new(255 - base, (h * 25) as u8, base)
        } else {
            Rgb::new(base, base / 2, 255 - base)
        }
    })
}
