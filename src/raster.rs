//! Packed RGB raster used both as pipeline input and as render target.

use crate::color::Rgb;
use crate::error::{PbnError, Result};

/// Dense row-major RGB buffer, three bytes per pixel, no alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RawImage {
    /// Wrap packed RGB bytes. Rejects zero-area images and buffers whose
    /// length is not `width * height * 3`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        validate_dimensions(width, height)?;
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| PbnError::InvalidInput(format!("{}x{} overflows", width, height)))?;
        if data.len() != expected {
            return Err(PbnError::InvalidInput(format!(
                "expected {} RGB bytes for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Build from RGBA bytes (as handed over by browser canvases), dropping alpha.
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Result<Self> {
        validate_dimensions(width, height)?;
        let pixel_count = width
            .checked_mul(height)
            .filter(|n| n.checked_mul(4).is_some())
            .ok_or_else(|| PbnError::InvalidInput(format!("{}x{} overflows", width, height)))?;
        if rgba.len() != pixel_count * 4 {
            return Err(PbnError::InvalidInput(format!(
                "expected {} RGBA bytes for {}x{}, got {}",
                pixel_count * 4,
                width,
                height,
                rgba.len()
            )));
        }
        let mut data = Vec::with_capacity(pixel_count * 3);
        for px in rgba.chunks_exact(4) {
            data.extend_from_slice(&px[..3]);
        }
        Ok(Self { width, height, data })
    }

    /// Canvas of the given size filled with one color.
    pub(crate) fn filled(width: usize, height: usize, color: Rgb) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&color.to_array());
        }
        Self { width, height, data }
    }

    /// Assemble from parts already known to agree in size.
    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height * 3);
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Color at a row-major pixel index.
    #[inline(always)]
    pub fn pixel(&self, idx: usize) -> Rgb {
        let base = idx * 3;
        Rgb::new(self.data[base], self.data[base + 1], self.data[base + 2])
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixel(y * self.width + x)
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data.chunks_exact(3).map(|c| Rgb::new(c[0], c[1], c[2]))
    }

    #[inline(always)]
    pub(crate) fn set_index(&mut self, idx: usize, color: Rgb) {
        let base = idx * 3;
        self.data[base] = color.r;
        self.data[base + 1] = color.g;
        self.data[base + 2] = color.b;
    }

    /// Write one pixel; coordinates outside the canvas are ignored.
    #[inline]
    pub(crate) fn put(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.set_index(idx, color);
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas.
    pub(crate) fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgb) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i64);
        let y1 = (y + h).min(self.height as i64);
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.put(xx, yy, color);
            }
        }
    }

    /// One-pixel rectangle outline, clipped to the canvas.
    pub(crate) fn stroke_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgb) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + h - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + w - 1, y, 1, h, color);
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Convert to raw RGBA bytes
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels().flat_map(|p| [p.r, p.g, p.b, 255]).collect()
    }

    /// Convert to image::RgbImage (requires 'native' feature)
    #[cfg(feature = "native")]
    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            self.get(x as usize, y as usize).into()
        })
    }

    #[cfg(feature = "native")]
    pub fn from_image(img: image::RgbImage) -> Result<Self> {
        let (w, h) = img.dimensions();
        Self::new(w as usize, h as usize, img.into_raw())
    }

    /// Encode to disk; the format follows the file extension.
    #[cfg(feature = "native")]
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        self.to_image().save(path)?;
        Ok(())
    }
}

/// Decode any format the `image` crate understands into a `RawImage`.
#[cfg(feature = "native")]
pub fn load_image<P: AsRef<std::path::Path>>(path: P) -> Result<RawImage> {
    let img = image::open(path)?.to_rgb8();
    RawImage::from_image(img)
}

pub fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PbnError::InvalidInput(format!(
            "image dimensions cannot be zero (got {}x{})",
            width, height
        )));
    }
    Ok(())
}
