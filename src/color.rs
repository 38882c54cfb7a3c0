//! Color value type and the integer distance used throughout the pipeline.

/// RGB color in 8-bit per channel format (sRGB gamma-encoded)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline(always)]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_array(arr: [u8; 3]) -> Self {
        Self { r: arr[0], g: arr[1], b: arr[2] }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channel by position: 0 = red, 1 = green, 2 = blue.
    #[inline(always)]
    pub fn channel(self, axis: usize) -> u8 {
        match axis {
            0 => self.r,
            1 => self.g,
            _ => self.b,
        }
    }

    /// Squared Euclidean distance in RGB space. Max value is 3 * 255^2,
    /// so `u32` never overflows.
    #[inline(always)]
    pub fn distance_squared(self, other: Self) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Round every channel to the nearest multiple of `step`, saturating at 255.
    #[inline]
    pub fn snap(self, step: u8) -> Self {
        if step <= 1 {
            return self;
        }
        let snap = |v: u8| -> u8 {
            let step = step as u32;
            clamp_u8((((v as u32 + step / 2) / step) * step) as i32)
        };
        Self::new(snap(self.r), snap(self.g), snap(self.b))
    }

    /// Linear blend toward `other`; `t = 0` keeps `self`, `t = 1` yields `other`.
    #[inline]
    pub fn blend(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| clamp_u8_f32(a as f32 + (b as f32 - a as f32) * t + 0.5);
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

#[cfg(feature = "native")]
impl From<image::Rgb<u8>> for Rgb {
    fn from(p: image::Rgb<u8>) -> Self {
        Self::from_array(p.0)
    }
}

#[cfg(feature = "native")]
impl From<Rgb> for image::Rgb<u8> {
    fn from(c: Rgb) -> Self {
        image::Rgb(c.to_array())
    }
}

#[inline(always)]
pub fn clamp_u8_f32(v: f32) -> u8 {
    v.max(0.0).min(255.0) as u8
}

#[inline(always)]
pub fn clamp_u8(x: i32) -> u8 {
    let mut y = x;
    y &= !(y >> 31);
    if y > 255 { 255 } else { y as u8 }
}
