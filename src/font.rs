//! Built-in 5x7 bitmap digits for region and legend numbers.

use crate::color::Rgb;
use crate::raster::RawImage;

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;

/// One row per byte, bit 4 is the leftmost column.
const DIGITS: [[u8; GLYPH_HEIGHT]; 10] = [
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // 0
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // 1
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // 2
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // 3
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // 4
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // 5
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // 6
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // 7
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // 8
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // 9
];

/// Integer scale factor that brings glyph height closest to `font_size`.
pub fn scale_for(font_size: f64) -> usize {
    ((font_size / GLYPH_HEIGHT as f64).round() as usize).max(1)
}

/// Pixel extent of a decimal number at `scale`: digits are one scaled
/// column apart.
pub fn number_size(value: usize, scale: usize) -> (usize, usize) {
    let digits = value.to_string().len();
    let width = digits * GLYPH_WIDTH * scale + (digits - 1) * scale;
    (width, GLYPH_HEIGHT * scale)
}

/// Draw `value` with its top-left corner at (`x`, `y`). Clipped to the canvas.
pub fn draw_number(canvas: &mut RawImage, value: usize, x: i64, y: i64, scale: usize, color: Rgb) {
    let s = scale as i64;
    let advance = (GLYPH_WIDTH as i64 + 1) * s;
    for (i, ch) in value.to_string().bytes().enumerate() {
        let glyph = &DIGITS[(ch - b'0') as usize];
        let gx = x + i as i64 * advance;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (0x10 >> col) != 0 {
                    canvas.fill_rect(gx + col as i64 * s, y + row as i64 * s, s, s, color);
                }
            }
        }
    }
}
