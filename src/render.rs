//! Rasterization of the paint-by-numbers template and the colored preview.
//!
//! The template is the image area (white, black region outlines, region
//! numbers) stacked on top of a legend strip that lists every palette
//! entry. The preview fills each pixel with its palette color and darkens
//! the same outline pixels slightly for definition.

use crate::classify::IndexMap;
use crate::color::Rgb;
use crate::font;
use crate::palette::Palette;
use crate::pipeline::{LegendLayout, TemplateConfig};
use crate::raster::RawImage;
use crate::region::Region;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const OUTLINE_COLOR: Rgb = Rgb::BLACK;
const LABEL_COLOR: Rgb = Rgb::new(64, 64, 64);
const BACKGROUND: Rgb = Rgb::WHITE;

/// A region number that passed the size and overlap checks.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPlacement {
    /// Region the label belongs to
    pub region_id: usize,
    /// Printed number (palette index + 1)
    pub number: usize,
    /// Anchor in image coordinates
    pub x: usize,
    pub y: usize,
    /// Clamped font size; doubles as the anchor's exclusion radius
    pub radius: f64,
}

/// Why candidate labels were dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelStats {
    pub placed: usize,
    /// Region area below `min_region_for_number`
    pub too_small: usize,
    /// Too close to an already placed label
    pub overlapping: usize,
}

/// Pixels painted by outline strokes, row-major.
///
/// Neighbors are compared only to the right and below. A boundary between
/// `p` and its neighbor `q` paints a stroke `width` pixels wide that starts
/// at `q` and extends back toward `p`.
pub fn outline_mask(map: &IndexMap, width: usize) -> Vec<bool> {
    let (w, h) = (map.width, map.height);
    let mut mask = vec![false; w * h];
    if width == 0 {
        return mask;
    }
    for y in 0..h {
        for x in 0..w {
            let here = map.get(x, y);
            if x + 1 < w && map.get(x + 1, y) != here {
                let start = (x + 1).saturating_sub(width - 1);
                for xx in start..=x + 1 {
                    mask[y * w + xx] = true;
                }
            }
            if y + 1 < h && map.get(x, y + 1) != here {
                let start = (y + 1).saturating_sub(width - 1);
                for yy in start..=y + 1 {
                    mask[yy * w + x] = true;
                }
            }
        }
    }
    mask
}

/// Pick label anchors, largest region first.
///
/// A region is numbered only if its area reaches `min_region_for_number`.
/// Its font size is `sqrt(area / pi)` clamped into
/// `[min_font_size, font_size]`, and the anchor is accepted only when it is
/// farther than `font * 1.5 + other.radius` from every anchor placed before.
pub fn place_labels(
    regions: &[Region],
    width: usize,
    height: usize,
    config: &TemplateConfig,
) -> (Vec<LabelPlacement>, LabelStats) {
    let mut stats = LabelStats::default();
    let mut placed: Vec<LabelPlacement> = Vec::new();

    let mut order: Vec<&Region> = regions.iter().filter(|r| !r.is_empty()).collect();
    order.sort_by(|a, b| b.area.cmp(&a.area));

    for region in order {
        if region.area < config.min_region_for_number {
            stats.too_small += 1;
            continue;
        }
        let natural = (region.area as f64 / std::f64::consts::PI).sqrt();
        let font = natural.clamp(config.min_font_size, config.font_size);

        let x = region.centroid.0.min(width - 1);
        let y = region.centroid.1.min(height - 1);

        let clear = placed.iter().all(|p| {
            let dx = x as f64 - p.x as f64;
            let dy = y as f64 - p.y as f64;
            (dx * dx + dy * dy).sqrt() > font * 1.5 + p.radius
        });
        if !clear {
            stats.overlapping += 1;
            continue;
        }

        placed.push(LabelPlacement {
            region_id: region.id,
            number: region.palette_index + 1,
            x,
            y,
            radius: font,
        });
    }

    stats.placed = placed.len();
    log::debug!(
        "placed {} labels ({} regions too small, {} overlapping)",
        stats.placed,
        stats.too_small,
        stats.overlapping
    );
    (placed, stats)
}

/// Height of the legend strip for `palette_len` entries.
pub fn legend_height(palette_len: usize, layout: &LegendLayout) -> usize {
    let columns = layout.columns.max(1);
    let rows = palette_len.div_ceil(columns);
    layout.padding + rows * (layout.swatch_size + layout.padding)
}

/// Draw one bordered swatch plus number per palette entry, in a fixed
/// column grid. Every entry is listed whether or not a region still uses it.
pub fn draw_legend(canvas: &mut RawImage, palette: &Palette, layout: &LegendLayout) {
    let columns = layout.columns.max(1);
    let col_width = (canvas.width() / columns).max(1) as i64;
    let swatch = layout.swatch_size as i64;
    let pad = layout.padding as i64;
    let scale = font::scale_for(layout.swatch_size as f64 * 0.6);

    for (i, &color) in palette.colors.iter().enumerate() {
        let col = (i % columns) as i64;
        let row = (i / columns) as i64;
        let x = col * col_width + pad;
        let y = pad + row * (swatch + pad);

        canvas.fill_rect(x, y, swatch, swatch, color);
        canvas.stroke_rect(x, y, swatch, swatch, OUTLINE_COLOR);

        let (_, text_h) = font::number_size(i + 1, scale);
        let text_x = x + swatch + (pad / 2).max(2);
        let text_y = y + (swatch - text_h as i64) / 2;
        font::draw_number(canvas, i + 1, text_x, text_y, scale, Rgb::BLACK);
    }
}

/// Render the black-and-white template with its legend.
///
/// Output height is the image height plus [`legend_height`].
pub fn render_template(
    map: &IndexMap,
    mask: &[bool],
    labels: &[LabelPlacement],
    palette: &Palette,
    config: &TemplateConfig,
) -> RawImage {
    let (w, h) = (map.width, map.height);

    let mut body = RawImage::filled(w, h, BACKGROUND);
    for (idx, &on) in mask.iter().enumerate() {
        if on {
            body.set_index(idx, OUTLINE_COLOR);
        }
    }
    for label in labels {
        draw_label(&mut body, label);
    }

    let mut legend = RawImage::filled(w, legend_height(palette.len(), &config.legend), BACKGROUND);
    draw_legend(&mut legend, palette, &config.legend);

    stack_vertical(body, legend)
}

/// Render the colored preview: palette fill plus a faint outline.
pub fn render_preview(map: &IndexMap, mask: &[bool], palette: &Palette, opacity: f32) -> RawImage {
    let mut preview = RawImage::filled(map.width, map.height, BACKGROUND);

    let shade = |idx: usize| -> Rgb {
        let color = palette.get(map.indices[idx]).unwrap_or(BACKGROUND);
        if mask[idx] {
            color.blend(OUTLINE_COLOR, opacity)
        } else {
            color
        }
    };

    #[cfg(feature = "parallel")]
    preview.data_mut().par_chunks_mut(3).enumerate().for_each(|(idx, px)| {
        px.copy_from_slice(&shade(idx).to_array());
    });

    #[cfg(not(feature = "parallel"))]
    for (idx, px) in preview.data_mut().chunks_mut(3).enumerate() {
        px.copy_from_slice(&shade(idx).to_array());
    }

    preview
}

/// Draw a label centered on its anchor, shifted to stay inside the canvas
/// when the text fits.
fn draw_label(canvas: &mut RawImage, label: &LabelPlacement) {
    let scale = font::scale_for(label.radius);
    let (tw, th) = font::number_size(label.number, scale);
    let left = fit_start(label.x, tw, canvas.width());
    let top = fit_start(label.y, th, canvas.height());
    font::draw_number(canvas, label.number, left, top, scale, LABEL_COLOR);
}

/// Start coordinate of a span of `len` centered on `center`, pushed back
/// inside `[0, limit)` when it fits.
fn fit_start(center: usize, len: usize, limit: usize) -> i64 {
    let start = center as i64 - len as i64 / 2;
    if len <= limit {
        start.clamp(0, (limit - len) as i64)
    } else {
        start
    }
}

fn stack_vertical(top: RawImage, bottom: RawImage) -> RawImage {
    debug_assert_eq!(top.width(), bottom.width());
    let width = top.width();
    let height = top.height() + bottom.height();
    let mut data = top.into_bytes();
    data.extend_from_slice(bottom.as_bytes());
    RawImage::from_parts(width, height, data)
}
