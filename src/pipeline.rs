//! Paint-by-numbers template generation.
//!
//! This is the main entry point that chains every stage:
//! - Color sampling with a bounded budget
//! - Median-cut palette extraction
//! - Nearest-palette classification
//! - 4-connected flood-fill segmentation
//! - Single-pass merging of undersized regions
//! - Centroid computation and label placement
//! - Template (outlines, numbers, legend) and preview rendering
//!
//! The computation is pure and synchronous; concurrent calls share nothing.

use crate::classify::{classify, IndexMap};
use crate::error::{PbnError, Result};
use crate::merge::{merge_small_regions, MergeStats};
use crate::palette::{extract_palette, Palette};
use crate::raster::{validate_dimensions, RawImage};
use crate::region::{compute_centroids, segment, Region};
use crate::render::{self, LabelPlacement, LabelStats};
use crate::sample::sample_colors;
use serde::{Deserialize, Serialize};

/// Legend grid layout below the template image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendLayout {
    /// Number of swatch columns
    pub columns: usize,
    /// Side of each square swatch in pixels
    pub swatch_size: usize,
    /// Gap around and between cells in pixels
    pub padding: usize,
}

impl Default for LegendLayout {
    fn default() -> Self {
        Self {
            columns: 8,
            swatch_size: 24,
            padding: 8,
        }
    }
}

/// Largest accepted `font_size`, in pixels.
pub const MAX_FONT_SIZE: f64 = 1024.0;
/// Largest accepted legend `swatch_size` and `padding`, in pixels.
pub const MAX_LEGEND_CELL: usize = 4096;

/// Template configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Maximum number of palette colors (K)
    pub palette_size: usize,
    /// Approximate number of pixels inspected when sampling colors
    pub sample_budget: usize,
    /// Regions smaller than this are merged into a neighbor
    pub min_region_size: usize,
    /// Regions smaller than this get an outline but no number
    pub min_region_for_number: usize,
    /// Template outline stroke width in pixels (0 disables outlines)
    pub outline_width: usize,
    /// Upper bound for label font size
    pub font_size: f64,
    /// Lower bound for label font size
    pub min_font_size: f64,
    /// Legend grid layout
    pub legend: LegendLayout,
    /// Darkening of outline pixels in the preview [0.0, 1.0]
    pub preview_outline_opacity: f32,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            palette_size: 16,
            sample_budget: 50_000,
            min_region_size: 20,
            min_region_for_number: 30,
            outline_width: 1,
            font_size: 24.0,
            min_font_size: 8.0,
            legend: LegendLayout::default(),
            preview_outline_opacity: 0.25,
        }
    }
}

impl TemplateConfig {
    /// Reject settings that cannot produce a template.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(PbnError::InvalidConfig(msg.to_string()));
        if self.palette_size == 0 {
            return invalid("palette_size must be greater than 0");
        }
        if self.legend.columns == 0 {
            return invalid("legend.columns must be greater than 0");
        }
        if self.legend.swatch_size == 0 {
            return invalid("legend.swatch_size must be greater than 0");
        }
        if !self.font_size.is_finite() || !self.min_font_size.is_finite() {
            return invalid("font sizes must be finite");
        }
        if self.min_font_size <= 0.0 {
            return invalid("min_font_size must be positive");
        }
        if self.min_font_size > self.font_size {
            return invalid("min_font_size must not exceed font_size");
        }
        if self.font_size > MAX_FONT_SIZE {
            return invalid(&format!("font_size must not exceed {}", MAX_FONT_SIZE));
        }
        if self.legend.swatch_size > MAX_LEGEND_CELL || self.legend.padding > MAX_LEGEND_CELL {
            return invalid(&format!(
                "legend.swatch_size and legend.padding must not exceed {}",
                MAX_LEGEND_CELL
            ));
        }
        if !self.preview_outline_opacity.is_finite() {
            return invalid("preview_outline_opacity must be finite");
        }
        Ok(())
    }
}

/// Counts gathered along the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TemplateStats {
    pub sampled_colors: usize,
    pub palette_size: usize,
    pub initial_regions: usize,
    pub final_regions: usize,
    pub merge: MergeStats,
    pub labels: LabelStats,
}

/// Result of template generation
#[derive(Clone, Debug)]
pub struct TemplateResult {
    /// Outlines, numbers and legend; height is image height plus legend
    pub template: RawImage,
    /// Palette-filled preview, same size as the input
    pub preview: RawImage,
    /// Palette used
    pub palette: Palette,
    /// Surviving regions in id order, with centroids
    pub regions: Vec<Region>,
    /// Final palette index for each pixel
    pub index_map: IndexMap,
    /// Numbers that made it onto the template
    pub labels: Vec<LabelPlacement>,
    pub stats: TemplateStats,
}

/// Generate the paint-by-numbers template and preview for `image`.
///
/// Fails only on zero-area input or an unusable configuration. The same
/// image and configuration always produce byte-identical output.
pub fn generate_template(image: &RawImage, config: &TemplateConfig) -> Result<TemplateResult> {
    validate_dimensions(image.width(), image.height())?;
    config.validate()?;

    let (width, height) = (image.width(), image.height());

    // Step 1: Bounded color histogram
    let samples = sample_colors(image, config.sample_budget);

    // Step 2: Palette
    let palette = extract_palette(&samples, config.palette_size);

    // Step 3: Per-pixel palette index
    let mut index_map = classify(image, &palette);

    // Step 4: Connected regions
    let regions = segment(&index_map);
    let initial_regions = regions.len();

    // Step 5: Fold small regions into neighbors
    let (mut regions, merge) = merge_small_regions(&mut index_map, regions, config.min_region_size);

    // Step 6: Label anchors
    compute_centroids(&mut regions, width);
    let (labels, label_stats) = render::place_labels(&regions, width, height, config);

    // Step 7: Rasterize
    let mask = render::outline_mask(&index_map, config.outline_width);
    let template = render::render_template(&index_map, &mask, &labels, &palette, config);
    let preview_mask = if config.outline_width == 0 {
        render::outline_mask(&index_map, 1)
    } else {
        mask
    };
    let preview = render::render_preview(
        &index_map,
        &preview_mask,
        &palette,
        config.preview_outline_opacity.clamp(0.0, 1.0),
    );

    let stats = TemplateStats {
        sampled_colors: samples.len(),
        palette_size: palette.len(),
        initial_regions,
        final_regions: regions.len(),
        merge,
        labels: label_stats,
    };
    log::debug!("template for {}x{} image: {:?}", width, height, stats);

    Ok(TemplateResult {
        template,
        preview,
        palette,
        regions,
        index_map,
        labels,
        stats,
    })
}
