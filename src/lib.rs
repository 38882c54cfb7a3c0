//! Paint-by-Numbers Library
//!
//! Turns a photograph into a paint-by-numbers template: a black-and-white
//! outline image with numbered regions and a color legend, plus a colored
//! preview of the finished painting.

pub mod classify;
pub mod color;
pub mod error;
pub mod font;
pub mod merge;
pub mod palette;
pub mod pipeline;
pub mod raster;
pub mod region;
pub mod render;
pub mod sample;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export key types for easy usage
pub use classify::{classify, IndexMap};
pub use color::Rgb;
pub use error::{PbnError, Result};
pub use merge::{merge_small_regions, MergeStats};
pub use palette::{extract_palette, Palette};
pub use pipeline::{generate_template, LegendLayout, TemplateConfig, TemplateResult, TemplateStats};
pub use raster::RawImage;
pub use region::{compute_centroids, segment, Region};
pub use render::{legend_height, LabelPlacement, LabelStats};
pub use sample::{sample_colors, ColorCount};

#[cfg(feature = "native")]
pub use raster::load_image;

pub mod prelude {
    pub use crate::color::Rgb;
    pub use crate::error::{PbnError, Result};
    pub use crate::pipeline::{generate_template, LegendLayout, TemplateConfig, TemplateResult};
    pub use crate::raster::RawImage;
}
