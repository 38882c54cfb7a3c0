//! Command-line interface for paint-by-numbers
//!
//! Usage: paint-by-numbers [OPTIONS] <INPUT>

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use image::imageops::FilterType;
use paint_by_numbers::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "paint-by-numbers", version, about = "Photo to paint-by-numbers template")]
struct Cli {
    /// Input image path
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Template output path (default: <input>_template.png)
    #[arg(short = 't', long = "template", value_hint = ValueHint::FilePath)]
    template: Option<PathBuf>,
    /// Preview output path (default: <input>_preview.png)
    #[arg(short = 'p', long = "preview", value_hint = ValueHint::FilePath)]
    preview: Option<PathBuf>,

    /// JSON file with a full or partial template configuration
    #[arg(short = 'c', long = "config", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Downscale so that neither side exceeds this many pixels
    #[arg(long = "max-dimension")]
    max_dimension: Option<u32>,

    /// Number of palette colors
    #[arg(short = 'k', long = "colors")]
    colors: Option<usize>,
    /// Approximate number of pixels sampled for the palette
    #[arg(long = "sample-budget")]
    sample_budget: Option<usize>,
    /// Regions below this many pixels are merged into a neighbor
    #[arg(long = "min-region")]
    min_region: Option<usize>,
    /// Regions below this many pixels get no number
    #[arg(long = "min-region-for-number")]
    min_region_for_number: Option<usize>,
    /// Outline stroke width in pixels
    #[arg(long = "outline-width")]
    outline_width: Option<usize>,
    /// Largest label font size
    #[arg(long = "font-size")]
    font_size: Option<f64>,
    /// Smallest label font size
    #[arg(long = "min-font-size")]
    min_font_size: Option<f64>,
    /// Legend columns
    #[arg(long = "legend-columns")]
    legend_columns: Option<usize>,
    /// Legend swatch size in pixels
    #[arg(long = "swatch-size")]
    swatch_size: Option<usize>,
    /// Preview outline darkening [0.0, 1.0]
    #[arg(long = "preview-outline-opacity")]
    preview_outline_opacity: Option<f32>,
}

fn build_config(cli: &Cli) -> Result<TemplateConfig> {
    let mut cfg = match &cli.config {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => TemplateConfig::default(),
    };
    if let Some(v) = cli.colors {
        cfg.palette_size = v;
    }
    if let Some(v) = cli.sample_budget {
        cfg.sample_budget = v;
    }
    if let Some(v) = cli.min_region {
        cfg.min_region_size = v;
    }
    if let Some(v) = cli.min_region_for_number {
        cfg.min_region_for_number = v;
    }
    if let Some(v) = cli.outline_width {
        cfg.outline_width = v;
    }
    if let Some(v) = cli.font_size {
        cfg.font_size = v;
    }
    if let Some(v) = cli.min_font_size {
        cfg.min_font_size = v;
    }
    if let Some(v) = cli.legend_columns {
        cfg.legend.columns = v;
    }
    if let Some(v) = cli.swatch_size {
        cfg.legend.swatch_size = v;
    }
    if let Some(v) = cli.preview_outline_opacity {
        cfg.preview_outline_opacity = v;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    input.with_file_name(format!("{}_{}.png", stem, suffix))
}

fn load(path: &Path, max_dimension: Option<u32>) -> Result<RawImage> {
    let mut img = image::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .to_rgb8();

    if let Some(limit) = max_dimension.filter(|&m| m > 0) {
        let (w, h) = img.dimensions();
        if w > limit || h > limit {
            let scale = limit as f64 / w.max(h) as f64;
            let nw = ((w as f64 * scale).round() as u32).max(1);
            let nh = ((h as f64 * scale).round() as u32).max(1);
            log::info!("downscaling {}x{} -> {}x{}", w, h, nw, nh);
            img = image::imageops::resize(&img, nw, nh, FilterType::Lanczos3);
        }
    }

    Ok(RawImage::from_image(img)?)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let image = load(&cli.input, cli.max_dimension)?;
    log::info!(
        "generating template for {}x{} with {} colors",
        image.width(),
        image.height(),
        config.palette_size
    );

    let start = Instant::now();
    let result = generate_template(&image, &config)?;
    log::info!("template generated in {:?}", start.elapsed());
    log::info!(
        "palette: {} colors, regions: {} -> {}, labels: {}",
        result.stats.palette_size,
        result.stats.initial_regions,
        result.stats.final_regions,
        result.stats.labels.placed
    );

    let template_path = cli.template.clone().unwrap_or_else(|| sibling_path(&cli.input, "template"));
    let preview_path = cli.preview.clone().unwrap_or_else(|| sibling_path(&cli.input, "preview"));

    result
        .template
        .save(&template_path)
        .with_context(|| format!("failed to write {}", template_path.display()))?;
    result
        .preview
        .save(&preview_path)
        .with_context(|| format!("failed to write {}", preview_path.display()))?;

    println!("Saved {} and {}", template_path.display(), preview_path.display());
    Ok(())
}
