//! WebAssembly interface for template generation.

use crate::pipeline::{generate_template, TemplateConfig, TemplateResult};
use crate::raster::RawImage;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct PaintByNumbers {
    config: TemplateConfig,
}

#[wasm_bindgen]
impl PaintByNumbers {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: TemplateConfig::default(),
        }
    }

    pub fn set_palette_size(&mut self, size: usize) {
        self.config.palette_size = size;
    }

    pub fn set_sample_budget(&mut self, budget: usize) {
        self.config.sample_budget = budget;
    }

    pub fn set_min_region_size(&mut self, size: usize) {
        self.config.min_region_size = size;
    }

    pub fn set_min_region_for_number(&mut self, size: usize) {
        self.config.min_region_for_number = size;
    }

    pub fn set_outline_width(&mut self, width: usize) {
        self.config.outline_width = width;
    }

    pub fn set_font_sizes(&mut self, min_font_size: f64, font_size: f64) {
        self.config.min_font_size = min_font_size;
        self.config.font_size = font_size;
    }

    pub fn set_legend_layout(&mut self, columns: usize, swatch_size: usize, padding: usize) {
        self.config.legend.columns = columns;
        self.config.legend.swatch_size = swatch_size;
        self.config.legend.padding = padding;
    }

    pub fn set_preview_outline_opacity(&mut self, opacity: f32) {
        self.config.preview_outline_opacity = opacity;
    }

    /// Process RGBA canvas data; alpha is ignored.
    pub fn process(
        &self,
        image_data: &[u8],
        width: usize,
        height: usize,
    ) -> Result<WasmTemplateResult, JsValue> {
        let image = RawImage::from_rgba(width, height, image_data)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let result = generate_template(&image, &self.config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmTemplateResult::from(result))
    }
}

impl Default for PaintByNumbers {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
pub struct WasmTemplateResult {
    width: usize,
    template_height: usize,
    template_rgba: Vec<u8>,
    preview_rgba: Vec<u8>,
    palette_data: Vec<u8>,
    region_count: usize,
}

#[wasm_bindgen]
impl WasmTemplateResult {
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn template_height(&self) -> usize {
        self.template_height
    }
    pub fn get_template_rgba(&self) -> Vec<u8> {
        self.template_rgba.clone()
    }
    pub fn get_preview_rgba(&self) -> Vec<u8> {
        self.preview_rgba.clone()
    }
    pub fn get_palette_data(&self) -> Vec<u8> {
        self.palette_data.clone()
    }
    pub fn palette_len(&self) -> usize {
        self.palette_data.len() / 3
    }
    pub fn region_count(&self) -> usize {
        self.region_count
    }
}

impl From<TemplateResult> for WasmTemplateResult {
    fn from(result: TemplateResult) -> Self {
        Self {
            width: result.template.width(),
            template_height: result.template.height(),
            template_rgba: result.template.to_rgba_bytes(),
            preview_rgba: result.preview.to_rgba_bytes(),
            palette_data: result.palette.to_rgb_bytes(),
            region_count: result.regions.len(),
        }
    }
}
