mod common;

use common::*;
use paint_by_numbers::prelude::*;
use paint_by_numbers::{legend_height, Region};

fn config(palette_size: usize, min_region_size: usize) -> TemplateConfig {
    TemplateConfig {
        palette_size,
        min_region_size,
        ..Default::default()
    }
}

/// Every pixel belongs to exactly one region and carries its palette index.
fn assert_partition(result: &TemplateResult) {
    let map = &result.index_map;
    let mut owner = vec![None; map.len()];
    for region in &result.regions {
        assert_eq!(region.area, region.pixels.len());
        for &idx in &region.pixels {
            assert!(owner[idx].is_none(), "pixel {} claimed twice", idx);
            owner[idx] = Some(region.id);
            assert_eq!(map.indices[idx], region.palette_index);
        }
    }
    assert!(owner.iter().all(|o| o.is_some()));
    let total: usize = result.regions.iter().map(|r| r.area).sum();
    assert_eq!(total, map.width * map.height);
}

fn is_connected(region: &Region, width: usize, height: usize) -> bool {
    let mut inside = vec![false; width * height];
    for &idx in &region.pixels {
        inside[idx] = true;
    }
    let mut seen = vec![false; width * height];
    let mut stack = vec![region.pixels[0]];
    seen[region.pixels[0]] = true;
    let mut count = 0;
    while let Some(idx) = stack.pop() {
        count += 1;
        let (x, y) = (idx % width, idx / width);
        let mut next = Vec::new();
        if x > 0 {
            next.push(idx - 1);
        }
        if x + 1 < width {
            next.push(idx + 1);
        }
        if y > 0 {
            next.push(idx - width);
        }
        if y + 1 < height {
            next.push(idx + width);
        }
        for n in next {
            if inside[n] && !seen[n] {
                seen[n] = true;
                stack.push(n);
            }
        }
    }
    count == region.area
}

#[test]
fn test_uniform_image() {
    init_logging();
    let img = solid(2, 2, Rgb::new(255, 0, 0));
    let cfg = TemplateConfig {
        min_region_for_number: 4,
        ..config(4, 1)
    };
    let result = generate_template(&img, &cfg).unwrap();

    assert_eq!(result.palette.colors, vec![Rgb::new(255, 0, 0)]);
    assert_eq!(result.regions.len(), 1);
    assert_eq!(result.regions[0].area, 4);
    assert_eq!(result.regions[0].centroid, (1, 1));
    assert_eq!(result.stats.merge.merged, 0);

    assert_eq!(result.labels.len(), 1);
    assert_eq!(result.labels[0].number, 1);

    // No boundaries, so nothing in the image area is outline black.
    for y in 0..2 {
        for x in 0..2 {
            assert_ne!(result.template.get(x, y), Rgb::BLACK);
        }
    }
    assert_eq!(result.template.height(), 2 + legend_height(1, &cfg.legend));
    assert_eq!(result.preview.pixels().collect::<Vec<_>>(), vec![Rgb::new(255, 0, 0); 4]);
}

#[test]
fn test_checkerboard_keeps_single_pixels() {
    init_logging();
    let img = checkerboard(4, 4);
    let result = generate_template(&img, &config(2, 1)).unwrap();

    assert_eq!(result.palette.colors, vec![Rgb::BLACK, Rgb::WHITE]);
    assert_eq!(result.stats.initial_regions, 16);
    assert_eq!(result.regions.len(), 16);
    assert_eq!(result.stats.merge.merged, 0);
    assert!(result.regions.iter().all(|r| r.area == 1));
    for (i, &index) in result.index_map.indices.iter().enumerate() {
        let (x, y) = (i % 4, i / 4);
        assert_eq!(index, (x + y) % 2);
    }
    assert_partition(&result);
}

#[test]
fn test_checkerboard_collapses_when_merging() {
    init_logging();
    let img = checkerboard(4, 4);
    let result = generate_template(&img, &config(2, 2)).unwrap();

    assert_eq!(result.stats.initial_regions, 16);
    assert_eq!(result.regions.len(), 1);
    assert_eq!(result.regions[0].id, 1);
    assert_eq!(result.regions[0].area, 16);
    assert_eq!(result.stats.merge.merged, 15);
    assert!(result.index_map.indices.iter().all(|&i| i == 1));
    // Preview follows the merged indices, not the source colors.
    assert!(result.preview.pixels().all(|p| p == Rgb::WHITE));
    assert_partition(&result);
}

#[test]
fn test_merge_conserves_pixels() {
    init_logging();
    let img = noisy(120, 90);
    let result = generate_template(&img, &config(8, 20)).unwrap();

    assert!(result.stats.merge.merged > 0);
    assert_eq!(
        result.stats.final_regions,
        result.stats.initial_regions - result.stats.merge.merged
    );
    assert_partition(&result);
    for region in &result.regions {
        assert!(is_connected(region, 120, 90), "region {} split", region.id);
        assert!(region.palette_index < result.palette.len());
    }
}

#[test]
fn test_palette_is_bounded() {
    let img = gradient(64, 64);
    for k in [1, 2, 5, 16] {
        let result = generate_template(&img, &config(k, 1)).unwrap();
        assert!(!result.palette.is_empty());
        assert!(result.palette.len() <= k);
        assert!(result.index_map.indices.iter().all(|&i| i < result.palette.len()));
    }
}

#[test]
fn test_output_is_deterministic() {
    let img = noisy(80, 60);
    let cfg = config(6, 10);
    let a = generate_template(&img, &cfg).unwrap();
    let b = generate_template(&img, &cfg).unwrap();
    assert_eq!(a.template, b.template);
    assert_eq!(a.preview, b.preview);
    assert_eq!(a.palette, b.palette);
    assert_eq!(a.index_map, b.index_map);
    assert_eq!(a.regions, b.regions);
    assert_eq!(a.labels, b.labels);
}

#[test]
fn test_labels_do_not_overlap() {
    let colors = [Rgb::new(200, 30, 30), Rgb::new(30, 200, 30), Rgb::new(30, 30, 200)];
    let img = stripes(300, 80, 25, &colors);
    let cfg = TemplateConfig {
        min_region_for_number: 10,
        ..config(3, 5)
    };
    let result = generate_template(&img, &cfg).unwrap();

    assert!(result.labels.len() > 1);
    for (i, a) in result.labels.iter().enumerate() {
        let region = result.regions.iter().find(|r| r.id == a.region_id).unwrap();
        assert!(region.area >= cfg.min_region_for_number);
        assert_eq!(a.number, region.palette_index + 1);
        assert!(a.radius >= cfg.min_font_size && a.radius <= cfg.font_size);
        for b in &result.labels[i + 1..] {
            let d = ((a.x as f64 - b.x as f64).powi(2) + (a.y as f64 - b.y as f64).powi(2)).sqrt();
            assert!(d > b.radius * 1.5 + a.radius);
        }
    }
    assert_eq!(
        result.stats.labels.placed + result.stats.labels.too_small + result.stats.labels.overlapping,
        result.regions.len()
    );
}

#[test]
fn test_single_pixel_image() {
    let img = solid(1, 1, Rgb::new(10, 20, 30));
    let result = generate_template(&img, &TemplateConfig::default()).unwrap();
    assert_eq!(result.regions.len(), 1);
    assert_eq!(result.regions[0].centroid, (0, 0));
    // Area 1 is below the default numbering threshold.
    assert!(result.labels.is_empty());
    assert_eq!(result.stats.labels.too_small, 1);
    assert_eq!(result.template.width(), 1);
    assert_eq!(result.template.height(), 1 + legend_height(1, &TemplateConfig::default().legend));
    assert_eq!(result.preview.width(), 1);
    assert_eq!(result.preview.height(), 1);
}

#[test]
fn test_zero_dimensions_rejected() {
    assert!(matches!(RawImage::new(0, 5, vec![]), Err(PbnError::InvalidInput(_))));
    assert!(matches!(RawImage::from_rgba(5, 0, &[]), Err(PbnError::InvalidInput(_))));
}

#[test]
fn test_rgba_input_matches_rgb() {
    let rgb = gradient(16, 8);
    let rgba = rgb.to_rgba_bytes();
    let from_rgba = RawImage::from_rgba(16, 8, &rgba).unwrap();
    assert_eq!(from_rgba, rgb);

    let cfg = config(4, 3);
    let a = generate_template(&rgb, &cfg).unwrap();
    let b = generate_template(&from_rgba, &cfg).unwrap();
    assert_eq!(a.template, b.template);
}

#[test]
fn test_zero_outline_width() {
    let img = stripes(40, 10, 20, &[Rgb::new(250, 0, 0), Rgb::new(0, 0, 250)]);
    let cfg = TemplateConfig {
        outline_width: 0,
        min_region_for_number: usize::MAX,
        ..config(2, 1)
    };
    let result = generate_template(&img, &cfg).unwrap();

    for y in 0..10 {
        for x in 0..40 {
            assert_eq!(result.template.get(x, y), Rgb::WHITE);
        }
    }
    // The preview still shades the boundary column.
    assert_ne!(result.preview.get(20, 0), Rgb::new(0, 0, 252));
    assert_eq!(result.preview.get(21, 0), Rgb::new(0, 0, 252));
}

#[test]
fn test_legend_draws_one_swatch_per_color() {
    let red = Rgb::new(255, 0, 0);
    let (w, h) = (400, 20);
    let cfg = config(4, 1);
    let result = generate_template(&solid(w, h, red), &cfg).unwrap();
    assert_eq!(result.palette.len(), 1);

    let layout = &cfg.legend;
    let (pad, swatch) = (layout.padding, layout.swatch_size);
    let legend_top = h;
    // Border at the cell corner, fill inside.
    assert_eq!(result.template.get(pad, legend_top + pad), Rgb::BLACK);
    assert_eq!(result.template.get(pad + swatch / 2, legend_top + pad + swatch / 2), red);

    // Only the first cell holds a swatch.
    let col_width = w / layout.columns;
    assert_eq!(
        result.template.get(col_width + pad + swatch / 2, legend_top + pad + swatch / 2),
        Rgb::WHITE
    );
    let filled = (legend_top..result.template.height())
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| result.template.get(x, y) == red)
        .count();
    assert_eq!(filled, (swatch - 2) * (swatch - 2));
}
