//! Benchmarks for paint-by-numbers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use paint_by_numbers::prelude::*;

fn generate_test_image(width: usize, height: usize) -> RawImage {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            // Gradients plus a blocky overlay so segmentation has real regions
            let block = ((x / 16 + y / 16) % 3) as u8 * 40;
            let r = ((x * 255) / width) as u8;
            let g = ((y * 255) / height) as u8 / 2 + block;
            let b = (((x + y) * 128) / (width + height)) as u8;
            data.extend_from_slice(&[r, g, b]);
        }
    }
    RawImage::new(width, height, data).unwrap()
}

fn bench_palette_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette_extraction");

    for size in [64, 128, 256, 512].iter() {
        let image = generate_test_image(*size, *size);
        let samples = paint_by_numbers::sample_colors(&image, 50_000);

        group.bench_with_input(BenchmarkId::new("sample", size), size, |b, _| {
            b.iter(|| paint_by_numbers::sample_colors(black_box(&image), black_box(50_000)))
        });

        group.bench_with_input(BenchmarkId::new("median_cut", size), size, |b, _| {
            b.iter(|| paint_by_numbers::extract_palette(black_box(&samples), black_box(16)))
        });
    }

    group.finish();
}

fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");
    group.sample_size(20);

    for size in [64, 128, 256].iter() {
        let image = generate_test_image(*size, *size);
        let samples = paint_by_numbers::sample_colors(&image, 50_000);
        let palette = paint_by_numbers::extract_palette(&samples, 16);
        let map = paint_by_numbers::classify(&image, &palette);

        group.bench_with_input(BenchmarkId::new("classify", size), size, |b, _| {
            b.iter(|| paint_by_numbers::classify(black_box(&image), black_box(&palette)))
        });

        group.bench_with_input(BenchmarkId::new("segment_and_merge", size), size, |b, _| {
            b.iter(|| {
                let mut map = map.clone();
                let regions = paint_by_numbers::segment(&map);
                paint_by_numbers::merge_small_regions(&mut map, regions, black_box(20))
            })
        });
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    group.sample_size(10);

    for size in [64, 128, 256].iter() {
        let image = generate_test_image(*size, *size);

        group.bench_with_input(BenchmarkId::new("generate_template", size), size, |b, _| {
            b.iter(|| {
                generate_template(
                    black_box(&image),
                    black_box(&TemplateConfig {
                        palette_size: 12,
                        ..Default::default()
                    }),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_palette_extraction,
    bench_segmentation,
    bench_full_pipeline,
);
criterion_main!(benches);
