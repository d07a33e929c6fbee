use std::hint::black_box;

use chromostereo_rs::depth_pipeline::{
    apply_effect, resample, smooth, DepthGrid, EffectParams, ExportConfig, Interpolation,
    RasterImage, RasterWriter, StandardTiffWriter, TiffCompression,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_depth(width: usize, height: usize) -> DepthGrid {
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| ((x + y) % 256) as f64 / 255.0))
        .collect();
    DepthGrid::new(width, height, data).unwrap()
}

fn generate_source(width: usize, height: usize) -> RasterImage {
    let rgb: Vec<u8> = (0..width * height)
        .flat_map(|i| {
            let v = (i % 256) as u8;
            [v, v / 2, 255 - v]
        })
        .collect();
    RasterImage::from_rgb8(width, height, &rgb).unwrap()
}

fn benchmark_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample_518_to_1000");
    let depth = generate_depth(518, 518);

    for (mode, label) in [
        (Interpolation::BilinearExact, "bilinear_exact"),
        (Interpolation::Bicubic, "bicubic"),
        (Interpolation::Nearest, "nearest"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &depth, |b, depth| {
            b.iter(|| resample(black_box(depth), 1000, 1000, mode).unwrap());
        });
    }

    group.finish();
}

fn benchmark_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_aware_smoothing");
    let depth = generate_depth(500, 500);

    for strength in [10.0f32, 50.0, 100.0] {
        group.bench_with_input(BenchmarkId::from_parameter(strength), &depth, |b, depth| {
            b.iter(|| smooth(black_box(depth.clone()), strength));
        });
    }

    group.finish();
}

fn benchmark_effect_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("effect_by_size");

    for (width, height, label) in [(100, 100, "100x100"), (500, 500, "500x500"), (1000, 1000, "1000x1000")] {
        let source = generate_source(width, height);
        let depth = generate_depth(width / 2, height / 2);
        let params = EffectParams::default();

        group.bench_with_input(BenchmarkId::from_parameter(label), &source, |b, source| {
            b.iter(|| apply_effect(black_box(source), depth.clone(), &params).unwrap());
        });
    }

    group.finish();
}

fn benchmark_compression_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_methods");
    let source = generate_source(500, 500);

    for (compression, label) in [
        (TiffCompression::None, "none"),
        (TiffCompression::Lzw, "lzw"),
        (TiffCompression::DeflateFast, "deflate_fast"),
        (TiffCompression::DeflateBest, "deflate_best"),
    ] {
        let config = ExportConfig::builder().compression(compression).build();
        group.bench_with_input(BenchmarkId::from_parameter(label), &source, |b, source| {
            b.iter(|| {
                let mut output = Vec::new();
                StandardTiffWriter
                    .write_raster(black_box(source), &mut output, &config)
                    .unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_resample,
    benchmark_smoothing,
    benchmark_effect_sizes,
    benchmark_compression_methods
);
criterion_main!(benches);
