use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use lumen_core::{AdjustmentParameters, Histogram, Pipeline, PixelBuffer};

fn test_image(width: u32, height: u32) -> PixelBuffer {
    let data = (0..width * height * 4)
        .map(|i| if i % 4 == 3 { 255 } else { (i * 31 % 256) as u8 })
        .collect();
    PixelBuffer::from_data(width, height, data).expect("valid buffer")
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = Pipeline::new();
    let image = test_image(1024, 768);

    let tone_only = AdjustmentParameters {
        exposure: 0.4,
        contrast: 1.2,
        highlights: -0.2,
        shadows: 0.2,
        ..Default::default()
    };
    let everything = AdjustmentParameters {
        brightness: 1.1,
        exposure: 0.4,
        contrast: 1.2,
        highlights: -0.2,
        shadows: 0.2,
        blacks: -0.1,
        whites: 0.1,
        temperature: 0.8,
        tint: -0.4,
        vibrance: 1.3,
        saturation: 1.1,
        grain: 0.2,
        vignette: 0.5,
        sharpness: 0.6,
    };

    c.bench_function("pipeline_neutral_1024x768", |b| {
        b.iter(|| pipeline.run(black_box(&image), &AdjustmentParameters::default()))
    });
    c.bench_function("pipeline_tone_1024x768", |b| {
        b.iter(|| pipeline.run(black_box(&image), &tone_only))
    });
    c.bench_function("pipeline_all_1024x768", |b| {
        b.iter(|| pipeline.run(black_box(&image), &everything))
    });
    c.bench_function("histogram_1024x768", |b| {
        b.iter(|| Histogram::compute(black_box(&image)))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
