use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use rawweb_rs::image_pipeline::{
    CfaPattern, ConversionConfig, DemosaicAlgorithm, RawImageData, RawToJpegPipeline,
    ResizeFilter,
};

fn generate_mock_raw_data(width: usize, height: usize) -> RawImageData {
    let data = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            (((x + y) % 4096) * 16) as u16
        })
        .collect();
    RawImageData::from_mosaic(width, height, data, CfaPattern::Rggb)
}

fn benchmark_conversion_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion_by_size");
    group.sample_size(10);

    let sizes = vec![
        (600, 400, "600x400"),
        (1600, 1200, "1600x1200"),
        (4000, 3000, "4000x3000"),
    ];

    for (width, height, label) in sizes {
        let mock_data = generate_mock_raw_data(width, height);
        let pipeline = RawToJpegPipeline::new(ConversionConfig::default());

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &mock_data,
            |b, data| {
                b.iter(|| {
                    let _ = pipeline.encode_raw_image(black_box(data.clone()));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_demosaic_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("demosaic_algorithms");
    group.sample_size(10);
    let mock_data = generate_mock_raw_data(1600, 1200);

    let algorithms = vec![
        (DemosaicAlgorithm::NearestNeighbour, "nearest"),
        (DemosaicAlgorithm::Linear, "linear"),
        (DemosaicAlgorithm::Cubic, "cubic"),
    ];

    for (algorithm, label) in algorithms {
        let config = ConversionConfig::builder().demosaic(algorithm).build();
        let pipeline = RawToJpegPipeline::new(config);

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &mock_data,
            |b, data| {
                b.iter(|| {
                    let _ = pipeline.encode_raw_image(black_box(data.clone()));
                });
            },
        );
    }

    group.finish();
}

fn benchmark_resize_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize_filters");
    group.sample_size(10);
    let mock_data = generate_mock_raw_data(1600, 1200);

    for (filter, label) in [
        (ResizeFilter::Nearest, "nearest"),
        (ResizeFilter::Bilinear, "bilinear"),
        (ResizeFilter::Lanczos3, "lanczos3"),
    ] {
        let config = ConversionConfig::builder().resize_filter(filter).build();
        let pipeline = RawToJpegPipeline::new(config);

        group.bench_function(label, |b| {
            b.iter(|| {
                let _ = pipeline.encode_raw_image(black_box(mock_data.clone()));
            });
        });
    }

    group.finish();
}

fn benchmark_huffman_optimization(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman_optimization");
    group.sample_size(10);
    let mock_data = generate_mock_raw_data(1600, 1200);

    for (optimize, label) in [(true, "optimized"), (false, "standard_tables")] {
        let config = ConversionConfig::builder().optimize_huffman(optimize).build();
        let pipeline = RawToJpegPipeline::new(config);

        group.bench_function(label, |b| {
            b.iter(|| {
                let _ = pipeline.encode_raw_image(black_box(mock_data.clone()));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_conversion_sizes,
    benchmark_demosaic_algorithms,
    benchmark_resize_filters,
    benchmark_huffman_optimization
);
criterion_main!(benches);
