use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pixplot::{
    histogram::{Histogram, HistogramStrategy},
    intensity::IntensityTransform,
};

pub(crate) mod utils;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram_strategy");

    for size in [100u32, 450, 1000, 2000] {
        let map = IntensityTransform::Par.apply(&utils::gen_random_image(size));
        for (name, strategy) in [
            ("seq", HistogramStrategy::Seq),
            ("par", HistogramStrategy::Par),
        ] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| black_box(Histogram::from_intensity_with(&map, strategy)));
            });
        }
    }

    group.finish();
}

criterion_group!(histogram_strategy, criterion_benchmark);
criterion_main!(histogram_strategy);
