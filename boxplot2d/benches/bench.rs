use boxplot2d::{BoxGlyph, SampleSeries, Whis};
use criterion::{criterion_group, criterion_main};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn glyph_benchmark(c: &mut criterion::Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let x = (0..10_000).map(|_| rng.gen_range(0.0..1.0)).collect();
    let y = (0..10_000).map(|_| rng.gen_range(0.0..1.0f64).sqrt()).collect();
    let series = SampleSeries::new(x, y).unwrap();
    let mut group = c.benchmark_group("glyph");
    group.sample_size(20);
    group.bench_function("build", |b| {
        b.iter(|| BoxGlyph::build(&series, Whis::TIGHT, true).unwrap())
    });
    group.finish();
}

criterion_group!(benches, glyph_benchmark);
criterion_main!(benches);
