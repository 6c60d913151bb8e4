//! Trace generation benchmarks.
//!
//! Run with: cargo bench

use bucket_studio::engine::{InputSampler, StudioRng};
use bucket_studio::replay::Trace;
use bucket_studio::sort::{generate_steps, BucketScheme, TraceGuard};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn sample(size: usize) -> Vec<i64> {
    let mut rng = StudioRng::new(42);
    InputSampler::new(size, 5, 99)
        .map(|s| s.sample(&mut rng))
        .unwrap_or_default()
}

fn bench_generate_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_steps");
    group.sample_size(100);
    group.confidence_level(0.95);

    for n in [12, 100, 500].iter() {
        let input = sample(*n);
        group.bench_with_input(BenchmarkId::new("elements", n), &input, |b, input| {
            b.iter(|| black_box(generate_steps(input)));
        });
    }

    group.finish();
}

fn bench_guard(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_guard");
    let guard = TraceGuard::default();

    for n in [12, 100].iter() {
        let input = sample(*n);
        let steps = generate_steps(&input);
        group.bench_with_input(BenchmarkId::new("check", n), &steps, |b, steps| {
            b.iter(|| black_box(guard.check(&input, steps).is_ok()));
        });
    }

    group.finish();
}

fn bench_checksum(c: &mut Criterion) {
    let input = sample(12);
    c.bench_function("trace_generate_with_checksum", |b| {
        b.iter(|| black_box(Trace::generate(&input, BucketScheme::default()).is_ok()));
    });
}

criterion_group!(benches, bench_generate_steps, bench_guard, bench_checksum);
criterion_main!(benches);
