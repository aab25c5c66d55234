use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chemsim_core::pairs::PairwiseEngine;

fn make_engine(n: usize, dims: usize) -> PairwiseEngine {
    let ids: Vec<String> = (0..n).map(|i| format!("CHEBI:{i:05}")).collect();
    let vectors: Vec<Vec<f32>> = (0..n)
        .map(|i| {
            (0..dims)
                .map(|d| ((i * dims + d) as f32 * 0.013).sin())
                .collect()
        })
        .collect();
    PairwiseEngine::new(ids, vectors, 3).unwrap()
}

fn bench_pairwise(c: &mut Criterion) {
    let engine = make_engine(500, 64);

    c.bench_function("sequential_stream_500x64", |b| {
        b.iter(|| {
            let sum: f64 = engine.stream().map(|t| black_box(t.similarity)).sum();
            black_box(sum)
        })
    });

    c.bench_function("parallel_stream_500x64", |b| {
        b.iter(|| {
            let sum: f64 = engine
                .par_stream(16_384)
                .map(|t| black_box(t.similarity))
                .sum();
            black_box(sum)
        })
    });
}

criterion_group!(benches, bench_pairwise);
criterion_main!(benches);
