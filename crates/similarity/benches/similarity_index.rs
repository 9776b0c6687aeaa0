//! Benchmarks for index construction and neighbor queries
//!
//! Run with: cargo bench --package similarity
//!
//! Uses synthetic bags shaped like prepared catalog rows, so no dataset
//! file is needed.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pipeline::FeatureBag;
use similarity::SimilarityIndex;

const GENRES: [&str; 8] = [
    "action", "adventure", "drama", "comedy", "horror", "thriller", "romance", "scifi",
];

fn synthetic_bags(n: usize) -> Vec<FeatureBag> {
    (0..n)
        .map(|i| {
            let text = format!(
                "actor{} actor{} unknown director{} {} {}",
                i % 97,
                i % 61,
                i % 41,
                GENRES[i % GENRES.len()],
                GENRES[(i / 3) % GENRES.len()],
            );
            FeatureBag::from(text.as_str())
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity_build");
    group.sample_size(10);

    for n in [500, 2000] {
        let bags = synthetic_bags(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &bags, |b, bags| {
            b.iter(|| black_box(SimilarityIndex::build(black_box(bags)).unwrap()))
        });
    }
    group.finish();
}

fn bench_neighbors(c: &mut Criterion) {
    let index = SimilarityIndex::build(&synthetic_bags(5000)).expect("Failed to build index");

    c.bench_function("neighbors_top10_of_5000", |b| {
        b.iter(|| black_box(index.neighbors(black_box(1234), black_box(10)).unwrap()))
    });
}

criterion_group!(benches, bench_build, bench_neighbors);
criterion_main!(benches);
