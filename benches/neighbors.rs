use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use oriscan::kmer::{neighbors, neighbors_iterative};

/// Full 4^k scan vs shell-by-shell growth
fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbors");

    for kmer in ["ACGTAC", "ACGTACGT", "ACGTACGTAC"] {
        group.bench_with_input(BenchmarkId::new("exhaustive", kmer.len()), &kmer, |b, kmer| {
            b.iter(|| black_box(neighbors(kmer, 2)))
        });

        group.bench_with_input(BenchmarkId::new("iterative", kmer.len()), &kmer, |b, kmer| {
            b.iter(|| black_box(neighbors_iterative(kmer, 2)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_neighbors);
criterion_main!(benches);
