use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lineup_optimizer::{best_lineup, classify, Candidate};

fn roster_pool(size: usize) -> Vec<Candidate> {
    let positions = ["G", "F", "G-F", "C", ""];
    (0..size)
        .map(|i| Candidate::new(((i * 37) % 41) as i64, classify(positions[i % positions.len()])))
        .collect()
}

fn bench_best_lineup_roster(c: &mut Criterion) {
    let candidates = roster_pool(12);
    c.bench_function("best_lineup_roster_12", |b| {
        b.iter(|| black_box(best_lineup(black_box(&candidates))));
    });
}

fn bench_best_lineup_large_pool(c: &mut Criterion) {
    let candidates = roster_pool(500);
    c.bench_function("best_lineup_pool_500", |b| {
        b.iter(|| black_box(best_lineup(black_box(&candidates))));
    });
}

criterion_group!(benches, bench_best_lineup_roster, bench_best_lineup_large_pool);
criterion_main!(benches);
