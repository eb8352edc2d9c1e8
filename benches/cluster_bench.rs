use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dead_tree_map::cluster_points;
use glam::DVec2;
use std::hint::black_box;

/// Synthetische Marker-Positionen: deterministisches Pseudo-Muster mit
/// dichten Ballungen und Streuung, wie ein realer Meldungsbestand.
fn build_points(count: usize) -> Vec<DVec2> {
    (0..count)
        .map(|i| {
            let cell = (i % 40) as f64;
            let jitter_x = ((i * 7919) % 97) as f64 * 0.9;
            let jitter_y = ((i * 6271) % 83) as f64 * 1.1;
            DVec2::new(cell * 120.0 + jitter_x, (i / 40) as f64 * 90.0 + jitter_y)
        })
        .collect()
}

fn bench_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustering");

    for &count in &[500usize, 5_000usize, 20_000usize] {
        let points = build_points(count);

        group.bench_with_input(BenchmarkId::new("greedy_radius", count), &points, |b, points| {
            b.iter(|| {
                let clusters = cluster_points(black_box(points), 50.0);
                black_box(clusters.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_clustering);
criterion_main!(benches);
