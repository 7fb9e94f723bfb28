//! Criterion benches for the NAC search.
//!
//! - Full enumeration per algorithm on small rigid and flexible graphs.
//! - First-coloring latency with the default subgraph search.
//! - Pebble-game pre-check on its own.
//!
//! Results live under `target/criterion`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nac::api::{
    families, is_rigid_2d, precheck, search_colorings, single_nac_coloring, Algorithm, Graph,
    SearchCfg,
};

fn graphs() -> Vec<(&'static str, Graph)> {
    vec![
        ("k33", families::complete_bipartite(3, 3)),
        ("k34", families::complete_bipartite(3, 4)),
        ("prism", families::three_prism()),
        ("grid3x3", families::square_grid(3, 3)),
        ("min_rigid", families::smallest_minimally_rigid()),
    ]
}

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");
    let algorithms = [
        "naive",
        "cycles",
        "subgraphs-linear-none-4",
        "subgraphs-log-neighbors_degree-4",
        "subgraphs-shared_vertices-neighbors-4",
    ];
    for (name, g) in graphs() {
        for algo in algorithms {
            let algorithm: Algorithm = algo.parse().unwrap();
            let cfg = SearchCfg::default().with_algorithm(algorithm);
            group.bench_with_input(BenchmarkId::new(algo, name), &g, |b, g| {
                b.iter(|| search_colorings(g, &cfg).unwrap().count())
            });
        }
    }
    group.finish();
}

fn bench_first(c: &mut Criterion) {
    let mut group = c.benchmark_group("first");
    let cfg = SearchCfg::default();
    for (name, g) in graphs() {
        group.bench_with_input(BenchmarkId::new("subgraphs", name), &g, |b, g| {
            b.iter(|| single_nac_coloring(g, &cfg).unwrap())
        });
    }
    group.finish();
}

fn bench_precheck(c: &mut Criterion) {
    let mut group = c.benchmark_group("precheck");
    for (name, g) in graphs() {
        group.bench_with_input(BenchmarkId::new("verdict", name), &g, |b, g| {
            b.iter(|| precheck(black_box(g)))
        });
        group.bench_with_input(BenchmarkId::new("rigid_2d", name), &g, |b, g| {
            b.iter(|| is_rigid_2d(black_box(g)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_enumerate, bench_first, bench_precheck);
criterion_main!(benches);
