//! Benchmarks of the maximum clique search.
//!
//! Measures:
//! - each pruning policy of the iterative search on random graphs
//! - the enumeration algorithms (Bron–Kerbosch, branch & bound) on the same graphs
//! - the quasi-threshold recognizers on random trivially perfect graphs
//!
//! Run with: cargo bench --bench pruning_policies

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use clique_qt::check::{is_quasi_threshold, is_quasi_threshold_2};
use clique_qt::generate::TrivPerfectGenerator;
use clique_qt::graph::Graph;
use clique_qt::search::branch_and_bound::branch_and_bound;
use clique_qt::search::bron_kerbosch::bron_kerbosch;
use clique_qt::search::coloring::ColoringStrategy;
use clique_qt::search::max_clique::{MaxCliqueSearch, PruningPolicy};

/// Erdős–Rényi graph G(n, p) with a fixed seed
fn random_graph(n:usize, p:f64, seed:u64) -> Graph<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = Graph::new();
    g.add_nodes_from(0..n);
    for i in 0..n {
        for j in i+1..n {
            if rng.gen_bool(p) { g.add_edge(i, j); }
        }
    }
    g
}

/// Compares the step counts and running time of the pruning policies.
fn bench_policies(c: &mut Criterion) {
    let policies = [
        PruningPolicy::Unbounded,
        PruningPolicy::Cardinality,
        PruningPolicy::GreedyColour(ColoringStrategy::LargestFirst),
        PruningPolicy::GreedyColour(ColoringStrategy::SaturationLargestFirst),
        PruningPolicy::PartialGreedyColour(ColoringStrategy::LargestFirst),
    ];
    let mut group = c.benchmark_group("max_clique");
    for (n, p) in [(40, 0.5), (60, 0.7)].iter() {
        let g = random_graph(*n, *p, 42);
        for policy in policies.iter() {
            group.bench_with_input(
                BenchmarkId::new(policy.to_string(), format!("n{}_p{}", n, p)),
                &g,
                |b, g| b.iter(|| MaxCliqueSearch::new(*policy).run(black_box(g))),
            );
        }
        group.bench_with_input(BenchmarkId::new("bron_kerbosch", format!("n{}_p{}", n, p)), &g, |b, g| {
            b.iter(|| bron_kerbosch(black_box(g)))
        });
        group.bench_with_input(BenchmarkId::new("branch_and_bound", format!("n{}_p{}", n, p)), &g, |b, g| {
            b.iter(|| branch_and_bound(black_box(g)))
        });
    }
    group.finish();
}

/// Full pattern enumeration vs local edge test.
fn bench_quasi_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("quasi_threshold");
    let g = TrivPerfectGenerator::new(7).generate(200);
    group.bench_function("enumeration", |b| b.iter(|| is_quasi_threshold(black_box(&g))));
    group.bench_function("local", |b| b.iter(|| is_quasi_threshold_2(black_box(&g))));
    group.finish();
}

criterion_group!(benches, bench_policies, bench_quasi_threshold);
criterion_main!(benches);
