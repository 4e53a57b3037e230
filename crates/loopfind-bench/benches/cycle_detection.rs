//! Loop analysis benchmarks (`find_cycle`, `analyze_graph`, `analyze_node`).
#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use loopfind_bench::{SizeTier, generate_graph};
use loopfind_core::{analyze_graph, analyze_node, find_cycle};

fn bench_analyze_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_graph");

    for (name, tier) in [
        ("S", SizeTier::Small),
        ("M", SizeTier::Medium),
        ("L", SizeTier::Large),
    ] {
        let graph = generate_graph(&tier.config(42));
        group.throughput(Throughput::Elements(graph.node_count() as u64));

        group.bench_with_input(BenchmarkId::new("sweep", name), &graph, |b, graph| {
            b.iter(|| analyze_graph(graph));
        });
    }
    group.finish();
}

fn bench_single_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_node");

    for (name, tier) in [("S", SizeTier::Small), ("L", SizeTier::Large)] {
        let graph = generate_graph(&tier.config(42));
        let driver = graph.node_indices().next().expect("non-empty board");
        let driver_id = graph.node_id(driver).to_owned();

        group.bench_function(BenchmarkId::new("find_cycle", name), |b| {
            b.iter(|| find_cycle(&graph, driver));
        });

        group.bench_function(BenchmarkId::new("analyze_node", name), |b| {
            b.iter(|| analyze_node(&graph, &driver_id).expect("present"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_analyze_graph, bench_single_node);
criterion_main!(benches);
