//! Property-based tests for the loop finder, classifier, and deduplication.
//!
//! Uses `proptest`-generated small signed graphs (1-7 nodes, 0-24 edges,
//! self-loops allowed, at most one edge per ordered pair).
#![allow(clippy::expect_used)]

use std::collections::HashSet;

use loopfind_core::{
    Cycle, CycleKey, LoopGraph, NodeRecord, Snapshot, analyze_graph, analyze_node, build_graph,
    classify_cycle, cycles_equivalent, find_cycle, graph::connecting_edge,
};
use proptest::prelude::*;

/// One generated edge: `(source, target, negative)`.
type RawEdge = (usize, usize, bool);

fn node_id(i: usize) -> String {
    format!("n{i}")
}

fn caption(negative: bool) -> &'static str {
    if negative { "<p>-</p>" } else { "<p>+</p>" }
}

/// Builds a snapshot with `node_count` nodes and the given edges, listed
/// under their source in generation order.
fn make_snapshot(node_count: usize, edges: &[RawEdge]) -> Snapshot {
    let nodes = (0..node_count)
        .map(|i| {
            edges
                .iter()
                .filter(|(src, _, _)| *src == i)
                .fold(NodeRecord::new(node_id(i), node_id(i)), |node, &(_, tgt, neg)| {
                    node.with_edge(node_id(tgt), Some(caption(neg)))
                })
        })
        .collect();
    Snapshot { nodes }
}

fn make_graph(node_count: usize, edges: &[RawEdge]) -> LoopGraph {
    build_graph(&make_snapshot(node_count, edges)).expect("generated snapshot is consistent")
}

/// Strategy: a node count and a deduplicated edge list over it.
fn arb_signed_graph() -> impl Strategy<Value = (usize, Vec<RawEdge>)> {
    (1usize..=7)
        .prop_flat_map(|node_count| {
            let edges = prop::collection::vec(
                (0usize..node_count, 0usize..node_count, any::<bool>()),
                0..=24,
            );
            (Just(node_count), edges)
        })
        .prop_map(|(node_count, raw)| {
            let mut seen = HashSet::new();
            let edges = raw
                .into_iter()
                .filter(|(s, t, _)| seen.insert((*s, *t)))
                .collect();
            (node_count, edges)
        })
}

fn rotate(cycle: &Cycle, by: usize) -> Cycle {
    let mut nodes = cycle.nodes().to_vec();
    nodes.rotate_left(by);
    Cycle::new(nodes).expect("non-empty")
}

fn reverse(cycle: &Cycle) -> Cycle {
    let mut nodes = cycle.nodes().to_vec();
    nodes.reverse();
    Cycle::new(nodes).expect("non-empty")
}

/// Every cycle the finder returns from each node of `graph`.
fn found_cycles(graph: &LoopGraph) -> Vec<Cycle> {
    graph
        .node_indices()
        .filter_map(|n| find_cycle(graph, n).into_cycle())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// A found cycle starts at the queried node, visits each node at most
    /// once, and is closed by an edge for every link.
    #[test]
    fn found_cycles_are_closed_walks_from_start((n, edges) in arb_signed_graph()) {
        let graph = make_graph(n, &edges);
        for start in graph.node_indices() {
            let Some(cycle) = find_cycle(&graph, start).into_cycle() else {
                continue;
            };
            prop_assert_eq!(cycle.start(), start);
            let distinct: HashSet<_> = cycle.nodes().iter().collect();
            prop_assert_eq!(distinct.len(), cycle.len());
            for (from, to) in cycle.links() {
                prop_assert!(connecting_edge(&graph, from, to).is_some());
            }
        }
    }

    /// A node with a self-loop always reports the length-1 cycle when the
    /// self-loop is its first outgoing edge.
    #[test]
    fn leading_self_loop_is_found_first((n, mut edges) in arb_signed_graph()) {
        edges.retain(|(s, t, _)| !(*s == 0 && *t == 0));
        edges.insert(0, (0, 0, false));
        let graph = make_graph(n, &edges);
        let start = graph.node_index("n0").expect("n0 exists");
        let cycle = find_cycle(&graph, start).into_cycle().expect("self-loop");
        prop_assert!(cycle.is_self_loop());
    }

    /// Flipping the sign of exactly one link flips the polarity.
    #[test]
    fn flipping_one_link_flips_polarity(
        (n, edges) in arb_signed_graph(),
        pick in any::<prop::sample::Index>(),
    ) {
        let graph = make_graph(n, &edges);
        let cycles = found_cycles(&graph);
        prop_assume!(!cycles.is_empty());
        let cycle = &cycles[pick.index(cycles.len())];
        let before = classify_cycle(&graph, cycle).polarity;

        let (from, to) = cycle.links().next().expect("at least one link");
        let (from_id, to_id) = (graph.node_id(from).to_owned(), graph.node_id(to).to_owned());
        let flipped: Vec<RawEdge> = edges
            .iter()
            .map(|&(s, t, neg)| {
                if node_id(s) == from_id && node_id(t) == to_id {
                    (s, t, !neg)
                } else {
                    (s, t, neg)
                }
            })
            .collect();

        // Same snapshot order means the same node indices.
        let flipped_graph = make_graph(n, &flipped);
        let after = classify_cycle(&flipped_graph, cycle).polarity;
        prop_assert_ne!(before, after);
    }

    /// Every rotation of a cycle is equivalent to it; for three or more
    /// nodes the reversal is not.
    #[test]
    fn rotations_are_equivalent((n, edges) in arb_signed_graph()) {
        let graph = make_graph(n, &edges);
        for cycle in found_cycles(&graph) {
            for by in 0..cycle.len() {
                let rotated = rotate(&cycle, by);
                prop_assert!(cycles_equivalent(&cycle, &rotated));
                prop_assert_eq!(CycleKey::of(&cycle), CycleKey::of(&rotated));
            }
            if cycle.len() >= 3 {
                prop_assert!(!cycles_equivalent(&cycle, &reverse(&cycle)));
            }
        }
    }

    /// No two reported loops are equivalent, and every found cycle is
    /// equivalent to some reported loop.
    #[test]
    fn analysis_reports_each_loop_once((n, edges) in arb_signed_graph()) {
        let graph = make_graph(n, &edges);
        let loops = analyze_graph(&graph);

        for (i, a) in loops.iter().enumerate() {
            for b in &loops[i + 1..] {
                prop_assert!(!cycles_equivalent(&a.cycle, &b.cycle));
            }
        }
        for cycle in found_cycles(&graph) {
            prop_assert!(loops.iter().any(|l| cycles_equivalent(&l.cycle, &cycle)));
        }
    }

    /// Re-analyzing the same snapshot, or a rebuilt graph of it, gives the
    /// same result.
    #[test]
    fn analysis_is_idempotent((n, edges) in arb_signed_graph()) {
        let graph = make_graph(n, &edges);
        let first = analyze_graph(&graph);
        prop_assert_eq!(&first, &analyze_graph(&graph));
        prop_assert_eq!(&first, &analyze_graph(&make_graph(n, &edges)));
    }

    /// A per-node query agrees with the finder and the classifier.
    #[test]
    fn node_query_matches_finder((n, edges) in arb_signed_graph()) {
        let graph = make_graph(n, &edges);
        for start in graph.node_indices() {
            let id = graph.node_id(start).to_owned();
            let result = analyze_node(&graph, &id).expect("node exists");
            match find_cycle(&graph, start).into_cycle() {
                Some(cycle) => {
                    prop_assert!(result.found);
                    let path: Vec<&str> = cycle.nodes().iter().map(|&c| graph.node_id(c)).collect();
                    prop_assert_eq!(result.path, path);
                    prop_assert_eq!(
                        result.reinforcing,
                        classify_cycle(&graph, &cycle).polarity.is_reinforcing()
                    );
                }
                None => {
                    prop_assert!(!result.found);
                    prop_assert!(result.path.is_empty());
                }
            }
        }
    }
}
