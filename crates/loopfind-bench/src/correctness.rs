//! Post-analysis invariant checkers for correctness validation.

use std::collections::HashSet;

use loopfind_core::graph::connecting_edge;
use loopfind_core::{BoardExport, ClassifiedCycle, CycleKey, LoopGraph, Polarity, source};

/// Verifies that `graph` holds exactly the statements of `board`.
pub fn check_graph_invariants(board: &BoardExport, graph: &LoopGraph) -> Result<(), String> {
    let statements: Vec<&str> = board
        .items
        .iter()
        .filter(|i| i.item_type == source::STICKY_NOTE)
        .map(|i| i.id.as_str())
        .collect();
    if graph.node_count() != statements.len() {
        return Err(format!(
            "node count mismatch: graph={}, statements={}",
            graph.node_count(),
            statements.len()
        ));
    }
    for id in statements {
        if graph.node_index(id).is_none() {
            return Err(format!("statement {id} not found in graph index"));
        }
    }
    if graph.edge_count() + graph.inert_edge_count() > board.connectors.len() {
        return Err("more links than connectors".to_owned());
    }
    Ok(())
}

/// Verifies the loops reported by `analyze_graph`:
/// - each loop visits distinct statements and is closed by real links
/// - the polarity matches the parity of the negative-link count
/// - no two loops are rotations of each other
pub fn check_loop_invariants(graph: &LoopGraph, loops: &[ClassifiedCycle]) -> Result<(), String> {
    let mut keys: HashSet<CycleKey> = HashSet::new();

    for (i, l) in loops.iter().enumerate() {
        let nodes = l.cycle.nodes();
        let distinct: HashSet<_> = nodes.iter().collect();
        if distinct.len() != nodes.len() {
            return Err(format!("loop {i} revisits a statement"));
        }
        for (from, to) in l.cycle.links() {
            if connecting_edge(graph, from, to).is_none() {
                return Err(format!(
                    "loop {i}: no link {} -> {}",
                    graph.node_id(from),
                    graph.node_id(to)
                ));
            }
        }
        if l.polarity != Polarity::from_negative_count(l.negative_edges) {
            return Err(format!(
                "loop {i}: {} negative links but {}",
                l.negative_edges, l.polarity
            ));
        }
        if !keys.insert(CycleKey::of(&l.cycle)) {
            return Err(format!("loop {i} duplicates an earlier loop"));
        }
    }
    Ok(())
}
