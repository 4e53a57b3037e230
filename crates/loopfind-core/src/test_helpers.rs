//! Shared fixture constructors for unit tests across `loopfind-core`.
//!
//! Integration tests under `crates/loopfind-core/tests/` define their own
//! helpers because this module only exists in test builds.
#![allow(clippy::expect_used)]

use petgraph::stable_graph::NodeIndex;

use crate::graph::{Cycle, LoopGraph, build_graph};
use crate::snapshot::{NodeRecord, Snapshot};

/// Creates a node whose content equals its id.
pub fn node(id: &str) -> NodeRecord {
    NodeRecord::new(id, id)
}

/// Wraps nodes into a [`Snapshot`].
pub fn snapshot(nodes: Vec<NodeRecord>) -> Snapshot {
    Snapshot { nodes }
}

/// Builds a [`LoopGraph`], panicking if the snapshot is inconsistent.
pub fn build(nodes: Vec<NodeRecord>) -> LoopGraph {
    build_graph(&snapshot(nodes)).expect("fixture snapshot is consistent")
}

/// Resolves a statement id to its index.
pub fn idx(graph: &LoopGraph, id: &str) -> NodeIndex {
    graph.node_index(id).expect("node must exist")
}

/// Builds a [`Cycle`] from statement ids.
pub fn cycle_of(graph: &LoopGraph, ids: &[&str]) -> Cycle {
    Cycle::new(ids.iter().map(|id| idx(graph, id)).collect()).expect("non-empty cycle")
}

/// Maps a cycle back to its statement ids.
pub fn ids(graph: &LoopGraph, cycle: &Cycle) -> Vec<String> {
    cycle
        .nodes()
        .iter()
        .map(|&n| graph.node_id(n).to_owned())
        .collect()
}
