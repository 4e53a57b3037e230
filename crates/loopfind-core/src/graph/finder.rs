/// Depth-first search for the first cycle through a given start node.
///
/// The search is exhaustive-first-match: it walks outgoing edges in snapshot
/// order and stops at the first edge that leads back to the start node. The
/// cycle it returns is therefore not necessarily the shortest one.
///
/// # Per-branch state
///
/// Each recursive call receives its own copy of the path and of the visited
/// set. A dead-end branch therefore cannot leave marks that block a sibling
/// branch from reaching the start node through the same intermediate nodes.
/// The copies cost O(depth) per call, which is acceptable for hand-curated
/// diagrams; the search as a whole is exponential in the worst case.
///
/// # Depth limit
///
/// Recursion depth equals the length of the current path, so it is bounded
/// by the longest simple path from the start node. Chains of a few hundred
/// statements, far beyond a hand-drawn board, stay well within a default
/// 2 MiB thread stack. A chain of tens of thousands overflows it and aborts
/// the process; callers analysing graphs that large must run the search on a
/// thread spawned with a bigger stack (`std::thread::Builder::stack_size`).
use std::collections::HashSet;

use petgraph::stable_graph::NodeIndex;

use crate::graph::LoopGraph;

/// A closed walk through the graph.
///
/// `nodes[0]` is the start node; the closing link from the last node back to
/// the first is implied and not repeated. A cycle always has at least one
/// node; a single-node cycle is a self-loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    nodes: Vec<NodeIndex>,
}

impl Cycle {
    /// Wraps an ordered node sequence, returning `None` if it is empty.
    ///
    /// The sequence is not checked against any graph.
    pub fn new(nodes: Vec<NodeIndex>) -> Option<Self> {
        if nodes.is_empty() {
            None
        } else {
            Some(Self { nodes })
        }
    }

    /// The nodes of the cycle in traversal order.
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// The number of nodes (and links) on the cycle.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; provided for API symmetry with [`Cycle::len`].
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The first node of the cycle.
    pub fn start(&self) -> NodeIndex {
        self.nodes[0]
    }

    /// Returns `true` if the cycle is a single node linked to itself.
    pub fn is_self_loop(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Iterates the directed links `(from, to)` of the cycle, including the
    /// closing link from the last node back to the first.
    pub fn links(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        let closing = self.nodes.iter().copied().cycle().skip(1);
        self.nodes.iter().copied().zip(closing)
    }
}

/// Outcome of a cycle search from one start node.
///
/// When `found` is `true`, `path` is the cycle. Otherwise `path` is the
/// walk of the top-level call (just the start node).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSearch {
    /// Whether an edge back to the start node was reached.
    pub found: bool,
    /// The nodes visited on the branch that produced this result.
    pub path: Vec<NodeIndex>,
}

impl CycleSearch {
    /// Converts a successful search into a [`Cycle`].
    pub fn into_cycle(self) -> Option<Cycle> {
        if self.found {
            Cycle::new(self.path)
        } else {
            None
        }
    }
}

/// Searches for the first cycle that starts and ends at `start`.
pub fn find_cycle(graph: &LoopGraph, start: NodeIndex) -> CycleSearch {
    search(graph, start, start, Vec::new(), HashSet::new())
}

fn search(
    graph: &LoopGraph,
    start: NodeIndex,
    current: NodeIndex,
    mut path: Vec<NodeIndex>,
    mut visited: HashSet<NodeIndex>,
) -> CycleSearch {
    visited.insert(current);
    path.push(current);

    for next in graph.successors(current) {
        if next == start {
            return CycleSearch { found: true, path };
        }
        if !visited.contains(&next) {
            let branch = search(graph, start, next, path.clone(), visited.clone());
            if branch.found {
                return branch;
            }
        }
    }

    CycleSearch { found: false, path }
}
