/// Graph construction from a [`Snapshot`] using `petgraph`, plus the loop
/// algorithms that run over it.
///
/// [`LoopGraph`] is an arena: nodes and edges live in a `StableDiGraph` and
/// are addressed by index, with a `HashMap<String, NodeIndex>` for lookups by
/// statement id. No node holds a reference to another.
///
/// # Construction
///
/// [`build_graph`] runs two passes over the snapshot:
/// 1. **Node pass**: inserts every node and records `id → NodeIndex`.
///    Fails on duplicate ids.
/// 2. **Edge pass**: resolves each edge's target and inserts it. Edges
///    without a target, or whose target is not part of the snapshot, are
///    inert: they are counted but never inserted.
///
/// Outgoing edges are additionally recorded per node in snapshot order.
/// petgraph's own adjacency iteration runs newest-first, and the cycle finder
/// must walk edges in the order the host supplied them.
///
/// # Loop Algorithms
///
/// - [`finder`]: depth-first search for the first cycle through a node.
/// - [`classify`]: sign-parity classification of a cycle.
/// - [`dedup`]: rotation-equivalence of cycles.
pub mod classify;
pub mod dedup;
pub mod finder;

pub use classify::{
    ClassifiedCycle, Classification, Polarity, classify_cycle, connecting_edge, edge_sign,
};
pub use dedup::{CycleKey, cycles_equivalent};
pub use finder::{Cycle, CycleSearch, find_cycle};

use std::collections::HashMap;

pub use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableDiGraph;
use thiserror::Error;

use crate::label::extract_plain_text;
use crate::snapshot::Snapshot;

/// Weight stored on each petgraph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeWeight {
    /// Statement id from the snapshot.
    pub id: String,
    /// Raw rich-text content.
    pub content: String,
    /// Display label: `content` as plain text, trimmed.
    pub label: String,
}

/// Weight stored on each petgraph edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeWeight {
    /// Host connector id, if the snapshot supplied one.
    pub id: Option<String>,
    /// Raw rich-text caption.
    pub caption: Option<String>,
}

/// Errors that can occur while building a [`LoopGraph`] from a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphBuildError {
    /// Two snapshot nodes share the same id.
    #[error("duplicate node ID: {0:?}")]
    DuplicateNodeId(String),
    /// An edge is attached to a node other than its declared source.
    #[error("edge attached to node {node_id:?} declares source {source_id:?}")]
    SourceMismatch {
        /// The node the edge is listed under.
        node_id: String,
        /// The source id the edge itself declares.
        source_id: String,
    },
}

/// A directed, signed graph built from one [`Snapshot`].
///
/// Construct with [`build_graph`]. The graph is never mutated afterwards;
/// a new snapshot means a new graph.
#[derive(Debug)]
pub struct LoopGraph {
    graph: StableDiGraph<NodeWeight, EdgeWeight>,
    id_to_index: HashMap<String, NodeIndex>,
    outgoing: HashMap<NodeIndex, Vec<EdgeIndex>>,
    inert_edges: usize,
}

impl LoopGraph {
    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of traversable edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the number of snapshot edges dropped for lack of a resolvable
    /// target.
    pub fn inert_edge_count(&self) -> usize {
        self.inert_edges
    }

    /// Looks up the [`NodeIndex`] for a statement id.
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    /// Returns the [`NodeWeight`] for `idx`, or `None` if it does not exist.
    pub fn node_weight(&self, idx: NodeIndex) -> Option<&NodeWeight> {
        self.graph.node_weight(idx)
    }

    /// Returns the [`EdgeWeight`] for `idx`, or `None` if it does not exist.
    pub fn edge_weight(&self, idx: EdgeIndex) -> Option<&EdgeWeight> {
        self.graph.edge_weight(idx)
    }

    /// Returns the target node of edge `idx`.
    pub fn edge_target(&self, idx: EdgeIndex) -> Option<NodeIndex> {
        self.graph.edge_endpoints(idx).map(|(_, target)| target)
    }

    /// Returns the statement id of `idx`, or `""` for an unknown index.
    pub fn node_id(&self, idx: NodeIndex) -> &str {
        self.graph
            .node_weight(idx)
            .map_or("", |weight| weight.id.as_str())
    }

    /// Returns the display label of `idx`, or `""` for an unknown index.
    pub fn node_label(&self, idx: NodeIndex) -> &str {
        self.graph
            .node_weight(idx)
            .map_or("", |weight| weight.label.as_str())
    }

    /// Iterates node indices in snapshot order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Returns the outgoing edges of `idx` in snapshot order.
    pub fn outgoing(&self, idx: NodeIndex) -> &[EdgeIndex] {
        self.outgoing.get(&idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates the targets of the outgoing edges of `idx` in snapshot order.
    ///
    /// A target appears once per connecting edge.
    pub fn successors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.outgoing(idx)
            .iter()
            .filter_map(|&edge| self.edge_target(edge))
    }
}

/// Constructs a [`LoopGraph`] from a [`Snapshot`].
///
/// Construction is O(N + E).
///
/// # Errors
///
/// - [`GraphBuildError::DuplicateNodeId`]: two nodes share the same id.
/// - [`GraphBuildError::SourceMismatch`]: an edge is listed under a node
///   that is not its source.
pub fn build_graph(snapshot: &Snapshot) -> Result<LoopGraph, GraphBuildError> {
    let node_count = snapshot.nodes.len();
    let edge_count = snapshot.nodes.iter().map(|n| n.edges.len()).sum();

    let mut graph: StableDiGraph<NodeWeight, EdgeWeight> =
        StableDiGraph::with_capacity(node_count, edge_count);
    let mut id_to_index: HashMap<String, NodeIndex> = HashMap::with_capacity(node_count);
    let mut outgoing: HashMap<NodeIndex, Vec<EdgeIndex>> = HashMap::with_capacity(node_count);
    let mut inert_edges = 0;

    for node in &snapshot.nodes {
        if id_to_index.contains_key(&node.id) {
            return Err(GraphBuildError::DuplicateNodeId(node.id.clone()));
        }
        let weight = NodeWeight {
            id: node.id.clone(),
            content: node.content.clone(),
            label: extract_plain_text(&node.content, true).trim().to_owned(),
        };
        let idx = graph.add_node(weight);
        id_to_index.insert(node.id.clone(), idx);
    }

    for node in &snapshot.nodes {
        let Some(&source_idx) = id_to_index.get(&node.id) else {
            continue;
        };
        for edge in &node.edges {
            if edge.source != node.id {
                return Err(GraphBuildError::SourceMismatch {
                    node_id: node.id.clone(),
                    source_id: edge.source.clone(),
                });
            }

            let target_idx = edge
                .target
                .as_deref()
                .and_then(|target| id_to_index.get(target).copied());
            let Some(target_idx) = target_idx else {
                tracing::trace!(
                    source = %node.id,
                    target = ?edge.target,
                    "skipping edge without a resolvable target"
                );
                inert_edges += 1;
                continue;
            };

            let weight = EdgeWeight {
                id: edge.id.clone(),
                caption: edge.caption.clone(),
            };
            let edge_idx = graph.add_edge(source_idx, target_idx, weight);
            outgoing.entry(source_idx).or_default().push(edge_idx);
        }
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        inert_edges,
        "built loop graph"
    );

    Ok(LoopGraph {
        graph,
        id_to_index,
        outgoing,
        inert_edges,
    })
}
