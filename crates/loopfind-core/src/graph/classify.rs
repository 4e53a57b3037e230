/// Sign-parity classification of cycles.
///
/// A feedback loop with an even number of negative links (zero included)
/// amplifies change and is *reinforcing*; an odd number makes it
/// self-correcting, or *balancing*.
use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::graph::{Cycle, LoopGraph};
use crate::sign::EdgeSign;

/// The feedback behaviour of a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Even number of negative links.
    Reinforcing,
    /// Odd number of negative links.
    Balancing,
}

impl Polarity {
    /// Applies the parity rule to a negative-link count.
    pub fn from_negative_count(negative_edges: usize) -> Self {
        if negative_edges % 2 == 0 {
            Self::Reinforcing
        } else {
            Self::Balancing
        }
    }

    /// Returns `true` for [`Polarity::Reinforcing`].
    pub fn is_reinforcing(self) -> bool {
        matches!(self, Self::Reinforcing)
    }

    /// Upper-case name used in human-readable output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reinforcing => "REINFORCING",
            Self::Balancing => "BALANCING",
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of classifying one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Loop polarity.
    pub polarity: Polarity,
    /// Number of negative links found on the cycle.
    pub negative_edges: usize,
    /// The edge used for each link of [`Cycle::links`], in the same order.
    /// `None` where no connecting edge exists.
    pub links: Vec<Option<EdgeIndex>>,
}

/// A cycle together with its classification: the externally visible result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCycle {
    /// The loop itself.
    pub cycle: Cycle,
    /// Loop polarity.
    pub polarity: Polarity,
    /// Number of negative links on the loop.
    pub negative_edges: usize,
    /// Connecting edge per link; see [`Classification::links`].
    pub links: Vec<Option<EdgeIndex>>,
}

impl ClassifiedCycle {
    /// Classifies `cycle` against `graph`.
    pub fn classify(graph: &LoopGraph, cycle: Cycle) -> Self {
        let Classification {
            polarity,
            negative_edges,
            links,
        } = classify_cycle(graph, &cycle);
        Self {
            cycle,
            polarity,
            negative_edges,
            links,
        }
    }

    /// Returns `true` if the loop is reinforcing.
    pub fn is_reinforcing(&self) -> bool {
        self.polarity.is_reinforcing()
    }
}

/// Returns the first outgoing edge of `from` (in snapshot order) that targets
/// `to`.
pub fn connecting_edge(graph: &LoopGraph, from: NodeIndex, to: NodeIndex) -> Option<EdgeIndex> {
    graph
        .outgoing(from)
        .iter()
        .copied()
        .find(|&edge| graph.edge_target(edge) == Some(to))
}

/// Counts negative links on `cycle` and applies the parity rule.
///
/// A link with no connecting edge in `graph` counts as positive. The cycle
/// finder never produces such a link, but cycles can also be assembled by
/// hand.
pub fn classify_cycle(graph: &LoopGraph, cycle: &Cycle) -> Classification {
    let links: Vec<Option<EdgeIndex>> = cycle
        .links()
        .map(|(from, to)| connecting_edge(graph, from, to))
        .collect();

    let negative_edges = links
        .iter()
        .flatten()
        .filter(|&&edge| edge_sign(graph, edge).is_negative())
        .count();

    Classification {
        polarity: Polarity::from_negative_count(negative_edges),
        negative_edges,
        links,
    }
}

/// Returns the sign of `edge`, treating an unknown edge as positive.
pub fn edge_sign(graph: &LoopGraph, edge: EdgeIndex) -> EdgeSign {
    let caption = graph
        .edge_weight(edge)
        .and_then(|weight| weight.caption.as_deref());
    EdgeSign::of_caption(caption)
}
