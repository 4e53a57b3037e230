/// Whole-graph and per-node loop analysis.
///
/// [`analyze_graph`] sweeps every node of a [`LoopGraph`], runs the cycle
/// finder from it, classifies what it finds, and keeps one representative
/// per rotation-equivalence class. [`analyze_node`] answers the focused
/// question "is this statement on a loop, and which one?" for a single node,
/// independently of the sweep.
///
/// Both are pure functions of the graph: re-running them on an unchanged
/// snapshot yields the same result.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{ClassifiedCycle, CycleKey, LoopGraph, Polarity, find_cycle};

/// Errors returned by per-node queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The requested statement id is not part of the graph.
    #[error("node not found: {0:?}")]
    NodeNotFound(String),
}

/// Finds every distinct feedback loop in `graph`.
///
/// Nodes are visited in snapshot order; each contributes at most one loop
/// (the first the finder reaches). A loop already recorded under another
/// starting node is skipped. The result is in discovery order.
pub fn analyze_graph(graph: &LoopGraph) -> Vec<ClassifiedCycle> {
    let mut seen: HashSet<CycleKey> = HashSet::new();
    let mut loops: Vec<ClassifiedCycle> = Vec::new();

    for start in graph.node_indices() {
        let Some(cycle) = find_cycle(graph, start).into_cycle() else {
            continue;
        };
        let classified = ClassifiedCycle::classify(graph, cycle);

        if !seen.insert(CycleKey::of(&classified.cycle)) {
            tracing::debug!(start = graph.node_id(start), "skipping rotation of known loop");
            continue;
        }

        tracing::debug!(
            start = graph.node_id(start),
            length = classified.cycle.len(),
            polarity = %classified.polarity,
            "found loop"
        );
        loops.push(classified);
    }

    let summary = LoopSummary::of(&loops);
    tracing::info!(
        nodes = graph.node_count(),
        loops = summary.total,
        reinforcing = summary.reinforcing,
        balancing = summary.balancing,
        "loop analysis complete"
    );

    loops
}

/// Loop membership of a single statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAnalysis {
    /// The statement id that was queried.
    pub node: String,
    /// Whether a loop through the node was found.
    pub found: bool,
    /// Statement ids of the loop, starting at `node`. Empty when `found` is
    /// `false`.
    pub path: Vec<String>,
    /// Whether the loop is reinforcing. `false` when `found` is `false`.
    pub reinforcing: bool,
}

impl NodeAnalysis {
    /// The loop polarity, when a loop was found.
    pub fn polarity(&self) -> Option<Polarity> {
        if !self.found {
            return None;
        }
        Some(if self.reinforcing {
            Polarity::Reinforcing
        } else {
            Polarity::Balancing
        })
    }
}

/// Reports whether `node_id` lies on a feedback loop.
///
/// # Errors
///
/// Returns [`QueryError::NodeNotFound`] if `node_id` is not in the graph.
pub fn analyze_node(graph: &LoopGraph, node_id: &str) -> Result<NodeAnalysis, QueryError> {
    let start = graph
        .node_index(node_id)
        .ok_or_else(|| QueryError::NodeNotFound(node_id.to_owned()))?;

    let Some(cycle) = find_cycle(graph, start).into_cycle() else {
        return Ok(NodeAnalysis {
            node: node_id.to_owned(),
            found: false,
            path: Vec::new(),
            reinforcing: false,
        });
    };

    let classified = ClassifiedCycle::classify(graph, cycle);
    let path = classified
        .cycle
        .nodes()
        .iter()
        .map(|&idx| graph.node_id(idx).to_owned())
        .collect();

    Ok(NodeAnalysis {
        node: node_id.to_owned(),
        found: true,
        path,
        reinforcing: classified.is_reinforcing(),
    })
}

/// Loop counts by polarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopSummary {
    /// Total number of distinct loops.
    pub total: usize,
    /// Number of reinforcing loops.
    pub reinforcing: usize,
    /// Number of balancing loops.
    pub balancing: usize,
}

impl LoopSummary {
    /// Tallies `loops` by polarity.
    pub fn of(loops: &[ClassifiedCycle]) -> Self {
        let reinforcing = loops.iter().filter(|l| l.is_reinforcing()).count();
        Self {
            total: loops.len(),
            reinforcing,
            balancing: loops.len() - reinforcing,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::test_helpers::{build, ids, node};

    fn loop_ids(graph: &LoopGraph, loops: &[ClassifiedCycle]) -> Vec<Vec<String>> {
        loops.iter().map(|l| ids(graph, &l.cycle)).collect()
    }

    #[test]
    fn balancing_triangle() {
        let g = build(vec![
            node("a").with_edge("b", Some("+")),
            node("b").with_edge("c", None),
            node("c").with_edge("a", Some("-")),
        ]);
        let loops = analyze_graph(&g);
        assert_eq!(loop_ids(&g, &loops), [["a", "b", "c"]]);
        assert_eq!(loops[0].polarity, Polarity::Balancing);
        assert_eq!(loops[0].negative_edges, 1);
    }

    #[test]
    fn reinforcing_triangle() {
        let g = build(vec![
            node("a").with_edge("b", Some("+")),
            node("b").with_edge("c", None),
            node("c").with_edge("a", Some("+")),
        ]);
        let loops = analyze_graph(&g);
        assert_eq!(loop_ids(&g, &loops), [["a", "b", "c"]]);
        assert!(loops[0].is_reinforcing());
    }

    #[test]
    fn mutual_pair_reported_once() {
        let g = build(vec![
            node("a").with_edge("b", None),
            node("b").with_edge("a", None),
        ]);
        let loops = analyze_graph(&g);
        assert_eq!(loop_ids(&g, &loops), [["a", "b"]]);
        assert!(loops[0].is_reinforcing());
    }

    #[test]
    fn self_loop_reported() {
        let g = build(vec![node("a").with_edge("a", None)]);
        let loops = analyze_graph(&g);
        assert_eq!(loop_ids(&g, &loops), [["a"]]);
        assert!(loops[0].is_reinforcing());
    }

    #[test]
    fn acyclic_graph_has_no_loops() {
        let g = build(vec![
            node("a").with_edge("b", None),
            node("b").with_edge("c", None),
            node("c"),
        ]);
        assert!(analyze_graph(&g).is_empty());
    }

    #[test]
    fn empty_graph_has_no_loops() {
        assert!(analyze_graph(&build(vec![])).is_empty());
    }

    #[test]
    fn disjoint_loops_all_reported_in_discovery_order() {
        let g = build(vec![
            node("x").with_edge("y", Some("-")),
            node("y").with_edge("x", None),
            node("a").with_edge("b", None),
            node("b").with_edge("c", None),
            node("c").with_edge("a", None),
        ]);
        let loops = analyze_graph(&g);
        assert_eq!(loop_ids(&g, &loops), [vec!["x", "y"], vec!["a", "b", "c"]]);
        assert_eq!(LoopSummary::of(&loops), LoopSummary {
            total: 2,
            reinforcing: 1,
            balancing: 1,
        });
    }

    #[test]
    fn overlapping_loops_reported_separately() {
        // Triangle a → b → c → a plus the back-link c → b, listed first on c.
        let g = build(vec![
            node("a").with_edge("b", None),
            node("b").with_edge("c", None),
            node("c").with_edge("b", Some("-")).with_edge("a", None),
        ]);
        let loops = analyze_graph(&g);
        // a finds the triangle; b finds b → c → b; c finds c → b → c, a
        // rotation of b's loop.
        assert_eq!(loop_ids(&g, &loops), [vec!["a", "b", "c"], vec!["b", "c"]]);
        assert!(loops[0].is_reinforcing());
        assert!(!loops[1].is_reinforcing());
    }

    #[test]
    fn analysis_is_idempotent() {
        let g = build(vec![
            node("a").with_edge("b", Some("-")),
            node("b").with_edge("c", None).with_edge("a", None),
            node("c").with_edge("a", Some("-")),
        ]);
        assert_eq!(analyze_graph(&g), analyze_graph(&g));
    }

    #[test]
    fn analyze_node_on_loop() {
        let g = build(vec![
            node("a").with_edge("b", None),
            node("b").with_edge("c", None),
            node("c").with_edge("a", Some("-")),
        ]);
        let result = analyze_node(&g, "b").expect("b exists");
        assert!(result.found);
        assert_eq!(result.path, ["b", "c", "a"]);
        assert!(!result.reinforcing);
        assert_eq!(result.polarity(), Some(Polarity::Balancing));
    }

    #[test]
    fn analyze_node_off_loop() {
        let g = build(vec![
            node("root").with_edge("a", None),
            node("a").with_edge("a", None),
        ]);
        let result = analyze_node(&g, "root").expect("root exists");
        assert!(!result.found);
        assert!(result.path.is_empty());
        assert!(!result.reinforcing);
        assert_eq!(result.polarity(), None);
    }

    #[test]
    fn analyze_node_unknown_id() {
        let g = build(vec![node("a")]);
        let err = analyze_node(&g, "zzz").expect_err("unknown");
        assert_eq!(err, QueryError::NodeNotFound("zzz".to_owned()));
        assert!(err.to_string().contains("zzz"));
    }
}
