/// Rotation-equivalence of cycles.
///
/// Two cycles are the same loop when they traverse the same directed links,
/// whatever node they start from. Comparing the sorted list of directed
/// `(from, to)` links captures exactly that: rotations produce the same list,
/// while the reverse traversal of a loop produces the reversed pairs.
use petgraph::stable_graph::NodeIndex;

use crate::graph::Cycle;

/// Canonical, start-independent form of a cycle: its directed links, sorted.
///
/// Equal keys mean rotation-equivalent cycles, so keys can be stored in a
/// `HashSet` to deduplicate a stream of cycles in amortized O(1) per cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CycleKey(Vec<(NodeIndex, NodeIndex)>);

impl CycleKey {
    /// Computes the key of `cycle`.
    pub fn of(cycle: &Cycle) -> Self {
        let mut links: Vec<(NodeIndex, NodeIndex)> = cycle.links().collect();
        links.sort_unstable();
        Self(links)
    }

    /// The sorted directed links.
    pub fn links(&self) -> &[(NodeIndex, NodeIndex)] {
        &self.0
    }
}

/// Returns `true` if `a` and `b` are the same loop entered at (possibly)
/// different nodes.
pub fn cycles_equivalent(a: &Cycle, b: &Cycle) -> bool {
    a.len() == b.len() && CycleKey::of(a) == CycleKey::of(b)
}
