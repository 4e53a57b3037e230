/// Snapshot data model: the nodes of one analysis pass with their outgoing
/// edges attached.
///
/// A [`Snapshot`] is what the host environment hands to the engine. It is
/// plain data (serde-serializable, unknown JSON keys ignored) and is turned
/// into a traversable [`crate::graph::LoopGraph`] by
/// [`crate::graph::build_graph`].
use serde::{Deserialize, Serialize};

/// A complete, read-only view of the selected statements and their links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Statement nodes, in selection order. Traversal order follows this list.
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
}

/// One statement node and the edges whose source it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Stable identifier, unique within the snapshot.
    pub id: String,
    /// Raw rich-text content of the statement.
    #[serde(default)]
    pub content: String,
    /// Outgoing edges in host order.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// A signed causal link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Host identifier of the connector, when it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Source node id.
    pub source: String,
    /// Target node id. `None` (or an id outside the snapshot) makes the edge
    /// inert for traversal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Rich-text caption carrying the sign annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl NodeRecord {
    /// Creates a node with no edges.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            edges: Vec::new(),
        }
    }

    /// Appends an outgoing edge to `target` with an optional caption.
    #[must_use]
    pub fn with_edge(mut self, target: impl Into<String>, caption: Option<&str>) -> Self {
        let edge = EdgeRecord {
            id: None,
            source: self.id.clone(),
            target: Some(target.into()),
            caption: caption.map(str::to_owned),
        };
        self.edges.push(edge);
        self
    }
}
