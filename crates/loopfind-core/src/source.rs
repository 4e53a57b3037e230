/// Snapshot acquisition from the host board.
///
/// The host environment (a whiteboard with sticky notes and connectors) is
/// modelled by [`BoardSource`]. [`acquire_snapshot`] asks it for the current
/// selection, then fetches every item's connectors concurrently and keeps
/// the ones that start at that item. Acquisition either completes for every
/// node or fails as a whole; analysis never sees a partial snapshot.
///
/// [`BoardExport`] is a [`BoardSource`] backed by a JSON board export, used by
/// the CLI and by tests.
use std::convert::Infallible;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{GraphBuildError, LoopGraph, build_graph};
use crate::snapshot::{EdgeRecord, NodeRecord, Snapshot};

/// Item type of statement nodes on the board.
pub const STICKY_NOTE: &str = "sticky_note";

/// A selected statement, before its connectors are fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardItem {
    /// Host item id.
    pub id: String,
    /// Raw rich-text content.
    pub content: String,
}

/// The host board, as seen by the analysis engine.
///
/// Implementations only need to answer two questions; everything else
/// (selection handling, rendering) stays on the host side.
#[allow(async_fn_in_trait)]
pub trait BoardSource {
    /// Failure reported by the host.
    type Error: std::error::Error + 'static;

    /// Returns the currently selected statement items, in host order.
    async fn selected_items(&self) -> Result<Vec<BoardItem>, Self::Error>;

    /// Returns the connectors attached to `item_id`, in host order.
    ///
    /// May include connectors that end at the item; [`acquire_snapshot`]
    /// filters those out.
    async fn connectors(&self, item_id: &str) -> Result<Vec<EdgeRecord>, Self::Error>;
}

/// Errors from [`load_graph`].
#[derive(Debug, Error)]
pub enum AcquireError<E: std::error::Error + 'static> {
    /// The host source failed; the error is passed through unchanged.
    #[error(transparent)]
    Source(E),
    /// The acquired snapshot is inconsistent.
    #[error("inconsistent snapshot: {0}")]
    Build(#[from] GraphBuildError),
}

/// Acquires a complete [`Snapshot`] from `source`.
///
/// # Errors
///
/// Returns the source's error unchanged if any request fails.
pub async fn acquire_snapshot<S: BoardSource>(source: &S) -> Result<Snapshot, S::Error> {
    let items = source.selected_items().await?;
    tracing::debug!(items = items.len(), "fetching connectors for selection");

    let nodes = try_join_all(items.into_iter().map(|item| async move {
        let connectors = source.connectors(&item.id).await?;
        let edges: Vec<EdgeRecord> = connectors
            .into_iter()
            .filter(|edge| edge.source == item.id)
            .collect();
        Ok::<NodeRecord, S::Error>(NodeRecord {
            id: item.id,
            content: item.content,
            edges,
        })
    }))
    .await?;

    Ok(Snapshot { nodes })
}

/// Acquires a snapshot from `source` and builds its [`LoopGraph`].
///
/// # Errors
///
/// - [`AcquireError::Source`]: the source failed.
/// - [`AcquireError::Build`]: the snapshot is inconsistent.
pub async fn load_graph<S: BoardSource>(source: &S) -> Result<LoopGraph, AcquireError<S::Error>> {
    let snapshot = acquire_snapshot(source)
        .await
        .map_err(AcquireError::Source)?;
    Ok(build_graph(&snapshot)?)
}

// ---------------------------------------------------------------------------
// JSON board export
// ---------------------------------------------------------------------------

/// Errors from parsing a [`BoardExport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardExportError {
    /// The input is not a valid board export document.
    #[error("invalid board export at line {line}, column {column}: {detail}")]
    Parse {
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        column: usize,
        /// Parser message.
        detail: String,
    },
}

/// A board export: every item and connector of a board, as JSON.
///
/// All items of type [`STICKY_NOTE`] count as selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardExport {
    /// Board items (sticky notes, shapes, frames, ...).
    #[serde(default)]
    pub items: Vec<ExportItem>,
    /// Connectors between items.
    #[serde(default)]
    pub connectors: Vec<ExportConnector>,
}

/// An item in a [`BoardExport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportItem {
    /// Host item id.
    pub id: String,
    /// Item type; absent means [`STICKY_NOTE`].
    #[serde(rename = "type", default = "default_item_type")]
    pub item_type: String,
    /// Rich-text content.
    #[serde(default)]
    pub content: String,
}

fn default_item_type() -> String {
    STICKY_NOTE.to_owned()
}

/// A connector in a [`BoardExport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConnector {
    /// Host connector id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Start endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Endpoint>,
    /// End endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Endpoint>,
    /// Captions; the first one carries the sign.
    #[serde(default)]
    pub captions: Vec<ExportCaption>,
}

/// One end of an [`ExportConnector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// The attached item, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

/// A caption of an [`ExportConnector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportCaption {
    /// Rich-text caption content.
    #[serde(default)]
    pub content: String,
}

impl ExportConnector {
    fn start_item(&self) -> Option<&str> {
        self.start.as_ref().and_then(|e| e.item.as_deref())
    }

    fn end_item(&self) -> Option<&str> {
        self.end.as_ref().and_then(|e| e.item.as_deref())
    }

    fn touches(&self, item_id: &str) -> bool {
        self.start_item() == Some(item_id) || self.end_item() == Some(item_id)
    }
}

impl BoardExport {
    /// Parses a board export from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BoardExportError::Parse`] if `json` is malformed.
    pub fn from_json(json: &str) -> Result<Self, BoardExportError> {
        serde_json::from_str(json).map_err(|e| BoardExportError::Parse {
            line: e.line(),
            column: e.column(),
            detail: e.to_string(),
        })
    }
}

impl BoardSource for BoardExport {
    type Error = Infallible;

    async fn selected_items(&self) -> Result<Vec<BoardItem>, Infallible> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.item_type == STICKY_NOTE)
            .map(|item| BoardItem {
                id: item.id.clone(),
                content: item.content.clone(),
            })
            .collect())
    }

    async fn connectors(&self, item_id: &str) -> Result<Vec<EdgeRecord>, Infallible> {
        Ok(self
            .connectors
            .iter()
            .filter(|c| c.touches(item_id))
            .filter_map(|c| {
                let source = c.start_item()?.to_owned();
                Some(EdgeRecord {
                    id: c.id.clone(),
                    source,
                    target: c.end_item().map(str::to_owned),
                    caption: c.captions.first().map(|caption| caption.content.clone()),
                })
            })
            .collect())
    }
}
