/// Command modules for the `loopfind` CLI.
///
/// Each submodule implements one subcommand. Its `run` function takes the
/// already-read input and the parsed arguments and returns `Ok(())` on
/// success or a [`CliError`] on failure.
pub mod inspect;
pub mod loops;
pub mod node;

use futures::executor::block_on;
use loopfind_core::{AcquireError, BoardExport, LoopGraph, NodeIndex, load_graph};

use crate::error::CliError;
use crate::format::display_label;

/// Parses `content` as a board export.
///
/// # Errors
///
/// Returns [`CliError::ParseFailed`] for malformed JSON.
pub fn parse_export(content: &str) -> Result<BoardExport, CliError> {
    BoardExport::from_json(content).map_err(|e| CliError::ParseFailed {
        detail: e.to_string(),
    })
}

/// Builds the loop graph of the statements in `export`.
///
/// # Errors
///
/// Returns [`CliError::InconsistentSnapshot`] if the export contains
/// duplicate statement ids.
pub fn load_board(export: &BoardExport) -> Result<LoopGraph, CliError> {
    block_on(load_graph(export)).map_err(|e| match e {
        AcquireError::Source(never) => match never {},
        AcquireError::Build(err) => CliError::InconsistentSnapshot {
            detail: err.to_string(),
        },
    })
}

/// `{"id": ..., "label": ...}` for one statement.
fn node_json(graph: &LoopGraph, idx: NodeIndex) -> serde_json::Value {
    serde_json::json!({
        "id": graph.node_id(idx),
        "label": display_label(graph, idx),
    })
}

/// Writes `value` as pretty-printed JSON followed by a newline.
fn write_json<W: std::io::Write>(w: &mut W, value: &serde_json::Value) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(w, "{json}")
}

/// Maps a failed write to stdout to a [`CliError`].
fn stdout_error(e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    }
}
