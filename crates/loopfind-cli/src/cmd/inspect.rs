//! Implementation of `loopfind inspect <file>`.
//!
//! Prints summary statistics of a board export:
//! - items on the board and how many of them are statements (sticky notes)
//! - connectors on the board
//! - links between statements, and inert links leaving the selection
//! - self-loops
//!
//! Exit codes: 0 = success, 2 = input failure.
use std::io::Write as _;

use loopfind_core::{BoardExport, LoopGraph};

use super::{load_board, parse_export, stdout_error, write_json};
use crate::OutputFormat;
use crate::error::CliError;

/// Statistics gathered from a board export and its graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectStats {
    /// All board items, of any type.
    pub item_count: usize,
    /// Sticky notes, i.e. graph nodes.
    pub statement_count: usize,
    /// All connectors on the board.
    pub connector_count: usize,
    /// Connectors between two statements.
    pub link_count: usize,
    /// Connectors leaving a statement without reaching another one.
    pub inert_link_count: usize,
    /// Links from a statement to itself.
    pub self_loop_count: usize,
}

impl InspectStats {
    /// Computes statistics from an export and the graph built from it.
    pub fn collect(export: &BoardExport, graph: &LoopGraph) -> Self {
        let self_loop_count = graph
            .node_indices()
            .map(|idx| graph.successors(idx).filter(|&t| t == idx).count())
            .sum();
        Self {
            item_count: export.items.len(),
            statement_count: graph.node_count(),
            connector_count: export.connectors.len(),
            link_count: graph.edge_count(),
            inert_link_count: graph.inert_edge_count(),
            self_loop_count,
        }
    }
}

/// Runs the `inspect` command.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 if the content is not a valid,
/// consistent board export, or if writing to stdout fails.
pub fn run(content: &str, format: OutputFormat) -> Result<(), CliError> {
    let export = parse_export(content)?;
    let graph = load_board(&export)?;
    let stats = InspectStats::collect(&export, &graph);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &stats),
        OutputFormat::Json => write_json(&mut out, &stats_json(&stats)),
    }
    .and_then(|()| out.flush())
    .map_err(|e| stdout_error(&e))
}

fn print_human<W: std::io::Write>(w: &mut W, stats: &InspectStats) -> std::io::Result<()> {
    writeln!(w, "items:       {}", stats.item_count)?;
    writeln!(w, "statements:  {}", stats.statement_count)?;
    writeln!(w, "connectors:  {}", stats.connector_count)?;
    writeln!(w, "links:       {}", stats.link_count)?;
    writeln!(w, "inert links: {}", stats.inert_link_count)?;
    writeln!(w, "self-loops:  {}", stats.self_loop_count)
}

fn stats_json(stats: &InspectStats) -> serde_json::Value {
    serde_json::json!({
        "item_count": stats.item_count,
        "statement_count": stats.statement_count,
        "connector_count": stats.connector_count,
        "link_count": stats.link_count,
        "inert_link_count": stats.inert_link_count,
        "self_loop_count": stats.self_loop_count,
    })
}
