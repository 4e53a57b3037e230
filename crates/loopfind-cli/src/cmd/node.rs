//! Implementation of `loopfind node <file> <node-id>`.
//!
//! Answers whether one statement lies on a feedback loop, independently of
//! the whole-board sweep, and shows the first loop found through it.
//!
//! Output (human mode): `BALANCING: a -> b -> c`, or
//! `<label>: not on a feedback loop`.
//! Output (JSON mode): `{"node": {"id", "label"}, "found": bool,
//! "polarity": "reinforcing" | "balancing" | null, "path": [{"id", "label"}]}`.
//!
//! Exit codes: 0 = success, 1 = statement not found, 2 = input failure.
use std::io::Write as _;

use loopfind_core::{Cycle, LoopGraph, NodeAnalysis, QueryError, analyze_node};

use super::{load_board, node_json, parse_export, stdout_error, write_json};
use crate::OutputFormat;
use crate::error::CliError;
use crate::format::{FormatterConfig, display_label, write_loop_human};

/// Runs the `node` command.
///
/// # Errors
///
/// - [`CliError`] exit code 2 if the content is not a valid, consistent
///   board export.
/// - [`CliError`] exit code 1 if `node_id` is not a statement on the board.
pub fn run(
    content: &str,
    node_id: &str,
    format: OutputFormat,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    let export = parse_export(content)?;
    let graph = load_board(&export)?;

    let analysis = analyze_node(&graph, node_id).map_err(query_error_to_cli)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => print_human(&mut out, &graph, &analysis, config),
        OutputFormat::Json => write_json(&mut out, &node_report(&graph, &analysis)),
    }
    .and_then(|()| out.flush())
    .map_err(|e| stdout_error(&e))
}

fn print_human<W: std::io::Write>(
    w: &mut W,
    graph: &LoopGraph,
    analysis: &NodeAnalysis,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    let Some(idx) = graph.node_index(&analysis.node) else {
        return Ok(());
    };
    if let (Some(polarity), Some(cycle)) = (analysis.polarity(), path_cycle(graph, analysis)) {
        return write_loop_human(w, graph, &cycle, polarity, config);
    }
    writeln!(w, "{}: not on a feedback loop", display_label(graph, idx))
}

/// Rebuilds the cycle of a positive result from its statement ids.
fn path_cycle(graph: &LoopGraph, analysis: &NodeAnalysis) -> Option<Cycle> {
    let nodes = analysis
        .path
        .iter()
        .map(|id| graph.node_index(id))
        .collect::<Option<Vec<_>>>()?;
    Cycle::new(nodes)
}

/// Builds the JSON report for one node query.
pub fn node_report(graph: &LoopGraph, analysis: &NodeAnalysis) -> serde_json::Value {
    let node = graph
        .node_index(&analysis.node)
        .map_or(serde_json::Value::Null, |idx| node_json(graph, idx));
    let path: Vec<serde_json::Value> = analysis
        .path
        .iter()
        .filter_map(|id| graph.node_index(id))
        .map(|idx| node_json(graph, idx))
        .collect();

    serde_json::json!({
        "node": node,
        "found": analysis.found,
        "polarity": analysis.polarity(),
        "path": path,
    })
}

fn query_error_to_cli(e: QueryError) -> CliError {
    match e {
        QueryError::NodeNotFound(node_id) => CliError::NodeNotFound { node_id },
    }
}
