//! Implementation of `loopfind loops <file>`.
//!
//! Builds the statement graph of a board export and lists every distinct
//! feedback loop in discovery order.
//!
//! Output (human mode): `REINFORCING: a -> b -> c`, one loop per line on
//! stdout, then `N loops: R reinforcing, B balancing` on stderr.
//! Output (JSON mode): `{"loops": [...], "count": N, "reinforcing": R,
//! "balancing": B}`. Each loop lists its `nodes` and, per link, the sign
//! (`+` or `-`) of the connector that closes it, starting with the link out
//! of the first node.
//!
//! Exit codes: 0 = success (including no loops), 2 = input failure.
use std::io::Write as _;
use std::time::Instant;

use loopfind_core::graph::edge_sign;
use loopfind_core::{ClassifiedCycle, EdgeSign, LoopGraph, LoopSummary, analyze_graph};

use super::{load_board, node_json, parse_export, stdout_error, write_json};
use crate::OutputFormat;
use crate::error::CliError;
use crate::format::{FormatterConfig, write_loop_human, write_summary_human, write_timing_human};

/// Runs the `loops` command.
///
/// # Errors
///
/// Returns [`CliError`] with exit code 2 if the content is not a valid,
/// consistent board export, or if writing to stdout fails.
pub fn run(content: &str, format: OutputFormat, config: &FormatterConfig) -> Result<(), CliError> {
    let export = parse_export(content)?;
    let graph = load_board(&export)?;

    let started = Instant::now();
    let loops = analyze_graph(&graph);
    let elapsed = started.elapsed();
    let summary = LoopSummary::of(&loops);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Human => {
            print_human(&mut out, &graph, &loops, config).map_err(|e| stdout_error(&e))?;
            let stderr = std::io::stderr();
            let mut err = stderr.lock();
            // Diagnostics on stderr are best effort.
            write_summary_human(&mut err, &summary, config).ok();
            write_timing_human(&mut err, "analyzed", elapsed, config).ok();
        }
        OutputFormat::Json => {
            write_json(&mut out, &loops_json(&graph, &loops, &summary))
                .map_err(|e| stdout_error(&e))?;
        }
    }
    out.flush().map_err(|e| stdout_error(&e))
}

fn print_human<W: std::io::Write>(
    w: &mut W,
    graph: &LoopGraph,
    loops: &[ClassifiedCycle],
    config: &FormatterConfig,
) -> std::io::Result<()> {
    for l in loops {
        write_loop_human(w, graph, &l.cycle, l.polarity, config)?;
    }
    Ok(())
}

/// Builds the JSON report for `loops`.
pub fn loops_json(
    graph: &LoopGraph,
    loops: &[ClassifiedCycle],
    summary: &LoopSummary,
) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = loops
        .iter()
        .map(|l| {
            let nodes: Vec<serde_json::Value> = l
                .cycle
                .nodes()
                .iter()
                .map(|&idx| node_json(graph, idx))
                .collect();
            let signs: Vec<&str> = l
                .links
                .iter()
                .map(|link| {
                    link.map_or(EdgeSign::Positive, |edge| edge_sign(graph, edge))
                        .symbol()
                })
                .collect();
            serde_json::json!({
                "polarity": l.polarity,
                "negative_edges": l.negative_edges,
                "nodes": nodes,
                "signs": signs,
            })
        })
        .collect();

    serde_json::json!({
        "loops": entries,
        "count": summary.total,
        "reinforcing": summary.reinforcing,
        "balancing": summary.balancing,
    })
}
