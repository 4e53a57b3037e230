/// Human-mode rendering of loops and summaries.
///
/// Loops are printed the way the board sidebar shows them:
/// `REINFORCING: Births -> Population`. The polarity tag is colored when
/// colors are enabled (`--no-color`, the `NO_COLOR` environment variable, or
/// a non-TTY stdout all disable them).
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use loopfind_core::{Cycle, LoopGraph, LoopSummary, Polarity};

/// Returns `true` if `--no-color` was passed or `NO_COLOR` is set to any
/// value, including an empty one.
pub fn no_color_requested(no_color_flag: bool) -> bool {
    no_color_flag || std::env::var_os("NO_COLOR").is_some()
}

/// Returns `true` if ANSI color codes should be emitted to stdout.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    !no_color_requested(no_color_flag) && std::io::stdout().is_terminal()
}

const ANSI_GREEN: &str = "\x1b[32m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_RESET: &str = "\x1b[0m";

/// Output settings derived from the global CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress all non-error stderr output.
    pub quiet: bool,
    /// Emit timing to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }
}

/// Returns the display text of a statement: its label, or its id when the
/// label is empty.
pub fn display_label(graph: &LoopGraph, idx: loopfind_core::NodeIndex) -> &str {
    let label = graph.node_label(idx);
    if label.is_empty() {
        graph.node_id(idx)
    } else {
        label
    }
}

/// Joins the labels of `cycle` with `" -> "`.
pub fn cycle_text(graph: &LoopGraph, cycle: &Cycle) -> String {
    cycle
        .nodes()
        .iter()
        .map(|&idx| display_label(graph, idx))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Writes one loop line: `REINFORCING: a -> b -> c`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_loop_human<W: Write>(
    writer: &mut W,
    graph: &LoopGraph,
    cycle: &Cycle,
    polarity: Polarity,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    let text = cycle_text(graph, cycle);
    if config.colors {
        let color = match polarity {
            Polarity::Reinforcing => ANSI_GREEN,
            Polarity::Balancing => ANSI_YELLOW,
        };
        writeln!(writer, "{color}{polarity}{ANSI_RESET}: {text}")
    } else {
        writeln!(writer, "{polarity}: {text}")
    }
}

/// Writes the summary line: `3 loops: 2 reinforcing, 1 balancing`.
///
/// Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary_human<W: Write>(
    writer: &mut W,
    summary: &LoopSummary,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    writeln!(
        writer,
        "{} {}: {} reinforcing, {} balancing",
        summary.total,
        pluralize(summary.total, "loop", "loops"),
        summary.reinforcing,
        summary.balancing,
    )
}

/// Writes timing information in verbose mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing_human<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose || config.quiet {
        return Ok(());
    }
    writeln!(writer, "{label} in {}ms", duration.as_millis())
}

fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
