//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// One loop per line, optionally colored (default).
    Human,
    /// A single JSON object on stdout.
    Json,
}

/// All top-level subcommands exposed by the `loopfind` binary.
#[derive(Subcommand)]
pub enum Command {
    /// List every distinct feedback loop on the board.
    Loops {
        /// Path to a board export (.json), or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },

    /// Report whether one statement lies on a feedback loop.
    Node {
        /// Path to a board export (.json), or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// The statement (sticky note) id.
        #[arg(value_name = "NODE_ID")]
        node_id: String,
    },

    /// Print statement and connector counts for a board export.
    Inspect {
        /// Path to a board export (.json), or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
    },
}

/// Root CLI struct for the `loopfind` binary.
///
/// Global flags are marked `global = true` so clap accepts them before or
/// after the subcommand.
#[derive(Parser)]
#[command(
    name = "loopfind",
    version,
    about = "Find feedback loops in causal loop diagrams",
    long_about = "Finds and classifies feedback loops in a causal loop diagram.\n\
                  Reads a board export of sticky notes and connectors; connectors\n\
                  captioned \"-\" are negative links. Loops with an odd number of\n\
                  negative links are balancing, all others reinforcing."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress all stderr output except errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug logging and timing on stderr (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Maximum input size in bytes.
    ///
    /// Can also be set via the `LOOPFIND_MAX_FILE_SIZE` environment variable.
    /// Default: 16777216 (16 MiB).
    #[arg(
        long,
        global = true,
        env = "LOOPFIND_MAX_FILE_SIZE",
        default_value = "16777216"
    )]
    pub max_file_size: u64,

    /// Disable ANSI color codes in human output.
    ///
    /// Colors are also disabled whenever the `NO_COLOR` environment variable
    /// is set, whatever its value (<https://no-color.org>).
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests;
