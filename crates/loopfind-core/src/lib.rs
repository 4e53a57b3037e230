#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod analysis;
pub mod graph;
pub mod label;
pub mod sign;
pub mod snapshot;
pub mod source;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use analysis::{LoopSummary, NodeAnalysis, QueryError, analyze_graph, analyze_node};
pub use graph::{
    ClassifiedCycle, Cycle, CycleKey, CycleSearch, EdgeIndex, EdgeWeight, GraphBuildError,
    LoopGraph, NodeIndex, NodeWeight, Polarity, build_graph, classify_cycle, cycles_equivalent,
    find_cycle,
};
pub use label::extract_plain_text;
pub use sign::{EdgeSign, is_negative_caption};
pub use snapshot::{EdgeRecord, NodeRecord, Snapshot};
pub use source::{
    AcquireError, BoardExport, BoardExportError, BoardItem, BoardSource, acquire_snapshot,
    load_graph,
};

/// Returns the current version of the loopfind-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
