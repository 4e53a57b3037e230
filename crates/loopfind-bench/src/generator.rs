//! Board export generator.
//!
//! Produces [`BoardExport`] instances shaped like hand-drawn causal loop
//! diagrams: feedback clusters, each a ring of statements with a few chords.
//! Cluster 0 is the driver: one one-way link runs from it into every other
//! cluster, so no loop spans two clusters. A fraction of connectors end on a
//! non-statement item and stay inert.
//!
//! The cycle finder is exponential in the worst case. One-way links only
//! leave the driver, so a search crosses at most one of them and larger
//! tiers stay benchmarkable.

use futures::executor::block_on;
use loopfind_core::source::{Endpoint, ExportCaption, ExportConnector, ExportItem, STICKY_NOTE};
use loopfind_core::{BoardExport, LoopGraph, load_graph};
use rand::rngs::StdRng;
use rand::seq::SliceRandom as _;
use rand::{Rng, SeedableRng};

/// Id of the single non-statement item that inert connectors end on.
pub const LEGEND_ID: &str = "legend";

/// Configuration for the board generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of feedback clusters.
    pub num_clusters: usize,
    /// Statements per cluster ring (at least 1).
    pub cluster_size: usize,
    /// Extra intra-cluster connectors per cluster.
    pub chords_per_cluster: usize,
    /// Probability that a connector is captioned `-`.
    pub negative_fraction: f64,
    /// Probability that a statement also gets a self-loop.
    pub self_loop_fraction: f64,
    /// Probability that a statement gets an inert connector to the legend.
    pub inert_fraction: f64,
    /// Wrap contents and captions in rich-text markup.
    pub rich_text: bool,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// ~12 statements, the size of a typical workshop board.
    Small,
    /// ~60 statements.
    Medium,
    /// ~240 statements.
    Large,
}

impl SizeTier {
    /// Returns the default [`GeneratorConfig`] for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let (num_clusters, cluster_size, chords_per_cluster) = match self {
            SizeTier::Small => (3, 4, 1),
            SizeTier::Medium => (10, 6, 2),
            SizeTier::Large => (30, 8, 3),
        };
        GeneratorConfig {
            seed,
            num_clusters,
            cluster_size,
            chords_per_cluster,
            negative_fraction: 0.3,
            self_loop_fraction: 0.05,
            inert_fraction: 0.1,
            rich_text: true,
        }
    }
}

fn statement_id(cluster: usize, position: usize) -> String {
    format!("s-{cluster:03}-{position:03}")
}

fn rich(text: &str, enabled: bool) -> String {
    if enabled {
        format!("<p>{text}</p>")
    } else {
        text.to_owned()
    }
}

struct Builder<'a> {
    rng: StdRng,
    config: &'a GeneratorConfig,
    connectors: Vec<ExportConnector>,
}

impl Builder<'_> {
    fn connect(&mut self, source: &str, target: &str) {
        let negative = self.rng.gen_bool(self.config.negative_fraction);
        let caption = rich(if negative { "-" } else { "+" }, self.config.rich_text);
        let id = format!("c-{:06}", self.connectors.len());
        self.connectors.push(ExportConnector {
            id: Some(id),
            start: Some(Endpoint {
                item: Some(source.to_owned()),
            }),
            end: Some(Endpoint {
                item: Some(target.to_owned()),
            }),
            captions: vec![ExportCaption { content: caption }],
        });
    }
}

/// Generates a deterministic board export from `config`.
pub fn generate_board(config: &GeneratorConfig) -> BoardExport {
    let cluster_size = config.cluster_size.max(1);
    let mut builder = Builder {
        rng: StdRng::seed_from_u64(config.seed),
        config,
        connectors: Vec::new(),
    };

    let mut items: Vec<ExportItem> = Vec::with_capacity(config.num_clusters * cluster_size + 1);
    for cluster in 0..config.num_clusters {
        for position in 0..cluster_size {
            items.push(ExportItem {
                id: statement_id(cluster, position),
                item_type: STICKY_NOTE.to_owned(),
                content: rich(&format!("Statement {cluster}.{position}"), config.rich_text),
            });
        }
    }
    items.push(ExportItem {
        id: LEGEND_ID.to_owned(),
        item_type: "text".to_owned(),
        content: "Legend".to_owned(),
    });

    for cluster in 0..config.num_clusters {
        for position in 0..cluster_size {
            let next = (position + 1) % cluster_size;
            builder.connect(
                &statement_id(cluster, position),
                &statement_id(cluster, next),
            );
        }
        for _ in 0..config.chords_per_cluster {
            let from = builder.rng.gen_range(0..cluster_size);
            let to = builder.rng.gen_range(0..cluster_size);
            builder.connect(&statement_id(cluster, from), &statement_id(cluster, to));
        }
        if cluster > 0 {
            let from = builder.rng.gen_range(0..cluster_size);
            let to = builder.rng.gen_range(0..cluster_size);
            builder.connect(&statement_id(0, from), &statement_id(cluster, to));
        }
    }

    for item in items.iter().filter(|i| i.item_type == STICKY_NOTE) {
        if builder.rng.gen_bool(config.self_loop_fraction) {
            builder.connect(&item.id, &item.id);
        }
        if builder.rng.gen_bool(config.inert_fraction) {
            builder.connect(&item.id, LEGEND_ID);
        }
    }

    let mut connectors = builder.connectors;
    connectors.shuffle(&mut builder.rng);

    BoardExport { items, connectors }
}

/// Generates a board and builds its [`LoopGraph`].
pub fn generate_graph(config: &GeneratorConfig) -> LoopGraph {
    let board = generate_board(config);
    block_on(load_graph(&board))
        .unwrap_or_else(|_| unreachable!("generated statement ids are unique"))
}
