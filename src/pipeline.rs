//! End-to-end clustering run: graph construction, propagation, label collection

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cluster::metrics::summarize;
use crate::cluster::{distinct_labels, Cluster, Propagation, RandomSource};
use crate::config::Config;
use crate::graph::{build_graph, Extraction, Graph};

/// Where one item ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assignment {
    /// Member of the cluster with this label
    Cluster(usize),

    /// Excluded from clustering (no or ambiguous descriptor)
    Unclassified,
}

/// Everything a clustering run produces
#[derive(Debug, Clone)]
pub struct ClusteringOutcome<P> {
    /// Relabelled node collection
    pub graph: Graph<P>,

    /// Adjacency matrix and loop statistics
    pub propagation: Propagation,

    /// Distinct labels among classified nodes, first-seen order
    pub labels: Vec<usize>,

    /// Per-label summaries, largest first
    pub clusters: Vec<Cluster>,
}

impl<P> ClusteringOutcome<P> {
    /// Assignment of each item, in input order
    pub fn assignments(&self) -> impl Iterator<Item = (&P, Assignment)> + '_ {
        self.graph.nodes.iter().map(|node| {
            let assignment = if node.is_unclassified() {
                Assignment::Unclassified
            } else {
                Assignment::Cluster(node.label)
            };
            (&node.payload, assignment)
        })
    }

    pub fn unclassified_count(&self) -> usize {
        self.graph.unclassified_count()
    }
}

/// Build the random source a configuration asks for
pub fn rng_from_config(config: &Config) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Run a full clustering pass with the configured random source
pub fn run<P, I>(extractions: I, config: &Config) -> Result<ClusteringOutcome<P>>
where
    P: Send + Sync,
    I: IntoIterator<Item = Extraction<P>>,
{
    let mut rng = rng_from_config(config);
    run_with_rng(extractions, config, &mut rng)
}

/// Run a full clustering pass with an injected random source
pub fn run_with_rng<P, I, R>(
    extractions: I,
    config: &Config,
    rng: &mut R,
) -> Result<ClusteringOutcome<P>>
where
    P: Send + Sync,
    I: IntoIterator<Item = Extraction<P>>,
    R: RandomSource + ?Sized,
{
    config.validate()?;

    log::info!("Building similarity graph (threshold {})", config.threshold);
    let mut graph = build_graph(extractions, config.threshold);

    log::info!(
        "Propagating labels (max {} iterations, weighted edges: {})",
        config.max_iterations,
        config.weighted_edges
    );
    let propagation = config
        .propagator()
        .propagate(&mut graph.nodes, rng)
        .context("label propagation rejected the node collection")?;

    let labels = distinct_labels(&graph.nodes);
    let clusters = summarize(&graph.nodes, &propagation.adjacency);

    log::info!(
        "Found {} clusters among {} items ({} unclassified)",
        labels.len(),
        graph.len(),
        graph.unclassified_count()
    );

    Ok(ClusteringOutcome {
        graph,
        propagation,
        labels,
        clusters,
    })
}
