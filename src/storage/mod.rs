//! Results persistence and file organization

use anyhow::{Context, Result};
use serde_json::{json, to_string_pretty};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::pipeline::{Assignment, ClusteringOutcome};

/// Directory that receives items excluded from clustering
pub const UNCLASSIFIED_DIR: &str = "Unclassified";

/// Save clustering results to the specified directory
pub fn save_results(outcome: &ClusteringOutcome<PathBuf>, output_dir: &Path) -> Result<()> {
    log::info!(
        "Saving {} clusters to {}",
        outcome.clusters.len(),
        output_dir.display()
    );

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    save_summary(outcome, output_dir)?;
    save_clusters(outcome, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save summary information
fn save_summary(outcome: &ClusteringOutcome<PathBuf>, output_dir: &Path) -> Result<()> {
    let path = output_dir.join("summary.json");
    let mut file = File::create(&path)?;

    let graph = &outcome.graph;
    let clusters = &outcome.clusters;

    let summary = json!({
        "graph_stats": {
            "item_count": graph.len(),
            "classified_count": graph.classified_count(),
            "unclassified_count": graph.unclassified_count(),
            "edge_count": outcome.propagation.adjacency.edge_count(),
            "threshold": graph.threshold,
            "weighted_edges": outcome.propagation.adjacency.is_weighted(),
        },
        "propagation": {
            "iterations": outcome.propagation.iterations,
            "label_changes": outcome.propagation.label_changes,
            "converged": outcome.propagation.converged,
        },
        "cluster_stats": {
            "cluster_count": clusters.len(),
            "largest_cluster_size": clusters.first().map_or(0, |c| c.size),
            "smallest_cluster_size": clusters.last().map_or(0, |c| c.size),
            "avg_density": clusters.iter().map(|c| c.density as f64).sum::<f64>() /
                           if clusters.is_empty() { 1.0 } else { clusters.len() as f64 },
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save per-cluster membership, resolved to item paths
fn save_clusters(outcome: &ClusteringOutcome<PathBuf>, output_dir: &Path) -> Result<()> {
    let path = output_dir.join("clusters.json");
    let mut file = File::create(&path)?;

    let nodes = &outcome.graph.nodes;
    let display = |id: usize| nodes[id].payload.display().to_string();

    let unclassified: Vec<String> = nodes
        .iter()
        .filter(|node| node.is_unclassified())
        .map(|node| display(node.id))
        .collect();

    let clusters_json = json!({
        "clusters": outcome.clusters.iter().map(|c| {
            json!({
                "label": c.label,
                "size": c.size,
                "density": c.density,
                "representative": display(c.representative),
                "members": c.members.iter().map(|&id| display(id)).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>(),
        "unclassified": unclassified,
    });

    file.write_all(to_string_pretty(&clusters_json)?.as_bytes())?;

    Ok(())
}

/// Move every item into a per-label directory under `root`.
///
/// Each label gets a directory named after it; unclassified items go to
/// [`UNCLASSIFIED_DIR`]. Returns the new location of every item, in input order.
pub fn organize_files(
    outcome: &ClusteringOutcome<PathBuf>,
    root: &Path,
) -> Result<Vec<PathBuf>> {
    log::info!(
        "Organizing {} files into {}",
        outcome.graph.len(),
        root.display()
    );

    let mut directories: HashMap<Assignment, PathBuf> = HashMap::new();
    for &label in &outcome.labels {
        directories.insert(Assignment::Cluster(label), root.join(label.to_string()));
    }
    directories.insert(Assignment::Unclassified, root.join(UNCLASSIFIED_DIR));

    for dir in directories.values() {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let mut moved = Vec::with_capacity(outcome.graph.len());
    for (source, assignment) in outcome.assignments() {
        let dir = &directories[&assignment];
        let file_name = source
            .file_name()
            .with_context(|| format!("{} has no file name", source.display()))?;
        let target = dir.join(file_name);

        fs::rename(source, &target).with_context(|| {
            format!("failed to move {} to {}", source.display(), target.display())
        })?;
        log::debug!("Moved {} -> {}", source.display(), target.display());

        moved.push(target);
    }

    Ok(moved)
}
