//! Cluster statistics and metrics

use crate::cluster::{distinct_labels, Cluster};
use crate::graph::{AdjacencyMatrix, Node};
use std::collections::HashMap;

/// Group classified nodes by label and compute per-cluster metrics.
///
/// Clusters come back largest first; equal sizes keep first-seen label order.
pub fn summarize<P>(nodes: &[Node<P>], adjacency: &AdjacencyMatrix) -> Vec<Cluster> {
    let mut members_by_label: HashMap<usize, Vec<usize>> = HashMap::new();
    for node in nodes.iter().filter(|node| !node.is_unclassified()) {
        members_by_label.entry(node.label).or_default().push(node.id);
    }

    let mut clusters: Vec<Cluster> = distinct_labels(nodes)
        .into_iter()
        .filter_map(|label| {
            let members = members_by_label.remove(&label)?;
            Some(Cluster {
                label,
                size: members.len(),
                density: calculate_density(adjacency, &members),
                representative: find_representative(adjacency, &members),
                members,
            })
        })
        .collect();

    // stable sort keeps first-seen order among equal sizes
    clusters.sort_by(|a, b| b.size.cmp(&a.size));

    log::info!("Summarized {} clusters", clusters.len());

    clusters
}

/// Calculate density (actual edges / potential edges) of an undirected cluster
pub fn calculate_density(adjacency: &AdjacencyMatrix, members: &[usize]) -> f32 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    let potential_edges = n * (n - 1) / 2;

    let mut actual_edges = 0;
    for (position, &i) in members.iter().enumerate() {
        for &j in &members[position + 1..] {
            if adjacency.weight(i, j) != 0.0 {
                actual_edges += 1;
            }
        }
    }

    actual_edges as f32 / potential_edges as f32
}

/// Member with the highest summed edge weight to other members.
///
/// Ties go to the lowest id.
pub fn find_representative(adjacency: &AdjacencyMatrix, members: &[usize]) -> usize {
    let mut best = members[0];
    let mut best_weight = f32::NEG_INFINITY;

    for &i in members {
        let weight: f32 = members.iter().map(|&j| adjacency.weight(i, j)).sum();
        if weight > best_weight || (weight == best_weight && i < best) {
            best = i;
            best_weight = weight;
        }
    }

    best
}
