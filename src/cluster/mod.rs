//! Cluster assignment module

pub mod metrics;
pub mod whispers;

pub use whispers::{LabelPropagator, Propagation, RandomSource};

use crate::graph::Node;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A group of classified nodes sharing one label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Label shared by every member (the id of some node)
    pub label: usize,

    /// Member node ids, ascending
    pub members: Vec<usize>,

    /// Size of the cluster
    pub size: usize,

    /// Density: edges inside the cluster / potential edges
    pub density: f32,

    /// Member with the largest total edge weight inside the cluster
    pub representative: usize,
}

/// Distinct labels of classified nodes, in first-seen order
pub fn distinct_labels<P>(nodes: &[Node<P>]) -> Vec<usize> {
    nodes
        .iter()
        .filter(|node| !node.is_unclassified())
        .map(|node| node.label)
        .unique()
        .collect()
}
