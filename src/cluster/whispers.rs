//! Randomized label propagation ("Chinese whispers")
//!
//! Every classified node starts in its own cluster. Each round draws one node
//! at random and hands it the label of its heaviest neighbor edge. The loop
//! stops once a round leaves the drawn node's label unchanged, or when the
//! iteration budget runs out.

use crate::error::Result;
use crate::graph::{validate_nodes, AdjacencyMatrix, Node};
use rand::Rng;

/// Source of uniform random indices driving node selection and tie breaks
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` is never 0.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> RandomSource for R {
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Result of one propagation run
#[derive(Debug, Clone)]
pub struct Propagation {
    /// Edge weights the run was driven by
    pub adjacency: AdjacencyMatrix,

    /// Rounds consumed, skipped rounds included
    pub iterations: usize,

    /// Rounds in which the drawn node adopted a different label
    pub label_changes: usize,

    /// Whether the loop stopped on the convergence signal rather than the budget
    pub converged: bool,
}

/// Label propagation parameters
#[derive(Debug, Clone, Copy)]
pub struct LabelPropagator {
    pub max_iterations: usize,
    pub weighted_edges: bool,
}

impl Default for LabelPropagator {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            weighted_edges: true,
        }
    }
}

impl LabelPropagator {
    pub fn new(max_iterations: usize, weighted_edges: bool) -> Self {
        Self {
            max_iterations,
            weighted_edges,
        }
    }

    /// Relabel `nodes` in place and return the adjacency matrix used.
    ///
    /// The collection is validated first; a malformed one is rejected before
    /// any label changes.
    pub fn propagate<P, R>(&self, nodes: &mut [Node<P>], rng: &mut R) -> Result<Propagation>
    where
        R: RandomSource + ?Sized,
    {
        validate_nodes(nodes)?;

        let adjacency = AdjacencyMatrix::from_nodes(nodes, self.weighted_edges);
        let node_count = nodes.len();

        let mut propagation = Propagation {
            adjacency,
            iterations: 0,
            label_changes: 0,
            converged: false,
        };

        if node_count == 0 {
            return Ok(propagation);
        }

        // Approximate distinct-label count: decremented on every change, never
        // recounted. It can drift below the true count and even below zero.
        let mut label_count = node_count as isize;
        let mut previous_count = label_count;

        for _ in 0..self.max_iterations {
            propagation.iterations += 1;

            let index = rng.pick(node_count);
            let node = &nodes[index];
            if node.is_unclassified() || node.neighbors.is_empty() {
                continue;
            }

            let chosen = match choose_neighbor(node, &propagation.adjacency, &mut *rng) {
                Some(chosen) => chosen,
                None => continue,
            };

            let new_label = nodes[chosen].label;
            if new_label != nodes[index].label {
                label_count -= 1;
                propagation.label_changes += 1;
            }
            nodes[index].label = new_label;

            if label_count == previous_count {
                propagation.converged = true;
                break;
            }
            previous_count = label_count;
        }

        log::debug!(
            "Propagation stopped after {} iterations ({} label changes, converged: {})",
            propagation.iterations,
            propagation.label_changes,
            propagation.converged
        );

        Ok(propagation)
    }
}

/// Pick the neighbor behind the heaviest edge, breaking ties uniformly.
///
/// The maximum is taken per neighbor edge, so neighbors sharing a label do
/// not pool their weights.
fn choose_neighbor<P, R>(
    node: &Node<P>,
    adjacency: &AdjacencyMatrix,
    rng: &mut R,
) -> Option<usize>
where
    R: RandomSource + ?Sized,
{
    let weights: Vec<f32> = node
        .neighbors
        .iter()
        .map(|&neighbor| adjacency.weight(node.id, neighbor))
        .collect();

    let max_weight = weights.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    let tied: Vec<usize> = weights
        .iter()
        .enumerate()
        .filter(|&(_, &weight)| weight == max_weight)
        .map(|(index, _)| index)
        .collect();

    // empty only when every weight is NaN
    let index = match tied.len() {
        0 => return None,
        1 => tied[0],
        n => tied[rng.pick(n)],
    };

    Some(node.neighbors[index])
}
