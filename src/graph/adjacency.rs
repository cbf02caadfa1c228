//! Dense weighted adjacency matrix

use crate::graph::distance::{cosine_distance, edge_weight};
use crate::graph::node::Node;
use ndarray::Array2;

/// Symmetric N×N edge weights, read-only once built.
///
/// Entry `(i, j)` is 0 without an edge, 1 for an unweighted edge, and
/// `1/d² + 1` for a weighted edge at distance `d`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    weights: Array2<f32>,
    weighted: bool,
}

impl AdjacencyMatrix {
    /// All-zero matrix for `node_count` nodes
    pub fn zeros(node_count: usize, weighted: bool) -> Self {
        Self {
            weights: Array2::zeros((node_count, node_count)),
            weighted,
        }
    }

    /// Build the matrix from the nodes' neighbor lists.
    ///
    /// Each listed edge is measured once and written to both `(i, j)` and
    /// `(j, i)`. Callers must pass a validated node collection.
    pub fn from_nodes<P>(nodes: &[Node<P>], weighted: bool) -> Self {
        let mut matrix = Self::zeros(nodes.len(), weighted);

        for node in nodes {
            let descriptor = match &node.descriptor {
                Some(descriptor) => descriptor,
                None => continue,
            };

            for &neighbor in &node.neighbors {
                let weight = match &nodes[neighbor].descriptor {
                    Some(other) => edge_weight(cosine_distance(descriptor, other), weighted),
                    None => continue,
                };
                matrix.weights[[node.id, neighbor]] = weight;
                matrix.weights[[neighbor, node.id]] = weight;
            }
        }

        matrix
    }

    /// Weight of the edge between `i` and `j` (0 when absent)
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f32 {
        self.weights[[i, j]]
    }

    /// Number of nodes (rows)
    pub fn len(&self) -> usize {
        self.weights.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Number of undirected edges with a non-zero weight
    pub fn edge_count(&self) -> usize {
        let n = self.len();
        (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .filter(|&(i, j)| self.weights[[i, j]] != 0.0)
            .count()
    }

    /// Whether `(i, j)` equals `(j, i)` everywhere
    pub fn is_symmetric(&self) -> bool {
        self.weights == self.weights.t()
    }

    /// Sum of the weights in row `i`
    pub fn weighted_degree(&self, i: usize) -> f32 {
        self.weights.row(i).sum()
    }

    /// Raw matrix view
    pub fn as_array(&self) -> &Array2<f32> {
        &self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked(descriptors: &[&[f32]], edges: &[(usize, usize)]) -> Vec<Node<()>> {
        let mut nodes: Vec<Node<()>> = descriptors
            .iter()
            .enumerate()
            .map(|(id, d)| Node::classified(id, d.to_vec(), ()))
            .collect();
        for &(i, j) in edges {
            nodes[i].neighbors.push(j);
        }
        nodes
    }

    #[test]
    fn test_unweighted_edges_are_one() {
        let nodes = linked(&[&[1.0, 0.0], &[0.9, 0.1], &[0.0, 1.0]], &[(0, 1), (1, 0)]);
        let matrix = AdjacencyMatrix::from_nodes(&nodes, false);

        assert_eq!(matrix.weight(0, 1), 1.0);
        assert_eq!(matrix.weight(1, 0), 1.0);
        assert_eq!(matrix.weight(0, 2), 0.0);
        assert_eq!(matrix.weight(2, 2), 0.0);
        assert_eq!(matrix.edge_count(), 1);
        assert!(!matrix.is_weighted());
    }

    #[test]
    fn test_one_sided_neighbor_list_is_mirrored() {
        let nodes = linked(&[&[1.0, 0.0], &[1.0, 0.5]], &[(0, 1)]);
        let matrix = AdjacencyMatrix::from_nodes(&nodes, true);

        assert!(matrix.weight(0, 1) > 1.0);
        assert_eq!(matrix.weight(0, 1), matrix.weight(1, 0));
        assert!(matrix.is_symmetric());
    }

    #[test]
    fn test_weighted_value() {
        // cos = 0.5 -> distance 0.5 -> 1/0.25 + 1
        let nodes = linked(&[&[1.0, 0.0], &[0.5, 0.75f32.sqrt()]], &[(0, 1), (1, 0)]);
        let matrix = AdjacencyMatrix::from_nodes(&nodes, true);
        assert!((matrix.weight(0, 1) - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_unclassified_rows_stay_zero() {
        let mut nodes = linked(&[&[1.0, 0.0], &[1.0, 0.1]], &[(0, 1), (1, 0)]);
        nodes.push(Node::unclassified(2, ()));
        let matrix = AdjacencyMatrix::from_nodes(&nodes, true);

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.weighted_degree(2), 0.0);
        assert!(matrix.as_array().column(2).iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_empty() {
        let matrix = AdjacencyMatrix::from_nodes::<()>(&[], true);
        assert!(matrix.is_empty());
        assert_eq!(matrix.edge_count(), 0);
        assert!(matrix.is_symmetric());
    }
}
