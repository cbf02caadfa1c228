//! Similarity graph representation and construction

pub mod adjacency;
pub mod builder;
pub mod distance;
pub mod node;

pub use adjacency::AdjacencyMatrix;
pub use builder::{build_graph, GraphBuilder};
pub use node::{validate_nodes, Extraction, Node};

/// Node collection produced by [`GraphBuilder`]
#[derive(Debug, Clone)]
pub struct Graph<P> {
    /// Nodes indexed by id
    pub nodes: Vec<Node<P>>,

    /// Distance threshold the neighbor lists were computed with
    pub threshold: f32,

    /// Shared descriptor dimension, if any node is classified
    pub dimension: Option<usize>,
}

impl<P> Graph<P> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges, counting each neighbor pair once
    pub fn edge_count(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|node| node.neighbors.iter().map(move |&n| (node.id, n)))
            .filter(|&(i, j)| i < j)
            .count()
    }

    pub fn unclassified_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_unclassified()).count()
    }

    pub fn classified_count(&self) -> usize {
        self.nodes.len() - self.unclassified_count()
    }
}
