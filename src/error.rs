//! Error types for graph construction and label propagation

use thiserror::Error;

/// Errors returned by the clustering core.
///
/// Ambiguous extraction results are never errors: they become unclassified
/// nodes. Everything here is a malformed node collection or descriptor set.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Classified descriptors do not share one dimensionality.
    #[error("dimension mismatch at node {node}: expected {expected}, found {found}")]
    DimensionMismatch {
        node: usize,
        expected: usize,
        found: usize,
    },

    /// A node's id does not match its position in the collection.
    #[error("node at position {position} carries id {id}")]
    IdMismatch { position: usize, id: usize },

    /// A neighbor id does not reference a node in the collection.
    #[error("node {node} lists neighbor {neighbor}, but the graph has {node_count} nodes")]
    NeighborOutOfRange {
        node: usize,
        neighbor: usize,
        node_count: usize,
    },

    /// A node lists itself as a neighbor.
    #[error("node {0} lists itself as a neighbor")]
    SelfNeighbor(usize),

    /// A classified node lists an unclassified node as a neighbor.
    #[error("node {node} lists unclassified node {neighbor} as a neighbor")]
    UnclassifiedNeighbor { node: usize, neighbor: usize },

    /// An unclassified node carries a non-empty neighbor list.
    #[error("unclassified node {0} has neighbors")]
    UnclassifiedWithNeighbors(usize),

    /// A label points outside the node id space.
    #[error("node {node} carries label {label}, outside 0..{node_count}")]
    LabelOutOfRange {
        node: usize,
        label: usize,
        node_count: usize,
    },
}

/// Result type used by the clustering core.
pub type Result<T> = std::result::Result<T, Error>;
