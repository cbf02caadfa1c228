//! Node representation shared by graph construction and propagation

use crate::error::{Error, Result};

/// Output of the upstream feature extractor for one item.
///
/// The extractor may return any number of descriptors; only items with exactly
/// one become clusterable.
#[derive(Debug, Clone)]
pub struct Extraction<P> {
    /// Opaque provenance carried through to the output step
    pub payload: P,

    /// Feature vectors found for the item (zero, one, or many)
    pub descriptors: Vec<Vec<f32>>,
}

impl<P> Extraction<P> {
    pub fn new(payload: P, descriptors: Vec<Vec<f32>>) -> Self {
        Self {
            payload,
            descriptors,
        }
    }

    /// An item the extractor failed on. Routed to the unclassified bucket.
    pub fn failed(payload: P) -> Self {
        Self::new(payload, Vec::new())
    }
}

/// One clusterable item in the similarity graph
#[derive(Debug, Clone)]
pub struct Node<P> {
    /// Position of the node in the collection
    pub id: usize,

    /// Ids of nodes within the distance threshold, ascending
    pub neighbors: Vec<usize>,

    /// Feature vector; `None` marks the node unclassified
    pub descriptor: Option<Vec<f32>>,

    /// Current cluster label, always some node's id
    pub label: usize,

    /// Provenance data, never inspected by the core
    pub payload: P,
}

impl<P> Node<P> {
    /// Create a classified node labelled with its own id.
    pub fn classified(id: usize, descriptor: Vec<f32>, payload: P) -> Self {
        Self {
            id,
            neighbors: Vec::new(),
            descriptor: Some(descriptor),
            label: id,
            payload,
        }
    }

    /// Create a node excluded from clustering.
    pub fn unclassified(id: usize, payload: P) -> Self {
        Self {
            id,
            neighbors: Vec::new(),
            descriptor: None,
            label: id,
            payload,
        }
    }

    pub fn is_unclassified(&self) -> bool {
        self.descriptor.is_none()
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

/// Check the invariants LabelPropagator relies on.
///
/// Returns the shared descriptor dimension, or `None` when no node is
/// classified.
pub fn validate_nodes<P>(nodes: &[Node<P>]) -> Result<Option<usize>> {
    let node_count = nodes.len();
    let mut dimension: Option<usize> = None;

    for (position, node) in nodes.iter().enumerate() {
        if node.id != position {
            return Err(Error::IdMismatch {
                position,
                id: node.id,
            });
        }

        if node.label >= node_count {
            return Err(Error::LabelOutOfRange {
                node: node.id,
                label: node.label,
                node_count,
            });
        }

        let descriptor = match &node.descriptor {
            Some(descriptor) => descriptor,
            None => {
                if !node.neighbors.is_empty() {
                    return Err(Error::UnclassifiedWithNeighbors(node.id));
                }
                continue;
            }
        };

        match dimension {
            Some(expected) if expected != descriptor.len() => {
                return Err(Error::DimensionMismatch {
                    node: node.id,
                    expected,
                    found: descriptor.len(),
                });
            }
            Some(_) => {}
            None => dimension = Some(descriptor.len()),
        }

        for &neighbor in &node.neighbors {
            if neighbor >= node_count {
                return Err(Error::NeighborOutOfRange {
                    node: node.id,
                    neighbor,
                    node_count,
                });
            }
            if neighbor == node.id {
                return Err(Error::SelfNeighbor(node.id));
            }
            if nodes[neighbor].is_unclassified() {
                return Err(Error::UnclassifiedNeighbor {
                    node: node.id,
                    neighbor,
                });
            }
        }
    }

    Ok(dimension)
}
