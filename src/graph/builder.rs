//! Similarity graph construction

use crate::graph::distance::cosine_distance;
use crate::graph::node::{Extraction, Node};
use crate::graph::Graph;
use rayon::prelude::*;

/// Builder for incrementally collecting items and constructing a thresholded graph
pub struct GraphBuilder<P> {
    /// Maximum cosine distance (exclusive) for two nodes to become neighbors
    threshold: f32,

    /// Nodes in insertion order
    nodes: Vec<Node<P>>,
}

impl<P> GraphBuilder<P> {
    /// Create a new graph builder
    pub fn new(threshold: f32) -> Self {
        Self::with_capacity(threshold, 0)
    }

    /// Create a new graph builder with the given capacity
    pub fn with_capacity(threshold: f32, capacity: usize) -> Self {
        Self {
            threshold,
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of items pushed so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add one extraction result and return the id assigned to it.
    ///
    /// Exactly one non-empty descriptor yields a classified node; anything
    /// else yields an unclassified one.
    pub fn push(&mut self, extraction: Extraction<P>) -> usize {
        let id = self.nodes.len();
        let Extraction {
            payload,
            mut descriptors,
        } = extraction;

        let node = if descriptors.len() == 1 && !descriptors[0].is_empty() {
            Node::classified(id, descriptors.swap_remove(0), payload)
        } else {
            log::debug!(
                "Item {} has {} descriptors, marking unclassified",
                id,
                descriptors.len()
            );
            Node::unclassified(id, payload)
        };

        self.nodes.push(node);
        id
    }

    /// Add every extraction in iteration order
    pub fn extend<I>(&mut self, extractions: I)
    where
        I: IntoIterator<Item = Extraction<P>>,
    {
        for extraction in extractions {
            self.push(extraction);
        }
    }

    /// Settle on one descriptor dimension and demote every node that disagrees.
    ///
    /// The most common length wins; equal counts go to the length seen first.
    fn resolve_dimension(&mut self) -> Option<usize> {
        let mut counts: Vec<(usize, usize)> = Vec::new();
        for descriptor in self.nodes.iter().filter_map(|node| node.descriptor.as_ref()) {
            match counts.iter_mut().find(|(dim, _)| *dim == descriptor.len()) {
                Some((_, count)) => *count += 1,
                None => counts.push((descriptor.len(), 1)),
            }
        }

        let (dimension, _) = counts
            .into_iter()
            .fold(None, |best: Option<(usize, usize)>, (dim, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((dim, count)),
            })?;

        for node in self.nodes.iter_mut() {
            let found = match &node.descriptor {
                Some(descriptor) if descriptor.len() != dimension => descriptor.len(),
                _ => continue,
            };
            log::warn!(
                "Item {} has a {}-dimensional descriptor, expected {}; marking unclassified",
                node.id,
                found,
                dimension
            );
            node.descriptor = None;
        }

        Some(dimension)
    }
}

impl<P: Send + Sync> GraphBuilder<P> {
    /// Compute neighbor lists and build the graph.
    ///
    /// Every classified node tests every other classified node on its own, so
    /// each neighbor list is an independent result of the threshold test.
    pub fn build(mut self) -> Graph<P> {
        let threshold = self.threshold;
        let dimension = self.resolve_dimension();

        let neighbor_lists: Vec<Vec<usize>> = {
            let nodes = &self.nodes;
            nodes
                .par_iter()
                .map(|node| {
                    let descriptor = match &node.descriptor {
                        Some(descriptor) => descriptor,
                        None => return Vec::new(),
                    };

                    nodes
                        .iter()
                        .filter(|other| other.id != node.id)
                        .filter_map(|other| {
                            let other_descriptor = other.descriptor.as_ref()?;
                            let distance = cosine_distance(descriptor, other_descriptor);
                            (distance < threshold).then_some(other.id)
                        })
                        .collect()
                })
                .collect()
        };

        for (node, neighbors) in self.nodes.iter_mut().zip(neighbor_lists) {
            node.neighbors = neighbors;
        }

        let graph = Graph {
            nodes: self.nodes,
            threshold,
            dimension,
        };

        log::info!(
            "Built graph with {} nodes ({} unclassified) and {} edges at threshold {}",
            graph.nodes.len(),
            graph.unclassified_count(),
            graph.edge_count(),
            threshold
        );

        graph
    }
}

/// Build a graph from extraction results in one call
pub fn build_graph<P, I>(extractions: I, threshold: f32) -> Graph<P>
where
    P: Send + Sync,
    I: IntoIterator<Item = Extraction<P>>,
{
    let extractions = extractions.into_iter();
    let mut builder = GraphBuilder::with_capacity(threshold, extractions.size_hint().0);
    builder.extend(extractions);
    builder.build()
}
