//! Core library functions for whispers face clustering

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod storage;

pub use cluster::{Cluster, LabelPropagator, Propagation, RandomSource};
pub use config::Config;
pub use error::Error;
pub use graph::{AdjacencyMatrix, Extraction, Graph, GraphBuilder, Node};
pub use pipeline::{Assignment, ClusteringOutcome};
