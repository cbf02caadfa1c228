//! Configuration management for whispers clustering

use anyhow::{ensure, Result};
use crate::cluster::LabelPropagator;

/// Default configuration for a clustering run
#[derive(Debug, Clone)]
pub struct Config {
    /// Cosine distance below which two items become neighbors
    pub threshold: f32,

    /// Maximum number of propagation rounds
    pub max_iterations: usize,

    /// Weight edges by `1/distance² + 1` instead of 1
    pub weighted_edges: bool,

    /// Seed for the random source; `None` draws from entropy
    pub seed: Option<u64>,

    /// Worker threads for graph construction (0 = all cores)
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            max_iterations: 200,
            weighted_edges: true,
            seed: None,
            threads: 0,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(threshold: f32, max_iterations: usize, weighted_edges: bool) -> Self {
        Self {
            threshold,
            max_iterations,
            weighted_edges,
            ..Self::default()
        }
    }

    /// Fix the random seed for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values no run can use.
    ///
    /// A non-positive threshold or a zero iteration budget is degenerate but
    /// valid.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.threshold.is_finite(),
            "threshold must be a finite number, got {}",
            self.threshold
        );
        Ok(())
    }

    /// Resolve the worker thread count
    pub fn thread_count(&self) -> usize {
        if self.threads > 0 {
            self.threads
        } else {
            num_cpus::get()
        }
    }

    pub fn propagator(&self) -> LabelPropagator {
        LabelPropagator::new(self.max_iterations, self.weighted_edges)
    }
}
