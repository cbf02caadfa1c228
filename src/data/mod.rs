//! Input loading for precomputed descriptors

pub mod descriptors;

pub use descriptors::{load_descriptors, parse_descriptors};
