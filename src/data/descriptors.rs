//! Descriptor file handling
//!
//! The feature extractor runs outside this crate and leaves behind a JSON
//! array with one record per image:
//!
//! ```json
//! [
//!   { "path": "photos/a.jpg", "descriptors": [[0.12, -0.4, ...]] },
//!   { "path": "photos/b.jpg", "descriptors": [] }
//! ]
//! ```

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::graph::Extraction;

/// One record of the extractor's output
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptorRecord {
    /// Image the descriptors were computed from
    pub path: PathBuf,

    /// Face descriptors found in the image; missing or null means none
    #[serde(default)]
    pub descriptors: Option<Vec<Vec<f32>>>,
}

impl From<DescriptorRecord> for Extraction<PathBuf> {
    fn from(record: DescriptorRecord) -> Self {
        Extraction::new(record.path, record.descriptors.unwrap_or_default())
    }
}

/// Load extraction results from a descriptor file
pub fn load_descriptors(path: impl AsRef<Path>) -> Result<Vec<Extraction<PathBuf>>> {
    let path = path.as_ref();
    log::info!("Reading descriptor file: {}", path.display());

    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let extractions = parse_descriptors(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    log::info!("Loaded {} descriptor records", extractions.len());

    Ok(extractions)
}

/// Parse descriptor records from a JSON document.
///
/// A record whose descriptors cannot be read degrades to an item with no
/// descriptors, which later lands in the unclassified bucket. A record without
/// a usable path is skipped, since nothing could be done with it downstream.
pub fn parse_descriptors(contents: &str) -> Result<Vec<Extraction<PathBuf>>> {
    let values: Vec<Value> =
        serde_json::from_str(contents).context("expected a JSON array of records")?;

    let mut extractions = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let path = value.get("path").and_then(Value::as_str).map(PathBuf::from);

        match serde_json::from_value::<DescriptorRecord>(value) {
            Ok(record) => extractions.push(record.into()),
            Err(err) => match path {
                Some(path) => {
                    log::warn!(
                        "Record {} ({}) has unreadable descriptors, treating as unclassified: {}",
                        index,
                        path.display(),
                        err
                    );
                    extractions.push(Extraction::failed(path));
                }
                None => {
                    log::warn!("Skipping record {} without a path: {}", index, err);
                }
            },
        }
    }

    Ok(extractions)
}
