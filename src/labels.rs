//! Class label table.
//!
//! Detection graphs emit integer class indices; the sibling `labels.json`
//! artifact (a JSON array of strings, indexed by class id) maps them to
//! names. The table is loaded once alongside the graph and is immutable
//! afterwards.

use std::path::Path;

use anyhow::Context;

use crate::error::DetectError;

/// Ordered class-index to class-name mapping.
#[derive(Clone, Debug)]
pub struct LabelTable {
    names: Vec<String>,
}

impl LabelTable {
    /// Build a table from an in-memory name list. Index = class id.
    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Load the table from a `labels.json` file.
    ///
    /// Parse failures and an empty array are load errors; the caller's
    /// detector stays unloaded.
    pub fn from_path(path: &Path) -> Result<Self, DetectError> {
        read_label_file(path).map_err(|source| DetectError::Load {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Class name for `index`, or `None` past the end of the table.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn read_label_file(path: &Path) -> anyhow::Result<LabelTable> {
    let raw = std::fs::read(path)
        .with_context(|| format!("failed to read label file {}", path.display()))?;
    let names: Vec<String> = serde_json::from_slice(&raw)
        .with_context(|| format!("label file {} is not a JSON array of strings", path.display()))?;
    if names.is_empty() {
        anyhow::bail!("label file {} holds no classes", path.display());
    }
    Ok(LabelTable { names })
}
