use std::path::PathBuf;

use anyhow::{Context, Result};

/// An opaque dataset resource handed over by the host.
pub trait DatasetSource {
    /// Human-readable name used in logs and error messages.
    fn label(&self) -> String;

    /// The full dataset contents.
    fn contents(&self) -> Result<String>;
}

/// A dataset stored on disk.
#[derive(Debug, Clone)]
pub struct FileDataset {
    path: PathBuf,
}

impl FileDataset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for FileDataset {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn contents(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading dataset {}", self.path.display()))
    }
}

/// A dataset held in memory.
#[derive(Debug, Clone)]
pub struct MemoryDataset {
    label: String,
    contents: String,
}

impl MemoryDataset {
    pub fn new(label: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            contents: contents.into(),
        }
    }
}

impl DatasetSource for MemoryDataset {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn contents(&self) -> Result<String> {
        Ok(self.contents.clone())
    }
}
