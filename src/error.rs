use std::path::PathBuf;

use thiserror::Error;

/// Problems with the shape or content of a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset has no metadata rows")]
    MissingMetadata,

    #[error("metadata has {keys} keys but {values} values")]
    MetadataMismatch { keys: usize, values: usize },

    #[error("dataset has no column header row")]
    MissingHeader,

    #[error("metadata key '{0}' not found")]
    MissingKey(String),

    #[error("metadata key '{key}' is not numeric: '{value}'")]
    NotNumeric { key: String, value: String },

    #[error("no target classes in '{0}'")]
    NoTargetClasses(String),

    #[error("target range is empty: min {min} > max {max}")]
    EmptyRange { min: f64, max: f64 },
}

/// Failures while removing a model output directory.
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}
