//! Removal of model output directories.
//!
//! Only trees whose layout matches what the backend writes are removed:
//!
//! ```text
//! <model dir>/
//!   1514764800/          version: decimal timestamp
//!     evaluation/
//!     execution/
//!     testing/
//! ```
//!
//! The path may point either at a whole model dir or at a single version.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::CleanupError;

/// Process subdirectories allowed inside a model version.
pub const PROCESS_DIRS: [&str; 3] = ["evaluation", "execution", "testing"];

/// Oldest accepted version timestamp (2017-01-01T00:00:00Z).
pub const MIN_VERSION_TIMESTAMP: u64 = 1_483_228_800;

const MAX_VERSION_DIGITS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// Nothing at the path.
    Missing,
    Deleted,
    /// The layout did not look like a model directory; left untouched.
    Refused,
}

/// Delete a model dir or model version dir if its layout checks out.
pub fn delete_dir(path: &Path) -> Result<CleanupOutcome, CleanupError> {
    if !path.exists() {
        return Ok(CleanupOutcome::Missing);
    }

    let names = child_names(path)?;
    let whole_model = names.iter().any(|n| !is_process_name(n));

    let valid = if whole_model {
        is_model_dir(path)?
    } else {
        is_model_version_dir(path)?
    };

    if !valid {
        warn!("refusing to delete {}: unexpected layout", path.display());
        return Ok(CleanupOutcome::Refused);
    }

    fs::remove_dir_all(path).map_err(|source| CleanupError::Remove {
        path: path.to_path_buf(),
        source,
    })?;
    info!("deleted {}", path.display());
    Ok(CleanupOutcome::Deleted)
}

/// A version dir holds only `evaluation`, `execution` and `testing` subdirs.
pub fn is_model_version_dir(path: &Path) -> Result<bool, CleanupError> {
    for (name, child) in children(path)? {
        if !child.is_dir() || !is_process_name(&name) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// A model dir holds only version dirs named by their creation timestamp.
pub fn is_model_dir(path: &Path) -> Result<bool, CleanupError> {
    for (name, child) in children(path)? {
        if !child.is_dir() || !is_version_name(&name) {
            return Ok(false);
        }
        if !is_model_version_dir(&child)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn is_process_name(name: &str) -> bool {
    PROCESS_DIRS.contains(&name)
}

fn is_version_name(name: &str) -> bool {
    if name.is_empty()
        || name.len() > MAX_VERSION_DIGITS
        || !name.bytes().all(|b| b.is_ascii_digit())
    {
        return false;
    }
    name.parse::<u64>()
        .map(|ts| ts >= MIN_VERSION_TIMESTAMP)
        .unwrap_or(false)
}

fn children(path: &Path) -> Result<Vec<(String, PathBuf)>, CleanupError> {
    let read_err = |source: std::io::Error| CleanupError::ReadDir {
        path: path.to_path_buf(),
        source,
    };
    let mut out = Vec::new();
    for entry in fs::read_dir(path).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        out.push((name, entry.path()));
    }
    Ok(out)
}

fn child_names(path: &Path) -> Result<Vec<String>, CleanupError> {
    Ok(children(path)?.into_iter().map(|(name, _)| name).collect())
}
