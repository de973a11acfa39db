use std::collections::BTreeMap;

use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Metadata – the first two rows zipped together
// ---------------------------------------------------------------------------

/// Metadata key → raw cell text, built from the first two rows of a dataset.
///
/// Values are kept verbatim; callers decide how to read them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: BTreeMap<String, String>,
}

impl Metadata {
    /// Zip a keys row with a values row. Both rows must be the same length.
    pub fn from_rows(keys: &[String], values: &[String]) -> Result<Self, DatasetError> {
        if keys.len() != values.len() {
            return Err(DatasetError::MetadataMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        let entries = keys
            .iter()
            .zip(values)
            .map(|(k, v)| (k.trim().to_string(), v.clone()))
            .collect();
        Ok(Metadata { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a key that must be present.
    pub fn require(&self, key: &str) -> Result<&str, DatasetError> {
        self.get(key)
            .ok_or_else(|| DatasetError::MissingKey(key.to_string()))
    }

    /// Look up a key that must be present and hold a finite number.
    pub fn require_f64(&self, key: &str) -> Result<f64, DatasetError> {
        let raw = self.require(key)?;
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DatasetError::NotNumeric {
                key: key.to_string(),
                value: raw.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Sample – one data row
// ---------------------------------------------------------------------------

/// A single sample: its id (first column) and numeric features.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id: String,
    pub features: Vec<f64>,
}

impl Sample {
    /// Build a sample from a CSV row. Feature cells that are not numbers
    /// become `0.0`, matching how the host casts them.
    pub fn from_row<'a, I>(mut cells: I) -> Option<Self>
    where
        I: Iterator<Item = &'a str>,
    {
        let id = cells.next()?.trim().to_string();
        let features = cells
            .map(|c| c.trim().parse::<f64>().unwrap_or(0.0))
            .collect();
        Some(Sample { id, features })
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete parsed file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Dataset {
    pub metadata: Metadata,
    /// Column headers (third row), sample id column included.
    pub columns: Vec<String>,
    pub samples: Vec<Sample>,
}

impl Dataset {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
