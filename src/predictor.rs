use std::path::Path;

use anyhow::Result;
use serde::{Serialize, Serializer};

use crate::data::source::DatasetSource;

// ---------------------------------------------------------------------------
// Status – result codes understood by the host
// ---------------------------------------------------------------------------

/// Outcome codes shared with the host framework. Serialized as integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NoDataset,
    GeneralError,
    LowScore,
    NotEnoughData,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Ok => 0,
            Status::NoDataset => 1,
            Status::GeneralError => 2,
            Status::LowScore => 4,
            Status::NotEnoughData => 8,
        }
    }

    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

// ---------------------------------------------------------------------------
// Predictions
// ---------------------------------------------------------------------------

/// A predicted value: a class label or a regression estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictedValue {
    Class(String),
    Estimate(f64),
}

/// One `[sample id, predicted value]` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction(pub String, pub PredictedValue);

impl Prediction {
    pub fn sample_id(&self) -> &str {
        &self.0
    }

    pub fn value(&self) -> &PredictedValue {
        &self.1
    }
}

// ---------------------------------------------------------------------------
// PredictionResult
// ---------------------------------------------------------------------------

/// What every predictor operation hands back to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub status: Status,
    pub info: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<Prediction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl PredictionResult {
    pub fn ok() -> Self {
        Self {
            status: Status::Ok,
            info: Vec::new(),
            predictions: None,
            score: None,
        }
    }

    pub fn with_predictions(predictions: Vec<Prediction>) -> Self {
        Self {
            predictions: Some(predictions),
            ..Self::ok()
        }
    }

    pub fn with_score(score: f64) -> Self {
        Self {
            score: Some(score),
            ..Self::ok()
        }
    }

    /// A failed result carrying the error chain as info lines.
    pub fn failure(status: Status, err: &anyhow::Error) -> Self {
        Self {
            status,
            info: err.chain().map(|cause| cause.to_string()).collect(),
            predictions: None,
            score: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Predictor – the backend contract
// ---------------------------------------------------------------------------

/// The interface the host analytics framework requires of a backend.
pub trait Predictor {
    /// Whether the backend can be used.
    fn is_ready(&self) -> bool;

    fn train_classification(
        &mut self,
        unique_id: &str,
        dataset: &dyn DatasetSource,
        output_dir: &Path,
    ) -> Result<PredictionResult>;

    fn classify(
        &mut self,
        unique_id: &str,
        dataset: &dyn DatasetSource,
        output_dir: &Path,
    ) -> Result<PredictionResult>;

    fn evaluate_classification(
        &mut self,
        unique_id: &str,
        max_deviation: f64,
        n_iterations: u32,
        dataset: &dyn DatasetSource,
        output_dir: &Path,
    ) -> Result<PredictionResult>;

    fn train_regression(
        &mut self,
        unique_id: &str,
        dataset: &dyn DatasetSource,
        output_dir: &Path,
    ) -> Result<PredictionResult>;

    fn estimate(
        &mut self,
        unique_id: &str,
        dataset: &dyn DatasetSource,
        output_dir: &Path,
    ) -> Result<PredictionResult>;

    fn evaluate_regression(
        &mut self,
        unique_id: &str,
        max_deviation: f64,
        n_iterations: u32,
        dataset: &dyn DatasetSource,
        output_dir: &Path,
    ) -> Result<PredictionResult>;
}
