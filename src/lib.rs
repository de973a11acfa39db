//! A stand-in prediction backend.
//!
//! Implements the [`Predictor`] contract of the host analytics framework
//! without learning anything: training and evaluation report success, and
//! predictions are drawn at random from the dataset's declared targets.

pub mod cleanup;
pub mod cli;
pub mod data;
pub mod error;
pub mod predictor;
pub mod processor;

pub use predictor::{PredictionResult, Predictor, Status};
pub use processor::TestProcessor;
