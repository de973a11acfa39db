use std::path::Path;

use anyhow::Result;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::loader::load_dataset;
use crate::data::source::DatasetSource;
use crate::data::targets::parse_target_classes;
use crate::error::DatasetError;
use crate::predictor::{PredictedValue, Prediction, PredictionResult, Predictor};

const TARGET_CLASSES: &str = "targetclasses";
const TARGET_MIN: &str = "targetmin";
const TARGET_MAX: &str = "targetmax";

/// Score reported by every evaluation.
pub const EVALUATION_SCORE: f64 = 1.0;

/// A predictor that learns nothing.
///
/// Training and evaluation only dump the dataset and report success.
/// Classification picks a random class from the dataset's target classes and
/// estimation picks a random two-decimal value between its target bounds.
pub struct TestProcessor {
    rng: StdRng,
}

impl Default for TestProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProcessor {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible predictions for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn dump(banner: &str, dataset: &dyn DatasetSource) -> Result<()> {
        let contents = dataset.contents()?;
        debug!("{banner} ({})\n{contents}", dataset.label());
        Ok(())
    }
}

/// Smallest and largest multiples of 0.01 (as hundredths) inside `[min, max]`.
///
/// The tolerance absorbs float error so `0.29` maps to 29, not 28.
fn hundredths_within(min: f64, max: f64) -> Result<(i64, i64), DatasetError> {
    const TOLERANCE: f64 = 1e-9;
    if min > max {
        return Err(DatasetError::EmptyRange { min, max });
    }
    let low = (min * 100.0 - TOLERANCE).ceil() as i64;
    let high = (max * 100.0 + TOLERANCE).floor() as i64;
    if low > high {
        return Err(DatasetError::EmptyRange { min, max });
    }
    Ok((low, high))
}

impl Predictor for TestProcessor {
    fn is_ready(&self) -> bool {
        true
    }

    fn train_classification(
        &mut self,
        unique_id: &str,
        dataset: &dyn DatasetSource,
        output_dir: &Path,
    ) -> Result<PredictionResult> {
        Self::dump("TRAINING FILE CONTENTS", dataset)?;
        info!(
            "model {unique_id}: training skipped, output dir {}",
            output_dir.display()
        );
        Ok(PredictionResult::ok())
    }

    fn classify(
        &mut self,
        unique_id: &str,
        dataset: &dyn DatasetSource,
        _output_dir: &Path,
    ) -> Result<PredictionResult> {
        Self::dump("PREDICTION FILE CONTENTS", dataset)?;
        let ds = load_dataset(dataset)?;

        let raw = ds.metadata.require(TARGET_CLASSES)?.to_string();
        let classes = parse_target_classes(&raw);
        if classes.is_empty() {
            return Err(DatasetError::NoTargetClasses(raw).into());
        }

        let predictions: Vec<Prediction> = ds
            .samples
            .iter()
            .map(|sample| {
                let class = &classes[self.rng.random_range(0..classes.len())];
                Prediction(sample.id.clone(), PredictedValue::Class(class.clone()))
            })
            .collect();

        info!(
            "model {unique_id}: {} random predictions over {} classes",
            predictions.len(),
            classes.len()
        );
        Ok(PredictionResult::with_predictions(predictions))
    }

    fn evaluate_classification(
        &mut self,
        unique_id: &str,
        max_deviation: f64,
        n_iterations: u32,
        dataset: &dyn DatasetSource,
        _output_dir: &Path,
    ) -> Result<PredictionResult> {
        Self::dump("EVALUATION FILE CONTENTS", dataset)?;
        info!(
            "model {unique_id}: evaluation skipped \
             (max deviation {max_deviation}, {n_iterations} iterations)"
        );
        Ok(PredictionResult::with_score(EVALUATION_SCORE))
    }

    fn train_regression(
        &mut self,
        unique_id: &str,
        dataset: &dyn DatasetSource,
        output_dir: &Path,
    ) -> Result<PredictionResult> {
        self.train_classification(unique_id, dataset, output_dir)
    }

    fn estimate(
        &mut self,
        unique_id: &str,
        dataset: &dyn DatasetSource,
        _output_dir: &Path,
    ) -> Result<PredictionResult> {
        Self::dump("PREDICTION FILE CONTENTS", dataset)?;
        let ds = load_dataset(dataset)?;

        let min = ds.metadata.require_f64(TARGET_MIN)?;
        let max = ds.metadata.require_f64(TARGET_MAX)?;
        let (low, high) = hundredths_within(min, max)?;

        let predictions: Vec<Prediction> = ds
            .samples
            .iter()
            .map(|sample| {
                let hundredths = self.rng.random_range(low..=high);
                Prediction(
                    sample.id.clone(),
                    PredictedValue::Estimate(hundredths as f64 / 100.0),
                )
            })
            .collect();

        info!(
            "model {unique_id}: {} random estimates in [{min}, {max}]",
            predictions.len()
        );
        Ok(PredictionResult::with_predictions(predictions))
    }

    fn evaluate_regression(
        &mut self,
        unique_id: &str,
        max_deviation: f64,
        n_iterations: u32,
        dataset: &dyn DatasetSource,
        output_dir: &Path,
    ) -> Result<PredictionResult> {
        self.evaluate_classification(unique_id, max_deviation, n_iterations, dataset, output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::MemoryDataset;
    use crate::predictor::Status;

    fn classification(classes: &str) -> MemoryDataset {
        MemoryDataset::new(
            "classification.csv",
            format!(
                "targetclasses,nfeatures\n\"{classes}\",1\nsampleid,f1\n\
                 s1,0.1\ns2,0.2\ns3,0.3\ns4,0.4\ns5,0.5\n"
            ),
        )
    }

    fn regression(min: &str, max: &str) -> MemoryDataset {
        MemoryDataset::new(
            "regression.csv",
            format!("targetmin,targetmax\n{min},{max}\nsampleid,f1\na,1\nb,2\nc,3\n"),
        )
    }

    fn out() -> &'static Path {
        Path::new("/tmp/testbackend-out")
    }

    #[test]
    fn is_always_ready() {
        assert!(TestProcessor::new().is_ready());
    }

    #[test]
    fn training_reports_ok_without_predictions() {
        let mut p = TestProcessor::with_seed(1);
        let ds = classification("[0,1]");
        for result in [
            p.train_classification("m1", &ds, out()).unwrap(),
            p.train_regression("m1", &ds, out()).unwrap(),
        ] {
            assert_eq!(result.status, Status::Ok);
            assert!(result.info.is_empty());
            assert!(result.predictions.is_none());
        }
    }

    #[test]
    fn evaluation_reports_fixed_score() {
        let mut p = TestProcessor::with_seed(1);
        let ds = regression("0", "1");
        let c = p.evaluate_classification("m1", 0.02, 10, &ds, out()).unwrap();
        let r = p.evaluate_regression("m1", 0.02, 10, &ds, out()).unwrap();
        assert_eq!(c, r);
        assert_eq!(c.status, Status::Ok);
        assert_eq!(c.score, Some(EVALUATION_SCORE));
    }

    #[test]
    fn classify_predicts_one_known_class_per_sample() {
        let mut p = TestProcessor::with_seed(7);
        let result = p.classify("m1", &classification("[3, 5]"), out()).unwrap();
        let predictions = result.predictions.unwrap();

        let ids: Vec<_> = predictions.iter().map(|p| p.sample_id()).collect();
        assert_eq!(ids, vec!["s1", "s2", "s3", "s4", "s5"]);
        for prediction in &predictions {
            match prediction.value() {
                PredictedValue::Class(c) => assert!(c == "3" || c == "5"),
                other => panic!("unexpected value {other:?}"),
            }
        }
    }

    #[test]
    fn same_seed_gives_same_predictions() {
        let ds = classification("[0,1,2]");
        let a = TestProcessor::with_seed(42).classify("m", &ds, out()).unwrap();
        let b = TestProcessor::with_seed(42).classify("m", &ds, out()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn classify_strips_raw_class_tokens() {
        let mut p = TestProcessor::with_seed(5);
        for (cell, expected) in [("007", "007"), ("1e3", "13")] {
            let ds = MemoryDataset::new(
                "classes.csv",
                format!("targetclasses\n{cell}\nsampleid,f1\ns1,0.1\n"),
            );
            let result = p.classify("m1", &ds, out()).unwrap();
            assert_eq!(
                result.predictions.unwrap()[0].1,
                PredictedValue::Class(expected.to_string())
            );
        }
    }

    #[test]
    fn classify_without_target_classes_fails() {
        let mut p = TestProcessor::with_seed(1);
        let err = p.classify("m1", &classification("[]"), out()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::NoTargetClasses(_))
        ));

        let ds = regression("0", "1");
        let err = p.classify("m1", &ds, out()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::MissingKey(k)) if k == TARGET_CLASSES
        ));
    }

    #[test]
    fn estimate_stays_within_bounds_with_two_decimals() {
        let mut p = TestProcessor::with_seed(3);
        let result = p.estimate("m1", &regression("-1.5", "2.25"), out()).unwrap();
        let predictions = result.predictions.unwrap();
        assert_eq!(predictions.len(), 3);

        for prediction in &predictions {
            let PredictedValue::Estimate(v) = *prediction.value() else {
                panic!("expected an estimate");
            };
            assert!((-1.5..=2.25).contains(&v), "{v} out of range");
            let scaled = v * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn estimate_with_equal_bounds_is_constant() {
        let mut p = TestProcessor::with_seed(3);
        let result = p.estimate("m1", &regression("4", "4"), out()).unwrap();
        for prediction in result.predictions.unwrap() {
            assert_eq!(prediction.1, PredictedValue::Estimate(4.0));
        }
    }

    #[test]
    fn estimate_keeps_fractional_bounds() {
        let mut p = TestProcessor::with_seed(3);
        let result = p.estimate("m1", &regression("0.121", "0.139"), out()).unwrap();
        for prediction in result.predictions.unwrap() {
            assert_eq!(prediction.1, PredictedValue::Estimate(0.13));
        }

        let result = p.estimate("m1", &regression("0.29", "0.29"), out()).unwrap();
        for prediction in result.predictions.unwrap() {
            assert_eq!(prediction.1, PredictedValue::Estimate(0.29));
        }
    }

    #[test]
    fn estimate_rejects_range_without_a_hundredth() {
        let mut p = TestProcessor::with_seed(3);
        for (min, max) in [("0.121", "0.124"), ("0.124", "0.121")] {
            let err = p.estimate("m1", &regression(min, max), out()).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<DatasetError>(),
                    Some(DatasetError::EmptyRange { .. })
                ),
                "{min}..{max}"
            );
        }
    }

    #[test]
    fn estimate_rejects_non_finite_bounds() {
        let mut p = TestProcessor::with_seed(3);
        for (min, max) in [("NaN", "5"), ("0", "inf"), ("-inf", "1")] {
            let err = p.estimate("m1", &regression(min, max), out()).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<DatasetError>(),
                    Some(DatasetError::NotNumeric { .. })
                ),
                "{min}..{max}"
            );
        }
    }

    #[test]
    fn estimate_rejects_inverted_bounds() {
        let mut p = TestProcessor::with_seed(3);
        let err = p.estimate("m1", &regression("5", "1"), out()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::EmptyRange { .. })
        ));
    }
}
