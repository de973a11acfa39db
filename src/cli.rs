use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::error;
use serde::Serialize;

use crate::cleanup::{self, CleanupOutcome};
use crate::data::source::FileDataset;
use crate::predictor::{PredictionResult, Predictor, Status};
use crate::processor::TestProcessor;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Seed for reproducible random predictions
    #[arg(long, global = true, env = "TESTBACKEND_SEED")]
    pub seed: Option<u64>,
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report whether the backend can be used
    Ready,
    /// Print the backend version
    Version,
    /// Train a classification model (no-op)
    TrainClassification(JobArgs),
    /// Predict a random target class for every sample
    Classify(JobArgs),
    /// Evaluate a classification model (always scores 1)
    EvaluateClassification(EvaluationArgs),
    /// Train a regression model (no-op)
    TrainRegression(JobArgs),
    /// Predict a random value between the target bounds for every sample
    Estimate(JobArgs),
    /// Evaluate a regression model (always scores 1)
    EvaluateRegression(EvaluationArgs),
    /// Delete a model output directory
    DeleteDir {
        /// Model dir or model version dir
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct JobArgs {
    /// Model unique id
    pub unique_id: String,
    /// Dataset CSV file
    pub dataset: PathBuf,
    /// Directory for model output
    pub output_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct EvaluationArgs {
    /// Model unique id
    pub unique_id: String,
    /// Maximum accepted score deviation between iterations
    pub max_deviation: f64,
    /// Number of evaluation iterations
    pub n_iterations: u32,
    /// Dataset CSV file
    pub dataset: PathBuf,
    /// Directory for model output
    pub output_dir: PathBuf,
}

#[derive(Serialize)]
struct Readiness {
    ready: bool,
}

#[derive(Serialize)]
struct Cleanup {
    outcome: &'static str,
}

/// Run a parsed command, writing its output to `out`.
///
/// Returns the process exit code.
pub fn execute(cli: Cli, out: &mut impl Write) -> Result<i32> {
    let mut processor = match cli.seed {
        Some(seed) => TestProcessor::with_seed(seed),
        None => TestProcessor::new(),
    };

    let result = match cli.command {
        Commands::Ready => {
            let ready = processor.is_ready();
            write_json(out, &Readiness { ready }, cli.pretty)?;
            return Ok(if ready { 0 } else { 1 });
        }
        Commands::Version => {
            writeln!(out, "{}", env!("CARGO_PKG_VERSION"))?;
            return Ok(0);
        }
        Commands::DeleteDir { path } => {
            let outcome = cleanup::delete_dir(&path)
                .with_context(|| format!("deleting {}", path.display()))?;
            let outcome = match outcome {
                CleanupOutcome::Missing => "missing",
                CleanupOutcome::Deleted => "deleted",
                CleanupOutcome::Refused => "refused",
            };
            write_json(out, &Cleanup { outcome }, cli.pretty)?;
            return Ok(0);
        }
        Commands::TrainClassification(job) => run_job(&job.dataset, |ds| {
            processor.train_classification(&job.unique_id, ds, &job.output_dir)
        }),
        Commands::Classify(job) => run_job(&job.dataset, |ds| {
            processor.classify(&job.unique_id, ds, &job.output_dir)
        }),
        Commands::EvaluateClassification(ev) => run_job(&ev.dataset, |ds| {
            processor.evaluate_classification(
                &ev.unique_id,
                ev.max_deviation,
                ev.n_iterations,
                ds,
                &ev.output_dir,
            )
        }),
        Commands::TrainRegression(job) => run_job(&job.dataset, |ds| {
            processor.train_regression(&job.unique_id, ds, &job.output_dir)
        }),
        Commands::Estimate(job) => run_job(&job.dataset, |ds| {
            processor.estimate(&job.unique_id, ds, &job.output_dir)
        }),
        Commands::EvaluateRegression(ev) => run_job(&ev.dataset, |ds| {
            processor.evaluate_regression(
                &ev.unique_id,
                ev.max_deviation,
                ev.n_iterations,
                ds,
                &ev.output_dir,
            )
        }),
    };

    write_json(out, &result, cli.pretty)?;
    Ok(if result.status.is_ok() { 0 } else { 1 })
}

/// Run one predictor operation, folding failures into a result document.
fn run_job<F>(dataset: &Path, op: F) -> PredictionResult
where
    F: FnOnce(&FileDataset) -> Result<PredictionResult>,
{
    if !dataset.is_file() {
        let err = anyhow::anyhow!("dataset {} not found", dataset.display());
        error!("{err}");
        return PredictionResult::failure(Status::NoDataset, &err);
    }

    let source = FileDataset::new(dataset);
    match op(&source) {
        Ok(result) => result,
        Err(err) => {
            error!("{err:#}");
            PredictionResult::failure(Status::GeneralError, &err)
        }
    }
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
