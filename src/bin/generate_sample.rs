use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Write sample classification and regression datasets.
#[derive(Parser)]
struct Args {
    /// Output directory
    #[arg(default_value = ".")]
    out_dir: PathBuf,
    /// Number of samples per dataset
    #[arg(long, default_value_t = 20)]
    samples: usize,
    /// Number of features per sample
    #[arg(long, default_value_t = 3)]
    features: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const TIME_SPLITTING: &str = "\\core\\analytics\\time_splitting\\no_splitting";

fn feature_header(n_features: usize) -> Vec<String> {
    std::iter::once("sampleid".to_string())
        .chain((1..=n_features).map(|i| format!("feature{i}")))
        .collect()
}

fn write_dataset(
    path: &Path,
    metadata: &[(&str, String)],
    args: &Args,
    rng: &mut StdRng,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer.write_record(metadata.iter().map(|(k, _)| *k))?;
    writer.write_record(metadata.iter().map(|(_, v)| v.as_str()))?;
    writer.write_record(feature_header(args.features))?;

    for i in 0..args.samples {
        let mut row = vec![format!("{}-1", i + 1)];
        row.extend((0..args.features).map(|_| format!("{:.4}", rng.random_range(-1.0..=1.0))));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let classification = args.out_dir.join("classification.csv");
    write_dataset(
        &classification,
        &[
            ("timesplitting", TIME_SPLITTING.to_string()),
            ("nfeatures", args.features.to_string()),
            ("targetclasses", "[0,1]".to_string()),
            ("targettype", "discrete".to_string()),
        ],
        &args,
        &mut rng,
    )?;

    let regression = args.out_dir.join("regression.csv");
    write_dataset(
        &regression,
        &[
            ("timesplitting", TIME_SPLITTING.to_string()),
            ("nfeatures", args.features.to_string()),
            ("targetmin", "0".to_string()),
            ("targetmax", "100".to_string()),
            ("targettype", "linear".to_string()),
        ],
        &args,
        &mut rng,
    )?;

    println!(
        "Wrote {} samples ({} features each) to {} and {}",
        args.samples,
        args.features,
        classification.display(),
        regression.display()
    );
    Ok(())
}
