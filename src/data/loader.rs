use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};

use super::model::{Dataset, Metadata, Sample};
use super::source::DatasetSource;
use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from its source.
///
/// Layout:
/// * row 1 – metadata keys
/// * row 2 – metadata values
/// * row 3 – column headers
/// * rows 4.. – samples: id first, numeric features after
pub fn load_dataset(source: &dyn DatasetSource) -> Result<Dataset> {
    let contents = source.contents()?;
    parse_dataset(&contents).with_context(|| format!("parsing dataset {}", source.label()))
}

/// Parse dataset text laid out as described in [`load_dataset`].
pub fn parse_dataset(contents: &str) -> Result<Dataset> {
    // Rows differ in width, so no header handling and no width checks.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_bytes());
    let mut records = reader.records();

    let metadata = extract_metadata(&mut records)?;

    let columns = match records.next() {
        Some(header) => to_strings(&header.context("reading column headers")?),
        None => return Err(DatasetError::MissingHeader.into()),
    };

    let mut samples = Vec::new();
    for (row_no, result) in records.enumerate() {
        let record = result.with_context(|| format!("CSV sample row {row_no}"))?;
        if is_blank(&record) {
            continue;
        }
        if let Some(sample) = Sample::from_row(record.iter()) {
            samples.push(sample);
        }
    }

    Ok(Dataset {
        metadata,
        columns,
        samples,
    })
}

/// Read the next two records and zip them into [`Metadata`].
///
/// The iterator must be positioned at the top of the file.
pub fn extract_metadata<I>(records: &mut I) -> Result<Metadata>
where
    I: Iterator<Item = csv::Result<StringRecord>>,
{
    let keys = match records.next() {
        Some(r) => to_strings(&r.context("reading metadata keys")?),
        None => return Err(DatasetError::MissingMetadata.into()),
    };
    let values = match records.next() {
        Some(r) => to_strings(&r.context("reading metadata values")?),
        None => return Err(DatasetError::MissingMetadata.into()),
    };
    Ok(Metadata::from_rows(&keys, &values)?)
}

// -- helpers --

fn to_strings(record: &StringRecord) -> Vec<String> {
    record.iter().map(|c| c.to_string()).collect()
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|c| c.trim().is_empty())
}
