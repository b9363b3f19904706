use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use serde_json::Value;

use crate::dataset::Dataset;
use crate::{info_time, warn_time, Result, COUNTRY_COLUMN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Country -> array of leader objects, pretty printed.
    #[default]
    Json,
    /// One row per leader with a `country` column.
    Csv,
}

impl OutputFormat {
    pub fn ext(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn default_file_name(self) -> String {
        format!("leaders.{}", self.ext())
    }
}

/// Result of reading a written file back and comparing it with what was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Passed { leaders: usize, countries: usize },
    Failed(String),
}

impl Verification {
    pub fn is_passed(&self) -> bool {
        matches!(self, Verification::Passed { .. })
    }
}

/// Writes the whole dataset to `path` in one go, then verifies it by reading the file back.
/// Only failing to write is an error; a failed verification is reported in the returned value.
pub fn write_dataset(dataset: &Dataset, format: OutputFormat, path: &Path) -> Result<Verification> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    match format {
        OutputFormat::Json => write_json(dataset, path)?,
        OutputFormat::Csv => write_csv(dataset, path)?,
    }
    info_time!("Wrote {} leaders to {}", dataset.leader_count(), path.display());

    let verification = verify_dataset(dataset, format, path);
    match &verification {
        Verification::Passed { leaders, countries } => info_time!(
            "The {} file '{}' was saved and checked successfully: {} leaders from {} countries.",
            format.ext(),
            path.display(),
            leaders,
            countries
        ),
        Verification::Failed(reason) => {
            warn_time!("The {} file '{}' failed verification: {}", format.ext(), path.display(), reason)
        }
    }
    Ok(verification)
}

/// Reads `path` back and compares it with `dataset`.
/// JSON must be deeply equal; CSV must have one row per leader, the expected column count
/// and at least one row.
pub fn verify_dataset(dataset: &Dataset, format: OutputFormat, path: &Path) -> Verification {
    let outcome = match format {
        OutputFormat::Json => verify_json(dataset, path),
        OutputFormat::Csv => verify_csv(dataset, path),
    };
    match outcome {
        Ok(Some(reason)) => Verification::Failed(reason),
        Ok(None) => Verification::Passed {
            leaders: dataset.leader_count(),
            countries: dataset.country_count(),
        },
        Err(e) => Verification::Failed(format!("could not read the file back: {e}")),
    }
}

fn write_json(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, dataset)?;
    out.flush()?;
    Ok(())
}

fn verify_json(dataset: &Dataset, path: &Path) -> Result<Option<String>> {
    let loaded: Value = serde_json::from_reader(BufReader::new(File::open(path)?))?;
    let expected = serde_json::to_value(dataset)?;
    if loaded == expected {
        Ok(None)
    } else {
        Ok(Some("content of the file does not match the scraped data".into()))
    }
}

/// Header is `country` followed by every leader field in first-seen order.
pub fn csv_columns(dataset: &Dataset) -> Vec<String> {
    let mut columns = vec![COUNTRY_COLUMN.to_string()];
    for (_, leaders) in dataset.iter() {
        for leader in leaders {
            for key in leader.fields().keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

/// Flattens the dataset into one row per leader, aligned with `columns`.
pub fn csv_rows(dataset: &Dataset, columns: &[String]) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(dataset.leader_count());
    for (country, leaders) in dataset.iter() {
        for leader in leaders {
            let row = columns
                .iter()
                .map(|column| {
                    if column == COUNTRY_COLUMN {
                        country.clone()
                    } else {
                        leader.fields().get(column).map(csv_cell).unwrap_or_default()
                    }
                })
                .collect();
            rows.push(row);
        }
    }
    rows
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let columns = csv_columns(dataset);
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&columns)?;
    for row in csv_rows(dataset, &columns) {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn verify_csv(dataset: &Dataset, path: &Path) -> Result<Option<String>> {
    let expected_columns = csv_columns(dataset).len();
    let expected_rows = dataset.leader_count();

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let columns = reader.headers()?.len();
    let mut rows = 0;
    for record in reader.records() {
        let record = record?;
        if record.len() != columns {
            return Ok(Some(format!("row {} has {} cells, header has {columns}", rows + 1, record.len())));
        }
        rows += 1;
    }

    if rows == 0 {
        return Ok(Some("the file has no rows".into()));
    }
    if (rows, columns) != (expected_rows, expected_columns) {
        return Ok(Some(format!(
            "expected {expected_rows} rows x {expected_columns} columns, found {rows} x {columns}"
        )));
    }
    Ok(None)
}
