//! Table loading and writing
//!
//! Comma-delimited files go through the Polars CSV reader. The raw marketing
//! campaign file is separated by runs of whitespace, which the Polars reader
//! cannot express, so it is tokenised here and typed per column.

use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::error::PipelineError;
use crate::utils::columns::require_columns;

/// Load a comma-delimited table with a header row
///
/// Fails with `PipelineError::MissingFile` if `path` does not exist and with
/// `PipelineError::MissingColumn` if any of `required` is absent.
pub fn load_csv(path: &Path, required: &[&str]) -> Result<DataFrame> {
    ensure_readable(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None) // Scan entire file
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load CSV: {:?}", path))?;

    require_columns(&df, required, &path.display().to_string())?;

    debug!("Loaded {:?}: {} rows × {} columns", path, df.height(), df.width());
    Ok(df)
}

/// Whitespace-delimited table plus the number of malformed lines skipped
pub struct WhitespaceTable {
    pub frame: DataFrame,
    pub skipped_lines: usize,
}

/// Load a table whose fields are separated by runs of whitespace
///
/// A line with more fields than the header is malformed and skipped; a line
/// with fewer fields is padded with missing values. Each column is typed by
/// `infer_column`.
pub fn load_whitespace_table(path: &Path, required: &[&str]) -> Result<WhitespaceTable> {
    ensure_readable(path)?;

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;

    let mut lines = contents.lines().filter(|line| !line.trim().is_empty());

    let header: Vec<String> = match lines.next() {
        Some(line) => line.split_whitespace().map(|s| s.to_string()).collect(),
        None => return Err(PipelineError::EmptyInput { path: path.to_path_buf() }.into()),
    };

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); header.len()];
    let mut skipped_lines = 0;

    for line in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() > header.len() {
            skipped_lines += 1;
            continue;
        }
        for (idx, column) in cells.iter_mut().enumerate() {
            column.push(fields.get(idx).map(|s| s.to_string()));
        }
    }

    if skipped_lines > 0 {
        warn!("{:?}: skipped {} malformed lines", path, skipped_lines);
    }

    let columns: Vec<Column> = header
        .iter()
        .zip(cells)
        .map(|(name, values)| infer_column(name, values).into())
        .collect();

    let frame = DataFrame::new(columns)
        .with_context(|| format!("Failed to assemble table from {:?}", path))?;

    require_columns(&frame, required, &path.display().to_string())?;

    debug!(
        "Loaded {:?}: {} rows × {} columns",
        path,
        frame.height(),
        frame.width()
    );

    Ok(WhitespaceTable { frame, skipped_lines })
}

/// Type a column of raw cells
///
/// All integers → Int64, all numbers → Float64, otherwise String. Empty cells
/// and the literal `NA` are missing and do not influence the type.
pub fn infer_column(name: &str, values: Vec<Option<String>>) -> Series {
    let values: Vec<Option<String>> = values
        .into_iter()
        .map(|v| v.filter(|s| !s.is_empty() && s != "NA"))
        .collect();

    let present = || values.iter().flatten();

    if present().all(|s| s.parse::<i64>().is_ok()) {
        let parsed: Vec<Option<i64>> = values
            .iter()
            .map(|v| v.as_ref().and_then(|s| s.parse().ok()))
            .collect();
        return Series::new(name.into(), parsed);
    }

    if present().all(|s| s.parse::<f64>().is_ok()) {
        let parsed: Vec<Option<f64>> = values
            .iter()
            .map(|v| v.as_ref().and_then(|s| s.parse().ok()))
            .collect();
        return Series::new(name.into(), parsed);
    }

    Series::new(name.into(), values)
}

/// Write a table as comma-delimited CSV, creating the parent directory
///
/// Missing values are written as `null_value` (empty string if `None`).
pub fn write_csv(df: &mut DataFrame, path: &Path, null_value: Option<&str>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create {:?}", path))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_null_value(null_value.unwrap_or("").to_string())
        .finish(df)
        .with_context(|| format!("Failed to write CSV: {:?}", path))?;

    debug!("Wrote {:?}: {} rows", path, df.height());
    Ok(())
}

fn ensure_readable(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PipelineError::MissingFile { path: path.to_path_buf() }.into());
    }
    let is_empty = fs::metadata(path)
        .with_context(|| format!("Failed to stat {:?}", path))?
        .len()
        == 0;
    if is_empty {
        return Err(PipelineError::EmptyInput { path: path.to_path_buf() }.into());
    }
    Ok(())
}
