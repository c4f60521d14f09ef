use std::fmt::Display;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value as JsonValue};

use super::error::LoadError;
use super::model::{DatasetKind, Datasets};
use crate::config::DataPaths;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Result of loading all three datasets. Datasets that failed to load are
/// `None` in `datasets` and have a matching entry in `issues`.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub datasets: Datasets,
    pub issues: Vec<LoadError>,
}

/// Load batting, pitching and team files independently.
pub fn load_datasets(paths: &DataPaths) -> LoadReport {
    let mut report = LoadReport::default();

    match load_dataset(DatasetKind::Batting, &paths.batting) {
        Ok(rows) => report.datasets.batting = Some(rows),
        Err(e) => report.issues.push(e),
    }
    match load_dataset(DatasetKind::Pitching, &paths.pitching) {
        Ok(rows) => report.datasets.pitching = Some(rows),
        Err(e) => report.issues.push(e),
    }
    match load_dataset(DatasetKind::Teams, &paths.teams) {
        Ok(rows) => report.datasets.teams = Some(rows),
        Err(e) => report.issues.push(e),
    }

    report
}

/// Load one dataset, classifying failures for the caller.
pub fn load_dataset<T: DeserializeOwned>(
    dataset: DatasetKind,
    path: &Path,
) -> Result<Vec<T>, LoadError> {
    if !path.is_file() {
        log::warn!("{dataset} file not found: {}", path.display());
        return Err(LoadError::MissingInputFile {
            dataset,
            path: path.to_path_buf(),
        });
    }

    match load_file(path) {
        Ok(rows) => {
            log::info!("Loaded {} {dataset} rows from {}", rows.len(), path.display());
            Ok(rows)
        }
        Err(e) => {
            log::error!("Failed to load {dataset} file {}: {e:#}", path.display());
            Err(LoadError::Unreadable {
                dataset,
                path: path.to_path_buf(),
                message: format!("{e:#}"),
            })
        }
    }
}

/// Load season records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – Lahman layout, header row, extra columns ignored
/// * `.json`    – `[{ "yearID": 2012, "lgID": "AL", ... }, ...]`
/// * `.parquet` – one column per field, same names as the CSV headers
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Skipped-row bookkeeping
// ---------------------------------------------------------------------------

/// Malformed rows are dropped, not fatal. Only a summary is logged.
#[derive(Default)]
struct SkippedRows {
    count: usize,
    first: Option<String>,
}

impl SkippedRows {
    /// `location` is whatever points a reader at the row in the source
    /// file: a 1-based line for CSV, a 1-based record for JSON and parquet.
    fn record(&mut self, location: impl Display, err: impl Display) {
        if self.first.is_none() {
            self.first = Some(format!("{location}: {err}"));
        }
        self.count += 1;
    }

    fn report(&self, source: &str) {
        if let Some(first) = &self.first {
            log::warn!(
                "{source}: skipped {} malformed rows (first: {first})",
                self.count
            );
        }
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file, &path.display().to_string())
}

/// Deserialize CSV rows by header name. Blank cells become `None` for
/// optional fields; rows that still fail are skipped.
pub fn read_csv<T: DeserializeOwned, R: Read>(rdr: R, source: &str) -> Result<Vec<T>> {
    let (rows, skipped) = deserialize_csv(rdr)?;
    skipped.report(source);
    Ok(rows)
}

fn deserialize_csv<T: DeserializeOwned, R: Read>(rdr: R) -> Result<(Vec<T>, SkippedRows)> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    reader.headers().context("reading CSV headers")?;

    let mut rows = Vec::new();
    let mut skipped = SkippedRows::default();
    for (row_no, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                // Header is line 1.
                let line = e
                    .position()
                    .map_or(row_no as u64 + 2, |pos| pos.line());
                skipped.record(format_args!("line {line}"), e);
            }
        }
    }
    Ok((rows, skipped))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text, &path.display().to_string())
}

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
pub fn read_json<T: DeserializeOwned>(text: &str, source: &str) -> Result<Vec<T>> {
    let (rows, skipped) = deserialize_json(text)?;
    skipped.report(source);
    Ok(rows)
}

fn deserialize_json<T: DeserializeOwned>(text: &str) -> Result<(Vec<T>, SkippedRows)> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let JsonValue::Array(records) = root else {
        bail!("Expected top-level JSON array");
    };

    let mut rows = Vec::with_capacity(records.len());
    let mut skipped = SkippedRows::default();
    for (i, rec) in records.into_iter().enumerate() {
        match serde_json::from_value::<T>(rec) {
            Ok(row) => rows.push(row),
            Err(e) => skipped.record(format_args!("record {}", i + 1), e),
        }
    }
    Ok((rows, skipped))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Each row is converted to a JSON object keyed by column name and then
/// deserialized like a JSON record, so all three formats share one schema.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    let mut skipped = SkippedRows::default();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let n_rows = batch.num_rows();

        for row in 0..n_rows {
            let mut object = Map::with_capacity(schema.fields().len());
            for (col_idx, field) in schema.fields().iter().enumerate() {
                let value = extract_json_value(batch.column(col_idx), row);
                object.insert(field.name().clone(), value);
            }
            match serde_json::from_value::<T>(JsonValue::Object(object)) {
                Ok(record) => rows.push(record),
                Err(e) => skipped.record(format_args!("record {}", row_offset + row + 1), e),
            }
        }
        row_offset += n_rows;
    }

    skipped.report(&path.display().to_string());
    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column as a JSON value.
fn extract_json_value(col: &Arc<dyn Array>, row: usize) -> JsonValue {
    if col.is_null(row) {
        return JsonValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => JsonValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => JsonValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => JsonValue::from(col.as_primitive::<Int32Type>().value(row)),
        DataType::Int64 => JsonValue::from(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => float_to_json(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => float_to_json(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => JsonValue::Bool(col.as_boolean().value(row)),
        _ => match array_value_to_string(col.as_ref(), row) {
            Ok(text) => guess_json_value(&text),
            Err(_) => JsonValue::Null,
        },
    }
}

/// Pandas stores integer columns with gaps as float64; whole floats are
/// turned back into integers so they deserialize into count fields.
fn float_to_json(v: f64) -> JsonValue {
    if !v.is_finite() {
        return JsonValue::Null;
    }
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        return JsonValue::from(v as i64);
    }
    Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number)
}

fn guess_json_value(s: &str) -> JsonValue {
    if s.is_empty() {
        return JsonValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return JsonValue::from(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return float_to_json(f);
    }
    JsonValue::String(s.to_string())
}
