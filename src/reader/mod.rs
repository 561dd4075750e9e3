//! Parquet file reading utilities
//!
//! Thin wrapper around the Arrow parquet reader plus per-cell accessors used
//! by the dataset and reference-table loaders. File handles live only for
//! the duration of a load call and are released on every exit path.

pub mod dataset;

use std::fs;
use std::path::Path;

use arrow::array::{
    Array, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::DateFormatConfig;
use crate::error::{Error, Result};

/// Offset between the Common Era day count and the Unix epoch used by Date32
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Safely open a file, mapping every failure to `DataUnavailable`
fn open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(Error::data_unavailable(
            path,
            format!("file not found ({purpose})"),
        ));
    }
    if !path.is_file() {
        return Err(Error::data_unavailable(
            path,
            format!("path is not a file ({purpose})"),
        ));
    }
    fs::File::open(path)
        .map_err(|e| Error::data_unavailable(path, format!("failed to open ({purpose}): {e}")))
}

/// Read a parquet file into Arrow record batches
///
/// # Errors
/// Returns `DataUnavailable` if the file cannot be opened or decoded.
pub fn read_batches(path: &Path) -> Result<Vec<RecordBatch>> {
    let file = open_file(path, "reading parquet file")?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::data_unavailable(path, format!("failed to read parquet metadata: {e}")))?
        .build()
        .map_err(|e| Error::data_unavailable(path, format!("failed to build parquet reader: {e}")))?;

    let mut batches = Vec::new();
    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| Error::data_unavailable(path, format!("failed to read record batch: {e}")))?;
        batches.push(batch);
    }

    log::debug!(
        "Read {} batches ({} rows) from {}",
        batches.len(),
        batches.iter().map(RecordBatch::num_rows).sum::<usize>(),
        path.display()
    );

    Ok(batches)
}

/// Extract a string cell, `None` if the column is missing or the cell null
pub(crate) fn string_at(batch: &RecordBatch, column: &str, row: usize) -> Option<String> {
    let array = batch.column_by_name(column)?;
    if array.is_null(row) {
        return None;
    }
    if let Some(strings) = array.as_any().downcast_ref::<StringArray>() {
        return Some(strings.value(row).to_string());
    }
    if let Some(strings) = array.as_any().downcast_ref::<LargeStringArray>() {
        return Some(strings.value(row).to_string());
    }
    None
}

/// Extract a numeric cell as f64, widening from any supported numeric type
pub(crate) fn f64_at(batch: &RecordBatch, column: &str, row: usize) -> Option<f64> {
    let array = batch.column_by_name(column)?;
    if array.is_null(row) {
        return None;
    }
    let any = array.as_any();
    if let Some(a) = any.downcast_ref::<Float64Array>() {
        return Some(a.value(row));
    }
    if let Some(a) = any.downcast_ref::<Float32Array>() {
        return Some(f64::from(a.value(row)));
    }
    if let Some(a) = any.downcast_ref::<Int64Array>() {
        #[allow(clippy::cast_precision_loss)]
        return Some(a.value(row) as f64);
    }
    if let Some(a) = any.downcast_ref::<Int32Array>() {
        return Some(f64::from(a.value(row)));
    }
    None
}

/// Extract an integer cell, accepting spreadsheet-style integral floats
pub(crate) fn i64_at(batch: &RecordBatch, column: &str, row: usize) -> Option<i64> {
    let array = batch.column_by_name(column)?;
    if array.is_null(row) {
        return None;
    }
    let any = array.as_any();
    if let Some(a) = any.downcast_ref::<Int64Array>() {
        return Some(a.value(row));
    }
    if let Some(a) = any.downcast_ref::<Int32Array>() {
        return Some(i64::from(a.value(row)));
    }
    if let Some(a) = any.downcast_ref::<Float64Array>() {
        let v = a.value(row);
        if v.fract() == 0.0 {
            #[allow(clippy::cast_possible_truncation)]
            return Some(v as i64);
        }
    }
    None
}

/// Extract a cell as a code string: strings pass through, integers are
/// formatted (reference tables store some codes as numbers)
pub(crate) fn code_at(batch: &RecordBatch, column: &str, row: usize) -> Option<String> {
    if let Some(text) = string_at(batch, column, row) {
        return Some(text);
    }
    i64_at(batch, column, row).map(|v| v.to_string())
}

/// Extract a date cell from a Date32 column or a formatted string column
pub(crate) fn date_at(
    batch: &RecordBatch,
    column: &str,
    row: usize,
    formats: &DateFormatConfig,
) -> Option<NaiveDate> {
    let array = batch.column_by_name(column)?;
    if array.is_null(row) {
        return None;
    }
    if let Some(dates) = array.as_any().downcast_ref::<Date32Array>() {
        let days = dates.value(row);
        return NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE);
    }
    let text = string_at(batch, column, row)?;
    formats
        .date_formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&text, fmt).ok())
}
