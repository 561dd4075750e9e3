//! Shared helpers for building on-disk fixtures

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use arrow::array::ArrayRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

static NEXT_DIR: AtomicU32 = AtomicU32::new(0);

/// Create a fresh scratch directory unique to the calling test
pub fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "claim-insight-it-{}-{}",
        std::process::id(),
        NEXT_DIR.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write named columns as a single-batch parquet file
pub fn write_parquet(path: &Path, columns: Vec<(&str, ArrayRef)>) {
    let batch = RecordBatch::try_from_iter(columns).unwrap();
    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

/// Write a classifier artifact with the given column space
pub fn write_model(path: &Path, columns: &[&str], coefficients: &[f64], intercept: f64) {
    let artifact = serde_json::json!({
        "columns": columns,
        "coefficients": coefficients,
        "intercept": intercept,
    });
    std::fs::write(path, artifact.to_string()).unwrap();
}
