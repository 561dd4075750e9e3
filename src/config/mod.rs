//! Configuration for dataset loading and session construction.

use std::path::{Path, PathBuf};

/// Configuration for date parsing in claim datasets
///
/// Date columns arrive either as native Date32 values or as strings; string
/// values are tried against each format in order.
#[derive(Debug, Clone)]
pub struct DateFormatConfig {
    /// List of date format strings to try when parsing dates
    pub date_formats: Vec<String>,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%d/%m/%Y".to_string(), // dataset convention: 15/01/2023
                "%Y-%m-%d".to_string(), // ISO format: 2023-01-15
                "%d-%m-%Y".to_string(), // European: 15-01-2023
            ],
        }
    }
}

/// Paths to everything a report session loads at startup
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Package-based (INA-CBGs) claim dataset
    pub package_dataset: PathBuf,
    /// Non-package (Non-CBGs) claim dataset
    pub non_package_dataset: PathBuf,
    /// Medicine (Obat) claim dataset
    pub medicine_dataset: PathBuf,

    /// ICD-10 diagnosis reference table
    pub diagnosis_table: PathBuf,
    /// ICD-9-CM procedure reference table
    pub procedure_table: PathBuf,
    /// Discharge status reference table
    pub discharge_table: PathBuf,
    /// Medicine name list
    pub medicine_table: PathBuf,

    /// Package claim classifier artifact
    pub package_model: PathBuf,
    /// Non-package claim classifier artifact
    pub non_package_model: PathBuf,
    /// Medicine claim classifier artifact
    pub medicine_model: PathBuf,

    /// Date parsing configuration for the claim datasets
    pub date_formats: DateFormatConfig,
}

impl SessionConfig {
    /// Build a config from a base directory using the conventional file names
    #[must_use]
    pub fn from_base_dir(base: &Path) -> Self {
        Self {
            package_dataset: base.join("pengajuan_bpjs.parquet"),
            non_package_dataset: base.join("pengajuan_noncbgs.parquet"),
            medicine_dataset: base.join("pengajuan_obat.parquet"),
            diagnosis_table: base.join("icd10_eklaim.parquet"),
            procedure_table: base.join("icd9cm.parquet"),
            discharge_table: base.join("discharge_status.parquet"),
            medicine_table: base.join("daftar_obat_unik.parquet"),
            package_model: base.join("model_inacbgs.json"),
            non_package_model: base.join("model_noncbgs.json"),
            medicine_model: base.join("model_obat.json"),
            date_formats: DateFormatConfig::default(),
        }
    }
}
