//! Typed loaders for the three claim datasets
//!
//! Each loader reads a parquet file into record batches and extracts one
//! typed row per record. Identifier, date and monetary columns are
//! mandatory; a row missing any of them fails the whole load, while the
//! descriptive columns degrade to `None`.

use std::path::Path;

use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;

use super::{date_at, f64_at, i64_at, read_batches, string_at};
use crate::config::DateFormatConfig;
use crate::error::{Error, Result};
use crate::models::{ClaimStatus, MedicineClaim, NonPackageClaim, PackageClaim};

fn required_string(
    batch: &RecordBatch,
    column: &str,
    row: usize,
    path: &Path,
) -> Result<String> {
    string_at(batch, column, row)
        .ok_or_else(|| Error::data_unavailable(path, format!("row {row}: missing '{column}'")))
}

fn required_f64(batch: &RecordBatch, column: &str, row: usize, path: &Path) -> Result<f64> {
    f64_at(batch, column, row)
        .ok_or_else(|| Error::data_unavailable(path, format!("row {row}: missing '{column}'")))
}

fn required_date(
    batch: &RecordBatch,
    column: &str,
    row: usize,
    path: &Path,
    formats: &DateFormatConfig,
) -> Result<NaiveDate> {
    date_at(batch, column, row, formats).ok_or_else(|| {
        Error::data_unavailable(path, format!("row {row}: missing or unparsable '{column}'"))
    })
}

fn status_at(batch: &RecordBatch, row: usize) -> Option<ClaimStatus> {
    i64_at(batch, "status", row).and_then(ClaimStatus::from_flag)
}

/// Load the package-based (INA-CBGs) claim dataset
///
/// # Errors
/// Returns `DataUnavailable` if the file cannot be read or a row is missing
/// a mandatory column.
pub fn load_package_claims(
    path: &Path,
    formats: &DateFormatConfig,
) -> Result<Vec<PackageClaim>> {
    let batches = read_batches(path)?;
    let mut claims = Vec::new();

    for batch in &batches {
        for row in 0..batch.num_rows() {
            claims.push(PackageClaim {
                sep: required_string(batch, "SEP", row, path)?,
                status: status_at(batch, row),
                admission_date: required_date(batch, "ADMISSION_DATE", row, path, formats)?,
                sex: string_at(batch, "SEX", row),
                age_years: f64_at(batch, "UMUR_TAHUN", row),
                ward_class: i64_at(batch, "KELAS_RAWAT", row),
                diagnosis_codes: string_at(batch, "DIAGLIST", row),
                procedure_codes: string_at(batch, "PROCLIST", row),
                package_description: string_at(batch, "DESKRIPSI_INACBG", row),
                length_of_stay: f64_at(batch, "LOS", row),
                hospital_tariff: required_f64(batch, "TARIF_RS", row, path)?,
                total_tariff: required_f64(batch, "TOTAL_TARIF", row, path)?,
            });
        }
    }

    log::info!(
        "Loaded {} package claims from {}",
        claims.len(),
        path.display()
    );
    Ok(claims)
}

/// Load the non-package (Non-CBGs) claim dataset
///
/// # Errors
/// Returns `DataUnavailable` if the file cannot be read or a row is missing
/// a mandatory column.
pub fn load_non_package_claims(
    path: &Path,
    formats: &DateFormatConfig,
) -> Result<Vec<NonPackageClaim>> {
    let batches = read_batches(path)?;
    let mut claims = Vec::new();

    for batch in &batches {
        for row in 0..batch.num_rows() {
            claims.push(NonPackageClaim {
                sep: required_string(batch, "nosep", row, path)?,
                status: status_at(batch, row),
                admission_date: required_date(batch, "tglmasuk", row, path, formats)?,
                service_type: string_at(batch, "jnspelayanan", row),
                claim_type: string_at(batch, "jenis_klaim", row),
                diagnosis: string_at(batch, "diagnosa", row),
                hospital_tariff: required_f64(batch, "tarifrs", row, path)?,
                billed_amount: required_f64(batch, "tagihan", row, path)?,
            });
        }
    }

    log::info!(
        "Loaded {} non-package claims from {}",
        claims.len(),
        path.display()
    );
    Ok(claims)
}

/// Load the medicine (Obat) claim dataset
///
/// # Errors
/// Returns `DataUnavailable` if the file cannot be read or a row is missing
/// a mandatory column.
pub fn load_medicine_claims(
    path: &Path,
    formats: &DateFormatConfig,
) -> Result<Vec<MedicineClaim>> {
    let batches = read_batches(path)?;
    let mut claims = Vec::new();

    for batch in &batches {
        for row in 0..batch.num_rows() {
            claims.push(MedicineClaim {
                sep: required_string(batch, "SEP_KUNJUNGAN", row, path)?,
                status: status_at(batch, row),
                prescription_date: required_date(batch, "TGL_RESEP", row, path, formats)?,
                prescription_type: string_at(batch, "jenisresep", row),
                medicine: string_at(batch, "obat", row),
                quantity: f64_at(batch, "jmlobat", row).unwrap_or(0.0),
                billed_amount: required_f64(batch, "BIAYA_TAGIHAN", row, path)?,
                approved_quantity: f64_at(batch, "jmlobatsetuju", row).unwrap_or(0.0),
                approved_amount: required_f64(batch, "biayasetuju", row, path)?,
            });
        }
    }

    log::info!(
        "Loaded {} medicine claims from {}",
        claims.len(),
        path.display()
    );
    Ok(claims)
}
