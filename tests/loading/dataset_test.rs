//! Loading the typed claim datasets from parquet

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};

use claim_insight::reader::dataset::{load_medicine_claims, load_package_claims};
use claim_insight::{ClaimRecord, ClaimStatus, DateFormatConfig, Error};

use crate::utils::{scratch_dir, write_parquet};

fn write_package_fixture(path: &Path) {
    write_parquet(
        path,
        vec![
            (
                "SEP",
                Arc::new(StringArray::from(vec!["0301R0010123V000001", "0301R0010123V000002"]))
                    as ArrayRef,
            ),
            ("status", Arc::new(Int64Array::from(vec![1, 0])) as ArrayRef),
            (
                "ADMISSION_DATE",
                Arc::new(StringArray::from(vec!["15/01/2023", "02/06/2024"])) as ArrayRef,
            ),
            ("SEX", Arc::new(StringArray::from(vec!["1", "2"])) as ArrayRef),
            (
                "UMUR_TAHUN",
                Arc::new(Float64Array::from(vec![45.0, 31.0])) as ArrayRef,
            ),
            (
                "KELAS_RAWAT",
                Arc::new(Int64Array::from(vec![2, 3])) as ArrayRef,
            ),
            (
                "DIAGLIST",
                Arc::new(StringArray::from(vec!["A90;J18.9", "A09"])) as ArrayRef,
            ),
            (
                "PROCLIST",
                Arc::new(StringArray::from(vec![Some("99.04"), None])) as ArrayRef,
            ),
            (
                "DESKRIPSI_INACBG",
                Arc::new(StringArray::from(vec!["INFEKSI VIRUS RINGAN", "DIARE RINGAN"]))
                    as ArrayRef,
            ),
            ("LOS", Arc::new(Float64Array::from(vec![3.0, 2.0])) as ArrayRef),
            (
                "TARIF_RS",
                Arc::new(Float64Array::from(vec![1_000_000.0, 750_000.0])) as ArrayRef,
            ),
            (
                "TOTAL_TARIF",
                Arc::new(Float64Array::from(vec![900_000.0, 800_000.0])) as ArrayRef,
            ),
        ],
    );
}

#[test]
fn test_load_package_claims_round_trip() {
    let dir = scratch_dir();
    let path = dir.join("pengajuan_bpjs.parquet");
    write_package_fixture(&path);

    let claims = load_package_claims(&path, &DateFormatConfig::default()).unwrap();
    assert_eq!(claims.len(), 2);

    let first = &claims[0];
    assert_eq!(first.sep, "0301R0010123V000001");
    assert_eq!(first.status, Some(ClaimStatus::Approved));
    assert_eq!(first.year(), 2023);
    assert_eq!(first.month(), 1);
    assert_eq!(first.ward_class, Some(2));
    assert_eq!(first.diagnosis_codes.as_deref(), Some("A90;J18.9"));
    assert_eq!(first.hospital_tariff, 1_000_000.0);
    assert_eq!(first.tariff_difference(), 100_000.0);

    let second = &claims[1];
    assert_eq!(second.status, Some(ClaimStatus::Rejected));
    assert_eq!(second.year(), 2024);
    assert_eq!(second.month(), 6);
    // Null descriptive cells degrade to None instead of failing the load
    assert_eq!(second.procedure_codes, None);
}

#[test]
fn test_load_medicine_claims_round_trip() {
    let dir = scratch_dir();
    let path = dir.join("pengajuan_obat.parquet");
    write_parquet(
        &path,
        vec![
            (
                "SEP_KUNJUNGAN",
                Arc::new(StringArray::from(vec!["0301R0010123V000009"])) as ArrayRef,
            ),
            ("status", Arc::new(Int64Array::from(vec![1])) as ArrayRef),
            (
                "TGL_RESEP",
                Arc::new(StringArray::from(vec!["03/07/2024"])) as ArrayRef,
            ),
            (
                "jenisresep",
                Arc::new(StringArray::from(vec!["Obat Kemoterapi"])) as ArrayRef,
            ),
            (
                "obat",
                Arc::new(StringArray::from(vec!["PACLITAXEL"])) as ArrayRef,
            ),
            ("jmlobat", Arc::new(Float64Array::from(vec![10.0])) as ArrayRef),
            (
                "BIAYA_TAGIHAN",
                Arc::new(Float64Array::from(vec![1_250_000.0])) as ArrayRef,
            ),
            (
                "jmlobatsetuju",
                Arc::new(Float64Array::from(vec![8.0])) as ArrayRef,
            ),
            (
                "biayasetuju",
                Arc::new(Float64Array::from(vec![1_000_000.0])) as ArrayRef,
            ),
        ],
    );

    let claims = load_medicine_claims(&path, &DateFormatConfig::default()).unwrap();
    assert_eq!(claims.len(), 1);

    let claim = &claims[0];
    assert_eq!(claim.medicine.as_deref(), Some("PACLITAXEL"));
    assert_eq!(claim.month(), 7);
    assert_eq!(claim.quantity, 10.0);
    assert_eq!(claim.approved_amount, 1_000_000.0);
}

#[test]
fn test_missing_dataset_is_data_unavailable() {
    let dir = scratch_dir();
    let err =
        load_package_claims(&dir.join("absent.parquet"), &DateFormatConfig::default()).unwrap_err();
    assert!(matches!(err, Error::DataUnavailable { .. }));
}

#[test]
fn test_row_missing_mandatory_column_fails_the_load() {
    let dir = scratch_dir();
    let path = dir.join("pengajuan_bpjs.parquet");
    // No TARIF_RS column at all
    write_parquet(
        &path,
        vec![
            ("SEP", Arc::new(StringArray::from(vec!["X"])) as ArrayRef),
            (
                "ADMISSION_DATE",
                Arc::new(StringArray::from(vec!["15/01/2023"])) as ArrayRef,
            ),
            (
                "TOTAL_TARIF",
                Arc::new(Float64Array::from(vec![1.0])) as ArrayRef,
            ),
        ],
    );

    let err = load_package_claims(&path, &DateFormatConfig::default()).unwrap_err();
    assert!(matches!(err, Error::DataUnavailable { .. }));
}
