//! Report tables over a dataset loaded from disk

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};

use claim_insight::report::{
    FilterSelection, MedicineCostRow, Selection, diagnosis_differences, distinct_years,
    filter_claims, medicine_cost_table, monthly_totals, monthly_trend, service_type_counts,
    summarize_by_status, ward_class_comparison,
};
use claim_insight::{ClaimStatus, Session, SessionConfig};

use crate::utils::{scratch_dir, write_parquet};

fn write_package_fixture(path: &Path) {
    // Four claims across two years; billed amounts are integral so the
    // partition checks below are exact.
    write_parquet(
        path,
        vec![
            (
                "SEP",
                Arc::new(StringArray::from(vec!["S1", "S2", "S3", "S4"])) as ArrayRef,
            ),
            (
                "status",
                Arc::new(Int64Array::from(vec![1, 0, 1, 1])) as ArrayRef,
            ),
            (
                "ADMISSION_DATE",
                Arc::new(StringArray::from(vec![
                    "10/01/2023",
                    "20/03/2023",
                    "05/03/2023",
                    "01/02/2024",
                ])) as ArrayRef,
            ),
            (
                "KELAS_RAWAT",
                Arc::new(Int64Array::from(vec![1, 1, 3, 3])) as ArrayRef,
            ),
            (
                "DIAGLIST",
                Arc::new(StringArray::from(vec!["A90", "A90", "J18.9", "J18.9"])) as ArrayRef,
            ),
            (
                "TARIF_RS",
                Arc::new(Float64Array::from(vec![100.0, 200.0, 700.0, 400.0])) as ArrayRef,
            ),
            (
                "TOTAL_TARIF",
                Arc::new(Float64Array::from(vec![150.0, 250.0, 500.0, 300.0])) as ArrayRef,
            ),
        ],
    );
}

fn package_session(dir: &Path) -> Session {
    write_package_fixture(&dir.join("pengajuan_bpjs.parquet"));
    Session::load(SessionConfig::from_base_dir(dir))
}

#[test]
fn test_filtered_status_totals_partition_the_billed_sum() {
    let dir = scratch_dir();
    let session = package_session(&dir);
    let claims = session.package_claims().unwrap();

    let selection = FilterSelection {
        years: Selection::Only(vec![2023]),
        months: Selection::All,
    };
    let filtered = filter_claims(claims, &selection);
    assert_eq!(filtered.len(), 3);

    let breakdown = summarize_by_status(&filtered);
    assert_eq!(breakdown.count(ClaimStatus::Approved), 2);
    assert_eq!(breakdown.count(ClaimStatus::Rejected), 1);
    assert_eq!(breakdown.unadjudicated, 0);

    // Approved + rejected totals add up to the filtered billed sum exactly
    let billed: f64 = filtered.iter().map(|c| c.total_tariff).sum();
    assert_eq!(breakdown.total("TOTAL_TARIF"), billed);
    assert_eq!(breakdown.total("TOTAL_TARIF"), 900.0);
}

#[test]
fn test_year_control_and_trend_from_loaded_dataset() {
    let dir = scratch_dir();
    let session = package_session(&dir);
    let claims = session.package_claims().unwrap();

    assert_eq!(distinct_years(claims), [2023, 2024]);

    let all = filter_claims(claims, &FilterSelection::default());
    let trend = monthly_trend(&all);
    assert_eq!(trend[0], ("Januari", 1));
    assert_eq!(trend[1], ("Februari", 1));
    assert_eq!(trend[2], ("Maret", 2));
    assert_eq!(trend[3], ("April", 0));
}

#[test]
fn test_package_tables_from_loaded_dataset() {
    let dir = scratch_dir();
    let session = package_session(&dir);
    let claims = session.package_claims().unwrap();
    let all = filter_claims(claims, &FilterSelection::default());

    let wards = ward_class_comparison(&all);
    assert_eq!(wards.len(), 2);
    assert_eq!(wards[0].ward_class, 1);
    assert_eq!(wards[0].hospital_tariff, 300.0);
    assert_eq!(wards[0].total_tariff, 400.0);
    assert_eq!(wards[1].ward_class, 3);
    assert_eq!(wards[1].hospital_tariff, 1100.0);
    assert_eq!(wards[1].total_tariff, 800.0);

    // A90 gaps are -50 and -50, J18.9 gaps are +200 and +100
    let diff = diagnosis_differences(&all, 10);
    assert_eq!(diff.losses, vec![("A90".to_string(), -50.0)]);
    assert_eq!(diff.profits, vec![("J18.9".to_string(), 150.0)]);

    let trend = monthly_totals(&all, |c| c.total_tariff);
    assert_eq!(trend.len(), 3);
    assert_eq!((trend[0].year, trend[0].month_name), (2023, "Januari"));
    assert_eq!((trend[1].year, trend[1].month), (2023, 3));
    assert_eq!(trend[1].total, 750.0);
    assert_eq!((trend[2].year, trend[2].month_name), (2024, "Februari"));
}

#[test]
fn test_non_package_and_medicine_tables() {
    let dir = scratch_dir();
    write_parquet(
        &dir.join("pengajuan_noncbgs.parquet"),
        vec![
            (
                "nosep",
                Arc::new(StringArray::from(vec!["N1", "N2", "N3"])) as ArrayRef,
            ),
            ("status", Arc::new(Int64Array::from(vec![1, 1, 0])) as ArrayRef),
            (
                "tglmasuk",
                Arc::new(StringArray::from(vec![
                    "01/05/2023",
                    "02/05/2023",
                    "03/05/2023",
                ])) as ArrayRef,
            ),
            (
                "jnspelayanan",
                Arc::new(StringArray::from(vec![
                    Some("Rawat Inap"),
                    Some("Rawat Jalan"),
                    None,
                ])) as ArrayRef,
            ),
            (
                "tarifrs",
                Arc::new(Float64Array::from(vec![10.0, 20.0, 30.0])) as ArrayRef,
            ),
            (
                "tagihan",
                Arc::new(Float64Array::from(vec![15.0, 25.0, 35.0])) as ArrayRef,
            ),
        ],
    );
    write_parquet(
        &dir.join("pengajuan_obat.parquet"),
        vec![
            (
                "SEP_KUNJUNGAN",
                Arc::new(StringArray::from(vec!["M1", "M2", "M3"])) as ArrayRef,
            ),
            ("status", Arc::new(Int64Array::from(vec![1, 1, 1])) as ArrayRef),
            (
                "TGL_RESEP",
                Arc::new(StringArray::from(vec![
                    "01/05/2023",
                    "02/05/2023",
                    "03/05/2023",
                ])) as ArrayRef,
            ),
            (
                "obat",
                Arc::new(StringArray::from(vec!["PACLITAXEL", "CISPLATIN", "PACLITAXEL"]))
                    as ArrayRef,
            ),
            (
                "jmlobat",
                Arc::new(Float64Array::from(vec![1.0, 1.0, 1.0])) as ArrayRef,
            ),
            (
                "BIAYA_TAGIHAN",
                Arc::new(Float64Array::from(vec![300.0, 100.0, 200.0])) as ArrayRef,
            ),
            (
                "jmlobatsetuju",
                Arc::new(Float64Array::from(vec![1.0, 1.0, 1.0])) as ArrayRef,
            ),
            (
                "biayasetuju",
                Arc::new(Float64Array::from(vec![300.0, 100.0, 200.0])) as ArrayRef,
            ),
        ],
    );

    let session = Session::load(SessionConfig::from_base_dir(&dir));

    let non_package = session.non_package_claims().unwrap();
    let all = filter_claims(non_package, &FilterSelection::default());
    let counts = service_type_counts(&all);
    assert_eq!(
        counts,
        vec![
            ("Rawat Inap".to_string(), 1),
            ("Rawat Jalan".to_string(), 1),
            ("Lainnya".to_string(), 1),
        ]
    );

    let medicine = session.medicine_claims().unwrap();
    let all = filter_claims(medicine, &FilterSelection::default());
    let table = medicine_cost_table(&all, 1);
    assert_eq!(
        table,
        vec![
            MedicineCostRow {
                medicine: "PACLITAXEL".to_string(),
                billed: 500.0,
                approved: 500.0,
            },
            MedicineCostRow {
                medicine: "Lainnya".to_string(),
                billed: 100.0,
                approved: 100.0,
            },
        ]
    );
}
