//! End-to-end prediction through a loaded session

use chrono::NaiveDate;

use claim_insight::{
    APPROVAL_THRESHOLD, ClaimCategory, Error, RawClaimInput, RawValue, Session, SessionConfig,
};

use crate::utils::{scratch_dir, write_model};

fn medicine_input() -> RawClaimInput {
    RawClaimInput::new()
        .with("jenisresep", RawValue::Text("Obat Kemoterapi".to_string()))
        .with("obat", RawValue::Text("PACLITAXEL".to_string()))
        .with(
            "tgl_resep",
            RawValue::Date(NaiveDate::from_ymd_opt(2024, 7, 3).unwrap()),
        )
        .with("jmlobat", RawValue::Int(10))
        .with("BIAYA_TAGIHAN", RawValue::Float(1_250_000.0))
        .with("jmlobatsetuju", RawValue::Int(8))
        .with("biayasetuju", RawValue::Float(1_000_000.0))
}

fn package_input() -> RawClaimInput {
    RawClaimInput::new()
        .with("UMUR_TAHUN", RawValue::Int(45))
        .with("KELAS_RAWAT", RawValue::Int(2))
        .with("PTD", RawValue::Int(1))
        .with("DIAGLIST", RawValue::Codes(vec!["A90".to_string()]))
        .with("PROCLIST", RawValue::Codes(vec![]))
        .with("VERSI_INACBG", RawValue::Float(5.1))
        .with("TARIF_RS", RawValue::Float(1_000_000.0))
        .with("TARIF_INACBG", RawValue::Float(900_000.0))
        .with("LOS", RawValue::Int(3))
        .with("DISCHARGE_STATUS", RawValue::Text("1".to_string()))
}

#[test]
fn test_predict_medicine_claim_above_threshold() {
    let dir = scratch_dir();
    // Zero weights, so the prediction sits at sigmoid(2) regardless of input
    write_model(
        &dir.join("model_obat.json"),
        &["jenisresep_Obat Kemoterapi", "jmlobat", "selisih_jmlobat"],
        &[0.0, 0.0, 0.0],
        2.0,
    );

    let session = Session::load(SessionConfig::from_base_dir(&dir));
    let result = session
        .predict(ClaimCategory::Medicine, &medicine_input())
        .unwrap();

    assert!(result.probability > APPROVAL_THRESHOLD);
    assert_eq!(result.label, 1);
    assert!(result.is_approved());
}

#[test]
fn test_predict_package_claim_below_threshold() {
    let dir = scratch_dir();
    write_model(&dir.join("model_inacbgs.json"), &["UMUR_TAHUN"], &[0.0], -2.0);

    let session = Session::load(SessionConfig::from_base_dir(&dir));
    let result = session
        .predict(ClaimCategory::Package, &package_input())
        .unwrap();

    assert!(result.probability < 0.5);
    assert_eq!(result.label, 0);
}

#[test]
fn test_predict_without_artifact_is_scoring_unavailable() {
    let dir = scratch_dir();
    write_model(&dir.join("model_obat.json"), &["jmlobat"], &[0.0], 0.0);

    let session = Session::load(SessionConfig::from_base_dir(&dir));
    let err = session
        .predict(ClaimCategory::NonPackage, &RawClaimInput::new())
        .unwrap_err();
    assert!(matches!(err, Error::ScoringUnavailable { .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn test_invalid_form_value_is_reported_per_field() {
    let dir = scratch_dir();
    write_model(&dir.join("model_obat.json"), &["jmlobat"], &[0.0], 0.0);

    let session = Session::load(SessionConfig::from_base_dir(&dir));
    let input = medicine_input().with("jenisresep", RawValue::Text("Obat Bebas".to_string()));

    let err = session.predict(ClaimCategory::Medicine, &input).unwrap_err();
    assert!(matches!(err, Error::InvalidInput { ref field, .. } if field == "jenisresep"));
    assert!(err.is_recoverable());
}

#[test]
fn test_unseen_medicine_name_still_scores() {
    let dir = scratch_dir();
    // Only a known medicine indicator carries weight; an unseen name
    // expands to all-zero indicators and scores at the intercept.
    write_model(
        &dir.join("model_obat.json"),
        &["obat_PACLITAXEL"],
        &[5.0],
        0.0,
    );

    let session = Session::load(SessionConfig::from_base_dir(&dir));
    let input = medicine_input().with("obat", RawValue::Text("OBAT BARU".to_string()));

    let result = session.predict(ClaimCategory::Medicine, &input).unwrap();
    assert!((result.probability - 0.5).abs() < 1e-12);
    assert_eq!(result.label, 0);
}
