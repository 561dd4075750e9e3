//! Loading label → code reference tables from parquet

use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};

use claim_insight::ReferenceTable;

use crate::utils::{scratch_dir, write_parquet};

#[test]
fn test_two_column_table_resolves_in_selection_order() {
    let dir = scratch_dir();
    let path = dir.join("icd10_eklaim.parquet");
    write_parquet(
        &path,
        vec![
            (
                "DISPLAY",
                Arc::new(StringArray::from(vec![
                    "Dengue fever",
                    "Diarrhoea",
                    "Pneumonia",
                ])) as ArrayRef,
            ),
            (
                "CODE",
                Arc::new(StringArray::from(vec!["A90", "A09", "J18.9"])) as ArrayRef,
            ),
        ],
    );

    let table = ReferenceTable::load(&path, "DISPLAY", "CODE").unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.labels()[0], "Dengue fever");

    let codes = table.resolve_all(&["Pneumonia", "Dengue fever"]).unwrap();
    assert_eq!(codes, ["J18.9", "A90"]);
}

#[test]
fn test_identity_list_skips_header_row() {
    let dir = scratch_dir();
    let path = dir.join("daftar_obat_unik.parquet");
    write_parquet(
        &path,
        vec![(
            "obat",
            Arc::new(StringArray::from(vec!["obat", "PACLITAXEL", "CISPLATIN"])) as ArrayRef,
        )],
    );

    let table = ReferenceTable::load_identity(&path, "obat").unwrap();
    assert_eq!(table.labels(), ["PACLITAXEL", "CISPLATIN"]);
    assert_eq!(table.resolve("PACLITAXEL"), Some("PACLITAXEL"));
}

#[test]
fn test_missing_table_falls_back_to_empty() {
    let dir = scratch_dir();
    let table = ReferenceTable::load_or_empty(&dir.join("absent.parquet"), "DISPLAY", "CODE");
    assert!(table.is_empty());
}
