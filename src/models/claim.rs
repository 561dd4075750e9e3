//! Typed claim rows, one struct per claim category
//!
//! Rows are immutable once loaded and owned by the session for the lifetime
//! of a report view. Year and month are derived from the category's date
//! column at load time so the filter engine never re-parses dates.

use chrono::{Datelike, NaiveDate};

use super::ClaimStatus;

/// Common view over a claim row used by the aggregation/filter engine
pub trait ClaimRecord {
    /// Unique claim identifier (SEP number)
    fn id(&self) -> &str;

    /// Adjudication status, `None` until adjudicated
    fn status(&self) -> Option<ClaimStatus>;

    /// Calendar year of the claim date
    fn year(&self) -> i32;

    /// Calendar month of the claim date (1..=12)
    fn month(&self) -> u32;

    /// Names of the monetary fields this category carries
    fn monetary_fields() -> &'static [&'static str]
    where
        Self: Sized;

    /// Value of a monetary field by name
    fn amount(&self, field: &str) -> Option<f64>;
}

/// One row of the package-based (INA-CBGs) claim dataset
#[derive(Debug, Clone)]
pub struct PackageClaim {
    /// Claim identifier (SEP)
    pub sep: String,
    /// Adjudication status, `None` until adjudicated
    pub status: Option<ClaimStatus>,
    /// Admission date
    pub admission_date: NaiveDate,
    /// Patient sex, as recorded
    pub sex: Option<String>,
    /// Patient age in years
    pub age_years: Option<f64>,
    /// Hospitalization ward class (1, 2 or 3)
    pub ward_class: Option<i64>,
    /// `;`-separated ICD-10 diagnosis codes
    pub diagnosis_codes: Option<String>,
    /// `;`-separated ICD-9-CM procedure codes
    pub procedure_codes: Option<String>,
    /// Description of the assigned payment package
    pub package_description: Option<String>,
    /// Length of stay in days
    pub length_of_stay: Option<f64>,
    /// Hospital tariff (TARIF_RS)
    pub hospital_tariff: f64,
    /// Package tariff billed to the payer (TOTAL_TARIF)
    pub total_tariff: f64,
}

impl ClaimRecord for PackageClaim {
    fn id(&self) -> &str {
        &self.sep
    }

    fn status(&self) -> Option<ClaimStatus> {
        self.status
    }

    fn year(&self) -> i32 {
        self.admission_date.year()
    }

    fn month(&self) -> u32 {
        self.admission_date.month()
    }

    fn monetary_fields() -> &'static [&'static str] {
        &["TARIF_RS", "TOTAL_TARIF"]
    }

    fn amount(&self, field: &str) -> Option<f64> {
        match field {
            "TARIF_RS" => Some(self.hospital_tariff),
            "TOTAL_TARIF" => Some(self.total_tariff),
            _ => None,
        }
    }
}

impl PackageClaim {
    /// Hospital tariff minus the package tariff; positive values mean the
    /// hospital billed above the package rate.
    #[must_use]
    pub fn tariff_difference(&self) -> f64 {
        self.hospital_tariff - self.total_tariff
    }
}

/// One row of the non-package (Non-CBGs) claim dataset
#[derive(Debug, Clone)]
pub struct NonPackageClaim {
    /// Claim identifier (nosep)
    pub sep: String,
    /// Adjudication status, `None` until adjudicated
    pub status: Option<ClaimStatus>,
    /// Admission date (tglmasuk)
    pub admission_date: NaiveDate,
    /// Service type, e.g. RAWAT INAP / RAWAT JALAN
    pub service_type: Option<String>,
    /// Claim type, e.g. KANTONG DARAH
    pub claim_type: Option<String>,
    /// Primary diagnosis
    pub diagnosis: Option<String>,
    /// Hospital tariff (tarifrs)
    pub hospital_tariff: f64,
    /// Amount billed to the payer (tagihan)
    pub billed_amount: f64,
}

impl ClaimRecord for NonPackageClaim {
    fn id(&self) -> &str {
        &self.sep
    }

    fn status(&self) -> Option<ClaimStatus> {
        self.status
    }

    fn year(&self) -> i32 {
        self.admission_date.year()
    }

    fn month(&self) -> u32 {
        self.admission_date.month()
    }

    fn monetary_fields() -> &'static [&'static str] {
        &["tarifrs", "tagihan"]
    }

    fn amount(&self, field: &str) -> Option<f64> {
        match field {
            "tarifrs" => Some(self.hospital_tariff),
            "tagihan" => Some(self.billed_amount),
            _ => None,
        }
    }
}

/// One row of the medicine (Obat) claim dataset
#[derive(Debug, Clone)]
pub struct MedicineClaim {
    /// Claim identifier (SEP_KUNJUNGAN)
    pub sep: String,
    /// Adjudication status, `None` until adjudicated
    pub status: Option<ClaimStatus>,
    /// Prescription date (TGL_RESEP)
    pub prescription_date: NaiveDate,
    /// Prescription type, e.g. Obat Kemoterapi
    pub prescription_type: Option<String>,
    /// Medicine name
    pub medicine: Option<String>,
    /// Prescribed quantity (jmlobat)
    pub quantity: f64,
    /// Amount billed to the payer (BIAYA_TAGIHAN)
    pub billed_amount: f64,
    /// Quantity approved by the payer (jmlobatsetuju)
    pub approved_quantity: f64,
    /// Amount approved by the payer (biayasetuju)
    pub approved_amount: f64,
}

impl ClaimRecord for MedicineClaim {
    fn id(&self) -> &str {
        &self.sep
    }

    fn status(&self) -> Option<ClaimStatus> {
        self.status
    }

    fn year(&self) -> i32 {
        self.prescription_date.year()
    }

    fn month(&self) -> u32 {
        self.prescription_date.month()
    }

    fn monetary_fields() -> &'static [&'static str] {
        &["BIAYA_TAGIHAN", "biayasetuju"]
    }

    fn amount(&self, field: &str) -> Option<f64> {
        match field {
            "BIAYA_TAGIHAN" => Some(self.billed_amount),
            "biayasetuju" => Some(self.approved_amount),
            _ => None,
        }
    }
}
