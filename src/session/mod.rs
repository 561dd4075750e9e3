//! Read-only session context
//!
//! One `Session` is built at startup from a [`SessionConfig`] and owns every
//! loaded asset for its lifetime: the three claim datasets, the reference
//! tables and the per-category scorers. Loading degrades per asset rather
//! than failing as a whole, so a missing medicine dataset disables only the
//! medicine page and a missing model artifact disables only prediction for
//! its category. Accessors report the degraded state with the original load
//! failure's context.

use std::path::Path;

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::features::{RawClaimInput, derive_features};
use crate::features::schema::schema_for;
use crate::models::{ClaimCategory, MedicineClaim, NonPackageClaim, PackageClaim};
use crate::reader::dataset::{load_medicine_claims, load_non_package_claims, load_package_claims};
use crate::reference::ReferenceTable;
use crate::scoring::{ClaimScorer, LinearClassifier, ScoreResult};

/// All loaded state for one analytics session
pub struct Session {
    config: SessionConfig,

    package_claims: Option<Vec<PackageClaim>>,
    non_package_claims: Option<Vec<NonPackageClaim>>,
    medicine_claims: Option<Vec<MedicineClaim>>,

    /// ICD-10 diagnosis label → code table
    pub diagnoses: ReferenceTable,
    /// ICD-9-CM procedure label → code table
    pub procedures: ReferenceTable,
    /// Discharge status label → code table
    pub discharge_statuses: ReferenceTable,
    /// Medicine name list
    pub medicines: ReferenceTable,

    package_scorer: Option<ClaimScorer>,
    non_package_scorer: Option<ClaimScorer>,
    medicine_scorer: Option<ClaimScorer>,
}

fn load_dataset<T>(
    what: &str,
    result: Result<Vec<T>>,
) -> Option<Vec<T>> {
    match result {
        Ok(rows) => Some(rows),
        Err(e) => {
            log::warn!("{what} dataset unavailable, page disabled: {e}");
            None
        }
    }
}

fn load_scorer(what: &str, path: &Path) -> Option<ClaimScorer> {
    match LinearClassifier::from_json_file(path) {
        Ok(model) => Some(ClaimScorer::new(Box::new(model))),
        Err(e) => {
            log::warn!("{what} model unavailable, prediction disabled: {e}");
            None
        }
    }
}

fn load_identity_or_empty(path: &Path, column: &str) -> ReferenceTable {
    match ReferenceTable::load_identity(path, column) {
        Ok(table) => table,
        Err(e) => {
            log::warn!("Reference list unavailable, using empty list: {e}");
            ReferenceTable::default()
        }
    }
}

impl Session {
    /// Load every session asset, degrading per asset on failure
    #[must_use]
    pub fn load(config: SessionConfig) -> Self {
        let formats = &config.date_formats;

        let package_claims = load_dataset(
            "Package claim",
            load_package_claims(&config.package_dataset, formats),
        );
        let non_package_claims = load_dataset(
            "Non-package claim",
            load_non_package_claims(&config.non_package_dataset, formats),
        );
        let medicine_claims = load_dataset(
            "Medicine claim",
            load_medicine_claims(&config.medicine_dataset, formats),
        );

        let diagnoses = ReferenceTable::load_or_empty(&config.diagnosis_table, "DISPLAY", "CODE");
        let procedures = ReferenceTable::load_or_empty(&config.procedure_table, "DISPLAY", "CODE");
        let discharge_statuses =
            ReferenceTable::load_or_empty(&config.discharge_table, "DISPLAY", "CODE");
        let medicines = load_identity_or_empty(&config.medicine_table, "obat");

        let package_scorer = load_scorer("Package claim", &config.package_model);
        let non_package_scorer = load_scorer("Non-package claim", &config.non_package_model);
        let medicine_scorer = load_scorer("Medicine claim", &config.medicine_model);

        Self {
            config,
            package_claims,
            non_package_claims,
            medicine_claims,
            diagnoses,
            procedures,
            discharge_statuses,
            medicines,
            package_scorer,
            non_package_scorer,
            medicine_scorer,
        }
    }

    /// Package claim rows
    ///
    /// # Errors
    /// Returns `DataUnavailable` when the dataset failed to load.
    pub fn package_claims(&self) -> Result<&[PackageClaim]> {
        self.package_claims.as_deref().ok_or_else(|| {
            Error::data_unavailable(&self.config.package_dataset, "dataset failed to load")
        })
    }

    /// Non-package claim rows
    ///
    /// # Errors
    /// Returns `DataUnavailable` when the dataset failed to load.
    pub fn non_package_claims(&self) -> Result<&[NonPackageClaim]> {
        self.non_package_claims.as_deref().ok_or_else(|| {
            Error::data_unavailable(&self.config.non_package_dataset, "dataset failed to load")
        })
    }

    /// Medicine claim rows
    ///
    /// # Errors
    /// Returns `DataUnavailable` when the dataset failed to load.
    pub fn medicine_claims(&self) -> Result<&[MedicineClaim]> {
        self.medicine_claims.as_deref().ok_or_else(|| {
            Error::data_unavailable(&self.config.medicine_dataset, "dataset failed to load")
        })
    }

    /// Scorer for one claim category
    ///
    /// # Errors
    /// Returns `ScoringUnavailable` when the category's model artifact
    /// failed to load.
    pub fn scorer(&self, category: ClaimCategory) -> Result<&ClaimScorer> {
        let scorer = match category {
            ClaimCategory::Package => &self.package_scorer,
            ClaimCategory::NonPackage => &self.non_package_scorer,
            ClaimCategory::Medicine => &self.medicine_scorer,
        };
        scorer.as_ref().ok_or_else(|| {
            Error::scoring_unavailable(format!(
                "no model loaded for {} claims",
                category.display_name()
            ))
        })
    }

    /// Derive features from raw form input and score them
    ///
    /// # Errors
    /// `InvalidInput` when a raw value violates the category schema,
    /// `ScoringUnavailable` when the category has no loaded model, and
    /// `PredictionError` when the classifier rejects the derived record.
    pub fn predict(&self, category: ClaimCategory, input: &RawClaimInput) -> Result<ScoreResult> {
        let scorer = self.scorer(category)?;
        let record = derive_features(schema_for(category), input)?;
        scorer.score(&record)
    }
}
