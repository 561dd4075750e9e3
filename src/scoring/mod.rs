//! Claim approval scoring
//!
//! Wraps a trained per-category classifier behind a small trait so the
//! session context can hold any model kind. A scorer takes the derived
//! feature record, expands it onto the model's trained column space and
//! returns an approval probability plus the binary decision at the fixed
//! threshold.

pub mod encode;
pub mod model;

pub use encode::{one_hot, reindex};
pub use model::LinearClassifier;

use crate::error::Result;
use crate::features::FeatureRecord;

/// Probability at or above which a claim is predicted approved
pub const APPROVAL_THRESHOLD: f64 = 0.8;

/// A trained classifier over a fixed one-hot column space
pub trait Classifier: Send + Sync {
    /// One-hot column names the model was trained on, in weight order
    fn columns(&self) -> &[String];

    /// Approval probability in [0, 1] for an already-reindexed row
    ///
    /// # Errors
    /// Returns `PredictionError` when the row does not match the trained
    /// column space or the computation produces a non-finite value.
    fn predict_probability(&self, row: &[f64]) -> Result<f64>;
}

/// Outcome of scoring one claim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    /// Approval probability in [0, 1]
    pub probability: f64,
    /// 1 if the probability reaches [`APPROVAL_THRESHOLD`], else 0
    pub label: u8,
}

impl ScoreResult {
    /// Whether the claim is predicted approved
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        self.label == 1
    }
}

/// Scores derived feature records against one category's classifier
pub struct ClaimScorer {
    model: Box<dyn Classifier>,
}

impl std::fmt::Debug for ClaimScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimScorer").finish_non_exhaustive()
    }
}

impl ClaimScorer {
    /// Wrap a loaded classifier
    #[must_use]
    pub fn new(model: Box<dyn Classifier>) -> Self {
        Self { model }
    }

    /// Score a derived feature record
    ///
    /// # Errors
    /// Returns `PredictionError` when the classifier rejects the input; the
    /// offending record is logged for audit before the error propagates.
    pub fn score(&self, record: &FeatureRecord) -> Result<ScoreResult> {
        let row = reindex(self.model.columns(), &one_hot(record));
        let probability = self.model.predict_probability(&row).inspect_err(|e| {
            let audit = serde_json::to_string(record)
                .unwrap_or_else(|_| "<unserializable record>".to_string());
            log::error!("Scoring failed ({e}) on record {audit}");
        })?;

        Ok(ScoreResult {
            probability,
            label: u8::from(probability >= APPROVAL_THRESHOLD),
        })
    }
}
