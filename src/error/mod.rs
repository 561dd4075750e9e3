//! Error handling for the claim analytics core.
//!
//! Failures fall into four kinds with different blast radii: a dataset or
//! reference table that cannot be read kills only the page that needs it, a
//! bad form value is reported back to the requester, and a missing model
//! artifact disables prediction while the dashboards keep working.

use std::path::{Path, PathBuf};

/// Specialized error type for claim loading, derivation and scoring
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required file or table could not be read. Fatal for the affected
    /// page only; unrelated pages must keep rendering.
    #[error("data unavailable ({path}): {message}")]
    DataUnavailable {
        /// Path of the file that failed to load
        path: PathBuf,
        /// What went wrong while reading it
        message: String,
    },

    /// A raw form value violated a derived-feature precondition.
    /// Recoverable; surfaced to the requester with the field at fault.
    #[error("invalid input for field '{field}': {message}")]
    InvalidInput {
        /// Name of the offending field
        field: String,
        /// Why the value was rejected
        message: String,
    },

    /// A model artifact is missing or corrupt. Fatal for the prediction
    /// page; dashboard pages remain usable.
    #[error("scoring unavailable: {message}")]
    ScoringUnavailable {
        /// Why the artifact could not be used
        message: String,
    },

    /// Scoring failed on well-formed input, e.g. a schema mismatch.
    /// Recoverable; logged with the offending feature record.
    #[error("prediction failed: {message}")]
    PredictionError {
        /// Why the scoring call failed
        message: String,
    },
}

impl Error {
    /// Build a `DataUnavailable` error with path context
    pub fn data_unavailable(path: &Path, message: impl Into<String>) -> Self {
        Self::DataUnavailable {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Build an `InvalidInput` error naming the offending field
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Build a `ScoringUnavailable` error
    pub fn scoring_unavailable(message: impl Into<String>) -> Self {
        Self::ScoringUnavailable {
            message: message.into(),
        }
    }

    /// Build a `PredictionError`
    pub fn prediction(message: impl Into<String>) -> Self {
        Self::PredictionError {
            message: message.into(),
        }
    }

    /// Whether the failure is recoverable within the current page view
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::PredictionError { .. }
        )
    }
}

/// Result type for claim analytics operations
pub type Result<T> = std::result::Result<T, Error>;
