//! Claim analytics core for hospital insurance submissions
//!
//! Loads adjudicated claim datasets (package-based, non-package and
//! medicine claims) from parquet, derives the fixed feature records the
//! trained approval classifiers expect, scores new submissions and feeds
//! the filtered aggregate tables the dashboard pages render.
//!
//! A [`session::Session`] owns all loaded state and is read-only after
//! construction; report views borrow rows from it and never mutate shared
//! state.

pub mod config;
pub mod error;
pub mod features;
pub mod models;
pub mod reader;
pub mod reference;
pub mod report;
pub mod scoring;
pub mod session;

pub use config::{DateFormatConfig, SessionConfig};
pub use error::{Error, Result};
pub use features::{FeatureRecord, FeatureValue, RawClaimInput, RawValue, derive_features};
pub use models::{
    ClaimCategory, ClaimRecord, ClaimStatus, MedicineClaim, NonPackageClaim, PackageClaim,
};
pub use reference::ReferenceTable;
pub use scoring::{APPROVAL_THRESHOLD, ClaimScorer, Classifier, LinearClassifier, ScoreResult};
pub use session::Session;
