//! Serialized classifier artifacts
//!
//! A trained model ships as a JSON artifact carrying the one-hot column
//! list it was fit on, one coefficient per column and an intercept. Loading
//! validates the artifact once so scoring never has to.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

use super::Classifier;

/// Logistic-regression classifier over a fixed one-hot column space
#[derive(Debug, Clone, Deserialize)]
pub struct LinearClassifier {
    columns: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearClassifier {
    /// Load and validate an artifact from a JSON file
    ///
    /// # Errors
    /// Returns `ScoringUnavailable` if the file cannot be read, is not a
    /// valid artifact, or its coefficient count disagrees with its column
    /// list.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::scoring_unavailable(format!("cannot open model {}: {e}", path.display()))
        })?;
        let model: Self = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            Error::scoring_unavailable(format!("malformed model {}: {e}", path.display()))
        })?;
        model.validate(path)?;
        log::info!(
            "Loaded classifier from {} ({} columns)",
            path.display(),
            model.columns.len()
        );
        Ok(model)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::scoring_unavailable(format!(
                "model {} has no columns",
                path.display()
            )));
        }
        if self.columns.len() != self.coefficients.len() {
            return Err(Error::scoring_unavailable(format!(
                "model {} has {} columns but {} coefficients",
                path.display(),
                self.columns.len(),
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(Error::scoring_unavailable(format!(
                "model {} contains non-finite weights",
                path.display()
            )));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn from_parts(columns: Vec<String>, coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            columns,
            coefficients,
            intercept,
        }
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LinearClassifier {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn predict_probability(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(Error::prediction(format!(
                "row has {} values, model expects {}",
                row.len(),
                self.coefficients.len()
            )));
        }

        let z = self.intercept
            + row
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>();

        let probability = sigmoid(z);
        if !probability.is_finite() {
            return Err(Error::prediction(format!(
                "probability is not finite (logit {z})"
            )));
        }
        Ok(probability)
    }
}
