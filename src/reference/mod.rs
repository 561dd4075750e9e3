//! Reference data loading
//!
//! Lookup tables mapping human-readable display labels to domain codes
//! (ICD-10 diagnoses, ICD-9-CM procedures, discharge statuses, medicine
//! names). Loaded once per session and read-only afterwards.

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::reader::{code_at, read_batches, string_at};

/// A label → code mapping for one lookup domain
///
/// Labels are unique; when a source table repeats a label the last
/// occurrence wins. `labels()` preserves first-appearance order so forms can
/// present entries the way the source file lists them.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    labels: Vec<String>,
    codes: FxHashMap<String, String>,
}

impl ReferenceTable {
    /// Build a table from (label, code) pairs, last-seen-wins on duplicates
    pub fn from_pairs<I, L, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, C)>,
        L: Into<String>,
        C: Into<String>,
    {
        let mut table = Self::default();
        for (label, code) in pairs {
            let label = label.into();
            if !table.codes.contains_key(&label) {
                table.labels.push(label.clone());
            }
            table.codes.insert(label, code.into());
        }
        table
    }

    /// Load a table from a two-column parquet file
    ///
    /// # Errors
    /// Returns `DataUnavailable` if the file cannot be read or a named
    /// column is absent from every row.
    pub fn load(path: &Path, label_column: &str, code_column: &str) -> Result<Self> {
        let batches = read_batches(path)?;
        let mut pairs = Vec::new();

        for batch in &batches {
            for row in 0..batch.num_rows() {
                let label = string_at(batch, label_column, row);
                let code = code_at(batch, code_column, row);
                if let (Some(label), Some(code)) = (label, code) {
                    pairs.push((label, code));
                }
            }
        }

        if pairs.is_empty() {
            return Err(Error::data_unavailable(
                path,
                format!("no usable rows with columns '{label_column}' and '{code_column}'"),
            ));
        }

        Ok(Self::from_pairs(pairs))
    }

    /// Load a single-column list where each label is its own code
    /// (the medicine name list has no separate code column)
    ///
    /// # Errors
    /// Returns `DataUnavailable` if the file cannot be read or the column
    /// is absent.
    pub fn load_identity(path: &Path, column: &str) -> Result<Self> {
        let batches = read_batches(path)?;
        let mut pairs = Vec::new();

        for batch in &batches {
            for row in 0..batch.num_rows() {
                if let Some(label) = string_at(batch, column, row) {
                    // Skip a stray header row, as the source files carry one
                    if label.eq_ignore_ascii_case(column) {
                        continue;
                    }
                    pairs.push((label.clone(), label));
                }
            }
        }

        if pairs.is_empty() {
            return Err(Error::data_unavailable(
                path,
                format!("no usable rows with column '{column}'"),
            ));
        }

        Ok(Self::from_pairs(pairs))
    }

    /// Load a table, falling back to an empty one on failure
    ///
    /// Code resolution for a field the user never selects must not block
    /// the rest of the form, so callers that can tolerate an empty list use
    /// this instead of `load`.
    #[must_use]
    pub fn load_or_empty(path: &Path, label_column: &str, code_column: &str) -> Self {
        match Self::load(path, label_column, code_column) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("Reference table unavailable, using empty list: {e}");
                Self::default()
            }
        }
    }

    /// Resolve a display label to its code
    #[must_use]
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.codes.get(label).map(String::as_str)
    }

    /// Resolve a multi-select choice to codes, preserving selection order
    ///
    /// # Errors
    /// Returns `InvalidInput` naming the first unknown label.
    pub fn resolve_all(&self, labels: &[&str]) -> Result<Vec<String>> {
        labels
            .iter()
            .map(|label| {
                self.resolve(label).map(String::from).ok_or_else(|| {
                    Error::invalid_input(*label, "label not present in reference table")
                })
            })
            .collect()
    }

    /// Display labels in first-appearance order
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of distinct labels
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
