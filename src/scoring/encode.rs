//! One-hot expansion and schema reindexing
//!
//! Classifiers trained on a one-hot encoded feature space expect an exact,
//! ordered set of indicator columns. Expansion alone is not enough: the
//! current input only produces indicators for the values it happens to
//! contain, so the expanded row is reindexed against the trained column
//! list: absent indicators become 0, columns the model never saw are
//! dropped, and order always follows the stored list.

use rustc_hash::FxHashMap;

use crate::features::{FeatureRecord, FeatureValue};

/// Expand a feature record into named numeric columns
///
/// Numeric fields keep their name and value; text fields become a single
/// `name_value` indicator column set to 1, matching the naming the models
/// were trained with.
#[must_use]
pub fn one_hot(record: &FeatureRecord) -> FxHashMap<String, f64> {
    let mut columns = FxHashMap::default();
    for (name, value) in record.iter() {
        match value {
            FeatureValue::Text(text) => {
                columns.insert(format!("{name}_{text}"), 1.0);
            }
            other => {
                if let Some(v) = other.as_number() {
                    columns.insert(name.to_string(), v);
                }
            }
        }
    }
    columns
}

/// Reindex expanded columns to the trained schema's column list
///
/// The output row is ordered exactly as `trained_columns`; any column the
/// expansion did not produce is zero-filled, and produced columns absent
/// from the trained list are silently dropped.
#[must_use]
pub fn reindex(trained_columns: &[String], expanded: &FxHashMap<String, f64>) -> Vec<f64> {
    trained_columns
        .iter()
        .map(|column| expanded.get(column).copied().unwrap_or(0.0))
        .collect()
}
