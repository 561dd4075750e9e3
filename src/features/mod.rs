//! Claim feature derivation
//!
//! Turns raw, user-entered form values into the exact fixed-shape feature
//! record each trained classifier expects. One generic deriver is
//! parameterized by a declarative per-category schema instead of three
//! near-duplicate pipelines; the schemas live in [`schema`] and the deriver
//! in [`derive`].

pub mod derive;
pub mod schema;

use serde::ser::{Serialize, SerializeMap, Serializer};

pub use derive::{RawClaimInput, RawValue, derive_features};
pub use schema::{CategorySchema, DerivedRule, FieldKind, FieldSpec};

/// Delimiter used when joining multi-select code lists
pub const CODE_DELIMITER: char = ';';

/// A single feature value, numeric or categorical
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    /// Integer-valued feature
    Int(i64),
    /// Float-valued feature
    Float(f64),
    /// Categorical/text feature
    Text(String),
}

impl FeatureValue {
    /// Numeric view of the value, `None` for text
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Text view of the value, `None` for numbers
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Text(v) => serializer.serialize_str(v),
        }
    }
}

/// A flat, ordered field → value mapping with a category-specific schema
///
/// Field order is pinned by the schema that produced the record, so audit
/// output and one-hot expansion are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRecord {
    fields: Vec<(String, FeatureValue)>,
}

impl FeatureRecord {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field; the caller guarantees schema order
    pub fn push(&mut self, name: impl Into<String>, value: FeatureValue) {
        self.fields.push((name.into(), value));
    }

    /// Look up a field by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Iterate fields in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Field names in schema order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record holds no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Count the non-empty delimited segments of a joined code list
///
/// An empty joined string means no codes were selected and counts 0, even
/// though a naive split would produce one empty segment.
#[must_use]
pub fn count_codes(joined: &str) -> usize {
    joined
        .split(CODE_DELIMITER)
        .filter(|segment| !segment.is_empty())
        .count()
}

/// Join already-resolved codes with the list delimiter, preserving the
/// user's selection order. An empty selection yields the empty string.
#[must_use]
pub fn join_codes(codes: &[String]) -> String {
    codes.join(&CODE_DELIMITER.to_string())
}
