//! The generic feature deriver
//!
//! Validates raw form values against a category schema and computes the
//! derived fields, producing a [`FeatureRecord`] with every field the
//! trained classifier expects, in model column order. Pure: no IO, no
//! shared state, and it fails fast with `InvalidInput` before anything
//! reaches a scorer.

use chrono::{Datelike, NaiveDate};
use rustc_hash::FxHashMap;

use super::schema::{CategorySchema, DerivedRule, FieldKind, FieldSpec};
use super::{FeatureRecord, FeatureValue, count_codes, join_codes};
use crate::error::{Error, Result};

/// A raw, user-entered field value before validation
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Integer input
    Int(i64),
    /// Float input
    Float(f64),
    /// Text input (selectbox values, resolved single codes, names)
    Text(String),
    /// Multi-select input, already label-resolved to codes, in selection order
    Codes(Vec<String>),
    /// Calendar date input
    Date(NaiveDate),
}

/// Raw form input for one prediction request
#[derive(Debug, Clone, Default)]
pub struct RawClaimInput {
    values: FxHashMap<String, RawValue>,
}

impl RawClaimInput {
    /// Create an empty input
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous one
    pub fn set(&mut self, name: impl Into<String>, value: RawValue) {
        self.values.insert(name.into(), value);
    }

    /// Builder-style variant of [`set`](Self::set)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: RawValue) -> Self {
        self.set(name, value);
        self
    }

    fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }
}

/// Derive the feature record for one claim category
///
/// # Errors
/// Returns `InvalidInput` naming the offending field if a required field is
/// missing, a numeric field is non-numeric or negative where the domain
/// forbids it, or a selectbox value is outside its declared set.
pub fn derive_features(schema: &CategorySchema, input: &RawClaimInput) -> Result<FeatureRecord> {
    let mut record = FeatureRecord::new();
    let mut dates: FxHashMap<&'static str, NaiveDate> = FxHashMap::default();

    for spec in schema.fields {
        let value = validate_field(spec, input.get(spec.name))?;
        if let FieldKind::Date = spec.kind {
            if let Validated::Date(date) = value {
                dates.insert(spec.name, date);
                if spec.emit {
                    record.push(spec.name, FeatureValue::Text(date.format("%Y-%m-%d").to_string()));
                }
                continue;
            }
        }
        if let Validated::Value(feature) = value {
            if spec.emit {
                record.push(spec.name, feature);
            }
        }
    }

    for derived in schema.derived {
        let value = evaluate_rule(derived.name, &derived.rule, &record, &dates)?;
        record.push(derived.name, value);
    }

    Ok(record)
}

enum Validated {
    Value(FeatureValue),
    Date(NaiveDate),
}

fn validate_field(spec: &FieldSpec, raw: Option<&RawValue>) -> Result<Validated> {
    let Some(raw) = raw else {
        if spec.required {
            return Err(Error::invalid_input(spec.name, "required field is missing"));
        }
        // Absent optional fields still produce a value so the record never
        // drops a schema column: empty string for lists/text, zero for numbers.
        return Ok(Validated::Value(default_for(&spec.kind)));
    };

    let value = match (&spec.kind, raw) {
        (FieldKind::NonNegativeInt, RawValue::Int(v)) if *v >= 0 => FeatureValue::Int(*v),
        (FieldKind::NonNegativeInt, RawValue::Int(_)) => {
            return Err(Error::invalid_input(spec.name, "must not be negative"));
        }
        (FieldKind::NonNegativeInt, RawValue::Float(v)) if *v >= 0.0 && v.fract() == 0.0 => {
            #[allow(clippy::cast_possible_truncation)]
            FeatureValue::Int(*v as i64)
        }

        (FieldKind::NonNegativeFloat, RawValue::Float(v)) if *v >= 0.0 => FeatureValue::Float(*v),
        (FieldKind::NonNegativeFloat, RawValue::Int(v)) if *v >= 0 => {
            #[allow(clippy::cast_precision_loss)]
            FeatureValue::Float(*v as f64)
        }
        (FieldKind::NonNegativeFloat, RawValue::Float(_) | RawValue::Int(_)) => {
            return Err(Error::invalid_input(spec.name, "must not be negative"));
        }

        (FieldKind::Float, RawValue::Float(v)) => FeatureValue::Float(*v),
        (FieldKind::Float, RawValue::Int(v)) => {
            #[allow(clippy::cast_precision_loss)]
            FeatureValue::Float(*v as f64)
        }

        (FieldKind::CategoricalInt(allowed), RawValue::Int(v)) => {
            if allowed.contains(v) {
                FeatureValue::Int(*v)
            } else {
                return Err(Error::invalid_input(
                    spec.name,
                    format!("value {v} is outside the allowed set {allowed:?}"),
                ));
            }
        }

        (FieldKind::Categorical(allowed), RawValue::Text(v)) => {
            if allowed.contains(&v.as_str()) {
                FeatureValue::Text(v.clone())
            } else {
                return Err(Error::invalid_input(
                    spec.name,
                    format!("value '{v}' is outside the allowed set"),
                ));
            }
        }

        (FieldKind::CodeList, RawValue::Codes(codes)) => FeatureValue::Text(join_codes(codes)),
        // A pre-joined string is accepted as-is
        (FieldKind::CodeList, RawValue::Text(joined)) => FeatureValue::Text(joined.clone()),

        (FieldKind::Date, RawValue::Date(date)) => return Ok(Validated::Date(*date)),
        (FieldKind::Date, _) => {
            return Err(Error::invalid_input(spec.name, "expected a calendar date"));
        }

        (FieldKind::Text, RawValue::Text(v)) => FeatureValue::Text(v.clone()),

        (FieldKind::NonNegativeInt | FieldKind::NonNegativeFloat | FieldKind::Float, _) => {
            return Err(Error::invalid_input(spec.name, "expected a numeric value"));
        }
        (FieldKind::CategoricalInt(_), _) => {
            return Err(Error::invalid_input(spec.name, "expected an integer choice"));
        }
        (FieldKind::Categorical(_) | FieldKind::Text, _) => {
            return Err(Error::invalid_input(spec.name, "expected a text value"));
        }
        (FieldKind::CodeList, _) => {
            return Err(Error::invalid_input(spec.name, "expected a code list"));
        }
    };

    Ok(Validated::Value(value))
}

fn default_for(kind: &FieldKind) -> FeatureValue {
    match kind {
        FieldKind::NonNegativeInt | FieldKind::CategoricalInt(_) => FeatureValue::Int(0),
        FieldKind::NonNegativeFloat | FieldKind::Float => FeatureValue::Float(0.0),
        FieldKind::CodeList | FieldKind::Categorical(_) | FieldKind::Text | FieldKind::Date => {
            FeatureValue::Text(String::new())
        }
    }
}

fn numeric_source(name: &str, field: &str, record: &FeatureRecord) -> Result<f64> {
    record
        .get(field)
        .and_then(FeatureValue::as_number)
        .ok_or_else(|| {
            Error::invalid_input(name, format!("source field '{field}' is not numeric"))
        })
}

fn date_source(
    name: &str,
    field: &str,
    dates: &FxHashMap<&'static str, NaiveDate>,
) -> Result<NaiveDate> {
    dates.get(field).copied().ok_or_else(|| {
        Error::invalid_input(name, format!("source field '{field}' is not a date"))
    })
}

fn evaluate_rule(
    name: &str,
    rule: &DerivedRule,
    record: &FeatureRecord,
    dates: &FxHashMap<&'static str, NaiveDate>,
) -> Result<FeatureValue> {
    let value = match rule {
        DerivedRule::Difference {
            minuend,
            subtrahend,
        } => {
            // Integer operands keep an integer difference for audit display
            match (record.get(minuend), record.get(subtrahend)) {
                (Some(FeatureValue::Int(a)), Some(FeatureValue::Int(b))) => FeatureValue::Int(a - b),
                _ => {
                    let a = numeric_source(name, minuend, record)?;
                    let b = numeric_source(name, subtrahend, record)?;
                    FeatureValue::Float(a - b)
                }
            }
        }
        DerivedRule::Count { source } => {
            let joined = record
                .get(source)
                .and_then(FeatureValue::as_text)
                .ok_or_else(|| {
                    Error::invalid_input(name, format!("source field '{source}' is not a code list"))
                })?;
            #[allow(clippy::cast_possible_wrap)]
            FeatureValue::Int(count_codes(joined) as i64)
        }
        DerivedRule::PositiveFlag { source } => {
            let v = numeric_source(name, source, record)?;
            FeatureValue::Int(i64::from(v > 0.0))
        }
        DerivedRule::Ratio {
            numerator,
            denominator,
        } => {
            let num = numeric_source(name, numerator, record)?;
            let den = numeric_source(name, denominator, record)?;
            // A zero denominator counts as 1, keeping the value the reports
            // have always displayed instead of failing the division.
            let den = if den == 0.0 { 1.0 } else { den };
            FeatureValue::Float(num / den)
        }
        DerivedRule::MonthOf { source } => {
            FeatureValue::Int(i64::from(date_source(name, source, dates)?.month()))
        }
        DerivedRule::DayOf { source } => {
            FeatureValue::Int(i64::from(date_source(name, source, dates)?.day()))
        }
        DerivedRule::YearOf { source } => {
            FeatureValue::Int(i64::from(date_source(name, source, dates)?.year()))
        }
        DerivedRule::WeekdayOf { source } => FeatureValue::Int(i64::from(
            date_source(name, source, dates)?
                .weekday()
                .num_days_from_monday(),
        )),
    };

    Ok(value)
}
