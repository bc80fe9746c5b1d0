//! Numeric phase tags from raw property values.
//!
//! Real models carry phase numbers as reals, integers, labels and texts, in
//! places with a decimal comma. Anything that does not read as a finite
//! number is dropped without error.

use crate::model::{PropertyValue, RawValue};

/// Magnitude from which consecutive phases are no longer representable
/// (2^53); larger values are not read as phase numbers.
pub const MAX_PHASE: f64 = 9_007_199_254_740_992.0;

/// Reads one value as a phase tag. One level of defined-type wrapping is
/// looked through; strings are trimmed and a decimal comma is accepted.
#[must_use]
pub fn coerce(value: &RawValue) -> Option<f64> {
    let inner = match value {
        RawValue::Wrapped(inner) => inner.as_ref(),
        other => other,
    };

    let number = match inner {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok()?,
        RawValue::Wrapped(_) | RawValue::Other => return None,
    };

    if !number.is_finite() || number.abs() >= MAX_PHASE {
        return None;
    }
    // -0.0 and 0.0 are the same phase
    Some(if number == 0.0 { 0.0 } else { number })
}

/// All phase tags a property contributes: the nominal value of a single
/// value, the first entry of an enumeration, every readable list entry.
#[must_use]
pub fn phase_tags(value: &PropertyValue) -> Vec<f64> {
    match value {
        PropertyValue::Single(Some(raw)) => coerce(raw).into_iter().collect(),
        PropertyValue::Enumerated(values) => values.first().and_then(coerce).into_iter().collect(),
        PropertyValue::List(values) => values.iter().filter_map(coerce).collect(),
        PropertyValue::Single(None) | PropertyValue::Unsupported => Vec::new(),
    }
}
