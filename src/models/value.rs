//! Scalar and composite tag values.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// A single scalar sample read from the controller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    /// A boolean point, e.g. a run or fault bit.
    Bool(bool),
    /// An integer point.
    Int(i64),
    /// A floating-point point.
    Float(f64),
    /// A string point.
    Text(String),
}

impl Scalar {
    /// Coerces the scalar to a float for range evaluation.
    ///
    /// Booleans coerce to 0/1. Text is trimmed and parsed; empty or
    /// non-numeric text yields `None`, as do non-finite floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) if f.is_finite() => Some(*f),
            Scalar::Float(_) => None,
            Scalar::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// A tag's value: either a scalar or a composite (UDT) of named sub-values,
/// nested to arbitrary depth.
///
/// Composite fields are kept ordered so the flattened key set and the log
/// column order are deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TagValue {
    /// A plain scalar value.
    Scalar(Scalar),
    /// A composite value mapping field names to nested values.
    Composite(BTreeMap<String, TagValue>),
}
