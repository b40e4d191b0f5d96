use crate::models::value::{Scalar, TagValue};

/// A scalar float tag value.
pub fn scalar(value: f64) -> TagValue {
    TagValue::Scalar(Scalar::Float(value))
}

/// A composite tag value from named fields.
pub fn composite(fields: &[(&str, TagValue)]) -> TagValue {
    TagValue::Composite(fields.iter().map(|(name, value)| (name.to_string(), value.clone())).collect())
}
