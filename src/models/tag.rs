//! Tag configuration models.

use serde::{Deserialize, Serialize};

/// Numeric bounds for a ranged key. Either side may be open; a value equal
/// to a bound is in range.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RangeRule {
    /// Lower bound; values strictly below it are out of range.
    #[serde(default)]
    pub min: Option<f64>,

    /// Upper bound; values strictly above it are out of range.
    #[serde(default)]
    pub max: Option<f64>,
}

/// One monitored controller tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TagConfig {
    /// Controller tag name, e.g. `Motor_Status_UDT`.
    pub name: String,

    /// Whether repeated read failures of this tag escalate to an alert.
    #[serde(default)]
    pub critical: bool,
}
