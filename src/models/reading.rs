//! One poll attempt's outcome for a single tag.

use crate::models::value::TagValue;

/// The result of reading one configured tag during a poll cycle.
///
/// A failure carries the controller's error description rather than a typed
/// error; read failures feed health tracking and logging, nothing branches
/// on their kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TagReading {
    /// The controller tag name.
    pub tag: String,

    /// The value read, or the description of the failure that prevented it.
    pub outcome: Result<TagValue, String>,
}

impl TagReading {
    /// A successful reading.
    pub fn ok(tag: impl Into<String>, value: TagValue) -> Self {
        Self { tag: tag.into(), outcome: Ok(value) }
    }

    /// A failed reading.
    pub fn failed(tag: impl Into<String>, error: impl Into<String>) -> Self {
        Self { tag: tag.into(), outcome: Err(error.into()) }
    }

    /// Whether the read succeeded.
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}
