//! Replay read source.
//!
//! Feeds previously recorded poll cycles from a JSON file: an array of
//! cycles, each an object mapping tag names to either a value or an
//! `{"error": "..."}` marker. Tags missing from a cycle read as failures.
//! Used by the `dry-run` subcommand and by deployments that replay captured
//! controller data; live transports implement
//! [`ControllerReader`](super::traits::ControllerReader) out of tree.

use std::{collections::BTreeMap, path::Path};

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    models::{reading::TagReading, value::TagValue},
    providers::traits::{ControllerError, ControllerReader},
};

/// A recorded read failure. Kept to exactly one `error` field so composites
/// that merely contain a field named `error` still parse as values.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct FailureMarker {
    error: String,
}

/// One recorded entry for a tag within a cycle.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ReplayEntry {
    /// A recorded read failure.
    Failure(FailureMarker),
    /// A recorded value.
    Value(TagValue),
}

/// A recorded sequence of poll cycles, replayed in order.
pub struct ReplayController {
    cycles: Vec<BTreeMap<String, ReplayEntry>>,
    cursor: usize,
}

impl ReplayController {
    /// Loads recorded cycles from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ControllerError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ControllerError::ReplayLoad(format!("{}: {}", path.display(), e)))?;
        let cycles = serde_json::from_str(&raw)
            .map_err(|e| ControllerError::ReplayLoad(format!("{}: {}", path.display(), e)))?;
        Ok(Self { cycles, cursor: 0 })
    }

    /// The number of recorded cycles.
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    /// Whether the source holds no cycles at all.
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

#[async_trait]
impl ControllerReader for ReplayController {
    async fn read_tags(&mut self, tags: &[String]) -> Result<Vec<TagReading>, ControllerError> {
        let Some(cycle) = self.cycles.get(self.cursor) else {
            return Err(ControllerError::ReplayExhausted(self.cycles.len()));
        };
        self.cursor += 1;

        Ok(tags
            .iter()
            .map(|tag| match cycle.get(tag) {
                Some(ReplayEntry::Value(value)) => TagReading::ok(tag, value.clone()),
                Some(ReplayEntry::Failure(marker)) => TagReading::failed(tag, marker.error.clone()),
                None => TagReading::failed(tag, "tag not present in recorded cycle"),
            })
            .collect())
    }
}
