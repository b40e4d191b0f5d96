//! This module defines the interface for reading tag values from the
//! monitored controller.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::models::reading::TagReading;

/// Custom error type for controller read operations.
///
/// Per-tag read failures are carried inside [`TagReading`]; an error here
/// means the whole poll attempt failed and the loop should back off before
/// trying again.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The controller could not be reached.
    #[error("Controller unreachable: {0}")]
    Unreachable(String),

    /// A replay source ran out of recorded cycles.
    #[error("Replay source exhausted after {0} cycles")]
    ReplayExhausted(usize),

    /// A recorded readings file could not be read or parsed.
    #[error("Failed to load replay file: {0}")]
    ReplayLoad(String),
}

/// A source of tag readings, one per configured tag per poll cycle.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ControllerReader: Send + Sync {
    /// Reads every tag in `tags` once, returning one reading per tag in the
    /// same order.
    async fn read_tags(&mut self, tags: &[String]) -> Result<Vec<TagReading>, ControllerError>;
}
