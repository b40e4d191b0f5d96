//! Read sources for controller tag data.

use std::path::PathBuf;

use serde::Deserialize;

pub mod replay;
pub mod traits;

pub use replay::ReplayController;
pub use traits::{ControllerError, ControllerReader};

/// The controller section of the application configuration. An unrecognized
/// `source` fails configuration parsing at startup.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ControllerConfig {
    /// Replay recorded cycles from a JSON file.
    Replay {
        /// Path to the recorded readings file.
        path: PathBuf,
    },
}

/// Builds the configured read source.
pub fn build_reader(config: &ControllerConfig) -> Result<Box<dyn ControllerReader>, ControllerError> {
    match config {
        ControllerConfig::Replay { path } => Ok(Box::new(ReplayController::from_file(path)?)),
    }
}
