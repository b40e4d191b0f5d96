//! Error types for the persistence layer.

use thiserror::Error;

/// Errors that can occur while appending readings to the record log.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Filesystem failure creating or appending to a log file.
    #[error("Log file I/O error: {0}")]
    Io(#[from] std::io::Error),
}
