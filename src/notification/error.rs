//! Error types for notification dispatch.

use thiserror::Error;

/// Failures a notification channel can report.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// SMTP transport failure (connection, authentication, submission).
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// A sender or recipient address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message could not be assembled.
    #[error("Message build error: {0}")]
    Build(String),

    /// Reading an attachment or launching the mail client failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The desktop mail client exited with a failure status.
    #[error("Mail client exited with status {0}")]
    ClientFailed(i32),

    /// The desktop mail client did not finish within the configured timeout.
    #[error("Mail client timed out after {0:?}")]
    ClientTimeout(std::time::Duration),
}
