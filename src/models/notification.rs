//! Data models for notifications.

use std::path::PathBuf;

/// A fully rendered notification, ready for whichever channel is configured.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertMessage {
    /// The subject line.
    pub subject: String,

    /// The plain-text body.
    pub body: String,

    /// Recipient addresses.
    pub recipients: Vec<String>,

    /// Paths of files to attach. Channels skip paths that no longer exist.
    pub attachments: Vec<PathBuf>,
}
