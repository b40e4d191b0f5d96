//! # Notification channels
//!
//! This module delivers triggered alerts through the channel configured for
//! the deployment.
//!
//! ## Core Components
//!
//! - **`Notifier` Trait**: the capability the engine dispatches against; one
//!   `send` operation.
//! - **`ChannelConfig`**: the `channel` section of the application
//!   configuration, naming exactly one backend.
//! - **`build_notifier`**: constructs the concrete backend once at startup.
//!
//! An unrecognized channel type fails configuration parsing, so a deployment
//! can never start with an unresolvable channel. Dispatch failures at run
//! time are values handed back to the engine.

use std::sync::Arc;

use serde::Deserialize;

pub mod error;
pub mod traits;

mod desktop;
mod smtp;
mod stdout;

pub use desktop::{DesktopClientConfig, DesktopClientNotifier};
pub use smtp::{SmtpConfig, SmtpNotifier};
pub use stdout::StdoutNotifier;

use traits::Notifier;

/// The channel section of the application configuration. Exactly one variant
/// is active per deployment.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChannelConfig {
    /// Direct SMTP submission.
    Smtp(SmtpConfig),

    /// Desktop mail-client automation.
    Desktop(DesktopClientConfig),
}

/// Builds the configured notification channel.
pub fn build_notifier(config: &ChannelConfig) -> Arc<dyn Notifier> {
    match config {
        ChannelConfig::Smtp(smtp) => Arc::new(SmtpNotifier::new(smtp.clone())),
        ChannelConfig::Desktop(desktop) => Arc::new(DesktopClientNotifier::new(desktop.clone())),
    }
}
