//! Desktop mail-client notification channel.
//!
//! Drives a local mail client through its command-line automation interface
//! instead of speaking SMTP directly. The default command follows the
//! `xdg-email` argument convention; deployments point `command` at whatever
//! client is installed on the operator station.

use std::{process::Stdio, time::Duration};

use serde::Deserialize;
use tokio::process::Command;

use crate::{
    models::notification::AlertMessage,
    notification::{error::DispatchError, traits::Notifier},
};

const DEFAULT_COMMAND: &str = "xdg-email";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_command() -> String {
    DEFAULT_COMMAND.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Desktop mail-client channel settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DesktopClientConfig {
    /// Mail client executable to invoke.
    #[serde(default = "default_command")]
    pub command: String,

    /// Seconds to wait for the client to accept the message.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Sends alert messages by invoking a desktop mail client.
pub struct DesktopClientNotifier {
    config: DesktopClientConfig,
}

impl DesktopClientNotifier {
    /// Creates a notifier for the given client settings.
    pub fn new(config: DesktopClientConfig) -> Self {
        Self { config }
    }

    fn build_args(&self, message: &AlertMessage) -> Vec<String> {
        let mut args = vec![
            "--subject".to_string(),
            message.subject.clone(),
            "--body".to_string(),
            message.body.clone(),
        ];
        for path in &message.attachments {
            args.push("--attach".to_string());
            args.push(path.display().to_string());
        }
        args.extend(message.recipients.iter().cloned());
        args
    }
}

#[async_trait::async_trait]
impl Notifier for DesktopClientNotifier {
    async fn send(&self, message: &AlertMessage) -> Result<(), DispatchError> {
        let mut cmd = Command::new(&self.config.command);
        cmd.args(self.build_args(message))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = cmd.spawn()?;
        let timeout = Duration::from_secs(self.config.timeout_secs);
        match tokio::time::timeout(timeout, child.wait()).await {
            Err(_) => Err(DispatchError::ClientTimeout(timeout)),
            Ok(Err(e)) => Err(e.into()),
            Ok(Ok(status)) if status.success() => {
                tracing::info!(
                    command = %self.config.command,
                    subject = %message.subject,
                    "Alert handed to desktop mail client"
                );
                Ok(())
            }
            Ok(Ok(status)) => Err(DispatchError::ClientFailed(status.code().unwrap_or(-1))),
        }
    }
}
