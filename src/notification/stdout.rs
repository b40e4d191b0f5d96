//! Stdout notification channel for dry runs.

use crate::{
    models::notification::AlertMessage,
    notification::{error::DispatchError, traits::Notifier},
};

/// Prints alert messages to standard output instead of delivering them.
///
/// Used by the `dry-run` subcommand. Not selectable from deployment
/// configuration.
pub struct StdoutNotifier;

#[async_trait::async_trait]
impl Notifier for StdoutNotifier {
    async fn send(&self, message: &AlertMessage) -> Result<(), DispatchError> {
        println!("=== {} ===\n{}\n", message.subject, message.body);
        Ok(())
    }
}
