//! The notification channel capability.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{models::notification::AlertMessage, notification::error::DispatchError};

/// A notification channel capable of delivering one alert message.
///
/// Exactly one implementation is active per deployment, chosen from
/// configuration at startup. The engine only ever sees this trait.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `message`. A failure is reported to the caller as a value;
    /// it never aborts the poll cycle.
    async fn send(&self, message: &AlertMessage) -> Result<(), DispatchError>;
}
