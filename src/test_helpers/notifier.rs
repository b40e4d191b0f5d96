use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use crate::{
    models::notification::AlertMessage,
    notification::{error::DispatchError, traits::Notifier},
};

/// A notifier that records every message instead of delivering it. Can be
/// switched into a failing mode to exercise dispatch-failure paths.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<AlertMessage>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    /// Creates a notifier that accepts every message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message accepted so far, in send order.
    pub fn sent(&self) -> Vec<AlertMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// When `failing` is true, `send` returns an error and records nothing.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &AlertMessage) -> Result<(), DispatchError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DispatchError::Build("recording notifier set to fail".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
