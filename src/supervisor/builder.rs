//! Builder for wiring the supervisor's collaborators together.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{Supervisor, SupervisorError};
use crate::{
    config::{AppConfig, TagSettings},
    engine::alert_manager::AlertEngine,
    notification::traits::Notifier,
    persistence::traits::RecordSink,
    providers::traits::ControllerReader,
};

/// The SupervisorBuilder is used to construct a Supervisor instance with all
/// necessary components.
#[derive(Default)]
pub struct SupervisorBuilder {
    config: Option<AppConfig>,
    tag_settings: Option<TagSettings>,
    reader: Option<Box<dyn ControllerReader>>,
    sink: Option<Box<dyn RecordSink>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl SupervisorBuilder {
    /// Creates a new SupervisorBuilder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application configuration.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the validated tag settings.
    pub fn tag_settings(mut self, tag_settings: TagSettings) -> Self {
        self.tag_settings = Some(tag_settings);
        self
    }

    /// Sets the controller read source.
    pub fn reader(mut self, reader: Box<dyn ControllerReader>) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Sets the record sink.
    pub fn sink(mut self, sink: Box<dyn RecordSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Sets the notification channel.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Builds the Supervisor, constructing the alert engine from the
    /// configuration and tag settings.
    pub fn build(self) -> Result<Supervisor, SupervisorError> {
        let config = self.config.ok_or(SupervisorError::MissingConfig)?;
        let tag_settings = self.tag_settings.ok_or(SupervisorError::MissingTagSettings)?;
        let reader = self.reader.ok_or(SupervisorError::MissingReader)?;
        let sink = self.sink.ok_or(SupervisorError::MissingSink)?;
        let notifier = self.notifier.ok_or(SupervisorError::MissingNotifier)?;

        let quiet_period = chrono::Duration::from_std(config.alert_throttle_secs)
            .map_err(|_| SupervisorError::QuietPeriodOutOfRange)?;

        let engine = AlertEngine::new(
            notifier,
            tag_settings.critical_tags(),
            tag_settings.rules.clone(),
            config.max_retries,
            quiet_period,
            config.recipients.clone(),
        );

        Ok(Supervisor {
            tag_names: tag_settings.tag_names(),
            config,
            reader,
            sink,
            engine,
            cancellation_token: CancellationToken::new(),
        })
    }
}
