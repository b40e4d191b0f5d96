//! The Supervisor module manages the lifecycle of the tagwatch application.
//!
//! It owns the poll loop and every collaborator the loop drives:
//!
//! - **Initialization**: the `SupervisorBuilder` wires the controller reader,
//!   record sink, notifier and alert engine together from the loaded
//!   configuration.
//! - **Poll cycles**: on a fixed interval, read every configured tag, append
//!   the flattened readings to the record sink, and hand the cycle to the
//!   alert engine. Cycles run strictly one at a time; a slow notification
//!   send delays the next cycle rather than overlapping it.
//! - **Backoff**: a transport-level controller error pauses polling for the
//!   configured reconnect delay before the next attempt.
//! - **Graceful Shutdown**: a ctrl-c signal cancels the loop between cycles.

mod builder;

use std::collections::BTreeMap;

use chrono::Utc;
use thiserror::Error;
use tokio::signal;
use tokio_util::sync::CancellationToken;

pub use builder::SupervisorBuilder;

use crate::{
    config::AppConfig,
    engine::{alert_manager::AlertEngine, flatten::flatten},
    persistence::traits::RecordSink,
    providers::traits::{ControllerError, ControllerReader},
};

/// Represents the set of errors that can occur during the supervisor's
/// construction and operation.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// A required configuration was not provided to the `SupervisorBuilder`.
    #[error("Missing configuration for Supervisor")]
    MissingConfig,

    /// Tag settings were not provided to the `SupervisorBuilder`.
    #[error("Missing tag settings for Supervisor")]
    MissingTagSettings,

    /// A controller reader was not provided to the `SupervisorBuilder`.
    #[error("Missing controller reader for Supervisor")]
    MissingReader,

    /// A record sink was not provided to the `SupervisorBuilder`.
    #[error("Missing record sink for Supervisor")]
    MissingSink,

    /// A notifier was not provided to the `SupervisorBuilder`.
    #[error("Missing notifier for Supervisor")]
    MissingNotifier,

    /// The configured quiet period does not fit the ledger's time arithmetic.
    #[error("Alert throttle duration out of range")]
    QuietPeriodOutOfRange,
}

/// The Supervisor runs poll cycles until shut down, feeding readings to the
/// record sink and the alert engine.
pub struct Supervisor {
    /// The application configuration.
    config: AppConfig,

    /// Names of the tags read each cycle, in configuration order.
    tag_names: Vec<String>,

    /// The controller read source.
    reader: Box<dyn ControllerReader>,

    /// The record sink receiving one row per cycle.
    sink: Box<dyn RecordSink>,

    /// The alert engine owning all cross-cycle alert state.
    engine: AlertEngine,

    /// A cancellation token for gracefully shutting down the Supervisor.
    cancellation_token: CancellationToken,
}

impl Supervisor {
    /// Creates a new `SupervisorBuilder` to configure and build a Supervisor
    /// instance.
    pub fn builder() -> SupervisorBuilder {
        SupervisorBuilder::new()
    }

    /// Runs poll cycles until ctrl-c or until the read source ends.
    pub async fn run(mut self) -> Result<(), SupervisorError> {
        let mut interval = tokio::time::interval(self.config.poll_interval_secs);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        let token = self.cancellation_token.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });

        let shutdown = self.cancellation_token.clone();
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Shutdown signal received, stopping poll loop.");
                    break;
                }
                _ = interval.tick() => {
                    match self.run_cycle().await {
                        Ok(()) => {}
                        Err(ControllerError::ReplayExhausted(cycles)) => {
                            tracing::info!(cycles, "Read source exhausted, stopping poll loop.");
                            break;
                        }
                        Err(e) => {
                            tracing::error!(
                                error = %e,
                                delay = ?self.config.reconnect_delay_secs,
                                "Controller transport error, backing off before next poll"
                            );
                            tokio::time::sleep(self.config.reconnect_delay_secs).await;
                        }
                    }
                }
            }
        }

        tracing::info!("Supervisor stopped.");
        Ok(())
    }

    /// One poll cycle: read every tag, persist the flattened row, evaluate
    /// alerts. Per-tag failures are logged and fed to the engine's health
    /// tracking; they never abort the cycle.
    async fn run_cycle(&mut self) -> Result<(), ControllerError> {
        let readings = self.reader.read_tags(&self.tag_names).await?;
        let now = Utc::now();

        let mut row = BTreeMap::new();
        for reading in &readings {
            match &reading.outcome {
                Ok(value) => row.extend(flatten(&reading.tag, value)),
                Err(error) => {
                    tracing::warn!(tag = %reading.tag, %error, "Tag read failed");
                }
            }
        }
        if let Err(e) = self.sink.append(now, &row).await {
            tracing::error!(error = %e, "Failed to append readings row");
        }

        let outcome = self.engine.process_cycle(&readings, now).await;
        if !outcome.events.is_empty() {
            tracing::info!(
                triggered = outcome.events.len(),
                dispatched = outcome.dispatched,
                suppressed = outcome.suppressed,
                failed = outcome.failed,
                "Alert conditions this cycle"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockall::predicate::always;

    use super::*;
    use crate::{
        config::TagSettings,
        models::{
            tag::TagConfig,
            value::{Scalar, TagValue},
            TagReading,
        },
        notification::ChannelConfig,
        persistence::{error::PersistenceError, traits::MockRecordSink},
        providers::{traits::MockControllerReader, ControllerConfig},
        test_helpers::RecordingNotifier,
    };

    fn test_config() -> AppConfig {
        AppConfig {
            poll_interval_secs: Duration::from_secs(5),
            reconnect_delay_secs: Duration::from_secs(1),
            max_retries: 3,
            alert_throttle_secs: Duration::from_secs(1800),
            log_dir: "logs".into(),
            recipients: vec!["ops@example.com".to_string()],
            channel: ChannelConfig::Desktop(crate::notification::DesktopClientConfig {
                command: "true".to_string(),
                timeout_secs: 5,
            }),
            controller: ControllerConfig::Replay { path: "readings.json".into() },
            tags_config_path: "configs/tags.yaml".into(),
        }
    }

    fn test_settings() -> TagSettings {
        TagSettings {
            tags: vec![TagConfig { name: "Line_Pressure".to_string(), critical: false }],
            rules: std::collections::HashMap::new(),
        }
    }

    fn build_supervisor(
        reader: MockControllerReader,
        sink: MockRecordSink,
    ) -> Supervisor {
        Supervisor::builder()
            .config(test_config())
            .tag_settings(test_settings())
            .reader(Box::new(reader))
            .sink(Box::new(sink))
            .notifier(std::sync::Arc::new(RecordingNotifier::new()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn cycle_appends_flattened_readings() {
        let mut reader = MockControllerReader::new();
        reader.expect_read_tags().times(1).returning(|_| {
            Ok(vec![TagReading::ok("Line_Pressure", TagValue::Scalar(Scalar::Float(31.0)))])
        });

        let mut sink = MockRecordSink::new();
        sink.expect_append()
            .with(always(), mockall::predicate::function(|row: &BTreeMap<String, Scalar>| {
                row.get("Line_Pressure") == Some(&Scalar::Float(31.0))
            }))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut supervisor = build_supervisor(reader, sink);
        supervisor.run_cycle().await.unwrap();
    }

    #[tokio::test]
    async fn sink_failure_does_not_abort_the_cycle() {
        let mut reader = MockControllerReader::new();
        reader.expect_read_tags().times(1).returning(|_| {
            Ok(vec![TagReading::ok("Line_Pressure", TagValue::Scalar(Scalar::Float(31.0)))])
        });

        let mut sink = MockRecordSink::new();
        sink.expect_append().times(1).returning(|_, _| {
            Err(PersistenceError::Io(std::io::Error::other("disk full")))
        });

        let mut supervisor = build_supervisor(reader, sink);
        assert!(supervisor.run_cycle().await.is_ok());
    }

    #[tokio::test]
    async fn transport_error_propagates_for_backoff() {
        let mut reader = MockControllerReader::new();
        reader
            .expect_read_tags()
            .times(1)
            .returning(|_| Err(ControllerError::Unreachable("no route to host".to_string())));

        let sink = MockRecordSink::new();
        let mut supervisor = build_supervisor(reader, sink);
        assert!(matches!(
            supervisor.run_cycle().await,
            Err(ControllerError::Unreachable(_))
        ));
    }

    #[tokio::test]
    async fn failed_readings_still_produce_a_row() {
        let mut reader = MockControllerReader::new();
        reader.expect_read_tags().times(1).returning(|_| {
            Ok(vec![TagReading::failed("Line_Pressure", "tag not found")])
        });

        let mut sink = MockRecordSink::new();
        sink.expect_append()
            .with(always(), mockall::predicate::function(|row: &BTreeMap<String, Scalar>| {
                row.is_empty()
            }))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut supervisor = build_supervisor(reader, sink);
        supervisor.run_cycle().await.unwrap();
    }
}
