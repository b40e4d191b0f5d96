//! Per-cycle alert evaluation and throttled dispatch.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::{DateTime, Duration, Utc};

use crate::{
    engine::{
        flatten::flatten,
        health::{Escalation, HealthTracker},
        range::{self, Verdict},
        throttle::ThrottleLedger,
    },
    models::{
        alert::{AlertEvent, AlertReason},
        notification::AlertMessage,
        reading::TagReading,
        tag::RangeRule,
    },
    notification::traits::Notifier,
};

/// What one cycle's alert evaluation produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleOutcome {
    /// Every alert condition triggered this cycle, throttled or not.
    pub events: Vec<AlertEvent>,

    /// Notifications handed to the channel and acknowledged.
    pub dispatched: usize,

    /// Triggered conditions suppressed by the quiet period.
    pub suppressed: usize,

    /// Dispatch attempts that failed. Their throttle keys stay eligible, so
    /// the next qualifying cycle retries the send.
    pub failed: usize,
}

/// The AlertEngine drives health tracking, range evaluation, throttling and
/// notification dispatch for each poll cycle. It owns every piece of
/// cross-cycle alert state; the poll loop holds one instance for the process
/// lifetime and calls [`AlertEngine::process_cycle`] once per cycle.
pub struct AlertEngine {
    /// The configured notification channel.
    notifier: Arc<dyn Notifier>,

    /// Tags whose consecutive read failures escalate.
    critical_tags: HashSet<String>,

    /// Range rules keyed by tag name or flattened sub-field key.
    rules: HashMap<String, RangeRule>,

    /// Consecutive-failure counters for critical tags.
    health: HealthTracker,

    /// Last-notified timestamps per alert key.
    ledger: ThrottleLedger,

    /// Minimum time between two notifications for the same alert key.
    quiet_period: Duration,

    /// Recipients for every alert notification.
    recipients: Vec<String>,
}

impl AlertEngine {
    /// Creates a new engine. `max_retries` and `quiet_period` are fixed for
    /// the engine's lifetime; changing them requires a restart.
    pub fn new(
        notifier: Arc<dyn Notifier>,
        critical_tags: HashSet<String>,
        rules: HashMap<String, RangeRule>,
        max_retries: u32,
        quiet_period: Duration,
        recipients: Vec<String>,
    ) -> Self {
        Self {
            notifier,
            critical_tags,
            rules,
            health: HealthTracker::new(max_retries),
            ledger: ThrottleLedger::new(),
            quiet_period,
            recipients,
        }
    }

    /// Evaluates one poll cycle's readings and dispatches qualifying alerts.
    ///
    /// `now` is the cycle's observation time, supplied by the caller so the
    /// quiet-period arithmetic stays deterministic. One tag's failure never
    /// prevents evaluation of the others.
    pub async fn process_cycle(
        &mut self,
        readings: &[TagReading],
        now: DateTime<Utc>,
    ) -> CycleOutcome {
        let mut triggered = Vec::new();

        for reading in readings {
            if self.critical_tags.contains(&reading.tag) {
                if let Escalation::Escalate { failures } =
                    self.health.record_outcome(&reading.tag, reading.is_ok())
                {
                    triggered.push(AlertEvent {
                        key: reading.tag.clone(),
                        reason: AlertReason::CriticalFailure { failures },
                        timestamp: now,
                    });
                }
            }

            let Ok(value) = &reading.outcome else {
                continue;
            };
            for (key, scalar) in flatten(&reading.tag, value) {
                let Some(rule) = self.rules.get(&key) else {
                    continue;
                };
                if let Verdict::OutOfRange { value } = range::evaluate(Some(&scalar), rule) {
                    triggered.push(AlertEvent {
                        key,
                        reason: AlertReason::OutOfRange { value, rule: *rule },
                        timestamp: now,
                    });
                }
            }
        }

        let mut outcome = CycleOutcome::default();
        for event in &triggered {
            self.dispatch(event, now, &mut outcome).await;
        }
        outcome.events = triggered;
        outcome
    }

    /// Sends one event through the throttle and the notifier. The ledger is
    /// updated only after the channel acknowledges the send.
    async fn dispatch(&mut self, event: &AlertEvent, now: DateTime<Utc>, outcome: &mut CycleOutcome) {
        let throttle_key = event.throttle_key();
        if !self.ledger.should_notify(&throttle_key, now, self.quiet_period) {
            tracing::debug!(key = %event.key, "Alert suppressed by quiet period");
            outcome.suppressed += 1;
            return;
        }

        let message = AlertMessage {
            subject: event.subject(),
            body: event.body(),
            recipients: self.recipients.clone(),
            attachments: Vec::new(),
        };

        match self.notifier.send(&message).await {
            Ok(()) => {
                self.ledger.record_notified(&throttle_key, now);
                tracing::info!(key = %event.key, "Alert notification sent");
                outcome.dispatched += 1;
            }
            Err(e) => {
                // Ledger untouched: the next qualifying cycle retries.
                tracing::error!(key = %event.key, error = %e, "Failed to dispatch alert notification");
                outcome.failed += 1;
            }
        }
    }
}
