//! Alert events produced by the engine.

use chrono::{DateTime, Utc};

use crate::models::tag::RangeRule;

/// Why an alert fired.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertReason {
    /// A critical tag failed to read this many cycles in a row.
    CriticalFailure {
        /// The length of the failure streak when the threshold was reached.
        failures: u32,
    },

    /// A ranged key's value fell outside its configured bounds.
    OutOfRange {
        /// The coerced numeric value that violated the rule.
        value: f64,
        /// The rule that was violated.
        rule: RangeRule,
    },
}

/// A single triggered alert condition, the unit handed to the notifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    /// The alert key: a tag name for critical failures, a rule key (tag name
    /// or flattened sub-field key) for range violations.
    pub key: String,

    /// What triggered the alert.
    pub reason: AlertReason,

    /// When the condition was observed.
    pub timestamp: DateTime<Utc>,
}

impl AlertEvent {
    /// The ledger key this event throttles under.
    ///
    /// Critical-failure and range alerts for the same tag use disjoint keys,
    /// so the two families cool down independently.
    pub fn throttle_key(&self) -> String {
        match self.reason {
            AlertReason::CriticalFailure { .. } => format!("critical:{}", self.key),
            AlertReason::OutOfRange { .. } => format!("range:{}", self.key),
        }
    }

    /// The notification subject line.
    pub fn subject(&self) -> String {
        match self.reason {
            AlertReason::CriticalFailure { .. } => {
                format!("PLC ALERT: {} unreadable", self.key)
            }
            AlertReason::OutOfRange { .. } => format!("PLC ALERT: {}", self.key),
        }
    }

    /// The notification body text.
    pub fn body(&self) -> String {
        let observed = self.timestamp.format("%Y-%m-%d %H:%M:%S");
        match &self.reason {
            AlertReason::CriticalFailure { failures } => format!(
                "Critical tag {} failed to read {} consecutive times (observed {})",
                self.key, failures, observed
            ),
            AlertReason::OutOfRange { value, rule } => {
                let bounds = match (rule.min, rule.max) {
                    (Some(min), Some(max)) => format!("allowed {} to {}", min, max),
                    (Some(min), None) => format!("minimum {}", min),
                    (None, Some(max)) => format!("maximum {}", max),
                    (None, None) => "no bounds".to_string(),
                };
                format!(
                    "Alert: {} value {} out of range ({}, observed {})",
                    self.key, value, bounds, observed
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 6, 30, 0).unwrap()
    }

    #[test]
    fn throttle_keys_are_disjoint_per_family() {
        let critical = AlertEvent {
            key: "Motor_Status_UDT".to_string(),
            reason: AlertReason::CriticalFailure { failures: 3 },
            timestamp: at(),
        };
        let range = AlertEvent {
            key: "Motor_Status_UDT".to_string(),
            reason: AlertReason::OutOfRange { value: 12.0, rule: RangeRule::default() },
            timestamp: at(),
        };
        assert_eq!(critical.throttle_key(), "critical:Motor_Status_UDT");
        assert_eq!(range.throttle_key(), "range:Motor_Status_UDT");
        assert_ne!(critical.throttle_key(), range.throttle_key());
    }

    #[test]
    fn renders_out_of_range_body() {
        let event = AlertEvent {
            key: "Line_Pressure".to_string(),
            reason: AlertReason::OutOfRange {
                value: 25.0,
                rule: RangeRule { min: Some(30.0), max: None },
            },
            timestamp: at(),
        };
        assert_eq!(event.subject(), "PLC ALERT: Line_Pressure");
        let body = event.body();
        assert!(body.contains("25"));
        assert!(body.contains("minimum 30"));
        assert!(body.contains("2026-08-07 06:30:00"));
    }

    #[test]
    fn renders_critical_failure_body() {
        let event = AlertEvent {
            key: "Drive_Parameters_UDT".to_string(),
            reason: AlertReason::CriticalFailure { failures: 3 },
            timestamp: at(),
        };
        assert_eq!(event.subject(), "PLC ALERT: Drive_Parameters_UDT unreadable");
        assert!(event.body().contains("3 consecutive times"));
    }
}
