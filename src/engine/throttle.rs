//! Quiet-period tracking for alert notifications.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

/// Remembers when each alert key last produced a notification.
///
/// A key with no entry has never notified and always qualifies. Entries are
/// written only after a dispatch succeeds, so a failed send leaves the key
/// eligible on the next qualifying cycle.
#[derive(Debug, Default)]
pub struct ThrottleLedger {
    last_notified: HashMap<String, DateTime<Utc>>,
}

impl ThrottleLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a notification for `key` at `now` clears the quiet period.
    ///
    /// Strictly more than `quiet_period` must have elapsed since the last
    /// recorded notification; a notification exactly at the boundary is
    /// still suppressed.
    pub fn should_notify(&self, key: &str, now: DateTime<Utc>, quiet_period: Duration) -> bool {
        match self.last_notified.get(key) {
            None => true,
            Some(last) => now - *last > quiet_period,
        }
    }

    /// Records a successful dispatch for `key` at `now`.
    pub fn record_notified(&mut self, key: &str, now: DateTime<Utc>) {
        self.last_notified.insert(key.to_string(), now);
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
    }

    #[test]
    fn unseen_key_always_qualifies() {
        let ledger = ThrottleLedger::new();
        assert!(ledger.should_notify("range:Line_Pressure", t0(), Duration::minutes(30)));
    }

    #[test]
    fn quiet_period_suppresses_until_strictly_elapsed() {
        let mut ledger = ThrottleLedger::new();
        let quiet = Duration::minutes(30);
        ledger.record_notified("range:Line_Pressure", t0());

        assert!(!ledger.should_notify("range:Line_Pressure", t0() + Duration::minutes(29), quiet));
        assert!(!ledger.should_notify("range:Line_Pressure", t0() + Duration::minutes(30), quiet));
        assert!(ledger.should_notify("range:Line_Pressure", t0() + Duration::minutes(31), quiet));
    }

    #[test]
    fn keys_throttle_independently() {
        let mut ledger = ThrottleLedger::new();
        let quiet = Duration::minutes(30);
        ledger.record_notified("range:A", t0());
        assert!(!ledger.should_notify("range:A", t0() + Duration::minutes(5), quiet));
        assert!(ledger.should_notify("range:B", t0() + Duration::minutes(5), quiet));
    }

    #[test]
    fn recording_again_moves_the_window() {
        let mut ledger = ThrottleLedger::new();
        let quiet = Duration::minutes(30);
        ledger.record_notified("critical:Motor", t0());
        ledger.record_notified("critical:Motor", t0() + Duration::minutes(40));
        assert!(!ledger.should_notify("critical:Motor", t0() + Duration::minutes(60), quiet));
        assert!(ledger.should_notify("critical:Motor", t0() + Duration::minutes(71), quiet));
    }
}
