//! Integration tests for the alert engine's cycle-level behavior.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::{DateTime, Duration, TimeZone, Utc};
use tagwatch::{
    engine::alert_manager::AlertEngine,
    models::{RangeRule, Scalar, TagReading, TagValue},
    test_helpers::{composite, scalar, RecordingNotifier},
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 6, 0, 0).unwrap()
}

fn pressure_rules() -> HashMap<String, RangeRule> {
    let mut rules = HashMap::new();
    rules.insert("Line_Pressure".to_string(), RangeRule { min: Some(30.0), max: None });
    rules
}

fn engine_with(
    notifier: Arc<RecordingNotifier>,
    critical: HashSet<String>,
    rules: HashMap<String, RangeRule>,
) -> AlertEngine {
    AlertEngine::new(
        notifier,
        critical,
        rules,
        3,
        Duration::minutes(30),
        vec!["ops@example.com".to_string()],
    )
}

#[tokio::test]
async fn range_alerts_follow_the_quiet_period_across_cycles() {
    let notifier = Arc::new(RecordingNotifier::new());
    let mut engine = engine_with(notifier.clone(), HashSet::new(), pressure_rules());

    // Cycle 1: out of range with an empty ledger notifies.
    let outcome = engine
        .process_cycle(&[TagReading::ok("Line_Pressure", scalar(25.0))], t0())
        .await;
    assert_eq!(outcome.dispatched, 1);

    // Cycle 2: still out of range five minutes later, suppressed.
    let outcome = engine
        .process_cycle(
            &[TagReading::ok("Line_Pressure", scalar(25.0))],
            t0() + Duration::minutes(5),
        )
        .await;
    assert_eq!(outcome.dispatched, 0);
    assert_eq!(outcome.suppressed, 1);

    // Cycle 3: back in range, nothing triggers and the ledger is untouched.
    let outcome = engine
        .process_cycle(
            &[TagReading::ok("Line_Pressure", scalar(35.0))],
            t0() + Duration::minutes(40),
        )
        .await;
    assert!(outcome.events.is_empty());

    // Cycle 4: out of range again, 50 minutes after the first send.
    let outcome = engine
        .process_cycle(
            &[TagReading::ok("Line_Pressure", scalar(20.0))],
            t0() + Duration::minutes(50),
        )
        .await;
    assert_eq!(outcome.dispatched, 1);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].subject, "PLC ALERT: Line_Pressure");
    assert!(sent[0].body.contains("25"));
    assert!(sent[1].body.contains("20"));
}

#[tokio::test]
async fn failed_dispatch_keeps_the_key_eligible() {
    let notifier = Arc::new(RecordingNotifier::new());
    let mut engine = engine_with(notifier.clone(), HashSet::new(), pressure_rules());

    notifier.set_failing(true);
    let outcome = engine
        .process_cycle(&[TagReading::ok("Line_Pressure", scalar(25.0))], t0())
        .await;
    assert_eq!(outcome.failed, 1);
    assert!(notifier.sent().is_empty());

    // The next qualifying cycle retries even though the quiet period has not
    // elapsed since the failed attempt.
    notifier.set_failing(false);
    let outcome = engine
        .process_cycle(
            &[TagReading::ok("Line_Pressure", scalar(25.0))],
            t0() + Duration::minutes(1),
        )
        .await;
    assert_eq!(outcome.dispatched, 1);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn critical_escalation_notifies_once_per_streak() {
    let notifier = Arc::new(RecordingNotifier::new());
    let mut engine = engine_with(
        notifier.clone(),
        HashSet::from(["Motor_Status_UDT".to_string()]),
        HashMap::new(),
    );

    let failed = [TagReading::failed("Motor_Status_UDT", "connection timed out")];

    // Two failures stay quiet, the third escalates.
    for minute in 0..2 {
        let outcome = engine.process_cycle(&failed, t0() + Duration::minutes(minute)).await;
        assert!(outcome.events.is_empty());
    }
    let outcome = engine.process_cycle(&failed, t0() + Duration::minutes(2)).await;
    assert_eq!(outcome.dispatched, 1);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "PLC ALERT: Motor_Status_UDT unreadable");
    assert_eq!(sent[0].recipients, vec!["ops@example.com".to_string()]);
}

#[tokio::test]
async fn composite_sub_field_rule_alerts_under_its_flattened_key() {
    let notifier = Arc::new(RecordingNotifier::new());
    let mut rules = HashMap::new();
    rules.insert(
        "Drive_Parameters_UDT.Speed".to_string(),
        RangeRule { min: None, max: Some(1800.0) },
    );
    let mut engine = engine_with(notifier.clone(), HashSet::new(), rules);

    let value = composite(&[
        ("Speed", scalar(1950.0)),
        ("Torque", scalar(80.0)),
    ]);
    let outcome = engine
        .process_cycle(&[TagReading::ok("Drive_Parameters_UDT", value)], t0())
        .await;

    assert_eq!(outcome.dispatched, 1);
    let sent = notifier.sent();
    assert_eq!(sent[0].subject, "PLC ALERT: Drive_Parameters_UDT.Speed");
    assert!(sent[0].body.contains("1950"));
    assert!(sent[0].body.contains("maximum 1800"));
}

#[tokio::test]
async fn unreadable_ranged_value_is_skipped_not_alerted() {
    let notifier = Arc::new(RecordingNotifier::new());
    let mut engine = engine_with(notifier.clone(), HashSet::new(), pressure_rules());

    let readings = [TagReading::ok(
        "Line_Pressure",
        TagValue::Scalar(Scalar::Text("Error".to_string())),
    )];
    let outcome = engine.process_cycle(&readings, t0()).await;

    assert!(outcome.events.is_empty());
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn one_tag_failure_never_blocks_another_tags_alert() {
    let notifier = Arc::new(RecordingNotifier::new());
    let mut engine = engine_with(
        notifier.clone(),
        HashSet::from(["Motor_Status_UDT".to_string()]),
        pressure_rules(),
    );

    let readings = [
        TagReading::failed("Motor_Status_UDT", "tag not found"),
        TagReading::ok("Line_Pressure", scalar(25.0)),
    ];
    let outcome = engine.process_cycle(&readings, t0()).await;

    // The motor failure only bumps its health counter; the pressure alert
    // still goes out.
    assert_eq!(outcome.dispatched, 1);
    assert_eq!(notifier.sent()[0].subject, "PLC ALERT: Line_Pressure");
}
