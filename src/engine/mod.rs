//! The alerting engine: flattening, health tracking, range evaluation,
//! throttling, and the per-cycle orchestration that ties them together.

pub mod alert_manager;
pub mod flatten;
pub mod health;
pub mod range;
pub mod throttle;
