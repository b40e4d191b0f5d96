#![warn(missing_docs)]
//! Tagwatch polls an industrial controller for named tags, logs readings to
//! daily CSV files, and raises throttled notifications when values go out of
//! range or critical tags become repeatedly unreadable.

pub mod cmd;
pub mod config;
pub mod engine;
pub mod models;
pub mod notification;
pub mod persistence;
pub mod providers;
pub mod supervisor;
pub mod test_helpers;
