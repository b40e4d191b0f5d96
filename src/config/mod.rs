//! Configuration module for tagwatch.

mod app_config;
mod helpers;
mod tag_loader;

pub use app_config::AppConfig;
pub use helpers::{deserialize_duration_from_seconds, serialize_duration_to_seconds};
pub use tag_loader::{RangeRuleEntry, TagConfigFile, TagLoader, TagLoaderError, TagSettings};
