//! Data models for the tagwatch application.

pub mod alert;
pub mod notification;
pub mod reading;
pub mod tag;
pub mod value;

pub use alert::{AlertEvent, AlertReason};
pub use notification::AlertMessage;
pub use reading::TagReading;
pub use tag::{RangeRule, TagConfig};
pub use value::{Scalar, TagValue};
