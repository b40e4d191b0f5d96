//! The record persistence boundary.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

use crate::{models::value::Scalar, persistence::error::PersistenceError};

/// Accepts one timestamped row of flattened readings per poll cycle.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Appends one row. The first call fixes the column set; keys appearing
    /// in later rows only are the caller's problem and may be dropped.
    async fn append(
        &mut self,
        timestamp: DateTime<Utc>,
        row: &BTreeMap<String, Scalar>,
    ) -> Result<(), PersistenceError>;
}
