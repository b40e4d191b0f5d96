//! Daily CSV record sink.
//!
//! Appends one row per poll cycle to `<log_dir>/<YYYY-MM-DD>.csv`, starting
//! a new file with a header line each day. The column set is frozen from the
//! first cycle's flattened key union; keys that first appear in later cycles
//! are dropped from rows with a warning.

use std::{
    collections::BTreeMap,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    models::value::Scalar,
    persistence::{error::PersistenceError, traits::RecordSink},
};

/// Writes daily CSV log files under a configured directory.
pub struct CsvLogSink {
    log_dir: PathBuf,
    columns: Option<Vec<String>>,
}

impl CsvLogSink {
    /// Creates a sink writing under `log_dir`. The directory is created on
    /// first append.
    pub fn new(log_dir: PathBuf) -> Self {
        Self { log_dir, columns: None }
    }

    fn file_path(&self, timestamp: DateTime<Utc>) -> PathBuf {
        self.log_dir.join(format!("{}.csv", timestamp.format("%Y-%m-%d")))
    }

    fn escape(field: &str) -> String {
        if field.contains([',', '"', '\n']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn write_row(
        path: &Path,
        columns: &[String],
        timestamp: DateTime<Utc>,
        row: &BTreeMap<String, Scalar>,
    ) -> Result<(), PersistenceError> {
        let new_file = !path.exists();
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        if new_file {
            let mut header = vec!["Timestamp".to_string()];
            header.extend(columns.iter().map(|c| Self::escape(c)));
            writeln!(file, "{}", header.join(","))?;
        }

        let mut fields = vec![timestamp.format("%Y-%m-%d %H:%M:%S").to_string()];
        for column in columns {
            fields.push(row.get(column).map(|s| Self::escape(&s.to_string())).unwrap_or_default());
        }
        writeln!(file, "{}", fields.join(","))?;
        Ok(())
    }
}

#[async_trait]
impl RecordSink for CsvLogSink {
    async fn append(
        &mut self,
        timestamp: DateTime<Utc>,
        row: &BTreeMap<String, Scalar>,
    ) -> Result<(), PersistenceError> {
        if self.columns.is_none() {
            let columns: Vec<String> = row.keys().cloned().collect();
            tracing::info!(columns = columns.len(), "Log column set fixed from first cycle");
            self.columns = Some(columns);
        }
        let columns = self.columns.as_deref().unwrap_or(&[]);

        let late: Vec<&String> =
            row.keys().filter(|key| !columns.contains(*key)).collect();
        if !late.is_empty() {
            tracing::warn!(keys = ?late, "Keys appeared after the column set was fixed, dropping");
        }

        std::fs::create_dir_all(&self.log_dir)?;
        Self::write_row(&self.file_path(timestamp), columns, timestamp, row)?;
        Ok(())
    }
}
