//! Durable persistence of poll-cycle readings.

pub mod csv_log;
pub mod error;
pub mod traits;

pub use csv_log::CsvLogSink;
pub use error::PersistenceError;
pub use traits::RecordSink;
