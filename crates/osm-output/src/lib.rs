//! Table output for cleaned OSM records.
//!
//! A [`RecordSink`] receives every element record that passed the schema
//! gate. [`CsvSink`] writes the five tables, [`DryRunSink`] only counts.

pub mod counts;
pub mod error;
pub mod sink;
pub mod types;

// === Errors ===
pub use error::{OutputError, Result};

// === Sinks ===
pub use sink::{CsvSink, DryRunSink, RecordSink};

// === Counting ===
pub use counts::{count_csv_rows, table_row_counts};

// === Types ===
pub use types::{RowCounts, TableFileNames};
