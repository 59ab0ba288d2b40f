//! Error types for table output.

use std::path::PathBuf;
use thiserror::Error;

use osm_model::Table;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output directory.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a table file.
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to write a row.
    #[error("failed to write {table} row: {source}")]
    Write {
        table: Table,
        #[source]
        source: csv::Error,
    },

    /// Failed to flush buffered rows.
    #[error("failed to flush {table}: {source}")]
    Flush {
        table: Table,
        #[source]
        source: std::io::Error,
    },

    /// Table file missing when counting rows.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read back a table file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
