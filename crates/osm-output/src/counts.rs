//! Row counts of written table files.

use std::path::Path;

use osm_model::Table;

use crate::error::{OutputError, Result};
use crate::types::{RowCounts, TableFileNames};

/// Counts the data rows of a written table file.
pub fn count_csv_rows(path: &Path) -> Result<u64> {
    if !path.exists() {
        return Err(OutputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|source| OutputError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let mut rows = 0;
    for record in reader.records() {
        record.map_err(|source| OutputError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        rows += 1;
    }
    Ok(rows)
}

/// Counts the data rows of all five table files in `dir`.
pub fn table_row_counts(dir: &Path, names: &TableFileNames) -> Result<RowCounts> {
    let mut counts = RowCounts::new();
    for table in Table::ALL {
        counts.set(table, count_csv_rows(&names.path_in(dir, table))?);
    }
    Ok(counts)
}
