//! Record sinks for the five output tables.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{Writer, WriterBuilder};
use tracing::{debug, info};

use osm_model::{ElementRecord, EntityRow, Table};

use crate::error::{OutputError, Result};
use crate::types::{RowCounts, TableFileNames};

/// Destination for cleaned records.
pub trait RecordSink {
    fn write_record(&mut self, record: &ElementRecord) -> Result<()>;

    /// Rows accepted so far.
    fn row_counts(&self) -> &RowCounts;
}

/// Counts rows without writing anything. Used for dry runs.
#[derive(Debug, Default)]
pub struct DryRunSink {
    rows: RowCounts,
}

impl DryRunSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for DryRunSink {
    fn write_record(&mut self, record: &ElementRecord) -> Result<()> {
        self.rows.add_record(record);
        Ok(())
    }

    fn row_counts(&self) -> &RowCounts {
        &self.rows
    }
}

/// Writes each table as comma-separated rows with a header line.
pub struct CsvSink<W: Write> {
    nodes: Writer<W>,
    nodes_tags: Writer<W>,
    ways: Writer<W>,
    ways_nodes: Writer<W>,
    ways_tags: Writer<W>,
    rows: RowCounts,
}

impl CsvSink<File> {
    /// Creates the table files in `dir`, truncating existing ones.
    pub fn create(dir: &Path, names: &TableFileNames) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let sink = Self::with_writers(|table| {
            let path = names.path_in(dir, table);
            File::create(&path).map_err(|source| OutputError::Create {
                path,
                source: source.into(),
            })
        })?;
        info!(dir = %dir.display(), "created output tables");
        Ok(sink)
    }
}

impl<W: Write> CsvSink<W> {
    /// Builds a sink from one writer per table and writes the header rows.
    pub fn with_writers(mut open: impl FnMut(Table) -> Result<W>) -> Result<Self> {
        let mut build = |table: Table| -> Result<Writer<W>> {
            let mut writer = WriterBuilder::new().has_headers(false).from_writer(open(table)?);
            writer
                .write_record(table.columns())
                .map_err(|source| OutputError::Write { table, source })?;
            Ok(writer)
        };
        Ok(Self {
            nodes: build(Table::Nodes)?,
            nodes_tags: build(Table::NodesTags)?,
            ways: build(Table::Ways)?,
            ways_nodes: build(Table::WaysNodes)?,
            ways_tags: build(Table::WaysTags)?,
            rows: RowCounts::new(),
        })
    }

    fn writer(&mut self, table: Table) -> &mut Writer<W> {
        match table {
            Table::Nodes => &mut self.nodes,
            Table::NodesTags => &mut self.nodes_tags,
            Table::Ways => &mut self.ways,
            Table::WaysNodes => &mut self.ways_nodes,
            Table::WaysTags => &mut self.ways_tags,
        }
    }

    fn write_row(&mut self, table: Table, row: &EntityRow) -> Result<()> {
        let values = row.values(table.columns());
        self.writer(table)
            .write_record(&values)
            .map_err(|source| OutputError::Write { table, source })
    }

    /// Flushes every table and returns the underlying writers.
    pub fn finish(self) -> Result<Vec<(Table, W)>> {
        let Self {
            nodes,
            nodes_tags,
            ways,
            ways_nodes,
            ways_tags,
            rows,
        } = self;
        debug!(rows = rows.total(), "flushing output tables");
        [
            (Table::Nodes, nodes),
            (Table::NodesTags, nodes_tags),
            (Table::Ways, ways),
            (Table::WaysNodes, ways_nodes),
            (Table::WaysTags, ways_tags),
        ]
        .into_iter()
        .map(|(table, mut writer)| -> Result<(Table, W)> {
            writer
                .flush()
                .map_err(|source| OutputError::Flush { table, source })?;
            let inner = writer.into_inner().map_err(|err| OutputError::Flush {
                table,
                source: std::io::Error::new(err.error().kind(), err.error().to_string()),
            })?;
            Ok((table, inner))
        })
        .collect()
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &ElementRecord) -> Result<()> {
        let (entity_table, tag_table) = match record {
            ElementRecord::Node(_) => (Table::Nodes, Table::NodesTags),
            ElementRecord::Way(_) => (Table::Ways, Table::WaysTags),
        };
        self.write_row(entity_table, record.row())?;
        for member in record.way_nodes() {
            self.ways_nodes
                .serialize(member)
                .map_err(|source| OutputError::Write {
                    table: Table::WaysNodes,
                    source,
                })?;
        }
        for tag in record.tags() {
            self.writer(tag_table)
                .serialize(tag)
                .map_err(|source| OutputError::Write {
                    table: tag_table,
                    source,
                })?;
        }
        self.rows.add_record(record);
        Ok(())
    }

    fn row_counts(&self) -> &RowCounts {
        &self.rows
    }
}
